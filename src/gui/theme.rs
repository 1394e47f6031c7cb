//! Custom theme definitions for the application

use iced::widget::{button, container};
use iced::{Background, Border, Color, Shadow, Theme, Vector};

// --- Color Palette ---

// Soft pink/purple scheme, light background
pub const BACKGROUND: Color = Color::from_rgb(0.992, 0.949, 0.973); // Pink 50
pub const SURFACE: Color = Color::from_rgb(1.0, 1.0, 1.0);
pub const SURFACE_BORDER: Color = Color::from_rgb(0.898, 0.871, 0.922);

pub const PURPLE_500: Color = Color::from_rgb(0.545, 0.361, 0.965); // Primary actions
pub const PURPLE_700: Color = Color::from_rgb(0.427, 0.157, 0.851); // Hover state
pub const PURPLE_100: Color = Color::from_rgb(0.929, 0.906, 0.996); // Subtle backgrounds
pub const PINK_900: Color = Color::from_rgb(0.514, 0.094, 0.263); // Status text

pub const TEXT_PRIMARY: Color = Color::from_rgb(0.122, 0.161, 0.216);
pub const TEXT_MUTED: Color = Color::from_rgb(0.420, 0.447, 0.502);

pub const SUCCESS: Color = Color::from_rgb(0.063, 0.725, 0.506);
pub const DANGER: Color = Color::from_rgb(0.937, 0.267, 0.267);
pub const WHITE: Color = Color::from_rgb(1.0, 1.0, 1.0);

// --- Container Styles ---

pub struct MainContainer;

impl container::StyleSheet for MainContainer {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            text_color: Some(TEXT_PRIMARY),
            background: Some(Background::Color(BACKGROUND)),
            ..Default::default()
        }
    }
}

pub struct CardContainer;

impl container::StyleSheet for CardContainer {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            text_color: Some(TEXT_PRIMARY),
            background: Some(Background::Color(SURFACE)),
            border: Border {
                color: SURFACE_BORDER,
                width: 1.0,
                radius: 12.0.into(),
            },
            shadow: Shadow {
                color: Color::from_rgba(0.545, 0.361, 0.965, 0.12),
                offset: Vector::new(0.0, 4.0),
                blur_radius: 12.0,
            },
        }
    }
}

pub struct SidebarContainer;

impl container::StyleSheet for SidebarContainer {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        container::Appearance {
            text_color: Some(TEXT_PRIMARY),
            background: Some(Background::Color(PURPLE_100)),
            border: Border {
                color: SURFACE_BORDER,
                width: 1.0,
                radius: 0.0.into(),
            },
            ..Default::default()
        }
    }
}

// --- Button Styles ---

pub struct PrimaryButton;

impl button::StyleSheet for PrimaryButton {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(PURPLE_500)),
            text_color: WHITE,
            border: Border {
                radius: 10.0.into(),
                ..Default::default()
            },
            shadow: Shadow {
                color: Color::from_rgba(0.545, 0.361, 0.965, 0.3),
                offset: Vector::new(0.0, 2.0),
                blur_radius: 8.0,
            },
            shadow_offset: Vector::new(0.0, 0.0),
        }
    }

    fn hovered(&self, style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(PURPLE_700)),
            ..self.active(style)
        }
    }

    fn disabled(&self, style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(TEXT_MUTED)),
            ..self.active(style)
        }
    }
}

pub struct SecondaryButton;

impl button::StyleSheet for SecondaryButton {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(SURFACE)),
            text_color: PURPLE_700,
            border: Border {
                color: PURPLE_500,
                width: 1.0,
                radius: 10.0.into(),
            },
            ..Default::default()
        }
    }

    fn hovered(&self, style: &Self::Style) -> button::Appearance {
        button::Appearance {
            background: Some(Background::Color(PURPLE_100)),
            ..self.active(style)
        }
    }
}

/// Navigation buttons in the sidebar
pub enum SidebarButton {
    Active,
    Inactive,
}

impl button::StyleSheet for SidebarButton {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> button::Appearance {
        let (background, text_color) = match self {
            SidebarButton::Active => (Some(Background::Color(PURPLE_500)), WHITE),
            SidebarButton::Inactive => (None, TEXT_PRIMARY),
        };

        button::Appearance {
            background,
            text_color,
            border: Border {
                radius: 8.0.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn hovered(&self, style: &Self::Style) -> button::Appearance {
        match self {
            SidebarButton::Active => self.active(style),
            SidebarButton::Inactive => button::Appearance {
                background: Some(Background::Color(PURPLE_100)),
                ..self.active(style)
            },
        }
    }
}
