//! Settings view: download location and output folders

use crate::downloader::MediaFormat;
use crate::gui::app::Message;
use crate::gui::theme;
use iced::widget::{button, column, container, row, text, text_input};
use iced::{Alignment, Element, Length};

pub fn settings_view(download_location: &str) -> Element<'static, Message> {
    let location_row = row![
        text_input("Download location", download_location)
            .on_input(Message::DownloadLocationChanged)
            .padding(12)
            .width(Length::Fill),
        button(text("Browse").size(14))
            .on_press(Message::BrowseDownloadLocation)
            .padding([8, 12])
            .style(iced::theme::Button::Custom(Box::new(
                theme::SecondaryButton
            ))),
    ]
    .spacing(8)
    .align_items(Alignment::Center);

    let folders_row = row![
        button(text("Open Videos folder").size(14))
            .on_press(Message::OpenDownloadFolder(MediaFormat::Video))
            .padding([8, 12])
            .style(iced::theme::Button::Custom(Box::new(
                theme::SecondaryButton
            ))),
        button(text("Open Audios folder").size(14))
            .on_press(Message::OpenDownloadFolder(MediaFormat::Audio))
            .padding([8, 12])
            .style(iced::theme::Button::Custom(Box::new(
                theme::SecondaryButton
            ))),
    ]
    .spacing(8);

    let card = container(
        column![
            text("Settings").size(24),
            text("Where downloads land. Videos/ and Audios/ are created under this folder.")
                .size(14)
                .style(iced::theme::Text::Color(theme::TEXT_MUTED)),
            location_row,
            folders_row,
            button(text("Save").size(16))
                .on_press(Message::SaveSettings)
                .padding([12, 24])
                .style(iced::theme::Button::Custom(Box::new(theme::PrimaryButton))),
            text("The download location applies to new downloads after a restart.")
                .size(12)
                .style(iced::theme::Text::Color(theme::TEXT_MUTED)),
        ]
        .spacing(16),
    )
    .padding(20)
    .width(Length::Fill)
    .style(iced::theme::Container::Custom(Box::new(
        theme::CardContainer,
    )));

    column![card].width(Length::Fill).into()
}
