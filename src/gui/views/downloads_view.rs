//! Downloads view: URL entry, format choice, progress, and the queue

use crate::downloader::MediaFormat;
use crate::gui::app::Message;
use crate::gui::theme;
use crate::queue::QueueSummary;
use iced::widget::{
    button, column, container, pick_list, progress_bar, row, scrollable, text, text_input, Space,
};
use iced::{Alignment, Element, Length};

pub fn downloads_view(
    url_value: &str,
    selected_format: MediaFormat,
    progress: f32,
    status_message: &str,
    summary: &QueueSummary,
    pending: &[String],
    recent: &[String],
) -> Element<'static, Message> {
    // URL entry card
    let input_row = row![
        text_input("Paste a video URL here...", url_value)
            .on_input(Message::UrlInputChanged)
            .on_submit(Message::AddToQueue)
            .padding(12)
            .width(Length::Fill),
        button(text("Paste").size(14))
            .on_press(Message::PasteFromClipboard)
            .padding([8, 12])
            .style(iced::theme::Button::Custom(Box::new(
                theme::SecondaryButton
            ))),
        button(text("Clear").size(14))
            .on_press(Message::ClearUrlInput)
            .padding([8, 12])
            .style(iced::theme::Button::Custom(Box::new(
                theme::SecondaryButton
            ))),
    ]
    .spacing(8)
    .align_items(Alignment::Center);

    let submit_row = row![
        pick_list(
            vec![MediaFormat::Video, MediaFormat::Audio],
            Some(selected_format),
            Message::FormatSelected,
        )
        .padding([8, 12])
        .width(Length::Fixed(120.0)),
        Space::with_width(Length::Fill),
        button(text("Add to Queue").size(16))
            .on_press_maybe(if url_value.trim().is_empty() {
                None
            } else {
                Some(Message::AddToQueue)
            })
            .padding([12, 24])
            .style(iced::theme::Button::Custom(Box::new(theme::PrimaryButton))),
    ]
    .spacing(12)
    .align_items(Alignment::Center);

    let entry_card = container(
        column![
            text("Queue a Download").size(24),
            input_row,
            submit_row,
        ]
        .spacing(16),
    )
    .padding(20)
    .width(Length::Fill)
    .style(iced::theme::Container::Custom(Box::new(
        theme::CardContainer,
    )));

    // Progress card
    let progress_card = container(
        column![
            text("Download progress").size(14),
            progress_bar(0.0..=100.0, progress).height(Length::Fixed(12.0)),
            text(status_message.to_string())
                .size(14)
                .style(iced::theme::Text::Color(theme::PINK_900)),
            text(summary.to_string())
                .size(14)
                .style(iced::theme::Text::Color(theme::PURPLE_700)),
        ]
        .spacing(10),
    )
    .padding(20)
    .width(Length::Fill)
    .style(iced::theme::Container::Custom(Box::new(
        theme::CardContainer,
    )));

    // Waiting queue
    let queue_list: Element<'static, Message> = if pending.is_empty() {
        text("No downloads waiting")
            .size(14)
            .style(iced::theme::Text::Color(theme::TEXT_MUTED))
            .into()
    } else {
        let mut list = column![].spacing(4);
        for url in pending {
            list = list.push(text(url.clone()).size(14));
        }
        scrollable(list).height(Length::Fixed(100.0)).into()
    };

    let queue_card = container(column![text("Queue").size(14), queue_list].spacing(10))
        .padding(20)
        .width(Length::Fill)
        .style(iced::theme::Container::Custom(Box::new(
            theme::CardContainer,
        )));

    // Recent downloads
    let recent_list: Element<'static, Message> = if recent.is_empty() {
        text("Nothing downloaded yet")
            .size(14)
            .style(iced::theme::Text::Color(theme::TEXT_MUTED))
            .into()
    } else {
        let mut list = column![].spacing(4);
        for line in recent {
            list = list.push(text(line.clone()).size(14));
        }
        scrollable(list).height(Length::Fixed(100.0)).into()
    };

    let recent_card = container(column![text("Recent").size(14), recent_list].spacing(10))
        .padding(20)
        .width(Length::Fill)
        .style(iced::theme::Container::Custom(Box::new(
            theme::CardContainer,
        )));

    column![entry_card, progress_card, queue_card, recent_card]
        .spacing(16)
        .width(Length::Fill)
        .into()
}
