//! Main GUI application

use crate::backend::{BackendActor, BackendCommand, BackendEvent};
use crate::downloader::MediaFormat;
use crate::gui::clipboard;
use crate::gui::theme;
use crate::gui::views::{downloads_view, settings_view};
use crate::queue::{History, HistoryEvent, QueueSummary};
use crate::utils::{app_data_dir, AppSettings};
use iced::widget::{button, column, container, row, text};
use iced::{Application, Command, Element, Length, Subscription, Theme};
use std::path::PathBuf;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tracing::{error, warn};

const RECENT_LIMIT: usize = 8;

/// Main application state
pub struct TubeloadApp {
    // Backend channels; the runtime stays alive for the app lifetime so
    // backend tasks keep running between ticks
    command_tx: mpsc::Sender<BackendCommand>,
    event_rx: mpsc::Receiver<BackendEvent>,
    _runtime: Runtime,

    // UI state
    current_view: View,
    url_input: String,
    selected_format: MediaFormat,
    status_message: String,
    progress: f32,
    summary: QueueSummary,
    pending: Vec<String>,
    recent: Vec<String>,

    // Settings
    settings: AppSettings,
    download_location: String,
}

/// Application view
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Downloads,
    Settings,
}

/// Application messages
#[derive(Debug, Clone)]
pub enum Message {
    // Input events
    UrlInputChanged(String),
    FormatSelected(MediaFormat),
    AddToQueue,
    PasteFromClipboard,
    ClearUrlInput,

    // View navigation
    SwitchToDownloads,
    SwitchToSettings,

    // Settings
    DownloadLocationChanged(String),
    BrowseDownloadLocation,
    SaveSettings,
    OpenDownloadFolder(MediaFormat),

    // System
    Tick, // Drains backend events onto the UI thread
}

impl Application for TubeloadApp {
    type Executor = iced::executor::Default;
    type Message = Message;
    type Theme = Theme;
    type Flags = ();

    fn new(_flags: Self::Flags) -> (Self, Command<Message>) {
        let settings = AppSettings::load();

        let runtime = Runtime::new().expect("Failed to create tokio runtime");

        let (command_tx, command_rx) = mpsc::channel::<BackendCommand>(64);
        let (event_tx, event_rx) = mpsc::channel::<BackendEvent>(256);

        // Backend runs on the runtime; the GUI only talks over channels.
        let backend_settings = settings.clone();
        runtime.spawn(async move {
            let err_tx = event_tx.clone();
            match BackendActor::new(backend_settings, command_rx, event_tx).await {
                Ok(actor) => actor.run().await,
                Err(e) => {
                    error!("failed to start backend: {e:#}");
                    let _ = err_tx
                        .send(BackendEvent::Error(format!("Backend failed to start: {e}")))
                        .await;
                }
            }
        });

        let recent = runtime
            .block_on(async {
                let history = History::new(&app_data_dir()).await?;
                history.load().await
            })
            .map(|events| {
                events
                    .iter()
                    .rev()
                    .take(RECENT_LIMIT)
                    .map(history_line)
                    .collect()
            })
            .unwrap_or_else(|e| {
                warn!("could not load download history: {e}");
                Vec::new()
            });

        let download_location = settings.download_dir.to_string_lossy().to_string();

        let app = Self {
            command_tx,
            event_rx,
            _runtime: runtime,
            current_view: View::Downloads,
            url_input: String::new(),
            selected_format: MediaFormat::Video,
            status_message: "Idle".to_string(),
            progress: 0.0,
            summary: QueueSummary::default(),
            pending: Vec::new(),
            recent,
            settings,
            download_location,
        };

        (app, Command::none())
    }

    fn title(&self) -> String {
        String::from("Tubeload - Media Downloader")
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            // Input events
            Message::UrlInputChanged(url) => {
                self.url_input = url;
            }

            Message::FormatSelected(format) => {
                self.selected_format = format;
            }

            Message::AddToQueue => {
                let url = self.url_input.trim().to_string();
                if url.is_empty() {
                    return Command::none();
                }

                match self.command_tx.try_send(BackendCommand::Enqueue {
                    url: url.clone(),
                    format: self.selected_format,
                }) {
                    Ok(()) => {
                        self.url_input.clear();
                        self.status_message = format!("Queued: {url}");
                    }
                    Err(e) => {
                        warn!("failed to send enqueue command: {e}");
                        self.status_message = "Backend unavailable".to_string();
                    }
                }
            }

            Message::PasteFromClipboard => match clipboard::paste_text() {
                Ok(content) => self.url_input = content,
                Err(e) => self.status_message = e,
            },

            Message::ClearUrlInput => {
                self.url_input.clear();
            }

            // View navigation
            Message::SwitchToDownloads => {
                self.current_view = View::Downloads;
            }

            Message::SwitchToSettings => {
                self.current_view = View::Settings;
            }

            // Settings
            Message::DownloadLocationChanged(location) => {
                self.download_location = location;
            }

            Message::BrowseDownloadLocation => {
                if let Some(folder) = rfd::FileDialog::new()
                    .set_directory(&self.download_location)
                    .pick_folder()
                {
                    self.download_location = folder.to_string_lossy().to_string();
                }
            }

            Message::SaveSettings => {
                self.settings.download_dir = PathBuf::from(&self.download_location);
                match self.settings.save() {
                    Ok(()) => {
                        self.status_message = "Settings saved (applies on restart)".to_string()
                    }
                    Err(e) => {
                        warn!("failed to save settings: {e}");
                        self.status_message = format!("Could not save settings: {e}");
                    }
                }
            }

            Message::OpenDownloadFolder(format) => {
                if let Err(e) = self
                    .command_tx
                    .try_send(BackendCommand::OpenDownloadFolder(format))
                {
                    warn!("failed to send open-folder command: {e}");
                }
            }

            // System
            Message::Tick => {
                while let Ok(event) = self.event_rx.try_recv() {
                    self.apply_backend_event(event);
                }
            }
        }

        Command::none()
    }

    fn view(&self) -> Element<'_, Message> {
        let sidebar = container(
            column![
                container(text("Tubeload").size(22)).padding(16),
                button(text("Downloads").size(15))
                    .style(iced::theme::Button::Custom(Box::new(
                        if self.current_view == View::Downloads {
                            theme::SidebarButton::Active
                        } else {
                            theme::SidebarButton::Inactive
                        }
                    )))
                    .width(Length::Fill)
                    .padding(10)
                    .on_press(Message::SwitchToDownloads),
                button(text("Settings").size(15))
                    .style(iced::theme::Button::Custom(Box::new(
                        if self.current_view == View::Settings {
                            theme::SidebarButton::Active
                        } else {
                            theme::SidebarButton::Inactive
                        }
                    )))
                    .width(Length::Fill)
                    .padding(10)
                    .on_press(Message::SwitchToSettings),
            ]
            .spacing(8)
            .padding(8),
        )
        .width(Length::Fixed(160.0))
        .height(Length::Fill)
        .style(iced::theme::Container::Custom(Box::new(
            theme::SidebarContainer,
        )));

        let content = match self.current_view {
            View::Downloads => downloads_view(
                &self.url_input,
                self.selected_format,
                self.progress,
                &self.status_message,
                &self.summary,
                &self.pending,
                &self.recent,
            ),
            View::Settings => settings_view(&self.download_location),
        };

        let layout = row![
            sidebar,
            container(iced::widget::scrollable(content))
                .width(Length::Fill)
                .height(Length::Fill)
                .padding(20)
        ];

        container(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(iced::theme::Container::Custom(Box::new(
                theme::MainContainer,
            )))
            .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        iced::time::every(std::time::Duration::from_millis(100)).map(|_| Message::Tick)
    }

    fn theme(&self) -> Self::Theme {
        Theme::Light
    }
}

impl TubeloadApp {
    fn apply_backend_event(&mut self, event: BackendEvent) {
        match event {
            BackendEvent::DownloadStarted { url, .. } => {
                self.progress = 0.0;
                self.status_message = format!("Starting: {url}");
            }
            BackendEvent::DownloadProgress { percent, title } => {
                self.progress = percent;
                self.status_message = match title {
                    Some(title) => format!("Downloading: {title} - {percent:.1}%"),
                    None => format!("Downloading - {percent:.1}%"),
                };
            }
            BackendEvent::DownloadFinished { title } => {
                self.progress = 100.0;
                self.status_message = format!("Finished: {title}");
                self.recent.insert(0, format!("Done: {title}"));
                self.recent.truncate(RECENT_LIMIT);
            }
            BackendEvent::DownloadFailed { url, error } => {
                self.status_message = format!("Failed: {url} - {error}");
                self.recent.insert(0, format!("Failed: {url}"));
                self.recent.truncate(RECENT_LIMIT);
            }
            BackendEvent::QueueChanged { summary, pending } => {
                self.summary = summary;
                self.pending = pending;
            }
            BackendEvent::QueueIdle => {
                self.progress = 0.0;
                self.status_message = "Idle".to_string();
            }
            BackendEvent::Error(message) => {
                self.status_message = message;
            }
        }
    }
}

fn history_line(event: &HistoryEvent) -> String {
    match event {
        HistoryEvent::Finished { title, .. } => format!("Done: {title}"),
        HistoryEvent::Failed { url, .. } => format!("Failed: {url}"),
    }
}
