use std::sync::Arc;

use eframe::egui::{self, load::SizeHint, Color32, Rounding, Stroke};
use news_core::article::format_display_date;
use news_core::{
    Article, ArticleFeed, DateWindow, FetchError, JsonFileStore, LoadState, NewsView, ProxyClient,
    Session, ALL_SOURCES, KNOWN_SOURCES, PLACEHOLDER_IMAGE,
};
use reqwest::Client;
use tokio::runtime::Runtime;
use tokio::sync::mpsc::{self, error::TryRecvError};
use tracing::warn;

const CARD_COLUMNS: usize = 3;
const CARD_IMAGE_HEIGHT: f32 = 180.0;
const ERROR_RED: Color32 = Color32::from_rgb(229, 57, 53);
const ACCENT: Color32 = Color32::from_rgb(37, 99, 235);

type FetchResult = Result<Vec<Article>, FetchError>;

pub struct AppInit {
    pub runtime: Arc<Runtime>,
    pub client: Client,
    pub proxy_url: String,
    pub session: Session<JsonFileStore>,
}

pub struct PortalApp {
    runtime: Arc<Runtime>,
    client: Client,
    proxy_url: String,
    session: Session<JsonFileStore>,
    // Present only while signed in; dropped on sign-out so the next sign-in
    // fetches again.
    news: Option<NewsView>,
    pending: Option<mpsc::Receiver<FetchResult>>,
    keyword: String,
    credential: String,
    sign_in_feedback: Option<String>,
    theme_applied: bool,
}

impl PortalApp {
    pub fn new(init: AppInit) -> Self {
        Self {
            runtime: init.runtime,
            client: init.client,
            proxy_url: init.proxy_url,
            session: init.session,
            news: None,
            pending: None,
            keyword: String::new(),
            credential: String::new(),
            sign_in_feedback: None,
            theme_applied: false,
        }
    }

    fn setup_theme(&mut self, ctx: &egui::Context) {
        if self.theme_applied {
            return;
        }
        let mut style = (*ctx.style()).clone();

        let border_color = Color32::from_rgb(209, 213, 219);
        style.visuals = egui::Visuals::light();
        style.visuals.panel_fill = Color32::from_rgb(249, 250, 251);
        style.visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, border_color);
        style.visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, ACCENT);
        style.visuals.selection.stroke = Stroke::new(1.0, ACCENT);

        style.visuals.widgets.noninteractive.rounding = Rounding::same(6.0);
        style.visuals.widgets.inactive.rounding = Rounding::same(6.0);
        style.visuals.widgets.hovered.rounding = Rounding::same(6.0);
        style.visuals.widgets.active.rounding = Rounding::same(6.0);

        style.spacing.item_spacing = egui::vec2(10.0, 8.0);
        style.spacing.button_padding = egui::vec2(10.0, 6.0);

        ctx.set_style(style);
        self.theme_applied = true;
    }

    /// Mounts the news view for a freshly signed-in user and starts its one
    /// fetch.
    fn ensure_news_view(&mut self, ctx: &egui::Context) {
        if self.news.is_some() {
            return;
        }
        let mut view = NewsView::new();
        if view.begin_activation() {
            match ProxyClient::new(self.client.clone(), &self.proxy_url) {
                Ok(client) => {
                    let client = match self.session.bearer() {
                        Some(sub) => client.with_bearer(sub),
                        None => client,
                    };
                    let (tx, rx) = mpsc::channel(1);
                    let ctx = ctx.clone();
                    self.runtime.spawn(async move {
                        let result = client.fetch_articles().await;
                        if tx.send(result).await.is_err() {
                            warn!("news view closed before the fetch completed");
                        }
                        ctx.request_repaint();
                    });
                    self.pending = Some(rx);
                }
                Err(e) => view.finish_load(Err(e)),
            }
        }
        self.news = Some(view);
    }

    fn poll_fetch(&mut self) {
        let (Some(rx), Some(view)) = (self.pending.as_mut(), self.news.as_mut()) else {
            return;
        };
        match rx.try_recv() {
            Ok(result) => {
                view.finish_load(result);
                self.pending = None;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                view.finish_load(Err(FetchError::Interrupted));
                self.pending = None;
            }
        }
    }

    fn sign_in(&mut self) {
        let credential = self.credential.trim().to_owned();
        if credential.is_empty() {
            self.session.sign_in_failed("no credential provided");
            self.sign_in_feedback = Some("Paste the Google ID token to sign in.".to_owned());
            return;
        }
        if self.session.complete_sign_in(&credential) {
            self.credential.clear();
            self.sign_in_feedback = None;
        } else {
            self.sign_in_feedback = Some("Login failed.".to_owned());
        }
    }

    fn sign_out(&mut self) {
        self.session.sign_out();
        self.news = None;
        self.pending = None;
        self.keyword.clear();
    }

    fn draw_header(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.heading(egui::RichText::new("Tesla News Portal").strong().size(24.0));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if let Some(identity) = self.session.identity() {
                        let name = identity.name.clone();
                        let picture = identity.picture.clone();
                        if ui.button("Logout").clicked() {
                            self.sign_out();
                            return;
                        }
                        ui.label(egui::RichText::new(name).size(14.0));
                        if !picture.is_empty() {
                            ui.hyperlink_to("👤", picture);
                        }
                    } else {
                        if ui.button("Sign in with Google").clicked() {
                            self.sign_in();
                        }
                        ui.add(
                            egui::TextEdit::singleline(&mut self.credential)
                                .hint_text("Google ID token")
                                .password(true)
                                .desired_width(260.0),
                        );
                    }
                });
            });
            if let Some(msg) = &self.sign_in_feedback {
                ui.label(egui::RichText::new(msg.clone()).color(ERROR_RED).size(13.0));
            }
            ui.add_space(8.0);
        });
    }

    fn draw_welcome(ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(80.0);
            ui.label(egui::RichText::new("Welcome to Tesla News Portal").strong().size(22.0));
            ui.add_space(8.0);
            ui.label(
                egui::RichText::new("Please sign in with Google to access the latest Tesla news")
                    .weak()
                    .size(15.0),
            );
        });
    }

    fn draw_news(&mut self, ui: &mut egui::Ui) {
        let Some(view) = self.news.as_mut() else {
            return;
        };

        match view.state().clone() {
            LoadState::Loading => {
                ui.vertical_centered(|ui| {
                    ui.add_space(120.0);
                    ui.spinner();
                });
                return;
            }
            LoadState::Failed(message) => {
                ui.vertical_centered(|ui| {
                    ui.add_space(40.0);
                    ui.label(egui::RichText::new("Error").strong().color(ERROR_RED).size(20.0));
                    ui.label(egui::RichText::new(message).color(ERROR_RED));
                });
                return;
            }
            LoadState::Ready => {}
        }

        draw_filters(ui, view, &mut self.keyword);
        ui.add_space(10.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let page = view.current_page();
                if page.items.is_empty() {
                    ui.vertical_centered(|ui| {
                        ui.add_space(40.0);
                        ui.label(egui::RichText::new("No articles match these filters").weak());
                    });
                }
                for row in page.items.chunks(CARD_COLUMNS) {
                    ui.columns(CARD_COLUMNS, |columns| {
                        for (column, article) in columns.iter_mut().zip(row) {
                            draw_card(column, article);
                        }
                    });
                    ui.add_space(12.0);
                }

                if !page.shows_controls() {
                    return;
                }
                let (has_previous, has_next) = (page.has_previous(), page.has_next());
                let label = format!("Page {} of {}", page.number, page.total_pages);
                let mut go_previous = false;
                let mut go_next = false;
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    go_previous = ui
                        .add_enabled(has_previous, egui::Button::new("Previous"))
                        .clicked();
                    ui.label(label);
                    go_next = ui.add_enabled(has_next, egui::Button::new("Next")).clicked();
                });
                if go_previous {
                    view.previous_page();
                }
                if go_next {
                    view.next_page();
                }
            });
    }
}

fn draw_filters(ui: &mut egui::Ui, view: &mut NewsView, keyword: &mut String) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            let search = ui.add(
                egui::TextEdit::singleline(keyword)
                    .hint_text("Search by title, description, source...")
                    .desired_width((ui.available_width() - 340.0).max(120.0)),
            );
            if search.changed() {
                view.set_keyword(keyword.clone());
            }

            let current_source = view.criteria().source.clone();
            let shown_source = if current_source.is_empty() {
                ALL_SOURCES
            } else {
                current_source.as_str()
            };
            let mut picked_source: Option<&'static str> = None;
            egui::ComboBox::from_id_source("source_filter")
                .width(150.0)
                .selected_text(shown_source)
                .show_ui(ui, |ui| {
                    for source in KNOWN_SOURCES {
                        if ui.selectable_label(shown_source == *source, *source).clicked() {
                            picked_source = Some(*source);
                        }
                    }
                });
            if let Some(source) = picked_source {
                view.set_source(source);
            }

            let current_window = view.criteria().date_window;
            let mut picked_window: Option<DateWindow> = None;
            egui::ComboBox::from_id_source("date_filter")
                .width(150.0)
                .selected_text(current_window.label())
                .show_ui(ui, |ui| {
                    for window in DateWindow::ALL {
                        if ui
                            .selectable_label(current_window == window, window.label())
                            .clicked()
                        {
                            picked_window = Some(window);
                        }
                    }
                });
            if let Some(window) = picked_window {
                view.set_date_window(window);
            }
        });
        ui.add_space(6.0);
        ui.label(
            egui::RichText::new(format!("Found {} results", view.result_count()))
                .weak()
                .size(13.0),
        );
    });
}

fn draw_card(ui: &mut egui::Ui, article: &Article) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.set_min_height(220.0);
        ui.vertical(|ui| {
            let image = egui::Image::new(card_image_uri(ui.ctx(), article))
                .max_height(CARD_IMAGE_HEIGHT)
                .maintain_aspect_ratio(true)
                .rounding(Rounding::same(6.0))
                .show_loading_spinner(true)
                .sense(egui::Sense::click());
            if ui
                .add(image)
                .on_hover_cursor(egui::CursorIcon::PointingHand)
                .clicked()
            {
                open_link(article.link());
            }
            ui.add_space(4.0);
            ui.add(
                egui::Label::new(egui::RichText::new(article.title()).strong().size(17.0))
                    .wrap(true),
            );
            ui.label(
                egui::RichText::new(format!(
                    "{} • {}",
                    article.source_name(),
                    format_display_date(article)
                ))
                .weak()
                .size(12.0),
            );
            ui.add_space(4.0);
            ui.add(
                egui::Label::new(egui::RichText::new(article.description()).size(13.0)).wrap(true),
            );
            ui.add_space(6.0);
            if ui
                .add(
                    egui::Button::new(egui::RichText::new("Read more →").color(ACCENT))
                        .frame(false),
                )
                .clicked()
            {
                open_link(article.link());
            }
        });
    });
}

/// The article's image, or the placeholder once the image fails to load.
fn card_image_uri<'a>(ctx: &egui::Context, article: &'a Article) -> &'a str {
    let uri = article.image_url();
    if uri == PLACEHOLDER_IMAGE {
        return uri;
    }
    match ctx.try_load_texture(uri, egui::TextureOptions::default(), SizeHint::default()) {
        Ok(_) => uri,
        Err(_) => PLACEHOLDER_IMAGE,
    }
}

fn open_link(url: &str) {
    if let Err(e) = webbrowser::open(url) {
        warn!(error = %e, url, "failed to open article link");
    }
}

impl eframe::App for PortalApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.setup_theme(ctx);

        if self.session.is_signed_in() {
            self.ensure_news_view(ctx);
            self.poll_fetch();
        }

        self.draw_header(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.session.is_signed_in() {
                self.draw_news(ui);
            } else {
                Self::draw_welcome(ui);
            }
        });
    }
}
