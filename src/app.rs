//! Main window: input fields, generation trigger, image display, saving.

use std::borrow::Cow;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::sync::Arc;
use std::time::Duration;

use eframe::egui::{self, Button, Color32, Image, ImageSource, Spinner, TextEdit, Widget};

use crate::adapters::live::openai::OpenAiGenerator;
use crate::output::{default_filename, default_save_dir, save_bytes};
use crate::ports::{GenerationRequest, ImageGenerator};
use crate::session::Session;
use crate::worker::{self, Outcome};

/// Top-level application: field values, session state, worker handle.
pub struct GeneratorApp {
    api_key: String,
    prompt: String,
    session: Session,
    inflight: Option<Receiver<Outcome>>,
    generator: Arc<dyn ImageGenerator>,
}

impl GeneratorApp {
    /// Build the app and register the image loaders that turn raw bytes
    /// into textures.
    #[must_use]
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);
        Self {
            api_key: String::new(),
            prompt: String::new(),
            session: Session::new(),
            inflight: None,
            generator: Arc::new(OpenAiGenerator::new()),
        }
    }

    /// Read the current field values and start one worker for them.
    fn start_generation(&mut self) {
        let request = GenerationRequest {
            api_key: self.api_key.clone(),
            prompt: self.prompt.clone(),
        };
        self.session.begin();
        self.inflight = Some(worker::spawn(Arc::clone(&self.generator), request));
    }

    /// Drain the worker channel without blocking.
    ///
    /// All state mutation happens here on the UI thread; the worker only
    /// ever produces the one terminal value.
    fn poll_worker(&mut self, ctx: &egui::Context) {
        let Some(rx) = &self.inflight else { return };
        match rx.try_recv() {
            Ok(outcome) => {
                self.inflight = None;
                if matches!(outcome, Outcome::Success(_)) {
                    // Drop the previous texture before the uri moves on.
                    ctx.forget_image(&self.session.image_uri());
                }
                self.session.settle(outcome);
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                log::error!("worker exited without delivering an outcome");
                self.inflight = None;
                self.session
                    .settle(Outcome::Failure("Image generation stopped unexpectedly".into()));
            }
        }
    }

    /// Prompt for a destination and write the displayed image there.
    ///
    /// A cancelled dialog writes nothing and reports nothing; a failed
    /// write lands in the error region.
    fn save_image(&mut self) {
        let Some(bytes) = self.session.image().cloned() else { return };

        let chosen = rfd::FileDialog::new()
            .set_directory(default_save_dir())
            .set_file_name(default_filename())
            .add_filter("Images", &["png", "jpg", "jpeg", "bmp"])
            .save_file();

        let Some(path) = chosen else { return };
        match save_bytes(&path, &bytes) {
            Ok(()) => log::info!("saved image to {}", path.display()),
            Err(e) => self.session.set_error(e.to_string()),
        }
    }
}

impl eframe::App for GeneratorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_worker(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add(
                TextEdit::singleline(&mut self.api_key)
                    .password(true)
                    .hint_text("Enter your OpenAI API Key here")
                    .desired_width(f32::INFINITY),
            );
            ui.add(
                TextEdit::singleline(&mut self.prompt)
                    .hint_text("Enter the prompt for the image generation here")
                    .desired_width(f32::INFINITY),
            );

            let can_generate = !self.session.is_pending();
            if ui.add_enabled(can_generate, Button::new("Generate")).clicked() {
                self.start_generation();
            }

            if let Some(bytes) = self.session.image() {
                let source = ImageSource::Bytes {
                    uri: Cow::from(self.session.image_uri()),
                    bytes: egui::load::Bytes::Shared(Arc::clone(bytes)),
                };
                ui.vertical_centered(|ui| {
                    Image::new(source).max_size(ui.available_size() * 0.75).ui(ui);
                });
            }

            if let Some(message) = self.session.error() {
                ui.colored_label(Color32::RED, format!("Error: {message}"));
            }

            if self.session.is_pending() {
                ui.horizontal(|ui| {
                    ui.label("Generating…");
                    Spinner::new().ui(ui);
                });
            }

            if self.session.image().is_some() && ui.button("Download Image").clicked() {
                self.save_image();
            }
        });

        // try_recv only runs when a frame runs; keep frames coming while a
        // worker is outstanding so delivery is never starved.
        if self.session.is_pending() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
