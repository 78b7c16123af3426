//! DALL-E 3 desktop image generator.

mod adapters;
mod app;
mod error;
mod output;
mod ports;
mod session;
mod worker;

use crate::app::GeneratorApp;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([960.0, 720.0])
            .with_min_inner_size([480.0, 360.0]),
        centered: true,
        ..Default::default()
    };

    eframe::run_native(
        "DALL-E 3 Image Generator",
        options,
        Box::new(|cc| Ok(Box::new(GeneratorApp::new(cc)))),
    )
}
