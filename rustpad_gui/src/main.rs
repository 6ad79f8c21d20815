mod app;
mod host;
mod style;

use anyhow::anyhow;
use eframe::{egui, NativeOptions};
use rustpad_core::{get_title, WindowDimension};
use tracing::info;

use crate::app::RustPadApp;
use crate::host::GuiHost;

fn main() -> anyhow::Result<()> {
    let launch = rustpad_cmdline::parse(std::env::args_os()).unwrap_or_else(|err| err.exit());
    let level = rustpad_cmdline::configure_logging(launch.verbose);
    info!(%level, "starting");

    let title = get_title(None);
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(title.clone())
            .with_inner_size(WindowDimension::default().size()),
        ..Default::default()
    };
    let host = GuiHost::new(launch.to_args());
    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Box::new(RustPadApp::new(host))),
    )
    .map_err(|err| anyhow!("failed to run the editor window: {err}"))
}
