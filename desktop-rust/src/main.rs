mod app;
mod io;
mod model;

use app::DesktopApp;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    let ctx = match io::load_context() {
        Ok(ctx) => ctx,
        Err(err) => {
            eprintln!("❌ {err:#}");
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([980.0, 640.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Gerador de Nota de Crédito",
        options,
        Box::new(move |_cc| Box::new(DesktopApp::new(ctx))),
    )
}
