mod app;
mod color;
mod data;
mod state;
mod style;
mod ui;
mod view;

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use eframe::egui;

use app::GhostMapApp;
use state::AppState;
use style::MapStyle;
use view::ViewMode;

/// Startup options: an optional dataset path and an optional map-style
/// document. Supplying a style document selects the declarative view.
struct Launch {
    dataset: Option<PathBuf>,
    style: Option<PathBuf>,
}

fn parse_args() -> Result<Launch> {
    let mut launch = Launch {
        dataset: None,
        style: None,
    };
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--style" => {
                let path = args.next().context("--style requires a path")?;
                launch.style = Some(PathBuf::from(path));
            }
            flag if flag.starts_with('-') => {
                bail!("Unknown option '{flag}'. Usage: ghost-map [markers.csv] [--style style.json]")
            }
            path if launch.dataset.is_none() => launch.dataset = Some(PathBuf::from(path)),
            extra => bail!("Unexpected argument '{extra}'"),
        }
    }
    Ok(launch)
}

fn main() -> Result<()> {
    env_logger::init();

    let launch = parse_args()?;

    // The style document is read before the map exists: if it can't be
    // loaded, the map is never constructed.
    let (mode, style) = match &launch.style {
        Some(path) => {
            let style = style::load_style(path)
                .with_context(|| format!("loading style document {}", path.display()))?;
            log::info!("Loaded style document {}, declarative view", path.display());
            (ViewMode::Declarative, style)
        }
        None => (ViewMode::Imperative, MapStyle::default()),
    };

    let mut state = AppState::new(mode, style);

    // A dataset named on the command line is part of initialization: a load
    // failure here is fatal, unlike a failed File → Open later.
    if let Some(path) = &launch.dataset {
        let dataset = data::loader::load_file(path)
            .with_context(|| format!("loading dataset {}", path.display()))?;
        log::info!(
            "Loaded {} markers across {} categories",
            dataset.len(),
            dataset.categories.len()
        );
        state.set_dataset(dataset);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Ghost Map – Memorial Markers",
        options,
        Box::new(move |_cc| Ok(Box::new(GhostMapApp::new(state)))),
    )
    .map_err(|e| anyhow!("running UI: {e}"))
}
