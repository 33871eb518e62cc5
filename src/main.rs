//! Jersey Studio
//!
//! Renders a jersey preview to SVG on stdout.
//!
//! Usage: `jersey-studio [design-id] [front|back] [size]`

use anyhow::{bail, Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use jersey_studio::config::Settings;
use jersey_studio::domain::{DesignCatalog, GarmentSize, JerseyConfig};
use jersey_studio::engine::{project, View};

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let settings = Settings::load().context("Failed to load configuration")?;
    init_tracing(&settings)?;

    let catalog = match settings.catalog.designs_path {
        Some(ref path) => DesignCatalog::load_file(path)
            .with_context(|| format!("Failed to load designs from {}", path.display()))?,
        None => DesignCatalog::builtin(),
    };
    info!(designs = catalog.len(), "Design catalog ready");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let design_id = args
        .first()
        .cloned()
        .unwrap_or_else(|| settings.catalog.default_design.clone());

    let view = match args.get(1) {
        Some(label) => match View::from_label(label) {
            Some(view) => view,
            None => bail!("Unknown view '{}', expected front or back", label),
        },
        None => View::Front,
    };

    let size = match args.get(2) {
        Some(label) => GarmentSize::from_label(label).unwrap_or_else(|| {
            warn!(size = %label, "Unknown garment size, using default");
            settings.preview.default_size
        }),
        None => settings.preview.default_size,
    };

    let model = JerseyConfig::default_for(&catalog, &design_id);
    let design = catalog.get(&model.design_id);
    let composition = project(&model, design, view, size);

    info!(
        design_id = %model.design_id,
        view = view.as_str(),
        size = %size,
        layers = composition.layers.len(),
        "Rendering preview"
    );

    println!("{}", composition.to_svg());
    Ok(())
}

fn init_tracing(settings: &Settings) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.logging.filter))
        .context("Invalid log filter")?;

    // Logs go to stderr so stdout carries only the SVG
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if settings.logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}
