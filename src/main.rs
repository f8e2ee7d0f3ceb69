use anyhow::Context;
use tracing::{info, warn};
use zonekit::{
    editor_options, image_scale, init_logging, load_config, polygon_client, FeatureSource,
    InMemoryCanvas, InMemoryMap, RenderingSurface, ZoneEditor, BUILD_DATE, VERSION,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;
    info!("ZoneKit {} (built {})", VERSION, BUILD_DATE);

    let config = load_config().context("Failed to load configuration")?;
    let scale = image_scale(&config).context("Invalid image dimensions")?;
    let client = polygon_client(&config).context("Failed to create zone service client")?;

    // The editor works without remote data; a failed fetch only leaves it empty.
    let collection = client.fetch_or_empty().await;
    let fetched = collection.len();

    let surface = InMemoryCanvas::new(
        f64::from(config.image.client_width),
        f64::from(config.image.client_height),
    );
    let mut editor = ZoneEditor::new(surface, InMemoryMap::new(), scale, editor_options(&config));

    editor.load_features(collection);
    editor.on_map_loaded();

    let store = editor.store();
    if store.len() < fetched {
        warn!(fetched, stored = store.len(), "Some zones could not be drawn");
    }
    let viewport = editor.surface().viewport();
    info!(
        canvas_width = viewport.canvas_width(),
        canvas_height = viewport.canvas_height(),
        zones = store.len(),
        shapes = editor.surface().shape_count(),
        layers = editor.map().layers().len(),
        mode = %editor.mode(),
        "Zones synchronized"
    );

    Ok(())
}
