mod controller;
mod logging;

use anyhow::Context;
use arxcollection::{ClientBuilder, CollectionConfigExt};
use arxconfig::Config;
use arxscene::HeadlessScene;
use arxviewer::{
    CollectionSource, DisplayPipeline, FontCache, HttpImageLoader, Viewer, ViewerConfigExt,
};
use controller::StdinController;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::MissedTickBehavior;
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_config("").context("Cannot load the ArtXR configuration")?;
    logging::init_logging(&config);
    info!("🖼️ Starting ArtXR (config in {})", config.directory());

    // ========== Collection index (startup precondition) ==========

    let client = ClientBuilder::from_config(&config).build().await?;
    let department = config.get_collection_department_id();
    let source = CollectionSource::connect(client)
        .await
        .with_context(|| format!("Cannot load the collection index of department {}", department))?;

    // ========== Viewer ==========

    let pipeline = DisplayPipeline {
        source: Arc::new(source),
        loader: Arc::new(HttpImageLoader::new(config.get_viewer_placeholder_path())?),
        fonts: FontCache::new(config.get_viewer_font_path()),
        layout: config.get_viewer_layout(),
    };
    let settings = config.get_viewer_settings();
    let controller = StdinController::spawn(settings.button);

    let mut viewer = Viewer::new(HeadlessScene::new(), controller, pipeline, settings);
    let viewport = config.get_viewer_viewport();
    viewer.resize(viewport.width, viewport.height, viewport.pixel_ratio);

    // ========== Frame loop ==========

    let frame_rate = config.get_viewer_frame_rate();
    let mut frames = tokio::time::interval(Duration::from_secs_f64(1.0 / frame_rate as f64));
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    viewer.start(Instant::now());
    info!(
        "✅ ArtXR is running at {} fps, press Enter for the next artwork, Ctrl+C to stop",
        frame_rate
    );

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = frames.tick() => viewer.tick(Instant::now()),
            result = &mut shutdown => {
                result.context("Cannot listen for Ctrl+C")?;
                break;
            }
        }
    }

    let scene = viewer.host();
    info!(
        frames = scene.render_count(),
        cycles = viewer.generation(),
        "ArtXR stopped"
    );
    Ok(())
}
