//! The viewer: frame loop state and the asynchronous display cycle
//!
//! [`Viewer::tick`] runs once per frame and never awaits. A cycle started by
//! the initial load or a button press runs as a spawned task that fetches a
//! record and builds its display without touching the scene. The result
//! comes back over a channel tagged with the cycle's generation and is
//! inserted on a later tick, unless a newer cycle has started since.

use crate::compositor::{prepare_display, DisplayCompositor, Layout, PreparedDisplay};
use crate::error::Result;
use crate::loader::{FontCache, ImageLoader};
use crate::source::ArtworkSource;
use crate::trigger::{ButtonMapping, TriggerGate, DEFAULT_DWELL};
use arxscene::{InputSource, SceneHost, Stage};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, info};

/// Everything a cycle needs to go from nothing to a prepared display
#[derive(Debug)]
pub struct DisplayPipeline {
    pub source: Arc<dyn ArtworkSource>,
    pub loader: Arc<dyn ImageLoader>,
    pub fonts: FontCache,
    pub layout: Layout,
}

impl DisplayPipeline {
    /// Fetches the next record and builds its display
    pub async fn prepare_next(&self) -> Result<PreparedDisplay> {
        let record = self.source.next_artwork().await;
        prepare_display(&record, self.loader.as_ref(), &self.fonts, &self.layout).await
    }
}

/// Frame loop settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerSettings {
    pub dwell: Duration,
    pub button: ButtonMapping,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            dwell: DEFAULT_DWELL,
            button: ButtonMapping::default(),
        }
    }
}

/// Result of a finished cycle
#[derive(Debug)]
pub struct CompletedCycle {
    pub generation: u64,
    pub result: Result<PreparedDisplay>,
}

/// What happened to a finished cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The display is now live
    Displayed,
    /// A newer cycle started meanwhile; the display was dropped
    Stale,
    /// Building the display failed; the scene stays empty
    Failed,
}

/// Artwork viewer bound to a scene host and an input source
pub struct Viewer<H: SceneHost, I: InputSource> {
    host: H,
    input: I,
    pipeline: Arc<DisplayPipeline>,
    compositor: DisplayCompositor,
    gate: TriggerGate,
    button: ButtonMapping,
    generation: u64,
    tx: UnboundedSender<CompletedCycle>,
    rx: UnboundedReceiver<CompletedCycle>,
}

impl<H: SceneHost, I: InputSource> Viewer<H, I> {
    /// Installs the stage on `host`; no display is loaded until [`Viewer::start`]
    pub fn new(
        mut host: H,
        input: I,
        pipeline: DisplayPipeline,
        settings: ViewerSettings,
    ) -> Self {
        let stage = Stage {
            controller_index: settings.button.controller_index,
            ..Stage::default()
        };
        host.set_stage(&stage);

        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            host,
            input,
            pipeline: Arc::new(pipeline),
            compositor: DisplayCompositor::new(),
            gate: TriggerGate::new(settings.dwell),
            button: settings.button,
            generation: 0,
            tx,
            rx,
        }
    }

    /// Starts the initial load; presses within the dwell that follows are ignored
    pub fn start(&mut self, now: Instant) {
        info!("Loading first artwork");
        self.start_cycle();
        self.gate.fire(now);
    }

    /// One frame: poll the button, collect finished cycles, render
    pub fn tick(&mut self, now: Instant) {
        if self.button.is_pressed(&mut self.input) && self.gate.should_fire(now) {
            info!("Next artwork requested");
            self.compositor.teardown(&mut self.host);
            self.start_cycle();
            self.gate.fire(now);
        }

        while let Ok(completed) = self.rx.try_recv() {
            self.apply(completed);
        }

        self.host.render();
    }

    /// Waits for the next cycle to finish and applies it
    ///
    /// Waits forever when no cycle is in flight.
    pub async fn next_completion(&mut self) -> Option<CycleOutcome> {
        let completed = self.rx.recv().await?;
        Some(self.apply(completed))
    }

    /// Inserts a finished cycle's display if it belongs to the current generation
    pub fn apply(&mut self, completed: CompletedCycle) -> CycleOutcome {
        if completed.generation != self.generation {
            debug!(
                generation = completed.generation,
                current = self.generation,
                "Discarding stale display"
            );
            return CycleOutcome::Stale;
        }

        match completed.result {
            Ok(prepared) => {
                self.compositor.insert(&mut self.host, prepared);
                CycleOutcome::Displayed
            }
            Err(e) => {
                error!(generation = completed.generation, "Display cycle failed: {}", e);
                CycleOutcome::Failed
            }
        }
    }

    fn start_cycle(&mut self) {
        self.generation += 1;
        let generation = self.generation;
        let pipeline = Arc::clone(&self.pipeline);
        let tx = self.tx.clone();

        debug!(generation, "Starting display cycle");
        tokio::spawn(async move {
            let result = pipeline.prepare_next().await;
            // The viewer may be gone already
            let _ = tx.send(CompletedCycle { generation, result });
        });
    }

    /// Number of cycles started so far
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn compositor(&self) -> &DisplayCompositor {
        &self.compositor
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// Viewport changed
    pub fn resize(&mut self, width: u32, height: u32, pixel_ratio: f32) {
        self.host.resize(width, height, pixel_ratio);
    }
}
