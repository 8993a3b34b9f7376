//! Controller button polling and the dwell gate between cycles

use arxscene::InputSource;
use std::time::{Duration, Instant};

/// Default minimum time between two cycles
pub const DEFAULT_DWELL: Duration = Duration::from_secs(5);

/// Which controller component acts as the "next artwork" button
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonMapping {
    /// XR controller index (1 = right hand)
    pub controller_index: usize,
    /// Position of the component in the controller's input-state sequence
    pub button_index: usize,
    /// Button value that counts as pressed
    pub pressed_value: f32,
}

impl Default for ButtonMapping {
    fn default() -> Self {
        Self {
            controller_index: 1,
            button_index: 3,
            pressed_value: 1.0,
        }
    }
}

impl ButtonMapping {
    /// Polls `input`; a missing controller or component reads as released
    pub fn is_pressed(&self, input: &mut dyn InputSource) -> bool {
        input
            .input_state(self.controller_index)
            .and_then(|components| {
                components
                    .get(self.button_index)
                    .map(|c| c.button == self.pressed_value)
            })
            .unwrap_or(false)
    }
}

/// Minimum dwell between two triggers
///
/// Elapsed time is compared in whole seconds, rounded down. An unarmed gate
/// fires on the first press.
#[derive(Debug, Clone)]
pub struct TriggerGate {
    last: Option<Instant>,
    dwell_secs: u64,
}

impl TriggerGate {
    pub fn new(dwell: Duration) -> Self {
        Self {
            last: None,
            dwell_secs: dwell.as_secs(),
        }
    }

    pub fn dwell(&self) -> Duration {
        Duration::from_secs(self.dwell_secs)
    }

    pub fn last_trigger(&self) -> Option<Instant> {
        self.last
    }

    pub fn should_fire(&self, now: Instant) -> bool {
        match self.last {
            None => true,
            Some(last) => now.saturating_duration_since(last).as_secs() >= self.dwell_secs,
        }
    }

    /// Records a trigger at `now`
    pub fn fire(&mut self, now: Instant) {
        self.last = Some(now);
    }

    /// Fires when the dwell has elapsed, returns whether it did
    pub fn try_fire(&mut self, now: Instant) -> bool {
        let ready = self.should_fire(now);
        if ready {
            self.fire(now);
        }
        ready
    }
}

impl Default for TriggerGate {
    fn default() -> Self {
        Self::new(DEFAULT_DWELL)
    }
}
