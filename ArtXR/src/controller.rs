//! Keyboard stand-in for the XR motion controller
//!
//! Every line read on stdin counts as one press of the mapped button. A
//! press is reported on the next poll only, like a button that is released
//! right away.

use arxscene::{ComponentState, InputSource};
use arxviewer::ButtonMapping;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

/// Component ids of a standard right-hand controller
const COMPONENT_IDS: [&str; 5] = [
    "xr-standard-trigger",
    "xr-standard-squeeze",
    "xr-standard-thumbstick",
    "a-button",
    "b-button",
];

pub struct StdinController {
    mapping: ButtonMapping,
    pending: Arc<AtomicUsize>,
}

impl StdinController {
    /// Starts reading stdin in a background task
    pub fn spawn(mapping: ButtonMapping) -> Self {
        let pending = Arc::new(AtomicUsize::new(0));
        let presses = Arc::clone(&pending);

        tokio::spawn(async move {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            loop {
                match lines.next_line().await {
                    Ok(Some(_)) => {
                        presses.fetch_add(1, Ordering::Relaxed);
                        debug!("Button press from stdin");
                    }
                    Ok(None) => break,
                    Err(e) => {
                        warn!("Stopped reading stdin: {}", e);
                        break;
                    }
                }
            }
        });

        Self { mapping, pending }
    }

    fn take_press(&self) -> bool {
        self.pending
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_sub(1))
            .is_ok()
    }
}

impl InputSource for StdinController {
    fn input_state(&mut self, controller: usize) -> Option<Vec<ComponentState>> {
        if controller != self.mapping.controller_index {
            return None;
        }

        let pressed = self.take_press();
        let count = COMPONENT_IDS.len().max(self.mapping.button_index + 1);
        let components = (0..count)
            .map(|i| {
                let id = COMPONENT_IDS.get(i).copied().unwrap_or("xr-standard-button");
                let value = if pressed && i == self.mapping.button_index {
                    self.mapping.pressed_value
                } else {
                    0.0
                };
                ComponentState::button(id, value)
            })
            .collect();
        Some(components)
    }
}
