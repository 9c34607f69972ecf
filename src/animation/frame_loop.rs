//! Frame scheduling for the rain engine
//!
//! A [`FrameLoop`] owns the task that ticks the engine at a fixed rate. It
//! registers the engine on the control bus when started and unregisters it
//! when stopped or dropped, so no frame is ever scheduled for an engine the
//! bus no longer knows about.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::animation::bus::ControlBus;
use crate::animation::engine::SharedEngine;
use crate::animation::surface::Surface;

/// Default frame rate
pub const DEFAULT_FRAMES_PER_SECOND: u32 = 60;

/// Running animation loop
#[derive(Debug)]
pub struct FrameLoop {
    task: Option<JoinHandle<()>>,
    bus: Arc<ControlBus>,
}

impl FrameLoop {
    /// Register `engine` on `bus` and start drawing on `surface`.
    ///
    /// `on_frame` runs after every drawn frame (paused ticks skip it); the UI
    /// uses it to request a repaint. Must be called inside a Tokio runtime.
    pub fn start<S, F>(
        engine: SharedEngine,
        surface: Arc<Mutex<S>>,
        bus: Arc<ControlBus>,
        frames_per_second: u32,
        on_frame: F,
    ) -> Self
    where
        S: Surface + Send + 'static,
        F: Fn() + Send + 'static,
    {
        bus.register(Arc::new(engine.clone()));

        let period = Duration::from_secs_f64(1.0 / f64::from(frames_per_second.max(1)));
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                let drawn = {
                    let mut surface = surface.lock();
                    engine.frame(&mut *surface)
                };
                if drawn {
                    on_frame();
                }
            }
        });

        info!(frames_per_second, "Animation frame loop started");
        Self {
            task: Some(task),
            bus,
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Cancel the pending frame and detach the engine from the bus
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            self.bus.unregister();
            debug!("Animation frame loop stopped");
        }
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
