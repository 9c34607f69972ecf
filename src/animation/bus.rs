//! Animation control bus
//!
//! Commands never hold the renderer directly. They talk to a [`ControlBus`],
//! which forwards to whichever engine is currently registered and keeps a
//! cached copy of the configuration. The cache is updated even while no
//! engine is bound, and is replayed onto an engine when it registers, so
//! settings made before the view mounts are not lost.

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::animation::config::{AnimationConfig, CHARACTER_SETS, COLOR_PRESETS};

/// Control surface exposed by a running animation
pub trait AnimationControl: Send + Sync {
    fn pause(&self);
    fn resume(&self);
    fn set_speed(&self, speed: f64);
    fn set_opacity(&self, opacity: f64);
    fn set_color(&self, color: &str);
    /// Preset name or literal glyphs
    fn set_character_set(&self, name_or_glyphs: &str);
    fn set_font_size(&self, font_size_px: f64);
    fn set_trail_opacity(&self, trail_opacity: f64);

    /// Replace the whole configuration
    fn apply(&self, config: &AnimationConfig);

    /// Snapshot of the live configuration
    fn current_state(&self) -> AnimationConfig;

    fn character_sets(&self) -> &'static [(&'static str, &'static str)] {
        CHARACTER_SETS
    }

    fn color_presets(&self) -> &'static [(&'static str, &'static str)] {
        COLOR_PRESETS
    }
}

/// Process-wide relay between commands and the animation engine
pub struct ControlBus {
    engine: RwLock<Option<Arc<dyn AnimationControl>>>,
    cache: watch::Sender<AnimationConfig>,
}

impl ControlBus {
    pub fn new(initial: AnimationConfig) -> Self {
        let (cache, _) = watch::channel(initial);
        Self {
            engine: RwLock::new(None),
            cache,
        }
    }

    /// Bind an engine, replaying the cached configuration onto it.
    ///
    /// A previously registered engine is replaced.
    pub fn register(&self, handle: Arc<dyn AnimationControl>) {
        let mut engine = self.engine.write();
        handle.apply(&self.cache.borrow());
        self.cache.send_replace(handle.current_state());
        if engine.replace(handle).is_some() {
            debug!("Replaced registered animation engine");
        }
        info!("Animation engine registered");
    }

    /// Drop the engine binding. Later calls only update the cache.
    pub fn unregister(&self) {
        if self.engine.write().take().is_some() {
            info!("Animation engine unregistered");
        }
    }

    pub fn is_bound(&self) -> bool {
        self.engine.read().is_some()
    }

    /// Watch configuration changes made through the bus
    pub fn subscribe(&self) -> watch::Receiver<AnimationConfig> {
        self.cache.subscribe()
    }

    /// Forward to the bound engine (if any) and record the outcome.
    ///
    /// With an engine bound the cache takes the engine's resulting state;
    /// otherwise `update_cache` applies the same change to the cache.
    fn relay(
        &self,
        forward: impl FnOnce(&dyn AnimationControl),
        update_cache: impl FnOnce(&mut AnimationConfig),
    ) {
        let engine = self.engine.read();
        match engine.as_deref() {
            Some(handle) => {
                forward(handle);
                self.cache.send_replace(handle.current_state());
            }
            None => self.cache.send_modify(update_cache),
        }
    }

    pub fn pause(&self) {
        self.relay(|e| e.pause(), |c| c.set_paused(true));
    }

    pub fn resume(&self) {
        self.relay(|e| e.resume(), |c| c.set_paused(false));
    }

    pub fn set_speed(&self, speed: f64) {
        self.relay(
            |e| e.set_speed(speed),
            |c| {
                c.set_speed(speed);
            },
        );
    }

    pub fn set_opacity(&self, opacity: f64) {
        self.relay(
            |e| e.set_opacity(opacity),
            |c| {
                c.set_opacity(opacity);
            },
        );
    }

    pub fn set_color(&self, color: &str) {
        self.relay(|e| e.set_color(color), |c| c.set_color(color));
    }

    pub fn set_character_set(&self, name_or_glyphs: &str) {
        self.relay(
            |e| e.set_character_set(name_or_glyphs),
            |c| c.set_character_set(name_or_glyphs),
        );
    }

    pub fn set_font_size(&self, font_size_px: f64) {
        self.relay(
            |e| e.set_font_size(font_size_px),
            |c| {
                c.set_font_size(font_size_px);
            },
        );
    }

    pub fn set_trail_opacity(&self, trail_opacity: f64) {
        self.relay(
            |e| e.set_trail_opacity(trail_opacity),
            |c| {
                c.set_trail_opacity(trail_opacity);
            },
        );
    }

    /// Live engine state when bound, else the cached configuration
    pub fn current_state(&self) -> AnimationConfig {
        match self.engine.read().as_deref() {
            Some(handle) => handle.current_state(),
            None => self.cache.borrow().clone(),
        }
    }

    pub fn character_sets(&self) -> &'static [(&'static str, &'static str)] {
        match self.engine.read().as_deref() {
            Some(handle) => handle.character_sets(),
            None => CHARACTER_SETS,
        }
    }

    pub fn color_presets(&self) -> &'static [(&'static str, &'static str)] {
        match self.engine.read().as_deref() {
            Some(handle) => handle.color_presets(),
            None => COLOR_PRESETS,
        }
    }
}

impl Default for ControlBus {
    fn default() -> Self {
        Self::new(AnimationConfig::default())
    }
}

impl std::fmt::Debug for ControlBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControlBus")
            .field("bound", &self.is_bound())
            .field("cache", &*self.cache.borrow())
            .finish()
    }
}
