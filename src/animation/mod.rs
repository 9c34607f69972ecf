//! Background "digital rain" animation
//!
//! - [`config`] - Tunable parameters, ranges and presets
//! - [`color`] - CSS color parsing
//! - [`surface`] - What the engine draws on
//! - [`engine`] - The rain renderer
//! - [`bus`] - Relay between commands and the live engine
//! - [`frame_loop`] - Fixed-rate frame scheduling

pub mod bus;
pub mod color;
pub mod config;
pub mod engine;
pub mod frame_loop;
pub mod surface;

pub use bus::{AnimationControl, ControlBus};
pub use color::Rgb;
pub use config::AnimationConfig;
pub use engine::{MatrixEngine, RainDrop, SharedEngine};
pub use frame_loop::FrameLoop;
pub use surface::{GlyphCell, GlyphGrid, GlyphStyle, Surface};
