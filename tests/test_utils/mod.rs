//! Test Utilities and Mocks
//!
//! Shared helpers for the integration, unit and property tests: a surface
//! that records every draw call, an animation handle that records every
//! control call, and session/config fixtures.

#![allow(dead_code)]

pub mod recording_surface;

// Re-exports for convenience
pub use fixtures::{session_with_bus, test_config, test_session, write_file, SAMPLE_TOML};
pub use mock_animation::{ControlCall, MockAnimation};
pub use recording_surface::{DrawnGlyph, RecordingSurface};
