//! Property-based tests for animation parameter clamping
//!
//! Whatever value reaches a setter, the stored parameter stays inside its
//! allowed range, whether it goes through the bus or straight to an engine.

use matrixterm::animation::config::{
    FONT_SIZE_RANGE, OPACITY_RANGE, SPEED_RANGE, TRAIL_OPACITY_RANGE,
};
use matrixterm::{AnimationConfig, ControlBus, MatrixEngine};
use proptest::prelude::*;

fn in_range(value: f64, (min, max): (f64, f64)) -> bool {
    value >= min && value <= max
}

fn any_value() -> impl Strategy<Value = f64> {
    prop_oneof![
        -1000.0f64..1000.0,
        Just(f64::NAN),
        Just(f64::INFINITY),
        Just(f64::NEG_INFINITY),
    ]
}

proptest! {
    #[test]
    fn test_config_setters_stay_in_range(
        speed in any_value(),
        opacity in any_value(),
        font_size in any_value(),
        trail in any_value(),
    ) {
        let mut config = AnimationConfig::default();
        config.set_speed(speed);
        config.set_opacity(opacity);
        config.set_font_size(font_size);
        config.set_trail_opacity(trail);

        prop_assert!(in_range(config.speed(), SPEED_RANGE));
        prop_assert!(in_range(config.opacity(), OPACITY_RANGE));
        prop_assert!(in_range(config.font_size_px(), FONT_SIZE_RANGE));
        prop_assert!(in_range(config.trail_opacity(), TRAIL_OPACITY_RANGE));
    }

    #[test]
    fn test_nan_keeps_previous_value(start in 0.1f64..10.0) {
        let mut config = AnimationConfig::default();
        config.set_speed(start);
        config.set_speed(f64::NAN);
        prop_assert_eq!(config.speed(), start);
    }

    #[test]
    fn test_bus_cache_stays_in_range(
        values in prop::collection::vec(any_value(), 1..20),
    ) {
        let bus = ControlBus::default();
        for value in &values {
            bus.set_speed(*value);
            bus.set_opacity(*value);
            bus.set_font_size(*value);
            bus.set_trail_opacity(*value);
        }

        let state = bus.current_state();
        prop_assert!(in_range(state.speed(), SPEED_RANGE));
        prop_assert!(in_range(state.opacity(), OPACITY_RANGE));
        prop_assert!(in_range(state.font_size_px(), FONT_SIZE_RANGE));
        prop_assert!(in_range(state.trail_opacity(), TRAIL_OPACITY_RANGE));
    }

    #[test]
    fn test_engine_columns_follow_font_size(
        width in 0.0f32..2000.0,
        font_size in any_value(),
    ) {
        let mut engine = MatrixEngine::with_seed(AnimationConfig::default(), width, 300.0, 1);
        let applied = engine.set_font_size(font_size);

        prop_assert!(in_range(applied, FONT_SIZE_RANGE));
        prop_assert_eq!(engine.columns(), (width as f64 / applied).floor() as usize);
        prop_assert_eq!(engine.drops().len(), engine.columns());
    }

    #[test]
    fn test_any_character_set_is_accepted(glyphs in "\\PC{1,20}") {
        let mut config = AnimationConfig::default();
        config.set_character_set(&glyphs);
        prop_assert!(!config.character_set().is_empty());
    }
}
