//! Integration Tests for the rain engine and its frame loop

#[path = "../test_utils/mod.rs"]
mod test_utils;

use std::sync::Arc;
use std::time::Duration;

use matrixterm::animation::engine::DROP_START_SPREAD_ROWS;
use matrixterm::animation::{AnimationControl, Rgb};
use matrixterm::{AnimationConfig, ControlBus, FrameLoop, GlyphGrid, MatrixEngine, SharedEngine};
use parking_lot::Mutex;
use test_utils::RecordingSurface;

fn engine(width: f32, height: f32) -> MatrixEngine {
    MatrixEngine::with_seed(AnimationConfig::default(), width, height, 42)
}

#[test]
fn test_column_count_follows_width_and_font() {
    let engine = engine(100.0, 50.0);
    assert_eq!(engine.columns(), 7);
    assert!(engine
        .drops()
        .iter()
        .all(|drop| drop.position_rows <= 0.0 && drop.position_rows > -DROP_START_SPREAD_ROWS));

    assert_eq!(MatrixEngine::new(AnimationConfig::default(), 0.0, 50.0).columns(), 0);
}

#[test]
fn test_frame_fades_then_draws_one_glyph_per_column() {
    let mut engine = engine(140.0, 100.0);
    let mut surface = RecordingSurface::new(140.0, 100.0);

    assert!(engine.frame(&mut surface));

    let config = AnimationConfig::default();
    assert_eq!(surface.fades, [config.trail_opacity() as f32]);
    assert_eq!(surface.glyphs.len(), 10);
    for (column, glyph) in surface.glyphs.iter().enumerate() {
        assert_eq!(glyph.x, column as f32 * 14.0);
        assert_eq!(glyph.alpha, config.opacity() as f32);
        assert_eq!(glyph.font_size_px, 14.0);
        assert_eq!(glyph.color, Rgb::new(0x00, 0xff, 0x41));
        assert!(config.character_set().contains(glyph.glyph));
    }
    assert_eq!(engine.frames_drawn(), 1);
}

#[test]
fn test_drops_advance_by_speed() {
    let mut engine = engine(140.0, 100.0);
    engine.set_speed(2.5);
    let mut surface = RecordingSurface::new(140.0, 100.0);

    let before: Vec<f64> = engine.drops().iter().map(|d| d.position_rows).collect();
    engine.frame(&mut surface);
    let after: Vec<f64> = engine.drops().iter().map(|d| d.position_rows).collect();

    // Every drop starts above the surface, so none can reset on the first frame
    for (old, new) in before.iter().zip(&after) {
        assert!((new - old - 2.5).abs() < 1e-9);
    }
}

#[test]
fn test_paused_engine_draws_nothing() {
    let mut engine = engine(140.0, 100.0);
    engine.pause();
    let mut surface = RecordingSurface::new(140.0, 100.0);
    let before = engine.drops().to_vec();

    for _ in 0..10 {
        assert!(!engine.frame(&mut surface));
    }

    assert!(surface.fades.is_empty());
    assert!(surface.glyphs.is_empty());
    assert_eq!(engine.drops(), before.as_slice());
    assert_eq!(engine.frames_drawn(), 0);

    engine.resume();
    assert!(engine.frame(&mut surface));
}

#[test]
fn test_drops_below_the_bottom_eventually_restart() {
    let mut engine = engine(70.0, 14.0);
    engine.set_speed(10.0);
    let mut surface = RecordingSurface::new(70.0, 14.0);

    let mut restarted = vec![false; engine.columns()];
    for _ in 0..3000 {
        let before: Vec<f64> = engine.drops().iter().map(|d| d.position_rows).collect();
        engine.frame(&mut surface);
        for (column, drop) in engine.drops().iter().enumerate() {
            if drop.position_rows < before[column] {
                assert_eq!(drop.position_rows, 10.0);
                restarted[column] = true;
            }
        }
    }

    assert!(restarted.iter().all(|r| *r));
}

#[test]
fn test_font_size_change_reallocates_drops() {
    let mut engine = engine(100.0, 100.0);
    assert_eq!(engine.columns(), 7);

    assert_eq!(engine.set_font_size(20.0), 20.0);
    assert_eq!(engine.columns(), 5);

    // Clamped to the allowed range
    assert_eq!(engine.set_font_size(2.0), 8.0);
    assert_eq!(engine.columns(), 12);
}

#[test]
fn test_surface_resize_reallocates_drops() {
    let mut engine = engine(140.0, 100.0);
    let mut surface = RecordingSurface::new(280.0, 100.0);

    engine.frame(&mut surface);

    assert_eq!(engine.size(), (280.0, 100.0));
    assert_eq!(engine.columns(), 20);
    assert_eq!(surface.glyphs.len(), 20);
}

#[test]
fn test_character_set_and_color_changes() {
    let mut engine = engine(140.0, 100.0);
    engine.set_character_set("binary");
    engine.set_color("#ff0000");
    let mut surface = RecordingSurface::new(140.0, 100.0);

    for _ in 0..5 {
        engine.frame(&mut surface);
    }
    assert!(surface.glyphs.iter().all(|g| g.glyph == '0' || g.glyph == '1'));
    assert!(surface.glyphs.iter().all(|g| g.color == Rgb::new(255, 0, 0)));

    // Unparseable colors are stored but drawing keeps the last good color
    engine.set_color("not-a-color");
    assert_eq!(engine.config().color(), "not-a-color");
    surface.reset();
    engine.frame(&mut surface);
    assert!(surface.glyphs.iter().all(|g| g.color == Rgb::new(255, 0, 0)));
}

#[test]
fn test_engine_setters_clamp() {
    let mut engine = engine(140.0, 100.0);
    assert_eq!(engine.set_speed(0.0), 0.1);
    assert_eq!(engine.set_speed(f64::NAN), 0.1);
    assert_eq!(engine.set_opacity(3.0), 1.0);
    assert_eq!(engine.set_trail_opacity(-1.0), 0.01);
}

#[test]
fn test_shared_engine_through_bus() {
    let shared = SharedEngine::new(engine(140.0, 100.0));
    let bus = ControlBus::default();
    bus.set_speed(3.0);
    bus.register(Arc::new(shared.clone()));

    assert_eq!(shared.lock().config().speed(), 3.0);

    bus.set_opacity(0.8);
    bus.pause();
    let state = shared.current_state();
    assert_eq!(state.opacity(), 0.8);
    assert!(state.paused());
    assert_eq!(bus.current_state(), state);
}

#[test]
fn test_glyph_grid_keeps_fading_trails() {
    let mut engine = engine(140.0, 140.0);
    let mut grid = GlyphGrid::new(140.0, 140.0);

    for _ in 0..200 {
        engine.frame(&mut grid);
    }
    assert!(!grid.is_empty());
    assert!(grid.cells().all(|cell| cell.alpha > 0.0 && cell.alpha <= 1.0));
}

#[tokio::test(start_paused = true)]
async fn test_frame_loop_draws_until_stopped() {
    let bus = Arc::new(ControlBus::default());
    let shared = SharedEngine::new(engine(140.0, 100.0));
    let surface = Arc::new(Mutex::new(RecordingSurface::new(140.0, 100.0)));

    let mut frame_loop = FrameLoop::start(
        shared.clone(),
        Arc::clone(&surface),
        Arc::clone(&bus),
        60,
        || {},
    );
    assert!(bus.is_bound());
    assert!(frame_loop.is_running());

    tokio::time::sleep(Duration::from_millis(500)).await;
    let drawn = shared.lock().frames_drawn();
    assert!(drawn >= 20, "only {drawn} frames drawn");

    frame_loop.stop();
    assert!(!bus.is_bound());
    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(shared.lock().frames_drawn(), drawn);
}

#[tokio::test(start_paused = true)]
async fn test_frame_loop_respects_pause() {
    let bus = Arc::new(ControlBus::default());
    let shared = SharedEngine::new(engine(140.0, 100.0));
    let surface = Arc::new(Mutex::new(RecordingSurface::new(140.0, 100.0)));
    let _frame_loop = FrameLoop::start(shared.clone(), surface, Arc::clone(&bus), 30, || {});

    bus.pause();
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(shared.lock().frames_drawn(), 0);

    bus.resume();
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert!(shared.lock().frames_drawn() > 0);
}
