//! Rain background painting

use eframe::egui;

use crate::animation::GlyphGrid;
use crate::ui::colors::ToEguiColor;

/// Match the grid to `rect` and paint every visible glyph into it.
///
/// Resizing the grid wipes it; the engine notices the new size on its next
/// frame and reallocates its drops.
pub fn paint(painter: &egui::Painter, rect: egui::Rect, grid: &mut GlyphGrid) {
    grid.resize(rect.width(), rect.height());

    for cell in grid.cells() {
        painter.text(
            rect.min + egui::vec2(cell.x, cell.y),
            egui::Align2::LEFT_BOTTOM,
            cell.glyph,
            egui::FontId::monospace(cell.font_size_px),
            cell.color.to_egui_with_alpha(cell.alpha),
        );
    }
}
