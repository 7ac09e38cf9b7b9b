//! Shared test helpers: a recording draw surface.

#![allow(dead_code)] // Not every test binary uses every helper

pub use pincell::render::MonoMetrics;
use pincell::{CellRect, DecorationFlags, DrawSurface, GlyphRole, GlyphStyle, LineStyle};

/// One recorded draw call.
#[derive(Clone, Debug)]
pub enum DrawOp {
    Decoration {
        rect: CellRect,
        flags: DecorationFlags,
    },
    Glyph {
        text: String,
        x: f32,
        baseline: f32,
        style: GlyphStyle,
    },
    Line {
        x0: f32,
        y0: f32,
        x1: f32,
        y1: f32,
        style: LineStyle,
    },
}

/// Surface that records every draw call in order.
#[derive(Default)]
pub struct RecordingSurface {
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// Concatenation of all non-hint glyph runs, in draw order.
    pub fn drawn_text(&self) -> String {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Glyph { text, style, .. } if style.role != GlyphRole::Hint => {
                    Some(text.as_str())
                }
                _ => None,
            })
            .collect()
    }

    pub fn glyph_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Glyph { .. }))
            .count()
    }

    pub fn line_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Line { .. }))
            .count()
    }

    pub fn decoration_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Decoration { .. }))
            .count()
    }
}

impl DrawSurface for RecordingSurface {
    fn draw_decoration(&mut self, rect: CellRect, flags: DecorationFlags) {
        self.ops.push(DrawOp::Decoration { rect, flags });
    }

    fn draw_glyph(&mut self, glyph: &str, x: f32, baseline: f32, style: GlyphStyle) {
        self.ops.push(DrawOp::Glyph {
            text: glyph.to_string(),
            x,
            baseline,
            style,
        });
    }

    fn draw_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, style: LineStyle) {
        self.ops.push(DrawOp::Line {
            x0,
            y0,
            x1,
            y1,
            style,
        });
    }
}
