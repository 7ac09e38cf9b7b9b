//! Frame composition and host drawing collaborators.
//!
//! The engine never owns a canvas. Hosts implement [`TextMetrics`] (glyph
//! advance widths, the configured text size) and [`DrawSurface`] (the
//! actual painting), and the pipeline composites each frame in a fixed
//! order per cell: decoration, glyph or hint, separator line. Lines are
//! painted last so they sit above backgrounds and glyphs.

use unicode_segmentation::UnicodeSegmentation;

use crate::animation::GlyphSample;
use crate::layout::{CellLayout, CellRect};
use crate::state::{
    DecorationFlags, LineStyle, StatePalette, StrokeWidths, decoration_flags, line_style,
};

/// Text measurement supplied by the host.
pub trait TextMetrics {
    /// Advance width of a glyph run at the control's configured text size.
    fn advance_width(&self, text: &str) -> f32;

    /// The configured text size in pixels.
    fn text_size(&self) -> f32;
}

/// Fixed-advance metrics: every display column is `advance` pixels wide.
///
/// For hosts without real font measurement (terminal cells, tests). Wide
/// characters count two columns.
#[derive(Clone, Copy, Debug)]
pub struct MonoMetrics {
    pub advance: f32,
    pub size: f32,
}

impl Default for MonoMetrics {
    fn default() -> Self {
        Self {
            advance: 10.0,
            size: 24.0,
        }
    }
}

impl TextMetrics for MonoMetrics {
    fn advance_width(&self, text: &str) -> f32 {
        use unicode_width::UnicodeWidthStr;
        text.width() as f32 * self.advance
    }

    fn text_size(&self) -> f32 {
        self.size
    }
}

/// What a glyph draw call represents; hosts pick paint (color, typeface)
/// per role.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GlyphRole {
    /// A typed (or masked) character at rest.
    Normal,
    /// The character currently entering via an animation.
    Animated,
    /// The hint shown in cells not yet reached.
    Hint,
}

/// Resolved glyph paint parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphStyle {
    pub role: GlyphRole,
    pub text_size: f32,
    /// Opacity in `[0, 1]`.
    pub alpha: f32,
}

/// Drawing surface supplied by the host.
///
/// Calls arrive in draw order; implementations paint immediately or record
/// for later rasterization.
pub trait DrawSurface {
    /// Paint a cell's background decoration with the given state flags.
    fn draw_decoration(&mut self, rect: CellRect, flags: DecorationFlags);

    /// Paint a glyph run with its left edge at `x`, sitting on `baseline`.
    fn draw_glyph(&mut self, glyph: &str, x: f32, baseline: f32, style: GlyphStyle);

    /// Paint a separator line between the two points.
    fn draw_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, style: LineStyle);
}

/// Everything one frame needs, resolved by the control.
pub(crate) struct FrameParams<'a> {
    pub layout: &'a CellLayout,
    pub display_text: &'a str,
    /// Character length of the true input (not of `display_text`).
    pub text_len: usize,
    pub hint: Option<&'a str>,
    pub focused: bool,
    pub has_error: bool,
    pub decorated: bool,
    pub palette: &'a StatePalette,
    pub widths: StrokeWidths,
    /// In-flight animation samples keyed by cell index.
    pub animated: &'a [(usize, GlyphSample)],
}

impl FrameParams<'_> {
    fn animated_sample(&self, index: usize) -> Option<GlyphSample> {
        self.animated
            .iter()
            .find(|(cell, _)| *cell == index)
            .map(|(_, sample)| *sample)
    }
}

/// Composite one frame.
pub(crate) fn render_frame<M, S>(params: &FrameParams<'_>, metrics: &M, surface: &mut S)
where
    M: TextMetrics + ?Sized,
    S: DrawSurface + ?Sized,
{
    let glyphs: Vec<&str> = params.display_text.graphemes(true).collect();
    let hint_width = params.hint.map(|h| metrics.advance_width(h));

    for (i, cell) in params.layout.iter().enumerate() {
        if params.decorated {
            let flags = decoration_flags(i, params.text_len, params.focused, params.has_error);
            surface.draw_decoration(cell.rect, flags);
        }

        let middle = cell.rect.center_x();
        if i < params.text_len {
            if let Some(glyph) = glyphs.get(i) {
                // Centered by the resting advance width even while the
                // animated size differs.
                let x = middle - metrics.advance_width(glyph) / 2.0;
                let style = match params.animated_sample(i) {
                    Some(sample) => GlyphStyle {
                        role: GlyphRole::Animated,
                        text_size: sample.text_size,
                        alpha: sample.alpha,
                    },
                    None => GlyphStyle {
                        role: GlyphRole::Normal,
                        text_size: metrics.text_size(),
                        alpha: 1.0,
                    },
                };
                let baseline = cell.baseline
                    + params
                        .animated_sample(i)
                        .map_or(0.0, |sample| sample.baseline_offset);
                surface.draw_glyph(glyph, x, baseline, style);
            }
        } else if let Some(hint) = params.hint {
            // The whole hint string, centered in each empty cell.
            let x = middle - hint_width.unwrap_or(0.0) / 2.0;
            surface.draw_glyph(
                hint,
                x,
                cell.baseline,
                GlyphStyle {
                    role: GlyphRole::Hint,
                    text_size: metrics.text_size(),
                    alpha: 1.0,
                },
            );
        }

        if !params.decorated {
            let style = line_style(
                i <= params.text_len,
                params.focused,
                params.has_error,
                params.palette,
                params.widths,
            );
            surface.draw_line(
                cell.rect.left,
                cell.rect.top,
                cell.rect.right,
                cell.rect.bottom,
                style,
            );
        }
    }
}
