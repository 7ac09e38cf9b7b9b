//! Cell geometry computation.
//!
//! The layout engine turns control bounds plus spacing rules into one
//! rectangle (and glyph baseline) per cell. Geometry is recomputed in full
//! whenever the control is resized and is immutable between resizes.
//!
//! Cells are indexed in *visual* order: index 0 is always the first cell
//! the user fills, which places it leftmost under LTR and rightmost under
//! RTL.

/// Inter-cell spacing rule.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Spacing {
    /// Split the available width so each gap equals one cell width
    /// (cell width = available / (2N - 1)).
    Auto,
    /// A fixed gap in pixels between adjacent cells.
    Fixed(f32),
}

impl Spacing {
    /// The gap value used by the measurement formulas; `Auto` measures as 0.
    #[must_use]
    pub const fn measure_value(self) -> f32 {
        match self {
            Self::Auto => 0.0,
            Self::Fixed(px) => px,
        }
    }
}

impl Default for Spacing {
    fn default() -> Self {
        Self::Fixed(24.0)
    }
}

/// Text direction for cell ordering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

/// Control bounds and padding, as reported by the host on resize.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
    pub padding_start: f32,
    pub padding_end: f32,
    pub padding_top: f32,
    pub padding_bottom: f32,
}

impl Bounds {
    /// Bounds with the given size and no padding.
    #[must_use]
    pub const fn sized(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            padding_start: 0.0,
            padding_end: 0.0,
            padding_top: 0.0,
            padding_bottom: 0.0,
        }
    }

    /// Width available for cells and gaps.
    #[must_use]
    pub fn available_width(&self) -> f32 {
        self.width - self.padding_start - self.padding_end
    }
}

/// One cell's rectangle.
///
/// In line mode top == bottom: the rectangle degenerates to the separator
/// line segment at the cell's bottom edge. With a background decoration the
/// rectangle spans the full content height.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CellRect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl CellRect {
    #[must_use]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Horizontal midpoint, used to center glyphs and hints.
    #[must_use]
    pub fn center_x(&self) -> f32 {
        self.left + self.width() / 2.0
    }
}

/// A cell's rectangle plus its resting glyph baseline.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CellGeometry {
    pub rect: CellRect,
    /// Y coordinate glyphs sit on: cell bottom minus the bottom text padding.
    pub baseline: f32,
}

/// Inputs that shape the cell grid, independent of control bounds.
#[derive(Clone, Copy, Debug)]
pub struct LayoutParams {
    pub cell_count: usize,
    pub spacing: Spacing,
    /// Cells are decorated boxes spanning the content height instead of
    /// baseline lines.
    pub decorated: bool,
    pub direction: Direction,
    /// Gap between a glyph's baseline and the cell bottom.
    pub text_bottom_padding: f32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            cell_count: 4,
            spacing: Spacing::default(),
            decorated: false,
            direction: Direction::Ltr,
            text_bottom_padding: 8.0,
        }
    }
}

/// The full cell grid for one control size.
#[derive(Clone, Debug, Default)]
pub struct CellLayout {
    cells: Vec<CellGeometry>,
}

impl CellLayout {
    /// Compute geometry for every cell, in visual order.
    #[must_use]
    pub fn compute(bounds: &Bounds, params: &LayoutParams) -> Self {
        let n = params.cell_count.max(1);
        let available = bounds.available_width();

        let (cell_width, gap) = match params.spacing {
            Spacing::Auto => {
                let w = available / (2 * n - 1) as f32;
                (w, w)
            }
            Spacing::Fixed(s) => {
                let w = (available - s * (n - 1) as f32) / n as f32;
                (w, s)
            }
        };

        let bottom = bounds.height - bounds.padding_bottom;
        let (mut x, step) = match params.direction {
            Direction::Ltr => (bounds.padding_start, cell_width + gap),
            Direction::Rtl => (
                bounds.width - bounds.padding_start - cell_width,
                -(cell_width + gap),
            ),
        };

        let mut cells = Vec::with_capacity(n);
        for _ in 0..n {
            let top = if params.decorated {
                bounds.padding_top
            } else {
                bottom
            };
            let rect = CellRect {
                left: x,
                top,
                right: x + cell_width,
                bottom,
            };
            cells.push(CellGeometry {
                rect,
                baseline: bottom - params.text_bottom_padding,
            });
            x += step;
        }

        Self { cells }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&CellGeometry> {
        self.cells.get(index)
    }

    /// All cells in visual order.
    pub fn iter(&self) -> impl Iterator<Item = &CellGeometry> {
        self.cells.iter()
    }
}

/// Derive a control size when the host does not impose both dimensions.
///
/// With a fixed width the height follows so cells come out square-ish; with
/// a fixed height the width follows; with neither, the width falls back to
/// padding plus `min_width` and the height is derived from it.
#[must_use]
pub fn measure(
    width: Option<f32>,
    height: Option<f32>,
    params: &LayoutParams,
    horizontal_padding: f32,
    min_width: f32,
) -> (f32, f32) {
    let n = params.cell_count.max(1) as f32;
    let spacing = params.spacing.measure_value();

    if let Some(w) = width {
        (w, (w - spacing) / n)
    } else if let Some(h) = height {
        (h * n + spacing * (n - 1.0), h)
    } else {
        let w = horizontal_padding + min_width;
        (w, (w - spacing) / n)
    }
}
