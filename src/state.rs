//! Per-cell visual state resolution.
//!
//! Each frame every cell resolves to one [`VisualState`] from the control's
//! error flag, focus, and how far typing has progressed. The state then maps
//! either to a [`LineStyle`] (separator-line mode) via the [`StatePalette`],
//! or to [`DecorationFlags`] (decorated-box mode). The two paths are
//! mutually exclusive per draw: a decoration suppresses line drawing.
//!
//! The palette is an ordered list of rules evaluated top to bottom; the
//! first rule whose required flags are present (and forbidden flags absent)
//! wins, falling back to a default color. Rule order is part of the
//! contract.

use crate::color::Rgba;
use bitflags::bitflags;

/// The resolved condition of one cell for one frame. Never stored;
/// recomputed per draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisualState {
    UnfocusedEmpty,
    UnfocusedFilled,
    FocusedEmpty,
    /// The next cell to receive input.
    FocusedNext,
    FocusedFilled,
    Error,
}

/// Resolve a cell's visual state.
///
/// Error takes precedence over everything; focus splits the remaining
/// states by the cell's position relative to the typed length.
#[must_use]
pub const fn visual_state(
    index: usize,
    text_len: usize,
    focused: bool,
    has_error: bool,
) -> VisualState {
    if has_error {
        VisualState::Error
    } else if focused {
        if index < text_len {
            VisualState::FocusedFilled
        } else if index == text_len {
            VisualState::FocusedNext
        } else {
            VisualState::FocusedEmpty
        }
    } else if index < text_len {
        VisualState::UnfocusedFilled
    } else {
        VisualState::UnfocusedEmpty
    }
}

bitflags! {
    /// Condition flags a palette rule matches against.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub struct StateFlags: u8 {
        /// Filled, or the next cell to fill, while focused.
        const SELECTED = 0x01;
        /// Control-level error.
        const ACTIVE   = 0x02;
        /// Control has focus.
        const FOCUSED  = 0x04;
    }
}

bitflags! {
    /// Discrete state combinations for decorated (drawable-backed) cells.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub struct DecorationFlags: u8 {
        const FOCUSED  = 0x01;
        const SELECTED = 0x02;
        const CHECKED  = 0x04;
        const ACTIVE   = 0x08;
    }
}

/// One palette rule: matches when every `required` flag is present and no
/// `forbidden` flag is.
#[derive(Clone, Copy, Debug)]
pub struct PaletteRule {
    pub required: StateFlags,
    pub forbidden: StateFlags,
    pub color: Rgba,
}

impl PaletteRule {
    #[must_use]
    const fn matches(&self, query: StateFlags) -> bool {
        query.contains(self.required) && query.intersection(self.forbidden).is_empty()
    }
}

/// Ordered color rules: selected, error, focused, unfocused, then a
/// fallback. Each slot is caller-overridable via
/// [`set_colors`](Self::set_colors).
#[derive(Clone, Debug)]
pub struct StatePalette {
    rules: Vec<PaletteRule>,
    fallback: Rgba,
}

impl StatePalette {
    /// Default fallback color when no rule matches.
    pub const FALLBACK: Rgba = Rgba::GRAY;

    /// Build the standard four-rule table.
    #[must_use]
    pub fn with_colors(selected: Rgba, error: Rgba, focused: Rgba, unfocused: Rgba) -> Self {
        Self {
            rules: vec![
                PaletteRule {
                    required: StateFlags::SELECTED,
                    forbidden: StateFlags::empty(),
                    color: selected,
                },
                PaletteRule {
                    required: StateFlags::ACTIVE,
                    forbidden: StateFlags::empty(),
                    color: error,
                },
                PaletteRule {
                    required: StateFlags::FOCUSED,
                    forbidden: StateFlags::empty(),
                    color: focused,
                },
                PaletteRule {
                    required: StateFlags::empty(),
                    forbidden: StateFlags::FOCUSED,
                    color: unfocused,
                },
            ],
            fallback: Self::FALLBACK,
        }
    }

    /// Replace all four standard colors at once.
    pub fn set_colors(&mut self, selected: Rgba, error: Rgba, focused: Rgba, unfocused: Rgba) {
        *self = Self::with_colors(selected, error, focused, unfocused);
    }

    /// First matching rule's color, or the fallback.
    #[must_use]
    pub fn color_for(&self, query: StateFlags) -> Rgba {
        self.rules
            .iter()
            .find(|rule| rule.matches(query))
            .map_or(self.fallback, |rule| rule.color)
    }
}

impl Default for StatePalette {
    fn default() -> Self {
        Self::with_colors(Rgba::GREEN, Rgba::RED, Rgba::BLACK, Rgba::GRAY)
    }
}

/// Normal and selected separator stroke widths.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeWidths {
    pub normal: f32,
    pub selected: f32,
}

impl Default for StrokeWidths {
    fn default() -> Self {
        Self {
            normal: 1.0,
            selected: 2.0,
        }
    }
}

/// Resolved separator-line styling for one cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineStyle {
    pub color: Rgba,
    pub stroke_width: f32,
}

/// Resolve the separator-line style for a cell.
///
/// `reached` is the line path's predicate: the cell is filled or is the
/// next one to fill (`index <= text_len`). Resolution order: error, then
/// focused (selected color when reached), then unfocused.
#[must_use]
pub fn line_style(
    reached: bool,
    focused: bool,
    has_error: bool,
    palette: &StatePalette,
    widths: StrokeWidths,
) -> LineStyle {
    let stroke_width = if focused {
        widths.selected
    } else {
        widths.normal
    };

    let color = if has_error {
        palette.color_for(StateFlags::ACTIVE)
    } else if focused {
        if reached {
            palette.color_for(StateFlags::FOCUSED | StateFlags::SELECTED)
        } else {
            palette.color_for(StateFlags::FOCUSED)
        }
    } else {
        palette.color_for(StateFlags::empty())
    };

    LineStyle {
        color,
        stroke_width,
    }
}

/// Resolve decoration state flags for a decorated cell.
#[must_use]
pub const fn decoration_flags(
    index: usize,
    text_len: usize,
    focused: bool,
    has_error: bool,
) -> DecorationFlags {
    let has_text = index < text_len;
    let is_next = index == text_len;

    if has_error {
        DecorationFlags::ACTIVE
    } else if focused {
        if is_next {
            DecorationFlags::FOCUSED.union(DecorationFlags::SELECTED)
        } else if has_text {
            DecorationFlags::FOCUSED.union(DecorationFlags::CHECKED)
        } else {
            DecorationFlags::FOCUSED
        }
    } else if has_text {
        DecorationFlags::CHECKED
    } else {
        DecorationFlags::empty()
    }
}
