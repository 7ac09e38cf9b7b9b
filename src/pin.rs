//! The PIN input control.
//!
//! [`PinInput`] ties the engines together: it owns the configuration, the
//! cached cell geometry, the mask buffer, and any in-flight entry
//! animations, and exposes the lifecycle entry points the host widget
//! calls (`on_size_changed`, `on_text_changed`, `tick`, `draw`).
//!
//! The control never draws on its own; it only sets a "redraw needed" flag
//! (see [`take_redraw_request`](PinInput::take_redraw_request)) and paints
//! when the host invokes [`draw`](PinInput::draw). Animations advance only
//! through explicit [`tick`](PinInput::tick) calls from the host's frame
//! scheduler.

use std::time::Duration;

use crate::animation::{AnimationMode, EntryAnimation, GlyphSample};
use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::event::{LogLevel, emit_event, emit_log};
use crate::layout::{Bounds, CellLayout, Direction, LayoutParams, Spacing, measure};
use crate::mask::{DEFAULT_MASK, MaskBuffer};
use crate::render::{DrawSurface, FrameParams, TextMetrics, render_frame};
use crate::state::{StatePalette, StrokeWidths};

/// Callback fired once when the typed length reaches the cell count.
pub type PinEnteredCallback = Box<dyn FnMut(&str) + 'static>;

/// Initial configuration for a [`PinInput`].
#[derive(Clone, Debug)]
pub struct PinOptions {
    pub cell_count: usize,
    pub spacing: Spacing,
    pub direction: Direction,
    pub stroke_widths: StrokeWidths,
    pub text_bottom_padding: f32,
    pub decorated: bool,
    pub animation_mode: AnimationMode,
    /// Glyph text size used by animations until the host supplies one.
    pub text_size: f32,
}

impl Default for PinOptions {
    fn default() -> Self {
        Self {
            cell_count: 4,
            spacing: Spacing::default(),
            direction: Direction::Ltr,
            stroke_widths: StrokeWidths::default(),
            text_bottom_padding: 8.0,
            decorated: false,
            animation_mode: AnimationMode::None,
            text_size: 24.0,
        }
    }
}

struct ActiveAnimation {
    cell: usize,
    anim: EntryAnimation,
    /// Fire the pin-complete notification when this instance finishes.
    notify: bool,
}

/// A fixed-length PIN/OTP input rendered as a row of cells.
///
/// # Examples
///
/// ```
/// use pincell::{Bounds, PinInput};
///
/// let mut pin = PinInput::new(4);
/// pin.set_mask_glyph(Some("●".into()));
/// pin.on_size_changed(Bounds::sized(400.0, 60.0));
/// pin.set_focused(true);
/// pin.on_text_changed("12");
/// assert!(pin.take_redraw_request());
/// ```
pub struct PinInput {
    cell_count: usize,
    spacing: Spacing,
    direction: Direction,
    widths: StrokeWidths,
    text_bottom_padding: f32,
    decorated: bool,
    hint: Option<String>,
    palette: StatePalette,
    animation_mode: AnimationMode,
    text_size: f32,

    mask: MaskBuffer,
    value: String,
    value_len: usize,
    focused: bool,
    has_error: bool,

    bounds: Option<Bounds>,
    layout: CellLayout,

    active: Vec<ActiveAnimation>,
    on_pin_entered: Option<PinEnteredCallback>,
    needs_redraw: bool,
}

impl PinInput {
    /// Create a control with `cell_count` cells and default options.
    #[must_use]
    pub fn new(cell_count: usize) -> Self {
        Self::with_options(PinOptions {
            cell_count,
            ..PinOptions::default()
        })
    }

    /// Create a control from explicit options.
    #[must_use]
    pub fn with_options(options: PinOptions) -> Self {
        Self {
            cell_count: options.cell_count.max(1),
            spacing: options.spacing,
            direction: options.direction,
            widths: options.stroke_widths,
            text_bottom_padding: options.text_bottom_padding,
            decorated: options.decorated,
            hint: None,
            palette: StatePalette::default(),
            animation_mode: options.animation_mode,
            text_size: options.text_size,
            mask: MaskBuffer::new(),
            value: String::new(),
            value_len: 0,
            focused: false,
            has_error: false,
            bounds: None,
            layout: CellLayout::default(),
            active: Vec::new(),
            on_pin_entered: None,
            needs_redraw: false,
        }
    }

    fn layout_params(&self) -> LayoutParams {
        LayoutParams {
            cell_count: self.cell_count,
            spacing: self.spacing,
            decorated: self.decorated,
            direction: self.direction,
            text_bottom_padding: self.text_bottom_padding,
        }
    }

    fn invalidate(&mut self) {
        self.needs_redraw = true;
    }

    fn relayout(&mut self) {
        if let Some(bounds) = self.bounds {
            self.layout = CellLayout::compute(&bounds, &self.layout_params());
            emit_log(
                LogLevel::Debug,
                &format!(
                    "relayout: {} cells in {}x{}",
                    self.cell_count, bounds.width, bounds.height
                ),
            );
        }
        self.invalidate();
    }

    // ---- configuration setters -------------------------------------------

    /// Set the number of cells. Resets the cached value and any in-flight
    /// animations.
    pub fn set_cell_count(&mut self, n: usize) {
        self.cell_count = n.max(1);
        self.value.clear();
        self.value_len = 0;
        self.active.clear();
        self.relayout();
    }

    /// Set or clear the mask glyph.
    pub fn set_mask_glyph(&mut self, glyph: Option<String>) {
        self.mask.set_glyph(glyph);
        self.invalidate();
    }

    /// Enable or disable secure entry. Enabling applies the default mask
    /// when none is configured; disabling clears the mask.
    pub fn set_secure(&mut self, secure: bool) {
        if secure {
            if self.mask.glyph().is_none() {
                self.set_mask_glyph(Some(DEFAULT_MASK.to_string()));
            }
        } else {
            self.set_mask_glyph(None);
        }
    }

    /// Set or clear the hint painted in cells not yet reached.
    pub fn set_hint(&mut self, hint: Option<String>) {
        self.hint = hint;
        self.invalidate();
    }

    /// Set the inter-cell spacing rule.
    pub fn set_spacing(&mut self, spacing: Spacing) {
        self.spacing = spacing;
        self.relayout();
    }

    /// Set the text direction.
    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
        self.relayout();
    }

    /// Set normal and selected separator stroke widths.
    pub fn set_stroke_widths(&mut self, normal: f32, selected: f32) {
        self.widths = StrokeWidths { normal, selected };
        self.invalidate();
    }

    /// Set the gap between glyph baselines and cell bottoms.
    pub fn set_bottom_padding(&mut self, padding: f32) {
        self.text_bottom_padding = padding;
        self.relayout();
    }

    /// Override the four state colors (selected, error, focused, unfocused).
    pub fn set_colors_for_states(
        &mut self,
        selected: Rgba,
        error: Rgba,
        focused: Rgba,
        unfocused: Rgba,
    ) {
        self.palette.set_colors(selected, error, focused, unfocused);
        self.invalidate();
    }

    /// Switch between separator-line cells and decorated-box cells.
    pub fn set_decorated(&mut self, decorated: bool) {
        self.decorated = decorated;
        self.relayout();
    }

    /// Set or clear the control-level error flag.
    pub fn set_error(&mut self, has_error: bool) {
        self.has_error = has_error;
        self.invalidate();
    }

    /// Whether the error flag is set.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.has_error
    }

    /// Select which entry animation new keystrokes trigger.
    pub fn set_animation_mode(&mut self, mode: AnimationMode) {
        self.animation_mode = mode;
    }

    /// Glyph text size used by entry animations, as reported by the host.
    pub fn set_text_size(&mut self, size: f32) {
        self.text_size = size;
    }

    /// Register the pin-complete callback. The callback receives the true,
    /// unmasked value.
    pub fn set_on_pin_entered<F>(&mut self, callback: F)
    where
        F: FnMut(&str) + 'static,
    {
        self.on_pin_entered = Some(Box::new(callback));
    }

    /// A deny-all selection/clipboard hook is installed at construction;
    /// replacing it would re-enable copy/paste on a masked field.
    ///
    /// # Errors
    ///
    /// Always returns [`Error::SelectionHookLocked`].
    pub fn set_selection_hook(&mut self, _hook: fn() -> bool) -> Result<()> {
        Err(Error::SelectionHookLocked)
    }

    /// Whether selection/clipboard actions are permitted. Always false.
    #[must_use]
    pub const fn selection_allowed(&self) -> bool {
        false
    }

    // ---- host lifecycle ---------------------------------------------------

    /// The host resized the control; recompute all cell geometry.
    pub fn on_size_changed(&mut self, bounds: Bounds) {
        self.bounds = Some(bounds);
        self.relayout();
    }

    /// Derive a control size from at most one imposed dimension.
    #[must_use]
    pub fn measure(
        &self,
        width: Option<f32>,
        height: Option<f32>,
        horizontal_padding: f32,
        min_width: f32,
    ) -> (f32, f32) {
        measure(
            width,
            height,
            &self.layout_params(),
            horizontal_padding,
            min_width,
        )
    }

    /// The host's focus state changed.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        self.invalidate();
    }

    /// The host's text storage changed.
    ///
    /// Clears the error flag, decides whether to start an entry animation
    /// (only on growth), and fires pin-complete synchronously when
    /// animations cannot run (unmeasured or disabled).
    pub fn on_text_changed(&mut self, text: &str) {
        let new_len = text.chars().count();
        let old_len = self.value_len;

        self.has_error = false;
        self.value.clear();
        self.value.push_str(text);
        self.value_len = new_len;
        self.invalidate();

        let can_animate = self.animation_mode != AnimationMode::None && !self.layout.is_empty();
        if !can_animate {
            if new_len == self.cell_count {
                self.fire_pin_entered();
            }
            return;
        }

        if new_len > old_len {
            let cell = new_len - 1;
            let anim = match self.animation_mode {
                AnimationMode::Pop => EntryAnimation::pop(self.text_size),
                AnimationMode::Slide => EntryAnimation::slide(self.text_size),
                AnimationMode::None => unreachable!("checked above"),
            };
            // A keystroke landing on a cell that is still animating
            // restarts that cell; other cells run to completion.
            self.active.retain(|a| a.cell != cell);
            self.active.push(ActiveAnimation {
                cell,
                anim,
                notify: new_len == self.cell_count,
            });
            emit_log(
                LogLevel::Debug,
                &format!("entry animation started on cell {cell}"),
            );
        }
    }

    /// Advance in-flight animations by `elapsed` scheduler time.
    ///
    /// Returns true while animations remain, so the host keeps scheduling
    /// ticks. Completion of an instance started by the final keystroke
    /// fires the pin-complete notification.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        if self.active.is_empty() {
            return false;
        }

        let mut notify = false;
        for entry in &mut self.active {
            entry.anim.tick(elapsed);
            if entry.anim.is_finished() && entry.notify {
                notify = true;
                entry.notify = false;
            }
        }
        self.active.retain(|entry| !entry.anim.is_finished());
        self.invalidate();

        if notify {
            self.fire_pin_entered();
        }
        !self.active.is_empty()
    }

    fn fire_pin_entered(&mut self) {
        emit_event("pin_complete", "{}");
        if let Some(callback) = self.on_pin_entered.as_mut() {
            let value = std::mem::take(&mut self.value);
            callback(&value);
            self.value = value;
        }
    }

    /// Paint one frame into `surface`.
    ///
    /// Call only from the host's draw callback, after the control has been
    /// measured. Clears the redraw flag.
    pub fn draw<M, S>(&mut self, metrics: &M, surface: &mut S)
    where
        M: TextMetrics + ?Sized,
        S: DrawSurface + ?Sized,
    {
        let animated: Vec<(usize, GlyphSample)> = self
            .active
            .iter()
            .map(|entry| (entry.cell, entry.anim.sample()))
            .collect();

        let display_text = self.mask.display_text(&self.value);
        let params = FrameParams {
            layout: &self.layout,
            display_text,
            text_len: self.value_len,
            hint: self.hint.as_deref(),
            focused: self.focused,
            has_error: self.has_error,
            decorated: self.decorated,
            palette: &self.palette,
            widths: self.widths,
            animated: &animated,
        };
        render_frame(&params, metrics, surface);
        self.needs_redraw = false;
    }

    // ---- accessors --------------------------------------------------------

    /// Consume the pending redraw request.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    /// The true, unmasked value as last delivered by the host.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.cell_count
    }

    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    /// Whether any entry animation is in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        !self.active.is_empty()
    }

    /// The current cell geometry (empty until measured).
    #[must_use]
    pub const fn layout(&self) -> &CellLayout {
        &self.layout
    }

    /// The configured mask glyph, if any.
    #[must_use]
    pub fn mask_glyph(&self) -> Option<&str> {
        self.mask.glyph()
    }
}

impl Default for PinInput {
    fn default() -> Self {
        Self::with_options(PinOptions::default())
    }
}

impl std::fmt::Debug for PinInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PinInput")
            .field("cell_count", &self.cell_count)
            .field("value_len", &self.value_len)
            .field("focused", &self.focused)
            .field("has_error", &self.has_error)
            .field("animation_mode", &self.animation_mode)
            .field("animating", &self.active.len())
            .finish_non_exhaustive()
    }
}
