//! `pincell` - Cell-based PIN/OTP input rendering engine
//!
//! A fixed number of character "cells" (underline segments or decorated
//! boxes) stand in for a normal text field: typed characters are masked,
//! each new character animates in, and a one-shot callback fires when the
//! PIN is complete. The host widget owns the text storage, keyboard, and
//! canvas; this crate owns cell layout, masking, state resolution, frame
//! composition, and the entry animations.

// Crate-level lint configuration
#![warn(unsafe_code)]
#![allow(clippy::cast_precision_loss)] // Intentional for geometry math
#![allow(clippy::cast_possible_truncation)] // Intentional color component casts
#![allow(clippy::cast_sign_loss)] // Intentional color component casts
#![allow(clippy::module_name_repetitions)] // Allow MaskBuffer in mask etc
#![allow(clippy::missing_errors_doc)] // Error conditions documented inline
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::suboptimal_flops)] // Standard math notation is clearer than mul_add
#![allow(clippy::float_cmp)] // Exact float comparison is intentional in tests
#![allow(clippy::items_after_statements)] // Common pattern in tests

pub mod animation;
pub mod color;
pub mod error;
pub mod event;
pub mod layout;
pub mod mask;
pub mod pin;
pub mod render;
pub mod state;

// Re-export core types at crate root
pub use animation::{AnimationMode, AnimationStatus, EntryAnimation, GlyphSample};
pub use color::Rgba;
pub use error::{Error, Result};
pub use event::{LogLevel, emit_event, emit_log, set_event_callback, set_log_callback};
pub use layout::{Bounds, CellGeometry, CellLayout, CellRect, Direction, LayoutParams, Spacing};
pub use mask::{DEFAULT_MASK, MaskBuffer};
pub use pin::{PinInput, PinOptions};
pub use render::{DrawSurface, GlyphRole, GlyphStyle, MonoMetrics, TextMetrics};
pub use state::{
    DecorationFlags, LineStyle, StateFlags, StatePalette, StrokeWidths, VisualState, visual_state,
};
