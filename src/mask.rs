//! Masking of displayed PIN characters.
//!
//! [`MaskBuffer`] owns an incremental cache of repeated mask-glyph units
//! whose character length tracks the true input's character length. The
//! true value is never stored here; callers pass it in per frame and get
//! back the string that should actually be painted.
//!
//! The length-matching policy is unit-wise on growth: a multi-character
//! glyph is appended whole, so the buffer may overshoot the input length by
//! up to `glyph_len - 1` characters. Shrinking trims one character at a
//! time. This mirrors masked-entry controls that append whole mask units
//! per keystroke rather than masking character-by-character.

/// Default mask glyph: BLACK CIRCLE.
pub const DEFAULT_MASK: &str = "\u{25CF}";

/// Incrementally maintained mask-glyph cache.
///
/// # Examples
///
/// ```
/// use pincell::mask::MaskBuffer;
///
/// let mut mask = MaskBuffer::with_glyph("●");
/// assert_eq!(mask.display_text("12"), "●●");
/// assert_eq!(mask.display_text("1"), "●");
///
/// let mut clear = MaskBuffer::new();
/// assert_eq!(clear.display_text("12"), "12");
/// ```
#[derive(Debug, Default)]
pub struct MaskBuffer {
    glyph: Option<String>,
    buffer: String,
}

impl MaskBuffer {
    /// Create a mask buffer with no glyph configured (pass-through).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mask buffer with the given glyph.
    #[must_use]
    pub fn with_glyph(glyph: impl Into<String>) -> Self {
        Self {
            glyph: Some(glyph.into()),
            buffer: String::new(),
        }
    }

    /// The configured mask glyph, if any.
    #[must_use]
    pub fn glyph(&self) -> Option<&str> {
        self.glyph.as_deref()
    }

    /// Replace the mask glyph. The cached buffer is discarded and rebuilt
    /// from empty on the next [`display_text`](Self::display_text) call.
    pub fn set_glyph(&mut self, glyph: Option<String>) {
        self.glyph = glyph;
        self.buffer.clear();
    }

    /// Whether masking is active (a non-empty glyph is configured).
    #[must_use]
    pub fn is_masking(&self) -> bool {
        self.glyph.as_deref().is_some_and(|g| !g.is_empty())
    }

    /// Resolve the string to paint for `input`.
    ///
    /// Returns `input` unchanged when no glyph is configured; otherwise
    /// returns the synchronized mask buffer. Never mutates `input`.
    pub fn display_text<'a>(&'a mut self, input: &'a str) -> &'a str {
        let Some(glyph) = self.glyph.as_deref() else {
            return input;
        };
        if glyph.is_empty() {
            return input;
        }

        let target = input.chars().count();
        let glyph_len = glyph.chars().count();
        let mut current = self.buffer.chars().count();

        while current < target {
            self.buffer.push_str(glyph);
            current += glyph_len;
        }
        while current > target {
            self.buffer.pop();
            current -= 1;
        }

        &self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_glyph_passes_through() {
        let mut mask = MaskBuffer::new();
        assert_eq!(mask.display_text("1234"), "1234");
        assert!(!mask.is_masking());
    }

    #[test]
    fn test_single_char_glyph_tracks_length() {
        let mut mask = MaskBuffer::with_glyph(DEFAULT_MASK);
        for len in 0..=6 {
            let input: String = "123456".chars().take(len).collect();
            let display = mask.display_text(&input).to_string();
            assert_eq!(display.chars().count(), len);
            assert!(display.chars().all(|c| c == '\u{25CF}'));
        }
    }

    #[test]
    fn test_shrink_trims_one_char() {
        let mut mask = MaskBuffer::with_glyph("*");
        assert_eq!(mask.display_text("abcd").chars().count(), 4);
        assert_eq!(mask.display_text("abc").chars().count(), 3);
        assert_eq!(mask.display_text(""), "");
    }

    #[test]
    fn test_multi_char_glyph_may_overshoot() {
        let mut mask = MaskBuffer::with_glyph("xy");
        let display = mask.display_text("123").to_string();
        // 3 chars of input, whole "xy" units appended: 2 units = 4 chars.
        assert_eq!(display, "xyxy");
        // Shrinking back converges exactly.
        assert_eq!(mask.display_text("12"), "xy");
    }

    #[test]
    fn test_set_glyph_discards_buffer() {
        let mut mask = MaskBuffer::with_glyph("*");
        assert_eq!(mask.display_text("99"), "**");
        mask.set_glyph(Some("#".to_string()));
        assert_eq!(mask.display_text("99"), "##");
        mask.set_glyph(None);
        assert_eq!(mask.display_text("99"), "99");
    }

    #[test]
    fn test_empty_glyph_passes_through() {
        let mut mask = MaskBuffer::with_glyph("");
        assert_eq!(mask.display_text("42"), "42");
    }
}
