//! End-to-end scenarios: host lifecycle, masking, animation, completion.

mod common;

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use common::{DrawOp, MonoMetrics, RecordingSurface};
use pincell::{
    AnimationMode, Bounds, GlyphRole, PinInput, Rgba, Spacing,
};

fn harness(n: usize) -> (PinInput, MonoMetrics, RecordingSurface) {
    let mut pin = PinInput::new(n);
    pin.on_size_changed(Bounds::sized(600.0, 60.0));
    pin.set_focused(true);
    (pin, MonoMetrics::default(), RecordingSurface::default())
}

// =============================================================================
// Plain typing, no mask, no animation
// =============================================================================

#[test]
fn test_six_digits_no_animation_completes_once() {
    let (mut pin, metrics, mut surface) = harness(6);

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    pin.set_on_pin_entered(move |value| sink.borrow_mut().push(value.to_string()));

    let steps = ["1", "12", "123", "1234", "12345", "123456"];
    for (i, text) in steps.iter().enumerate() {
        pin.take_redraw_request();
        pin.on_text_changed(text);
        assert!(pin.take_redraw_request(), "keystroke {i} must request redraw");
        assert!(!pin.is_animating());
    }

    assert_eq!(seen.borrow().as_slice(), ["123456"]);

    pin.draw(&metrics, &mut surface);
    assert_eq!(surface.drawn_text(), "123456");
    assert_eq!(surface.line_count(), 6);
}

// =============================================================================
// Masked typing with pop animation
// =============================================================================

#[test]
fn test_masked_pop_never_reveals_digits() {
    let (mut pin, metrics, mut surface) = harness(4);
    pin.set_mask_glyph(Some("\u{25CF}".into()));
    pin.set_animation_mode(AnimationMode::Pop);

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    pin.set_on_pin_entered(move |value| sink.borrow_mut().push(value.to_string()));

    for text in ["1", "12", "123", "1234"] {
        pin.on_text_changed(text);
        surface.clear();
        pin.draw(&metrics, &mut surface);
        assert!(
            surface.drawn_text().chars().all(|c| c == '\u{25CF}'),
            "digits must never be painted"
        );
        // Let each entry animation finish before the next keystroke.
        if text != "1234" {
            pin.tick(Duration::from_millis(250));
        }
    }

    surface.clear();
    pin.draw(&metrics, &mut surface);
    assert_eq!(surface.drawn_text(), "\u{25CF}\u{25CF}\u{25CF}\u{25CF}");

    // Completion waits for the final animation, fires exactly once, and
    // carries the true digits.
    assert!(seen.borrow().is_empty());
    while pin.tick(Duration::from_millis(50)) {}
    assert_eq!(seen.borrow().as_slice(), ["1234"]);
    pin.tick(Duration::from_millis(50));
    assert_eq!(seen.borrow().len(), 1);
}

// =============================================================================
// Draw order and styling
// =============================================================================

#[test]
fn test_lines_painted_after_glyphs_per_cell() {
    let (mut pin, metrics, mut surface) = harness(4);
    pin.on_text_changed("12");
    pin.draw(&metrics, &mut surface);

    // Per cell, the glyph (if any) precedes the line; a filled cell thus
    // contributes [glyph, line] adjacent pairs.
    let mut last_glyph_idx = None;
    for (i, op) in surface.ops.iter().enumerate() {
        match op {
            DrawOp::Glyph { .. } => last_glyph_idx = Some(i),
            DrawOp::Line { .. } => {
                if let Some(g) = last_glyph_idx {
                    assert!(g < i);
                }
            }
            DrawOp::Decoration { .. } => panic!("no decoration configured"),
        }
    }
    assert_eq!(surface.line_count(), 4);
}

#[test]
fn test_hint_fills_unreached_cells() {
    let (mut pin, metrics, mut surface) = harness(4);
    pin.set_hint(Some("0".into()));
    pin.on_text_changed("1");
    pin.draw(&metrics, &mut surface);

    let hints: Vec<_> = surface
        .ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::Glyph { text, style, .. } if style.role == GlyphRole::Hint => {
                Some(text.clone())
            }
            _ => None,
        })
        .collect();
    assert_eq!(hints, ["0", "0", "0"]);
}

#[test]
fn test_decoration_suppresses_lines() {
    let (mut pin, metrics, mut surface) = harness(4);
    pin.set_decorated(true);
    pin.on_text_changed("12");
    pin.draw(&metrics, &mut surface);

    assert_eq!(surface.decoration_count(), 4);
    assert_eq!(surface.line_count(), 0);

    // Decorations precede any glyph in their cell.
    assert!(matches!(surface.ops[0], DrawOp::Decoration { .. }));
}

#[test]
fn test_error_paints_every_line_with_error_color() {
    let (mut pin, metrics, mut surface) = harness(4);
    pin.on_text_changed("12");
    pin.set_error(true);
    pin.draw(&metrics, &mut surface);

    for op in &surface.ops {
        if let DrawOp::Line { style, .. } = op {
            assert_eq!(style.color, Rgba::RED);
        }
    }
}

#[test]
fn test_focused_line_colors_split_at_next_cell() {
    let (mut pin, metrics, mut surface) = harness(4);
    pin.on_text_changed("1");
    pin.draw(&metrics, &mut surface);

    let line_colors: Vec<_> = surface
        .ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::Line { style, .. } => Some(style.color),
            _ => None,
        })
        .collect();

    // Cells 0 (filled) and 1 (next) take the selected color; the rest the
    // focused color.
    assert_eq!(
        line_colors,
        [Rgba::GREEN, Rgba::GREEN, Rgba::BLACK, Rgba::BLACK]
    );
}

// =============================================================================
// Animated glyph styling
// =============================================================================

#[test]
fn test_pop_animation_shrinks_then_restores_glyph_size() {
    let (mut pin, metrics, mut surface) = harness(4);
    pin.set_animation_mode(AnimationMode::Pop);
    pin.on_text_changed("7");

    pin.draw(&metrics, &mut surface);
    let animated = surface
        .ops
        .iter()
        .find_map(|op| match op {
            DrawOp::Glyph { style, .. } if style.role == GlyphRole::Animated => Some(*style),
            _ => None,
        })
        .expect("last glyph animates");
    assert!(animated.text_size < metrics.size);

    while pin.tick(Duration::from_millis(50)) {}
    surface.clear();
    pin.draw(&metrics, &mut surface);
    let settled = surface
        .ops
        .iter()
        .find_map(|op| match op {
            DrawOp::Glyph { style, .. } => Some(*style),
            _ => None,
        })
        .expect("glyph still drawn");
    assert_eq!(settled.role, GlyphRole::Normal);
    assert!((settled.text_size - metrics.size).abs() < f32::EPSILON);
}

#[test]
fn test_slide_animation_lifts_baseline_into_place() {
    let (mut pin, metrics, mut surface) = harness(4);
    pin.set_animation_mode(AnimationMode::Slide);
    pin.set_text_size(24.0);
    pin.on_text_changed("7");

    let resting = pin.layout().get(0).unwrap().baseline;

    pin.draw(&metrics, &mut surface);
    let start_baseline = surface
        .ops
        .iter()
        .find_map(|op| match op {
            DrawOp::Glyph { baseline, style, .. } if style.role == GlyphRole::Animated => {
                Some(*baseline)
            }
            _ => None,
        })
        .unwrap();
    assert!((start_baseline - (resting + 24.0)).abs() < 1e-3);

    while pin.tick(Duration::from_millis(50)) {}
    surface.clear();
    pin.draw(&metrics, &mut surface);
    let end_baseline = surface
        .ops
        .iter()
        .find_map(|op| match op {
            DrawOp::Glyph { baseline, .. } => Some(*baseline),
            _ => None,
        })
        .unwrap();
    assert!((end_baseline - resting).abs() < 1e-3);
}

// =============================================================================
// Layout interplay
// =============================================================================

#[test]
fn test_glyphs_center_in_their_cells() {
    let (mut pin, metrics, mut surface) = harness(4);
    pin.set_spacing(Spacing::Fixed(24.0));
    pin.on_text_changed("12");
    pin.draw(&metrics, &mut surface);

    let layout = pin.layout().clone();
    let glyph_xs: Vec<_> = surface
        .ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::Glyph { x, style, .. } if style.role != GlyphRole::Hint => Some(*x),
            _ => None,
        })
        .collect();

    for (i, x) in glyph_xs.iter().enumerate() {
        let cell = layout.get(i).unwrap();
        let expected = cell.rect.center_x() - metrics.advance / 2.0;
        assert!((x - expected).abs() < 1e-3, "glyph {i} centered");
    }
}
