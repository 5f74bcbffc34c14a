//! Pointwise color filters.

use crate::core::color::Color;
use crate::filters::kind::FilterKind;
use crate::filters::registry::Filter;

/// Channel sum below which a pixel turns black.
pub const BLACK_AND_WHITE_THRESHOLD: f32 = 1.5;

/// Sepia weights, one row per output channel, columns are input (r, g, b).
pub const SEPIA_MATRIX: [[f32; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

/// Color filters in menu order.
pub fn filters() -> Vec<Filter> {
    vec![
        Filter::new("Invert", FilterKind::Pointwise(invert)),
        Filter::new("Grayscale", FilterKind::Pointwise(grayscale)),
        Filter::new("Saturate", FilterKind::Pointwise(saturate)),
        Filter::new("Black and White", FilterKind::Pointwise(black_and_white)),
        Filter::new("Red", FilterKind::Pointwise(force_red)),
        Filter::new("Green", FilterKind::Pointwise(force_green)),
        Filter::new("Blue", FilterKind::Pointwise(force_blue)),
        Filter::new("Sepia", FilterKind::Pointwise(sepia)),
    ]
}

pub fn invert(c: Color) -> Color {
    c.invert()
}

pub fn grayscale(c: Color) -> Color {
    c.grayscale()
}

pub fn saturate(c: Color) -> Color {
    c.saturate()
}

/// Black when `r + g + b < 1.5`, white otherwise. Alpha is kept.
pub fn black_and_white(c: Color) -> Color {
    let target = if c.channel_sum() < BLACK_AND_WHITE_THRESHOLD {
        Color::BLACK
    } else {
        Color::WHITE
    };
    target.with_alpha(c.alpha())
}

pub fn force_red(c: Color) -> Color {
    c.with_red(1.0)
}

pub fn force_green(c: Color) -> Color {
    c.with_green(1.0)
}

pub fn force_blue(c: Color) -> Color {
    c.with_blue(1.0)
}

/// Classic sepia tone. Each output channel is capped at 1.
pub fn sepia(c: Color) -> Color {
    let input = [c.red(), c.green(), c.blue()];
    let [r, g, b] = SEPIA_MATRIX.map(|row| {
        let sum: f32 = row.iter().zip(input).map(|(w, v)| w * v).sum();
        sum.min(1.0)
    });
    Color::rgba(r, g, b, c.alpha())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    #[test]
    fn test_red_scenario() {
        let out = force_red(Color::rgb(0.2, 0.4, 0.6));
        assert!(out.approx_eq(&Color::rgb(1.0, 0.4, 0.6), EPS));
    }

    #[test]
    fn test_green_and_blue_force_one_channel() {
        let c = Color::rgba(0.2, 0.4, 0.6, 0.5);
        assert!(force_green(c).approx_eq(&Color::rgba(0.2, 1.0, 0.6, 0.5), EPS));
        assert!(force_blue(c).approx_eq(&Color::rgba(0.2, 0.4, 1.0, 0.5), EPS));
    }

    #[test]
    fn test_black_and_white_threshold() {
        assert_eq!(black_and_white(Color::rgb(0.9, 0.9, 0.9)), Color::WHITE);
        assert_eq!(black_and_white(Color::rgb(0.1, 0.1, 0.1)), Color::BLACK);
        // Exactly at the threshold counts as white.
        assert_eq!(black_and_white(Color::rgb(0.5, 0.5, 0.5)), Color::WHITE);
    }

    #[test]
    fn test_black_and_white_keeps_alpha() {
        let out = black_and_white(Color::rgba(0.0, 0.0, 0.0, 0.25));
        assert_eq!(out, Color::rgba(0.0, 0.0, 0.0, 0.25));
    }

    #[test]
    fn test_sepia_weights() {
        let out = sepia(Color::rgb(0.1, 0.2, 0.3));
        let r = 0.393 * 0.1 + 0.769 * 0.2 + 0.189 * 0.3;
        let g = 0.349 * 0.1 + 0.686 * 0.2 + 0.168 * 0.3;
        let b = 0.272 * 0.1 + 0.534 * 0.2 + 0.131 * 0.3;
        assert!(out.approx_eq(&Color::rgb(r, g, b), 1e-5));
    }

    #[test]
    fn test_sepia_clamps_white() {
        let out = sepia(Color::WHITE);
        // 0.272 + 0.534 + 0.131 = 0.937 stays below the cap.
        assert!(out.approx_eq(&Color::rgb(1.0, 1.0, 0.937), 1e-5));
    }

    #[test]
    fn test_invert_twice_is_identity() {
        let c = Color::rgba(0.25, 0.5, 0.125, 0.75);
        assert_eq!(invert(invert(c)), c);
    }

    #[test]
    fn test_menu_order() {
        let names: Vec<String> = filters().into_iter().map(|f| f.name().to_string()).collect();
        assert_eq!(
            names,
            vec![
                "Invert",
                "Grayscale",
                "Saturate",
                "Black and White",
                "Red",
                "Green",
                "Blue",
                "Sepia"
            ]
        );
    }

    #[test]
    fn test_all_color_filters_are_pointwise() {
        assert!(filters().iter().all(|f| f.kind().color_map().is_some()));
    }
}
