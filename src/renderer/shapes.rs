//! Shape generation for 2D primitives
//!
//! Everything on screen is built from axis-aligned quads, including the
//! score, which is drawn as seven-segment digits.

use glam::Vec2;

use super::vertex::Vertex;
use crate::sim::Rect;

/// Two triangles covering `rect`
pub fn quad(rect: &Rect, color: [f32; 4]) -> [Vertex; 6] {
    let (l, r, t, b) = (rect.left(), rect.right(), rect.top(), rect.bottom());
    [
        Vertex::new(l, t, color),
        Vertex::new(l, b, color),
        Vertex::new(r, t, color),
        Vertex::new(r, t, color),
        Vertex::new(l, b, color),
        Vertex::new(r, b, color),
    ]
}

/// Segment bits, `a` (top) through `g` (middle) in the usual order
const SEGMENTS: [u8; 10] = [
    0b011_1111, // 0: a b c d e f
    0b000_0110, // 1: b c
    0b101_1011, // 2: a b d e g
    0b100_1111, // 3: a b c d g
    0b110_0110, // 4: b c f g
    0b110_1101, // 5: a c d f g
    0b111_1101, // 6: a c d e f g
    0b000_0111, // 7: a b c
    0b111_1111, // 8: all
    0b110_1111, // 9: a b c d f g
];

/// Rectangles for one seven-segment digit with its top-left at `origin`
pub fn digit_rects(digit: u8, origin: Vec2, size: Vec2) -> Vec<Rect> {
    let mask = SEGMENTS[(digit % 10) as usize];
    let t = size.x / 5.0;
    let half = size.y / 2.0;
    let span_h = size.x - 2.0 * t;
    let span_v = half - 1.5 * t;
    let (x, y) = (origin.x, origin.y);

    let segments = [
        Rect::new(x + t, y, span_h, t),                           // a
        Rect::new(x + size.x - t, y + t, t, span_v),              // b
        Rect::new(x + size.x - t, y + half + t / 2.0, t, span_v), // c
        Rect::new(x + t, y + size.y - t, span_h, t),              // d
        Rect::new(x, y + half + t / 2.0, t, span_v),              // e
        Rect::new(x, y + t, t, span_v),                           // f
        Rect::new(x + t, y + half - t / 2.0, span_h, t),          // g
    ];

    segments
        .into_iter()
        .enumerate()
        .filter(|(i, _)| mask & (1 << i) != 0)
        .map(|(_, rect)| rect)
        .collect()
}

/// Width of `value` drawn with the given digit size and gap
pub fn number_width(value: u32, digit_size: Vec2, gap: f32) -> f32 {
    let digits = value.to_string().len() as f32;
    digits * digit_size.x + (digits - 1.0) * gap
}

/// Vertices for `value` in seven-segment digits, top-left at `origin`
pub fn number(value: u32, origin: Vec2, digit_size: Vec2, gap: f32, color: [f32; 4]) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    let mut x = origin.x;
    for ch in value.to_string().bytes() {
        for rect in digit_rects(ch - b'0', Vec2::new(x, origin.y), digit_size) {
            vertices.extend_from_slice(&quad(&rect, color));
        }
        x += digit_size.x + gap;
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_covers_rect() {
        let verts = quad(&Rect::new(10.0, 20.0, 30.0, 40.0), [1.0; 4]);
        let xs: Vec<f32> = verts.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = verts.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 10.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 40.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 20.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 60.0);
    }

    #[test]
    fn test_segment_counts() {
        let size = Vec2::new(20.0, 36.0);
        let counts: Vec<usize> = (0..10)
            .map(|d| digit_rects(d, Vec2::ZERO, size).len())
            .collect();
        assert_eq!(counts, vec![6, 2, 5, 5, 4, 5, 6, 3, 7, 6]);
    }

    #[test]
    fn test_digit_stays_in_cell() {
        let size = Vec2::new(20.0, 36.0);
        let origin = Vec2::new(5.0, 7.0);
        for rect in digit_rects(8, origin, size) {
            assert!(rect.left() >= origin.x && rect.right() <= origin.x + size.x);
            assert!(rect.top() >= origin.y && rect.bottom() <= origin.y + size.y);
        }
    }

    #[test]
    fn test_number_layout() {
        let size = Vec2::new(20.0, 36.0);
        // "10" = 2 + 6 segments
        assert_eq!(number(10, Vec2::ZERO, size, 4.0, [1.0; 4]).len(), 8 * 6);
        assert_eq!(number_width(10, size, 4.0), 44.0);
        assert_eq!(number_width(7, size, 4.0), 20.0);
    }
}
