//! Color mapping for highlight maps.

use image::Rgba;

/// HSV color: h, s and v all in [0.0, 1.0].
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Hsv {
    pub(crate) h: f64,
    pub(crate) s: f64,
    pub(crate) v: f64,
}

impl Hsv {
    /// Convert to RGB channels in [0.0, 1.0] (six-sector hexcone model).
    pub(crate) fn to_rgb(self) -> (f64, f64, f64) {
        let Hsv { h, s, v } = self;
        if s == 0.0 { return (v, v, v) }

        let sector = (h * 6.0).floor();
        let f = h * 6.0 - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));
        match (sector as i64).rem_euclid(6) {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        }
    }
}

/// Hue of the highlight ramp (a warm yellow).
const HIGHLIGHT_HUE: f64 = 0.15;

/// Color of a pixel whose highlighted fraction is `lit` in [0, 1]:
/// pale and bright when nothing is highlighted, saturated and darker when all of it is.
pub(crate) fn highlight_color(lit: f64) -> Rgba<u8> {
    // Handle NaN by treating the pixel as unlit.
    let lit = if lit.is_nan() { 0.0 } else { lit.clamp(0.0, 1.0) };
    let (r, g, b) = Hsv { h: HIGHLIGHT_HUE, s: 0.1 + 0.8 * lit, v: 0.9 - 0.3 * lit }.to_rgb();
    // Blue is scaled down to warm the whole ramp.
    Rgba([(255.0 * r) as u8, (255.0 * g) as u8, (220.0 * b) as u8, 255])
}

/// Gray level of a density in [0, 1].
#[inline]
pub(crate) fn gray_level(value: f64) -> u8 {
    if value.is_nan() { return 0 }
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_hues() {
        assert_eq!(Hsv { h: 0.0, s: 1.0, v: 1.0 }.to_rgb(), (1.0, 0.0, 0.0));
        assert_eq!(Hsv { h: 1.0 / 3.0, s: 1.0, v: 1.0 }.to_rgb().1, 1.0);
        assert_eq!(Hsv { h: 0.5, s: 0.0, v: 0.25 }.to_rgb(), (0.25, 0.25, 0.25));
    }

    #[test]
    fn highlight_ramp_endpoints() {
        // v = 0.9, s = 0.1: r = 0.9, g = 0.9 * (1 - 0.1 * 0.1), b = 0.81.
        assert_eq!(highlight_color(0.0), Rgba([229, 227, 178, 255]));
        // v = 0.6, s = 0.9: r = 0.6, g = 0.6 * (1 - 0.9 * 0.1), b = 0.06.
        assert_eq!(highlight_color(1.0), Rgba([153, 139, 13, 255]));
        assert_eq!(highlight_color(f64::NAN), highlight_color(0.0));
    }

    #[test]
    fn gray_levels_clamp() {
        assert_eq!(gray_level(0.0), 0);
        assert_eq!(gray_level(1.0), 255);
        assert_eq!(gray_level(2.0), 255);
        assert_eq!(gray_level(0.5), 128);
    }
}
