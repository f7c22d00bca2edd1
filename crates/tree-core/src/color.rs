//! Colour helpers for the height-driven rainbow ramp.

/// Convert HSL (all components in \[0, 1\]) to sRGB.
///
/// Hue wraps, so `1.0` is the same red as `0.0`. Saturation and lightness are
/// clamped.
pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> [f32; 3] {
    let h = hue.rem_euclid(1.0);
    let s = saturation.clamp(0.0, 1.0);
    let l = lightness.clamp(0.0, 1.0);
    if s == 0.0 {
        return [l, l, l];
    }
    let p = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let q = 2.0 * l - p;
    [
        hue_to_channel(q, p, h + 1.0 / 3.0),
        hue_to_channel(q, p, h),
        hue_to_channel(q, p, h - 1.0 / 3.0),
    ]
}

#[inline]
fn hue_to_channel(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 0.5 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * 6.0 * (2.0 / 3.0 - t);
    }
    p
}

/// sRGB transfer function inverse, for writing authored colours into an
/// sRGB render target.
#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

pub fn rgb_to_linear(rgb: [f32; 3]) -> [f32; 3] {
    rgb.map(srgb_to_linear)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: [f32; 3], b: [f32; 3]) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-5)
    }

    #[test]
    fn primary_hues() {
        assert!(close(hsl_to_rgb(0.0, 1.0, 0.5), [1.0, 0.0, 0.0]));
        assert!(close(hsl_to_rgb(1.0 / 3.0, 1.0, 0.5), [0.0, 1.0, 0.0]));
        assert!(close(hsl_to_rgb(2.0 / 3.0, 1.0, 0.5), [0.0, 0.0, 1.0]));
    }

    #[test]
    fn hue_wraps_at_one() {
        assert!(close(hsl_to_rgb(1.0, 0.8, 0.5), hsl_to_rgb(0.0, 0.8, 0.5)));
        assert!(close(hsl_to_rgb(-0.25, 0.8, 0.5), hsl_to_rgb(0.75, 0.8, 0.5)));
    }

    #[test]
    fn zero_saturation_is_grey() {
        assert_eq!(hsl_to_rgb(0.4, 0.0, 0.3), [0.3, 0.3, 0.3]);
    }

    #[test]
    fn ramp_colour_at_half_lightness() {
        // s = 0.8, l = 0.5 -> channels span [0.1, 0.9]
        let [r, g, b] = hsl_to_rgb(0.0, 0.8, 0.5);
        assert!((r - 0.9).abs() < 1e-5);
        assert!((g - 0.1).abs() < 1e-5);
        assert!((b - 0.1).abs() < 1e-5);
    }

    #[test]
    fn linearisation_keeps_endpoints() {
        assert_eq!(srgb_to_linear(0.0), 0.0);
        assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-6);
        assert!(srgb_to_linear(0.5) < 0.5);
    }
}
