//! Color mapping utilities for SVG visualization.

use std::fmt;

/// Simple RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Rgb {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
}

impl fmt::Display for Rgb {
    /// Format as CSS: rgb(r,g,b)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

impl Rgb {
    /// Format as a `#rrggbb` hex string.
    pub(crate) fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// HSL color: h in degrees, s and l in [0.0, 1.0].
#[derive(Clone, Copy, Debug)]
pub(crate) struct Hsl {
    pub(crate) h: f64,
    pub(crate) s: f64,
    pub(crate) l: f64,
}

impl fmt::Display for Hsl {
    /// Format as CSS HSL:
    ///   hsl({h:.1},{s:.0}%,{l:.0}%)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // normalize hue into [0,360)
        let h = (self.h % 360.0 + 360.0) % 360.0;
        let s = (self.s * 100.0).clamp(0.0, 100.0);
        let l = (self.l * 100.0).clamp(0.0, 100.0);
        write!(f, "hsl({:.1},{:.0}%,{:.0}%)", h, s, l)
    }
}

const NEUTRAL: Rgb = Rgb { r: 150, g: 150, b: 150 };

/// Sequential color scale, given as evenly spaced stops from low to high.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Ramp(&'static [Rgb]);

pub(crate) const VIRIDIS: Ramp = Ramp(&[
    Rgb { r:  68, g:   1, b:  84 },
    Rgb { r:  59, g:  82, b: 139 },
    Rgb { r:  33, g: 145, b: 140 },
    Rgb { r:  94, g: 201, b:  98 },
    Rgb { r: 253, g: 231, b:  37 },
]);

pub(crate) const PLASMA: Ramp = Ramp(&[
    Rgb { r:  13, g:   8, b: 135 },
    Rgb { r: 126, g:   3, b: 168 },
    Rgb { r: 204, g:  71, b: 120 },
    Rgb { r: 248, g: 149, b:  64 },
    Rgb { r: 240, g: 249, b:  33 },
]);

pub(crate) const TURBO: Ramp = Ramp(&[
    Rgb { r:  48, g:  18, b:  59 },
    Rgb { r:  70, g: 134, b: 251 },
    Rgb { r:  26, g: 228, b: 182 },
    Rgb { r: 164, g: 252, b:  60 },
    Rgb { r: 251, g: 185, b:  56 },
    Rgb { r: 228, g:  70, b:  10 },
    Rgb { r: 122, g:   4, b:   3 },
]);

impl Ramp {
    /// Color at position `t` in [0.0, 1.0], linearly interpolated between stops.
    /// Non-finite input falls back to neutral gray.
    pub(crate) fn at(&self, t: f64) -> Rgb {
        if !t.is_finite() { return NEUTRAL }

        let stops = self.0;
        let x = t.clamp(0.0, 1.0) * (stops.len() - 1) as f64;
        let lo = (x.floor() as usize).min(stops.len() - 2);
        let frac = x - lo as f64;

        let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
        let (a, b) = (stops[lo], stops[lo + 1]);
        Rgb { r: lerp(a.r, b.r), g: lerp(a.g, b.g), b: lerp(a.b, b.b) }
    }

    /// Color for `value` scaled linearly over `[min, max]`.
    /// A degenerate range maps everything to the middle of the ramp.
    pub(crate) fn scaled(&self, value: f64, min: f64, max: f64) -> Rgb {
        if !(max > min) { return self.at(0.5) }
        self.at((value - min) / (max - min))
    }
}

const GOLDEN_ANGLE: f64 = 137.50776405;

/// Well-separated categorical color for the `index`-th category.
pub(crate) fn golden_angle_color(index: usize) -> Hsl {
    Hsl { h: ((index as f64) * GOLDEN_ANGLE) % 360.0, s: 0.70, l: 0.55 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_endpoints() {
        assert_eq!(VIRIDIS.at(0.0), Rgb { r: 68, g: 1, b: 84 });
        assert_eq!(VIRIDIS.at(1.0), Rgb { r: 253, g: 231, b: 37 });
        assert_eq!(PLASMA.at(-3.0), PLASMA.at(0.0));
        assert_eq!(PLASMA.at(7.0), PLASMA.at(1.0));
    }

    #[test]
    fn ramp_interpolates_between_stops() {
        // Halfway between the first two stops of a five-stop ramp.
        let c = VIRIDIS.at(0.125);
        assert_eq!(c, Rgb { r: 64, g: 42, b: 112 });
    }

    #[test]
    fn non_finite_and_degenerate_ranges() {
        assert_eq!(TURBO.at(f64::NAN), NEUTRAL);
        assert_eq!(VIRIDIS.scaled(5.0, 3.0, 3.0), VIRIDIS.at(0.5));
        assert_eq!(VIRIDIS.scaled(5.0, 0.0, 10.0), VIRIDIS.at(0.5));
    }

    #[test]
    fn css_formats() {
        assert_eq!(Rgb { r: 1, g: 2, b: 255 }.to_string(), "rgb(1,2,255)");
        assert_eq!(Rgb { r: 1, g: 2, b: 255 }.to_hex(), "#0102ff");
        assert_eq!(golden_angle_color(0).to_string(), "hsl(0.0,70%,55%)");
        assert_eq!(golden_angle_color(1).to_string(), "hsl(137.5,70%,55%)");
    }
}
