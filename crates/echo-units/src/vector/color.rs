// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use core::fmt;

use crate::error::{MathError, MathResult};
use crate::observe::Mutable;
use crate::units::{fixed, Proportion};

/// Straight (non-premultiplied) RGBA colour; each channel a [`Proportion`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    r: Proportion,
    g: Proportion,
    b: Proportion,
    a: Proportion,
}

fn channel_from_u8(v: u8) -> Proportion {
    let ppb = fixed::mul_div_round(i128::from(v), 1_000_000_000, 255).unwrap_or(0);
    Proportion::from_ppb(ppb)
}

fn channel_to_u8(p: Proportion) -> u8 {
    let v = fixed::mul_div_round(i128::from(p.ppb()), 255, 1_000_000_000).unwrap_or(0);
    u8::try_from(v).unwrap_or(u8::MAX)
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::opaque(Proportion::ZERO, Proportion::ZERO, Proportion::ZERO);

    /// Opaque white.
    pub const WHITE: Self = Self::opaque(Proportion::ONE, Proportion::ONE, Proportion::ONE);

    /// Fully transparent black.
    pub const TRANSPARENT: Self =
        Self::new(Proportion::ZERO, Proportion::ZERO, Proportion::ZERO, Proportion::ZERO);

    /// Builds from channels.
    pub const fn new(r: Proportion, g: Proportion, b: Proportion, a: Proportion) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque colour from channels.
    pub const fn opaque(r: Proportion, g: Proportion, b: Proportion) -> Self {
        Self::new(r, g, b, Proportion::ONE)
    }

    /// From 8-bit channels.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(channel_from_u8(r), channel_from_u8(g), channel_from_u8(b), channel_from_u8(a))
    }

    /// To 8-bit channels, rounded to nearest.
    pub fn to_rgba8(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a].map(channel_to_u8)
    }

    /// Parses `#rrggbb` or `#rrggbbaa` (the `#` is optional).
    pub fn from_hex(text: &str) -> MathResult<Self> {
        let digits = text.strip_prefix('#').unwrap_or(text);
        let bad = || {
            MathError::invalid_argument(
                "Color::from_hex",
                format!("expected #rrggbb or #rrggbbaa, got {text:?}"),
            )
        };
        if !(digits.len() == 6 || digits.len() == 8) || !digits.is_ascii() {
            return Err(bad());
        }
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| bad());
        let a = if digits.len() == 8 { byte(6)? } else { u8::MAX };
        Ok(Self::from_rgba8(byte(0)?, byte(2)?, byte(4)?, a))
    }

    /// `#rrggbb` when opaque, `#rrggbbaa` otherwise.
    pub fn to_hex(self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == u8::MAX {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }

    /// Red channel.
    pub const fn r(self) -> Proportion {
        self.r
    }

    /// Green channel.
    pub const fn g(self) -> Proportion {
        self.g
    }

    /// Blue channel.
    pub const fn b(self) -> Proportion {
        self.b
    }

    /// Alpha channel.
    pub const fn a(self) -> Proportion {
        self.a
    }

    /// Same colour with another alpha.
    pub const fn with_alpha(self, a: Proportion) -> Self {
        Self { a, ..self }
    }

    /// Per-channel linear interpolation toward `rhs`.
    pub fn lerp(self, rhs: Self, t: f64) -> MathResult<Self> {
        Ok(Self::new(
            self.r.lerp(rhs.r, t)?,
            self.g.lerp(rhs.g, t)?,
            self.b.lerp(rhs.b, t)?,
            self.a.lerp(rhs.a, t)?,
        ))
    }

    /// Channels as `f32` in `[0, 1]`, the layout GPU uniforms expect.
    pub fn to_f32_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a].map(|c| c.to_fraction() as f32)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.to_hex())
    }
}

impl Mutable<Color> {
    /// Current red channel.
    pub fn r(&self) -> Proportion {
        self.read(|c| c.r)
    }

    /// Current green channel.
    pub fn g(&self) -> Proportion {
        self.read(|c| c.g)
    }

    /// Current blue channel.
    pub fn b(&self) -> Proportion {
        self.read(|c| c.b)
    }

    /// Current alpha channel.
    pub fn a(&self) -> Proportion {
        self.read(|c| c.a)
    }

    /// Replaces the red channel.
    pub fn set_r(&self, r: Proportion) {
        self.update(|c| c.r = r);
    }

    /// Replaces the green channel.
    pub fn set_g(&self, g: Proportion) {
        self.update(|c| c.g = g);
    }

    /// Replaces the blue channel.
    pub fn set_b(&self, b: Proportion) {
        self.update(|c| c.b = b);
    }

    /// Replaces the alpha channel.
    pub fn set_a(&self, a: Proportion) {
        self.update(|c| c.a = a);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip() {
        let c = Color::from_hex("#ff8000").unwrap();
        assert_eq!(c.to_rgba8(), [255, 128, 0, 255]);
        assert_eq!(c.to_hex(), "#ff8000");
        let t = Color::from_hex("10203040").unwrap();
        assert_eq!(t.to_hex(), "#10203040");
        assert!(Color::from_hex("#ff80").is_err());
        assert!(Color::from_hex("#gg0000").is_err());
        assert!(Color::from_hex("#ff80é0").is_err());
    }

    #[test]
    fn lerp_midpoint() {
        let mid = Color::BLACK.lerp(Color::WHITE, 0.5).unwrap();
        assert_eq!(mid.r(), Proportion::HALF);
        assert_eq!(mid.a(), Proportion::ONE);
        assert_eq!(Color::WHITE.with_alpha(Proportion::ZERO).to_string(), "#ffffff00");
    }

    #[test]
    fn mutable_channels() {
        let cell = Mutable::new(Color::BLACK);
        let mut ticket = crate::Observable::observe(&cell);
        cell.set_g(Proportion::ONE);
        assert_eq!(cell.g(), Proportion::ONE);
        assert!(ticket.fetch_and_reset());
        cell.set_g(Proportion::ONE);
        assert!(ticket.is_dirty());
        assert_eq!(cell.generation(), 2);
    }
}
