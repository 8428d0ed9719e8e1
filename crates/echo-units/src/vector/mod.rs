// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Three-component spatial values.
//!
//! Quantity-backed triples ([`Length3`], [`Area3`], [`Velocity3`],
//! [`Acceleration3`], [`Point3`]) keep the exact integer representation of
//! their scalar kind per axis. Float-backed types ([`Point3d`],
//! [`Distance3d`], [`Direction3`], [`Scale3`]) hold metres or unitless
//! factors in `f64`.
//!
//! Each value type is immutable; wrap one in [`crate::Mutable`] for locked,
//! observable in-place updates through the generated accessors.

/// Struct, accessors, `Display`, and `Mutable` accessors for a triple of
/// one scalar kind.
macro_rules! quantity_triple {
    (
        $(#[$meta:meta])*
        $name:ident($scalar:ident, $unit:ident) {
            $x:ident / $set_x:ident / $with_x:ident,
            $y:ident / $set_y:ident / $with_y:ident,
            $z:ident / $set_z:ident / $with_z:ident $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name {
            $x: $scalar,
            $y: $scalar,
            $z: $scalar,
        }

        impl $name {
            /// All components zero.
            pub const ZERO: Self = Self::new($scalar::ZERO, $scalar::ZERO, $scalar::ZERO);

            /// Builds from components.
            pub const fn new($x: $scalar, $y: $scalar, $z: $scalar) -> Self {
                Self { $x, $y, $z }
            }

            /// All three components equal to `value`.
            pub const fn splat(value: $scalar) -> Self {
                Self::new(value, value, value)
            }

            /// Builds from integer counts of `unit`.
            pub fn from_units(
                $x: i64,
                $y: i64,
                $z: i64,
                unit: $unit,
            ) -> $crate::error::MathResult<Self> {
                Ok(Self::new(
                    $scalar::new($x, unit)?,
                    $scalar::new($y, unit)?,
                    $scalar::new($z, unit)?,
                ))
            }

            #[doc = concat!("The `", stringify!($x), "` component.")]
            pub const fn $x(self) -> $scalar {
                self.$x
            }

            #[doc = concat!("The `", stringify!($y), "` component.")]
            pub const fn $y(self) -> $scalar {
                self.$y
            }

            #[doc = concat!("The `", stringify!($z), "` component.")]
            pub const fn $z(self) -> $scalar {
                self.$z
            }

            #[doc = concat!("Copy with `", stringify!($x), "` replaced.")]
            pub const fn $with_x(self, value: $scalar) -> Self {
                Self { $x: value, ..self }
            }

            #[doc = concat!("Copy with `", stringify!($y), "` replaced.")]
            pub const fn $with_y(self, value: $scalar) -> Self {
                Self { $y: value, ..self }
            }

            #[doc = concat!("Copy with `", stringify!($z), "` replaced.")]
            pub const fn $with_z(self, value: $scalar) -> Self {
                Self { $z: value, ..self }
            }

            /// Components in axis order.
            pub const fn to_array(self) -> [$scalar; 3] {
                [self.$x, self.$y, self.$z]
            }

            /// Components as fractional counts of `unit`.
            pub fn to_f64_array(self, unit: $unit) -> [f64; 3] {
                self.to_array().map(|c| c.to_f64(unit))
            }

            /// Raw tick counts in axis order.
            pub const fn raw(self) -> [i64; 3] {
                [self.$x.raw(), self.$y.raw(), self.$z.raw()]
            }

            pub(crate) fn raw_f64(self) -> [f64; 3] {
                self.raw().map(|r| r as f64)
            }

            /// `true` when every component is zero.
            pub const fn is_zero(self) -> bool {
                self.$x.is_zero() && self.$y.is_zero() && self.$z.is_zero()
            }

            /// Component-wise minimum.
            pub fn min_components(self, rhs: Self) -> Self {
                Self::new(self.$x.min(rhs.$x), self.$y.min(rhs.$y), self.$z.min(rhs.$z))
            }

            /// Component-wise maximum.
            pub fn max_components(self, rhs: Self) -> Self {
                Self::new(self.$x.max(rhs.$x), self.$y.max(rhs.$y), self.$z.max(rhs.$z))
            }

            /// Runs `f` against a temporary mutable copy and returns the frozen
            /// result; `self` is untouched.
            pub fn edited(
                self,
                f: impl FnOnce(&$crate::observe::Mutable<Self>) -> $crate::error::MathResult<()>,
            ) -> $crate::error::MathResult<Self> {
                $crate::observe::build(self, f)
            }
        }

        impl From<[$scalar; 3]> for $name {
            fn from([$x, $y, $z]: [$scalar; 3]) -> Self {
                Self::new($x, $y, $z)
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "({}, {}, {})", self.$x, self.$y, self.$z)
            }
        }

        impl $crate::observe::Mutable<$name> {
            #[doc = concat!("Current `", stringify!($x), "`.")]
            pub fn $x(&self) -> $scalar {
                self.read(|v| v.$x)
            }

            #[doc = concat!("Current `", stringify!($y), "`.")]
            pub fn $y(&self) -> $scalar {
                self.read(|v| v.$y)
            }

            #[doc = concat!("Current `", stringify!($z), "`.")]
            pub fn $z(&self) -> $scalar {
                self.read(|v| v.$z)
            }

            #[doc = concat!("Replaces `", stringify!($x), "`.")]
            pub fn $set_x(&self, value: $scalar) {
                self.update(|v| v.$x = value);
            }

            #[doc = concat!("Replaces `", stringify!($y), "`.")]
            pub fn $set_y(&self, value: $scalar) {
                self.update(|v| v.$y = value);
            }

            #[doc = concat!("Replaces `", stringify!($z), "`.")]
            pub fn $set_z(&self, value: $scalar) {
                self.update(|v| v.$z = value);
            }
        }
    };
}

/// Checked component-wise arithmetic for a displacement-like triple.
macro_rules! quantity_vector_ops {
    ($name:ident($scalar:ident) { $x:ident, $y:ident, $z:ident }) => {
        impl $name {
            /// Component-wise checked sum.
            pub fn checked_add(self, rhs: Self) -> $crate::error::MathResult<Self> {
                Ok(Self::new(
                    self.$x.checked_add(rhs.$x)?,
                    self.$y.checked_add(rhs.$y)?,
                    self.$z.checked_add(rhs.$z)?,
                ))
            }

            /// Component-wise checked difference.
            pub fn checked_sub(self, rhs: Self) -> $crate::error::MathResult<Self> {
                Ok(Self::new(
                    self.$x.checked_sub(rhs.$x)?,
                    self.$y.checked_sub(rhs.$y)?,
                    self.$z.checked_sub(rhs.$z)?,
                ))
            }

            /// Checked negation.
            pub fn checked_neg(self) -> $crate::error::MathResult<Self> {
                Ok(Self::new(
                    self.$x.checked_neg()?,
                    self.$y.checked_neg()?,
                    self.$z.checked_neg()?,
                ))
            }

            /// Checked multiplication of every component by an integer.
            pub fn checked_mul(self, factor: i64) -> $crate::error::MathResult<Self> {
                Ok(Self::new(
                    self.$x.checked_mul(factor)?,
                    self.$y.checked_mul(factor)?,
                    self.$z.checked_mul(factor)?,
                ))
            }

            /// Checked integer division of every component.
            pub fn checked_div(self, divisor: i64) -> $crate::error::MathResult<Self> {
                Ok(Self::new(
                    self.$x.checked_div(divisor)?,
                    self.$y.checked_div(divisor)?,
                    self.$z.checked_div(divisor)?,
                ))
            }

            /// Multiplies every component by a finite factor.
            pub fn scaled_by(self, factor: f64) -> $crate::error::MathResult<Self> {
                Ok(Self::new(
                    self.$x.scaled_by(factor)?,
                    self.$y.scaled_by(factor)?,
                    self.$z.scaled_by(factor)?,
                ))
            }

            /// Linear interpolation toward `rhs`.
            pub fn lerp(self, rhs: Self, t: f64) -> $crate::error::MathResult<Self> {
                Ok(Self::new(
                    self.$x.lerp(rhs.$x, t)?,
                    self.$y.lerp(rhs.$y, t)?,
                    self.$z.lerp(rhs.$z, t)?,
                ))
            }

            /// Euclidean length, rounded to the nearest tick.
            pub fn magnitude(self) -> $crate::error::MathResult<$scalar> {
                let m = $crate::vector::stable::magnitude(self.raw_f64());
                $crate::units::fixed::round_to_ticks(
                    concat!(stringify!($name), "::magnitude"),
                    m,
                )
                .map($scalar::from_raw)
            }

            /// Unit vector along this one; `InvalidState` for the zero vector.
            pub fn normalized(self) -> $crate::error::MathResult<$crate::vector::Direction3> {
                let [x, y, z] = self.raw_f64();
                $crate::vector::Direction3::new(x, y, z)
            }
        }

        impl $crate::observe::Mutable<$name> {
            /// Adds `rhs` in place; nothing changes on overflow.
            pub fn checked_add_assign(&self, rhs: $name) -> $crate::error::MathResult<()> {
                self.mutate(|v| {
                    *v = v.checked_add(rhs)?;
                    Ok(())
                })
            }

            /// Subtracts `rhs` in place; nothing changes on overflow.
            pub fn checked_sub_assign(&self, rhs: $name) -> $crate::error::MathResult<()> {
                self.mutate(|v| {
                    *v = v.checked_sub(rhs)?;
                    Ok(())
                })
            }

            /// Scales in place; nothing changes on error.
            pub fn scale_assign(&self, factor: f64) -> $crate::error::MathResult<()> {
                self.mutate(|v| {
                    *v = v.scaled_by(factor)?;
                    Ok(())
                })
            }
        }
    };
}

mod acceleration3;
mod area3;
mod color;
mod direction3;
mod distance3d;
mod length3;
mod point3;
mod scale3;
pub(crate) mod stable;
mod velocity3;

pub use acceleration3::Acceleration3;
pub use area3::Area3;
pub use color::Color;
pub use direction3::Direction3;
pub use distance3d::Distance3d;
pub use length3::Length3;
pub use point3::{Point3, Point3d};
pub use scale3::Scale3;
pub use velocity3::Velocity3;
