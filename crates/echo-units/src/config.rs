// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Formatting preferences shared by HUD and tooling surfaces.

use crate::error::{MathError, MathResult};
use crate::units::{
    AccelerationUnit, AngleUnit, AreaUnit, LengthUnit, ProportionUnit, SignMode, SpeedUnit,
    MAX_DECIMALS,
};

/// User preferences applied by `format_with`.
///
/// `FormatPrefs::default()` reproduces the built-in `Display` output:
/// auto-selected units, exact/trimmed decimals, negative-only sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FormatPrefs {
    /// Fixed number of fractional digits; `None` trims trailing zeros.
    pub decimals: Option<u8>,
    /// Sign display policy.
    pub sign: SignMode,
    /// Preferred length unit; `None` auto-selects.
    pub length_unit: Option<LengthUnit>,
    /// Preferred area unit.
    pub area_unit: Option<AreaUnit>,
    /// Preferred angle unit.
    pub angle_unit: Option<AngleUnit>,
    /// Preferred speed unit.
    pub speed_unit: Option<SpeedUnit>,
    /// Preferred acceleration unit.
    pub acceleration_unit: Option<AccelerationUnit>,
    /// Preferred proportion unit.
    pub proportion_unit: Option<ProportionUnit>,
}

impl FormatPrefs {
    /// Rejects preferences the renderer cannot honour.
    pub fn validate(&self) -> MathResult<()> {
        match self.decimals {
            Some(d) if d > MAX_DECIMALS => Err(MathError::invalid_argument(
                "FormatPrefs::validate",
                format!("decimals must be at most {MAX_DECIMALS}, got {d}"),
            )),
            _ => Ok(()),
        }
    }

    /// Same preferences with a fixed number of decimals.
    pub fn with_decimals(mut self, decimals: u8) -> MathResult<Self> {
        self.decimals = Some(decimals);
        self.validate()?;
        Ok(self)
    }

    /// Same preferences with another sign policy.
    pub const fn with_sign(mut self, sign: SignMode) -> Self {
        self.sign = sign;
        self
    }

    /// Parses and validates preferences from JSON. Missing fields take
    /// their defaults.
    #[cfg(feature = "serde")]
    pub fn from_json(text: &str) -> MathResult<Self> {
        let prefs: Self = serde_json::from_str(text).map_err(|e| {
            MathError::invalid_argument("FormatPrefs::from_json", e.to_string())
        })?;
        prefs.validate()?;
        Ok(prefs)
    }

    /// Serializes to pretty-printed JSON.
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> MathResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| MathError::invalid_argument("FormatPrefs::to_json", e.to_string()))
    }
}
