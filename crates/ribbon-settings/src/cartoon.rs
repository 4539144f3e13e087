//! The cartoon generation parameter record

use serde::{Deserialize, Serialize};

use crate::error::SettingError;

/// Smallest ring resolution that still reads as round
pub const MIN_PROFILE_QUALITY: u32 = 8;

/// Parameters for cartoon ribbon generation
///
/// Lengths are in Angstroms. Widths and thicknesses are half-extents of the
/// cross-section. Distances along the chain (`arrow_length`,
/// `arrow_round_span`) are measured in residues.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartoonSettings {
    /// Curve samples per control-point interval
    pub sampling: u32,
    /// Points per cross-section ring
    pub profile_quality: u32,

    /// Round tube radius for coil
    pub coil_radius: f32,
    /// Helix ribbon half-width
    pub helix_width: f32,
    /// Helix ribbon half-thickness
    pub helix_thickness: f32,
    /// Sheet ribbon half-width
    pub sheet_width: f32,
    /// Sheet ribbon half-thickness
    pub sheet_thickness: f32,
    /// Superellipse exponent of the sheet profile (2 = ellipse)
    pub sheet_exponent: f32,

    /// Arrowhead taper length before a strand end
    pub arrow_length: f32,
    /// Arrowhead half-width where the taper starts
    pub arrow_width: f32,
    /// Span before the taper over which the sheet profile rounds toward an ellipse
    pub arrow_round_span: f32,

    pub coil_smooth_cycles: u32,
    pub coil_smooth_weight: f32,
    pub sheet_smooth_cycles: u32,
    pub sheet_smooth_weight: f32,

    /// Sheet flattening cycles
    pub flat_cycles: u32,

    /// Arrow-tip straightening cycles
    pub tip_refine_cycles: u32,
    /// How many points before the tip the straightening line is anchored
    pub tip_anchor_offset: u32,
    /// Fraction of the distance to the line covered per cycle
    pub tip_pull: f32,

    /// Shortest helix run that is idealized
    pub min_helix_length: u32,

    pub idealize_helices: bool,
    pub flatten_sheets: bool,
    pub refine_tips: bool,
}

impl Default for CartoonSettings {
    fn default() -> Self {
        Self {
            sampling: 7,
            profile_quality: 16,
            coil_radius: 0.25,
            helix_width: 1.35,
            helix_thickness: 0.25,
            sheet_width: 1.40,
            sheet_thickness: 0.25,
            sheet_exponent: 4.0,
            arrow_length: 2.0,
            arrow_width: 1.40,
            arrow_round_span: 1.0,
            coil_smooth_cycles: 2,
            coil_smooth_weight: 0.5,
            sheet_smooth_cycles: 2,
            sheet_smooth_weight: 0.5,
            flat_cycles: 4,
            tip_refine_cycles: 3,
            tip_anchor_offset: 3,
            tip_pull: 0.5,
            min_helix_length: 4,
            idealize_helices: true,
            flatten_sheets: true,
            refine_tips: true,
        }
    }
}

impl CartoonSettings {
    /// Check every field is inside its usable range
    pub fn validate(&self) -> Result<(), SettingError> {
        if self.sampling == 0 {
            return Err(SettingError::invalid("sampling", "must be at least 1"));
        }
        if self.profile_quality < MIN_PROFILE_QUALITY {
            return Err(SettingError::invalid(
                "profile_quality",
                format!("value {} is below minimum {}", self.profile_quality, MIN_PROFILE_QUALITY),
            ));
        }

        let positive = [
            ("coil_radius", self.coil_radius),
            ("helix_width", self.helix_width),
            ("helix_thickness", self.helix_thickness),
            ("sheet_width", self.sheet_width),
            ("sheet_thickness", self.sheet_thickness),
            ("arrow_length", self.arrow_length),
            ("arrow_width", self.arrow_width),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(SettingError::invalid(name, format!("value {} must be positive", value)));
            }
        }

        if !self.arrow_round_span.is_finite() || self.arrow_round_span < 0.0 {
            return Err(SettingError::invalid("arrow_round_span", "must not be negative"));
        }
        if !self.sheet_exponent.is_finite() || self.sheet_exponent < 1.0 {
            return Err(SettingError::invalid(
                "sheet_exponent",
                format!("value {} is below 1.0", self.sheet_exponent),
            ));
        }

        let fractions = [
            ("coil_smooth_weight", self.coil_smooth_weight),
            ("sheet_smooth_weight", self.sheet_smooth_weight),
            ("tip_pull", self.tip_pull),
        ];
        for (name, value) in fractions {
            if !(0.0..=1.0).contains(&value) {
                return Err(SettingError::invalid(
                    name,
                    format!("value {} is outside range [0, 1]", value),
                ));
            }
        }

        if self.min_helix_length < 4 {
            return Err(SettingError::invalid(
                "min_helix_length",
                "an axis needs at least 4 points",
            ));
        }
        if self.tip_anchor_offset == 0 {
            return Err(SettingError::invalid("tip_anchor_offset", "must be at least 1"));
        }

        Ok(())
    }

    /// Parse from JSON; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self, SettingError> {
        let settings: CartoonSettings =
            serde_json::from_str(json).map_err(|e| SettingError::Deserialization(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json_string(&self) -> Result<String, SettingError> {
        serde_json::to_string_pretty(self).map_err(|e| SettingError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = CartoonSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.sampling, 7);
        assert!((settings.arrow_width - settings.sheet_width).abs() < 1e-6);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let mut settings = CartoonSettings::default();
        settings.coil_smooth_weight = 1.5;
        assert!(matches!(
            settings.validate(),
            Err(SettingError::InvalidValue { ref name, .. }) if name == "coil_smooth_weight"
        ));

        let mut settings = CartoonSettings::default();
        settings.helix_width = 0.0;
        assert!(settings.validate().is_err());

        let mut settings = CartoonSettings::default();
        settings.min_helix_length = 3;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = CartoonSettings::from_json_str(r#"{ "sampling": 4, "refine_tips": false }"#).unwrap();
        assert_eq!(settings.sampling, 4);
        assert!(!settings.refine_tips);
        assert_eq!(settings.profile_quality, 16);
        assert!((settings.sheet_exponent - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_json_rejects_invalid_values() {
        assert!(matches!(
            CartoonSettings::from_json_str(r#"{ "profile_quality": 4 }"#),
            Err(SettingError::InvalidValue { .. })
        ));
        assert!(matches!(
            CartoonSettings::from_json_str("not json"),
            Err(SettingError::Deserialization(_))
        ));
    }
}
