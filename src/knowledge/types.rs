//! Record types for the printing knowledge base.
//!
//! These types are deserialized from the embedded TOML data and serialized
//! to JSON for whatever frontend hosts the library.

use serde::{Deserialize, Serialize};

// =============================================================================
// VALUE TYPES
// =============================================================================

/// Inclusive temperature range in degrees Celsius, stored as `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[u16; 2]", into = "[u16; 2]")]
pub struct TempRange {
    min: u16,
    max: u16,
}

impl TempRange {
    pub fn new(min: u16, max: u16) -> Self {
        Self { min, max }
    }

    pub fn min(&self) -> u16 {
        self.min
    }

    pub fn max(&self) -> u16 {
        self.max
    }

    /// True when `min <= max`. Checked when data is loaded.
    pub fn is_ordered(&self) -> bool {
        self.min <= self.max
    }

    pub fn contains(&self, temp: u16) -> bool {
        self.min <= temp && temp <= self.max
    }
}

impl From<[u16; 2]> for TempRange {
    fn from([min, max]: [u16; 2]) -> Self {
        Self { min, max }
    }
}

impl From<TempRange> for [u16; 2] {
    fn from(range: TempRange) -> Self {
        [range.min, range.max]
    }
}

// =============================================================================
// RECORDS
// =============================================================================

/// Printing properties of a filament material.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MaterialProfile {
    /// Lookup key (e.g., "PLA")
    pub name: String,
    /// Recommended nozzle temperature range
    pub nozzle_temp: TempRange,
    /// Recommended bed temperature range
    pub bed_temp: TempRange,
    pub properties: String,
    /// Typical applications
    pub uses: String,
    pub tips: String,
    /// "Beginner" through "Advanced"
    pub difficulty: String,
    pub strength: String,
    pub flexibility: String,
    /// Qualitative rating with the softening point, e.g. "Low (60°C)"
    pub heat_resistance: String,
    pub chemical_resistance: String,
    pub post_processing: String,
}

impl MaterialProfile {
    /// Softening point embedded in `heat_resistance`, if it carries one.
    pub fn heat_resistance_celsius(&self) -> Option<u16> {
        let digits: String = self
            .heat_resistance
            .chars()
            .skip_while(|c| !c.is_ascii_digit())
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse().ok()
    }

    pub fn supports_nozzle_temp(&self, temp: u16) -> bool {
        self.nozzle_temp.contains(temp)
    }

    pub fn supports_bed_temp(&self, temp: u16) -> bool {
        self.bed_temp.contains(temp)
    }
}

/// A common print failure and how to deal with it.
///
/// Every list is non-empty. Items are in presentation order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FailureEntry {
    /// Lookup key; may contain spaces (e.g., "first layer adhesion")
    pub name: String,
    pub symptoms: Vec<String>,
    pub causes: Vec<String>,
    pub solutions: Vec<String>,
    pub prevention: Vec<String>,
}

/// A printer calibration routine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalibrationProcedure {
    pub name: String,
    /// Steps in execution order
    pub steps: Vec<String>,
    /// Tools needed to carry out the procedure
    pub tools: Vec<String>,
    /// How often to repeat it
    pub frequency: String,
}

/// Slicer settings for one point on the quality/speed tradeoff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsPreset {
    /// "quality", "standard" or "fast"
    pub name: String,
    /// Layer height in mm
    pub layer_height: f32,
    /// Print speed in mm/s
    pub print_speed: u16,
    /// Infill density in percent (0-100)
    pub infill: u8,
    /// Wall thickness in mm
    pub wall_thickness: f32,
    /// Number of solid top and bottom layers
    pub top_bottom_layers: u8,
}
