//! Read-only store over the four knowledge categories.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::diagnosis::Diagnosis;
use crate::error::{EntryKind, KnowledgeError};

use super::types::{CalibrationProcedure, FailureEntry, MaterialProfile, SettingsPreset};

/// Materials, troubleshooting entries, calibration procedures and settings
/// presets, each kept in declaration order.
///
/// There is no mutation API. Construct one with [`KnowledgeBase::from_toml_str`]
/// or use the process-wide instance from [`crate::knowledge_base`].
/// Deserializing one directly runs the same validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "KnowledgeConfig")]
pub struct KnowledgeBase {
    materials: Vec<MaterialProfile>,
    troubleshooting: Vec<FailureEntry>,
    calibration: Vec<CalibrationProcedure>,
    settings: Vec<SettingsPreset>,
}

/// Root of `knowledge_base.toml` as parsed, before validation.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct KnowledgeConfig {
    materials: Vec<MaterialProfile>,
    troubleshooting: Vec<FailureEntry>,
    calibration: Vec<CalibrationProcedure>,
    settings: Vec<SettingsPreset>,
}

impl TryFrom<KnowledgeConfig> for KnowledgeBase {
    type Error = KnowledgeError;

    fn try_from(config: KnowledgeConfig) -> Result<Self, Self::Error> {
        let kb = KnowledgeBase {
            materials: config.materials,
            troubleshooting: config.troubleshooting,
            calibration: config.calibration,
            settings: config.settings,
        };
        kb.validate()?;
        Ok(kb)
    }
}

impl KnowledgeBase {
    /// Parse and validate knowledge-base TOML.
    pub fn from_toml_str(content: &str) -> Result<Self, KnowledgeError> {
        let config: KnowledgeConfig = toml::from_str(content)?;
        let kb = KnowledgeBase::try_from(config)?;
        info!(
            "Loaded knowledge base: {} materials, {} failures, {} procedures, {} presets",
            kb.materials.len(),
            kb.troubleshooting.len(),
            kb.calibration.len(),
            kb.settings.len()
        );
        Ok(kb)
    }

    // -------------------------------------------------------------------------
    // Lookups (exact, case-sensitive)
    // -------------------------------------------------------------------------

    pub fn material(&self, name: &str) -> Result<&MaterialProfile, KnowledgeError> {
        debug!("Looking up material {:?}", name);
        self.materials
            .iter()
            .find(|m| m.name == name)
            .ok_or_else(|| KnowledgeError::not_found(EntryKind::Material, name))
    }

    pub fn failure(&self, name: &str) -> Result<&FailureEntry, KnowledgeError> {
        debug!("Looking up troubleshooting entry {:?}", name);
        self.troubleshooting
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| KnowledgeError::not_found(EntryKind::Failure, name))
    }

    pub fn calibration(&self, name: &str) -> Result<&CalibrationProcedure, KnowledgeError> {
        debug!("Looking up calibration procedure {:?}", name);
        self.calibration
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| KnowledgeError::not_found(EntryKind::Calibration, name))
    }

    pub fn preset(&self, name: &str) -> Result<&SettingsPreset, KnowledgeError> {
        debug!("Looking up settings preset {:?}", name);
        self.settings
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| KnowledgeError::not_found(EntryKind::Preset, name))
    }

    /// The troubleshooting entry a keyword diagnosis points at.
    ///
    /// `Ok(None)` when the pattern has no linked entry; `NotFound` when the
    /// link names an entry this knowledge base does not have.
    pub fn failure_for(
        &self,
        diagnosis: &Diagnosis<'_>,
    ) -> Result<Option<&FailureEntry>, KnowledgeError> {
        diagnosis
            .related_failure
            .map(|name| self.failure(name))
            .transpose()
    }

    // -------------------------------------------------------------------------
    // Listing (declaration order, not sorted)
    // -------------------------------------------------------------------------

    pub fn material_names(&self) -> Vec<&str> {
        self.materials.iter().map(|m| m.name.as_str()).collect()
    }

    pub fn failure_names(&self) -> Vec<&str> {
        self.troubleshooting.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn calibration_names(&self) -> Vec<&str> {
        self.calibration.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn preset_names(&self) -> Vec<&str> {
        self.settings.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn materials(&self) -> &[MaterialProfile] {
        &self.materials
    }

    pub fn failures(&self) -> &[FailureEntry] {
        &self.troubleshooting
    }

    pub fn calibrations(&self) -> &[CalibrationProcedure] {
        &self.calibration
    }

    pub fn presets(&self) -> &[SettingsPreset] {
        &self.settings
    }

    // -------------------------------------------------------------------------
    // Validation
    // -------------------------------------------------------------------------

    fn validate(&self) -> Result<(), KnowledgeError> {
        check_unique(EntryKind::Material, self.materials.iter().map(|m| &m.name))?;
        check_unique(EntryKind::Failure, self.troubleshooting.iter().map(|f| &f.name))?;
        check_unique(EntryKind::Calibration, self.calibration.iter().map(|c| &c.name))?;
        check_unique(EntryKind::Preset, self.settings.iter().map(|s| &s.name))?;

        for m in &self.materials {
            if !m.nozzle_temp.is_ordered() {
                return Err(KnowledgeError::invalid(
                    EntryKind::Material,
                    &m.name,
                    format!(
                        "nozzle temp range {}-{}C is reversed",
                        m.nozzle_temp.min(),
                        m.nozzle_temp.max()
                    ),
                ));
            }
            if !m.bed_temp.is_ordered() {
                return Err(KnowledgeError::invalid(
                    EntryKind::Material,
                    &m.name,
                    format!(
                        "bed temp range {}-{}C is reversed",
                        m.bed_temp.min(),
                        m.bed_temp.max()
                    ),
                ));
            }
        }

        for f in &self.troubleshooting {
            let lists = [
                ("symptoms", &f.symptoms),
                ("causes", &f.causes),
                ("solutions", &f.solutions),
                ("prevention", &f.prevention),
            ];
            if let Some((field, _)) = lists.iter().find(|(_, items)| items.is_empty()) {
                return Err(KnowledgeError::invalid(
                    EntryKind::Failure,
                    &f.name,
                    format!("{} must not be empty", field),
                ));
            }
        }

        for c in &self.calibration {
            if c.steps.is_empty() {
                return Err(KnowledgeError::invalid(
                    EntryKind::Calibration,
                    &c.name,
                    "steps must not be empty",
                ));
            }
        }

        for s in &self.settings {
            if s.infill > 100 {
                return Err(KnowledgeError::invalid(
                    EntryKind::Preset,
                    &s.name,
                    format!("infill {}% out of range (0-100%)", s.infill),
                ));
            }
            if !(s.layer_height.is_finite() && s.layer_height > 0.0) {
                return Err(KnowledgeError::invalid(
                    EntryKind::Preset,
                    &s.name,
                    format!("layer height {}mm must be positive", s.layer_height),
                ));
            }
            if !(s.wall_thickness.is_finite() && s.wall_thickness > 0.0) {
                return Err(KnowledgeError::invalid(
                    EntryKind::Preset,
                    &s.name,
                    format!("wall thickness {}mm must be positive", s.wall_thickness),
                ));
            }
        }

        // Presets run from finest/slowest to coarsest/fastest.
        for pair in self.settings.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if !(next.layer_height > prev.layer_height) || next.print_speed <= prev.print_speed {
                return Err(KnowledgeError::invalid(
                    EntryKind::Preset,
                    &next.name,
                    format!(
                        "layer height and print speed must both exceed preset {:?}",
                        prev.name
                    ),
                ));
            }
        }

        Ok(())
    }
}

fn check_unique<'a>(
    kind: EntryKind,
    names: impl Iterator<Item = &'a String>,
) -> Result<(), KnowledgeError> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name.as_str()) {
            return Err(KnowledgeError::DuplicateKey {
                kind,
                name: name.clone(),
            });
        }
    }
    Ok(())
}
