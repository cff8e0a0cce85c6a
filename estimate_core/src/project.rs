//! # Estimate Project
//!
//! An `EstimateProject` is the calculation history of one site: every
//! calculation the user chose to keep, with the inputs it was run with.
//! Projects serialize to `.est` files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! EstimateProject
//! ├── meta: ProjectMetadata (version, prepared by, site, client, timestamps)
//! ├── settings: ProjectSettings (presentation, default metal)
//! └── items: HashMap<Uuid, SavedCalculation> (saved calculations)
//! ```
//!
//! Only inputs are stored. Outputs are recomputed from the catalog whenever
//! a calculation is viewed, so a saved entry always shows what the current
//! formulas give for it.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::form::FormState;
//! use estimate_core::project::{EstimateProject, SavedCalculation};
//!
//! let mut project = EstimateProject::new("R. Mehta", "SITE-07", "Green Homes");
//!
//! let mut form = FormState::for_id("straight-bar").unwrap();
//! form.set("barLength", "12").unwrap();
//! form.set("diameter", "12").unwrap();
//! form.set("noOfBars", "5").unwrap();
//!
//! let id = project.add_calculation(SavedCalculation::from_form(&form, "Lintel bars"));
//! let restored = project.get_calculation(&id).unwrap().restore().unwrap();
//! assert_eq!(restored.value("noOfBars"), "5");
//! ```

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::CalcResult;
use crate::form::FormState;
use crate::formula::FormInputs;
use crate::materials::MetalType;
use crate::presenter::PresentationConfig;

/// Current schema version for .est files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container, serialized to `.est` files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateProject {
    pub meta: ProjectMetadata,
    pub settings: ProjectSettings,
    /// Saved calculations, keyed by UUID
    pub items: HashMap<Uuid, SavedCalculation>,
}

impl EstimateProject {
    /// Create a new empty project.
    ///
    /// ```rust
    /// use estimate_core::project::EstimateProject;
    ///
    /// let project = EstimateProject::new("R. Mehta", "SITE-07", "Green Homes");
    /// assert_eq!(project.meta.site_id, "SITE-07");
    /// assert_eq!(project.item_count(), 0);
    /// ```
    pub fn new(prepared_by: impl Into<String>, site_id: impl Into<String>, client: impl Into<String>) -> Self {
        let now = Utc::now();
        EstimateProject {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                prepared_by: prepared_by.into(),
                site_id: site_id.into(),
                client: client.into(),
                created: now,
                modified: now,
            },
            settings: ProjectSettings::default(),
            items: HashMap::new(),
        }
    }

    /// Add a saved calculation. Returns the UUID assigned to it.
    pub fn add_calculation(&mut self, calculation: SavedCalculation) -> Uuid {
        let id = Uuid::new_v4();
        self.items.insert(id, calculation);
        self.touch();
        id
    }

    /// Remove a saved calculation, returning it if it existed
    pub fn remove_calculation(&mut self, id: &Uuid) -> Option<SavedCalculation> {
        let item = self.items.remove(id);
        if item.is_some() {
            self.touch();
        }
        item
    }

    pub fn get_calculation(&self, id: &Uuid) -> Option<&SavedCalculation> {
        self.items.get(id)
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Update the modified timestamp
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    /// Every saved calculation, newest first
    pub fn history(&self) -> Vec<(&Uuid, &SavedCalculation)> {
        let mut entries: Vec<_> = self.items.iter().collect();
        entries.sort_by(|a, b| b.1.saved_at.cmp(&a.1.saved_at).then_with(|| a.0.cmp(b.0)));
        entries
    }

    /// Saved calculations of one calculator page, newest first
    pub fn history_for(&self, formula_id: &str) -> Vec<(&Uuid, &SavedCalculation)> {
        self.history()
            .into_iter()
            .filter(|(_, c)| c.formula_id == formula_id)
            .collect()
    }
}

impl Default for EstimateProject {
    fn default() -> Self {
        EstimateProject::new("", "", "")
    }
}

/// Project metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,
    /// Person who prepared the estimate
    pub prepared_by: String,
    /// Site or job identifier
    pub site_id: String,
    pub client: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

/// Per-project display and default settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSettings {
    pub presentation: PresentationConfig,
    /// Metal preselected on the metal pages
    pub default_metal: MetalType,
}

/// One saved run of a calculator: the page id and the raw inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedCalculation {
    /// Catalog page id, e.g. "flat-bar-metal"
    pub formula_id: String,
    /// User label shown in the history list
    pub label: String,
    /// Raw input values exactly as entered
    pub inputs: BTreeMap<String, String>,
    pub saved_at: DateTime<Utc>,
}

impl SavedCalculation {
    /// Capture the current inputs of a form
    pub fn from_form(form: &FormState, label: impl Into<String>) -> Self {
        SavedCalculation {
            formula_id: form.spec().id.to_string(),
            label: label.into(),
            inputs: form.inputs().to_map(),
            saved_at: Utc::now(),
        }
    }

    /// The stored inputs as a form snapshot
    pub fn form_inputs(&self) -> FormInputs {
        FormInputs::from_pairs(self.inputs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }

    /// Rebuild the calculator form with the stored values and the result
    /// section visible.
    ///
    /// Values are written as stored, so a density typed over a metal's
    /// default is kept. Fails if the page no longer exists or a stored key
    /// or option is no longer part of it.
    pub fn restore(&self) -> CalcResult<FormState> {
        let mut form = FormState::for_id(&self.formula_id)?;
        for (key, value) in &self.inputs {
            form.set(key, value.as_str())?;
        }
        form.calculate();
        Ok(form)
    }
}
