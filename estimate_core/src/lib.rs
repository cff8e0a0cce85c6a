//! # estimate_core - Construction Estimate Calculation Engine
//!
//! `estimate_core` is the computational heart of the site estimate tools. It
//! holds the catalog of material and cost calculators (steel, columns, beams,
//! metal, brickwork, concrete, excavation, flooring, roofing and water
//! tanks) together with the form state, presentation and persistence around
//! them. Inputs, outputs and errors are all JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Declarative**: every calculator is a `FormulaSpec` of fields and one
//!   pure compute function
//! - **Permissive**: raw text inputs are coerced, so a calculation never fails
//! - **JSON-First**: all public types implement Serialize
//! - **Rich Errors**: structured error types around files, config and forms
//!
//! ## Quick Start
//!
//! ```rust
//! use estimate_core::form::FormState;
//! use estimate_core::presenter::PresentationConfig;
//!
//! let mut form = FormState::for_id("straight-bar").unwrap();
//! form.set("barLength", "12").unwrap();
//! form.set("diameter", "12").unwrap();
//! form.set("noOfBars", "5").unwrap();
//! form.calculate();
//!
//! let table = form.result(&PresentationConfig::default()).unwrap();
//! assert_eq!(table.rows.len(), 2);
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - The registry of every calculator page
//! - [`calculations`] - Calculator definitions grouped by trade
//! - [`equations`] - Shared quantity equations (rebar, geometry, masonry)
//! - [`formula`] - Field, output and spec types plus input coercion
//! - [`form`] - Per-page form state with select fills
//! - [`presenter`] - Result table, total banner and detail view
//! - [`materials`] - Metal densities and bulk material constants
//! - [`project`] - Saved calculation history
//! - [`file_io`] - Atomic saves and file locking
//! - [`report`] - PDF report generation
//! - [`config`] - TOML user configuration
//! - [`validation`] - Field validation for the record forms
//! - [`response`] - Tolerant readers for API response envelopes
//! - [`units`] - Unit newtypes
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod catalog;
pub mod config;
pub mod equations;
pub mod errors;
pub mod file_io;
pub mod form;
pub mod formula;
pub mod materials;
pub mod presenter;
pub mod project;
pub mod report;
pub mod response;
pub mod units;
pub mod validation;

// Re-export commonly used types at crate root for convenience
pub use config::EstimateConfig;
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_project, save_project, FileLock};
pub use form::FormState;
pub use formula::{FormInputs, FormulaCategory, FormulaSpec, OutputField};
pub use presenter::{DetailView, PresentationConfig, ResultTable};
pub use project::{EstimateProject, ProjectMetadata, ProjectSettings, SavedCalculation};
