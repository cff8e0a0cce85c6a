//! # Materials Database
//!
//! Static material data used by the calculators.
//!
//! ## Material Groups
//!
//! - **Metals**: density table for the metal quantity pages (flat bar, pipe)
//! - **Bulk materials**: site densities and mortar constants for brickwork,
//!   flooring and concrete mixes
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::materials::{density_kg_m3, MetalType};
//!
//! let metal: MetalType = "stainless_steel".parse().unwrap();
//! assert_eq!(density_kg_m3(metal), 8000.0);
//! assert_eq!(MetalType::Steel.density_field_value(), "7850.00");
//! ```

pub mod bulk;
pub mod metal;

pub use bulk::{BulkMaterial, MortarConstants, MORTAR};
pub use metal::{density_kg_m3, MetalType, METAL_DENSITIES};
