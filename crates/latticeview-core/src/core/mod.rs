//! # Core Module
//!
//! The data models and stateless helpers the geometry engine is built on.
//!
//! ## Architecture
//!
//! - **Structure Representation** ([`models`]) - Basis vectors, periodicity, transforms, positions and species
//! - **Renderer Primitives** ([`primitives`]) - Lines, polylines, cylinders, cones and label sprites
//! - **Colors** ([`color`]) - sRGB colors parsed from hex notation or names
//! - **Label Styles** ([`style`]) - Lattice-constant label styling with per-parameter fallback
//! - **File I/O** ([`io`]) - Structure descriptions read from and written to disk
//! - **Utilities** ([`utils`]) - Vector and quaternion helpers

pub mod color;
pub mod io;
pub mod models;
pub mod primitives;
pub mod style;
pub mod utils;
