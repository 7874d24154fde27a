//! # Core Models Module
//!
//! Data structures describing a loaded periodic structure: its basis vectors and
//! periodic boundary flags, the fractional ⇄ cartesian transform, the live atom
//! positions, and the per-structure position cache used for wrapping.
//!
//! ## Key Components
//!
//! - [`lattice`] - Basis labels, basis vectors, periodicity and collapsed-axis flags
//! - [`transform`] - Homogeneous fractional/cartesian transform pair
//! - [`positions`] - One-shot snapshots of original and wrapped positions
//! - [`selection`] - The displayed part of a system and its structural type
//! - [`species`] - Per-element display colors and van der Waals radii
//! - [`structure`] - The loaded structure and its optional periodic cell
//!
//! ## Usage
//!
//! ```ignore
//! use latticeview::core::models::{lattice::*, structure::*};
//!
//! let basis = BasisSet::from_rows([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
//! let cell = PeriodicCell::new(basis, Periodicity::FULL);
//! let structure = LoadedStructure::new(vec!["Na".into()], vec![Point3::new(1.5, 0.2, -0.1)])
//!     .with_cell(cell);
//! ```

pub mod lattice;
pub mod positions;
pub mod selection;
pub mod species;
pub mod structure;
pub mod transform;
