//! # LatticeView Core Library
//!
//! The geometry engine behind a periodic crystal-structure viewer: view alignment to
//! the lattice, unit-cell wireframes, lattice-constant annotations and wrapping of
//! atom coordinates into the cell.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture, each layer only depending on the
//! ones below it.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`LoadedStructure`, `BasisSet`,
//!   `PeriodicCell`), renderer primitives, colors and label styles, and structure I/O.
//!
//! - **[`engine`]: The Geometry Core.** Pure builders that turn a cell and a scene
//!   configuration into a view quaternion, cell edges, axis arrows and angle arcs, plus
//!   the coordinate wrapper and its per-structure position cache.
//!
//! - **[`workflows`]: The Public API.** Entry points for a host application: building a
//!   fresh scene for a structure and toggling wrapped coordinates with write-back and
//!   a renderer refresh.

pub mod core;
pub mod engine;
pub mod workflows;
