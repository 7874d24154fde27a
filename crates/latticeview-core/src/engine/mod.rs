//! # Engine Module
//!
//! The geometry engine: everything that turns a cell's basis vectors, periodicity
//! and atom positions into view orientations, renderer primitives and wrapped
//! coordinates.
//!
//! ## Overview
//!
//! All builders here are pure functions of their inputs. Each call returns fresh
//! geometry, so repeated invocations (for instance on every selection change) never
//! share or mutate state. The only mutable state touched by the engine is the
//! per-structure [`PositionCache`](crate::core::models::positions::PositionCache),
//! which the caller passes in by exclusive reference.
//!
//! ## Architecture
//!
//! - **Alignment** ([`alignment`]) - View quaternion from up to two basis alignment constraints
//! - **Cell** ([`cell`]) - Parallelepiped wireframe with suppression of degenerate edges
//! - **Lattice Annotations** ([`lattice`]) - Axis arrows, angle arcs and their labels
//! - **Coordinate Wrapping** ([`wrap`]) - Fractional wrapping into the cell, cached per structure
//! - **Display Policy** ([`policy`]) - Size limits and cell visibility for selections
//! - **Configuration** ([`config`]) - Scene configuration records and their builder
//! - **Progress Monitoring** ([`progress`]) - Optional callbacks for long-running steps
//! - **Error Handling** ([`error`]) - Engine-specific error types

pub mod alignment;
pub mod cell;
pub mod config;
pub mod error;
pub mod lattice;
pub mod policy;
pub mod progress;
pub mod wrap;
