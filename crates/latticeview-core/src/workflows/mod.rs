//! # Workflows Module
//!
//! High-level entry points that tie the structure models and the geometry engine
//! together for a host application.
//!
//! ## Overview
//!
//! A host typically loads a structure once, then builds a scene every time the
//! selection or the configuration changes, and toggles coordinate wrapping on
//! request. Each workflow runs its steps as reported phases so long operations can
//! be surfaced to the user.
//!
//! ## Architecture
//!
//! - **Scene Workflow** ([`scene`]) - Fresh view orientation, cell wireframe, lattice
//!   annotations and display positions for a loaded structure
//! - **Wrap Workflow** ([`wrap`]) - Wrap toggle with write-back into the live structure
//!   and a refresh request to the renderer

pub mod scene;
pub mod wrap;
