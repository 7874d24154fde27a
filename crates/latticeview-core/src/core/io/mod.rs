//! Reading and writing structure descriptions.
//!
//! Structures enter the library through the [`traits::StructureFormat`] interface;
//! [`toml_format`] implements it for the plain TOML description used by the command line.

pub mod toml_format;
pub mod traits;
