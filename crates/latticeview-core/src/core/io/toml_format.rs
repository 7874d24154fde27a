use super::traits::StructureFormat;
use crate::core::models::lattice::{BasisSet, Periodicity};
use crate::core::models::selection::Selection;
use crate::core::models::structure::{LoadedStructure, PeriodicCell};
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Metadata carried by a TOML structure description besides the structure itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TomlMetadata {
    pub title: Option<String>,
    pub selection: Option<Selection>,
}

#[derive(Debug, Error)]
pub enum TomlStructureError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Inconsistent data: {0}")]
    Inconsistency(String),
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cell: Option<CellRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    selection: Option<Selection>,
    #[serde(default)]
    atoms: Vec<AtomRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct CellRecord {
    a: [f64; 3],
    b: [f64; 3],
    c: [f64; 3],
    #[serde(default = "fully_periodic")]
    periodicity: [bool; 3],
}

fn fully_periodic() -> [bool; 3] {
    Periodicity::FULL.0
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct AtomRecord {
    element: String,
    position: [f64; 3],
}

/// A structure description in TOML.
///
/// ```toml
/// title = "rock salt"
///
/// [cell]
/// a = [5.64, 0.0, 0.0]
/// b = [0.0, 5.64, 0.0]
/// c = [0.0, 0.0, 5.64]
/// periodicity = [true, true, true]
///
/// [[atoms]]
/// element = "Na"
/// position = [0.0, 0.0, 0.0]
/// ```
///
/// `periodicity` defaults to fully periodic when a cell is given. An optional
/// `[selection]` table with `structural-type` and `child-types` describes the
/// displayed part of the system.
pub struct TomlStructureFile;

impl StructureFormat for TomlStructureFile {
    type Metadata = TomlMetadata;
    type Error = TomlStructureError;

    fn read_from(
        reader: &mut impl BufRead,
    ) -> Result<(LoadedStructure, Self::Metadata), Self::Error> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        let document: Document = toml::from_str(&content)?;

        let mut elements = Vec::with_capacity(document.atoms.len());
        let mut positions = Vec::with_capacity(document.atoms.len());
        for (index, atom) in document.atoms.into_iter().enumerate() {
            if atom.element.trim().is_empty() {
                return Err(TomlStructureError::Inconsistency(format!(
                    "atom {} has an empty element symbol",
                    index + 1
                )));
            }
            if atom.position.iter().any(|x| !x.is_finite()) {
                return Err(TomlStructureError::Inconsistency(format!(
                    "atom {} has a non-finite position",
                    index + 1
                )));
            }
            elements.push(atom.element.trim().to_string());
            positions.push(Point3::from(atom.position));
        }

        let mut structure = LoadedStructure::new(elements, positions);
        if let Some(cell) = document.cell {
            let basis = BasisSet::from_rows([cell.a, cell.b, cell.c]);
            if basis.vectors().iter().flatten().any(|x| !x.is_finite()) {
                return Err(TomlStructureError::Inconsistency(
                    "cell vectors must be finite".to_string(),
                ));
            }
            structure = structure.with_cell(PeriodicCell::new(basis, Periodicity(cell.periodicity)));
        }

        let metadata = TomlMetadata {
            title: document.title,
            selection: document.selection,
        };
        Ok((structure, metadata))
    }

    fn write_to(
        structure: &LoadedStructure,
        metadata: &Self::Metadata,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        let document = Document {
            title: metadata.title.clone(),
            cell: structure.cell().map(|cell| {
                let basis = cell.basis();
                CellRecord {
                    a: (*basis.a()).into(),
                    b: (*basis.b()).into(),
                    c: (*basis.c()).into(),
                    periodicity: cell.periodicity().0,
                }
            }),
            selection: metadata.selection.clone(),
            atoms: structure
                .elements()
                .iter()
                .zip(structure.positions())
                .map(|(element, position)| AtomRecord {
                    element: element.clone(),
                    position: position.coords.into(),
                })
                .collect(),
        };
        writer.write_all(toml::to_string(&document)?.as_bytes())?;
        Ok(())
    }
}
