pub mod align;
pub mod scene;
pub mod wrap;

use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use latticeview::core::io::toml_format::{TomlMetadata, TomlStructureFile};
use latticeview::core::io::traits::StructureFormat;
use latticeview::core::models::structure::LoadedStructure;
use std::path::Path;
use tracing::info;

fn load_structure(path: &Path) -> Result<(LoadedStructure, TomlMetadata)> {
    info!("Loading input structure from {:?}", path);
    let (structure, metadata) =
        TomlStructureFile::read_from_path(path).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
    info!(
        atoms = structure.atom_count(),
        periodic = structure.cell().is_some_and(|c| c.periodicity().any()),
        "Structure loaded."
    );
    Ok((structure, metadata))
}

fn progress_handler(quiet: bool) -> CliProgressHandler {
    if quiet {
        CliProgressHandler::hidden()
    } else {
        CliProgressHandler::new()
    }
}
