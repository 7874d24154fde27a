use crate::core::models::selection::Selection;
use crate::core::models::species::{Species, species_of};
use crate::core::models::structure::LoadedStructure;
use crate::engine::alignment::compute_view_orientation;
use crate::engine::cell::{CellGeometry, build_cell};
use crate::engine::config::SceneConfig;
use crate::engine::error::EngineError;
use crate::engine::lattice::{LatticeAnnotations, build_lattice_annotations};
use crate::engine::policy::{DisplayDecision, selection_shows_cell};
use crate::engine::progress::ProgressReporter;
use crate::engine::wrap::{WrapSource, wrap_positions};
use nalgebra::{Point3, UnitQuaternion};
use serde::Serialize;
use tracing::{info, instrument};

/// Everything a renderer needs to draw one structure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneGeometry {
    pub orientation: UnitQuaternion<f64>,
    pub display: DisplayDecision,
    pub cell: Option<CellGeometry>,
    pub lattice: Option<LatticeAnnotations>,
    /// Whether `positions` are wrapped into the cell.
    pub wrapped: bool,
    pub positions: Vec<Point3<f64>>,
    pub species: Vec<Species>,
}

/// Builds a fresh scene for `structure`.
///
/// The cell and the lattice annotations are only built when the structure has a cell,
/// the configuration enables them, and `selection` describes a periodic part of the
/// system. Positions follow `config.wrap`; the live positions of the structure are
/// left untouched, only its wrap cache may be filled.
///
/// # Errors
///
/// Returns an error if the view alignment is invalid or the atom count no longer
/// matches the cached positions.
#[instrument(skip_all, name = "scene_workflow", fields(atoms = structure.atom_count()))]
pub fn build(
    structure: &mut LoadedStructure,
    selection: Option<&Selection>,
    config: &SceneConfig,
    reporter: &ProgressReporter,
) -> Result<SceneGeometry, EngineError> {
    let display = config.limits.evaluate(structure.atom_count());

    let orientation = reporter.phase("View", || {
        compute_view_orientation(structure.cell().map(|cell| cell.basis()), &config.view)
    })?;

    let periodic_view = selection_shows_cell(selection);
    let cell = reporter.phase("Cell", || {
        structure
            .cell()
            .filter(|_| config.show_cell && periodic_view)
            .map(|cell| build_cell(cell, &config.cell_style))
    });
    let lattice = reporter.phase("Lattice", || {
        structure
            .cell()
            .filter(|_| config.show_lattice_constants && periodic_view)
            .map(|cell| {
                build_lattice_annotations(
                    cell.basis(),
                    cell.periodicity(),
                    cell.collapsed(),
                    &config.lattice_style,
                )
            })
    });

    let (wrapped, positions) = reporter.phase("Positions", || {
        let (live, cell, cache) = structure.wrap_parts();
        wrap_positions(live, cell, cache, config.wrap, reporter).map(|output| {
            let wrapped = matches!(output.source, WrapSource::Computed | WrapSource::Cached);
            (wrapped, output.positions.to_vec())
        })
    })?;

    let species = species_of(structure.elements());

    info!(
        cell = cell.is_some(),
        lattice = lattice.is_some(),
        wrapped,
        species = species.len(),
        "Scene assembled."
    );

    Ok(SceneGeometry {
        orientation,
        display,
        cell,
        lattice,
        wrapped,
        positions,
        species,
    })
}
