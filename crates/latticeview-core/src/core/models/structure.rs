use super::lattice::{BasisSet, CollapsedFlags, DEFAULT_COLLAPSE_THRESHOLD, Periodicity};
use super::positions::PositionCache;
use super::transform::UnitCellTransform;
use nalgebra::Point3;

/// Cell geometry derived once when a structure is loaded.
///
/// A cell with collapsed basis vectors (e.g. a 2D slab with a zero-length `c`) still
/// describes a drawable wireframe, but it has no fractional transform.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodicCell {
    basis: BasisSet,
    periodicity: Periodicity,
    collapsed: CollapsedFlags,
    transform: Option<UnitCellTransform>,
}

impl PeriodicCell {
    pub fn new(basis: BasisSet, periodicity: Periodicity) -> Self {
        Self {
            collapsed: basis.collapsed(DEFAULT_COLLAPSE_THRESHOLD),
            transform: UnitCellTransform::from_basis(&basis),
            basis,
            periodicity,
        }
    }

    /// Builds a cell from an existing transform, deriving the basis from it.
    pub fn from_transform(transform: UnitCellTransform, periodicity: Periodicity) -> Self {
        let basis = transform.basis();
        Self {
            collapsed: basis.collapsed(DEFAULT_COLLAPSE_THRESHOLD),
            transform: Some(transform),
            basis,
            periodicity,
        }
    }

    pub fn basis(&self) -> &BasisSet {
        &self.basis
    }

    pub fn periodicity(&self) -> Periodicity {
        self.periodicity
    }

    pub fn collapsed(&self) -> CollapsedFlags {
        self.collapsed
    }

    pub fn transform(&self) -> Option<&UnitCellTransform> {
        self.transform.as_ref()
    }
}

/// A structure as handed over by the loading collaborator.
///
/// Owns the live atom positions (index-aligned with `elements`), the optional periodic
/// cell, and the per-structure [`PositionCache`] used by the coordinate wrapper.
#[derive(Debug, Clone, Default)]
pub struct LoadedStructure {
    elements: Vec<String>,
    positions: Vec<Point3<f64>>,
    cell: Option<PeriodicCell>,
    position_cache: PositionCache,
}

impl LoadedStructure {
    pub fn new(elements: Vec<String>, positions: Vec<Point3<f64>>) -> Self {
        Self {
            elements,
            positions,
            cell: None,
            position_cache: PositionCache::new(),
        }
    }

    pub fn with_cell(mut self, cell: PeriodicCell) -> Self {
        self.cell = Some(cell);
        self
    }

    pub fn elements(&self) -> &[String] {
        &self.elements
    }

    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    pub fn atom_count(&self) -> usize {
        self.positions.len()
    }

    pub fn cell(&self) -> Option<&PeriodicCell> {
        self.cell.as_ref()
    }

    pub fn position_cache(&self) -> &PositionCache {
        &self.position_cache
    }

    /// Replaces the live positions, e.g. after a wrap toggle.
    pub fn set_positions(&mut self, positions: Vec<Point3<f64>>) {
        self.positions = positions;
    }

    /// Splits the structure into the pieces the coordinate wrapper needs at once:
    /// the live positions, the cell, and a mutable handle to the cache.
    pub fn wrap_parts(&mut self) -> (&[Point3<f64>], Option<&PeriodicCell>, &mut PositionCache) {
        (&self.positions, self.cell.as_ref(), &mut self.position_cache)
    }
}
