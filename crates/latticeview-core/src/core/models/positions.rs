use nalgebra::Point3;

/// Derived position snapshots for one loaded structure.
///
/// The original cartesian positions are captured once, on the first wrap request, and
/// the wrapped positions are computed at most once. Neither snapshot is invalidated for
/// the lifetime of the structure: toggling between wrapped and original positions only
/// switches which snapshot is used.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionCache {
    original: Option<Vec<Point3<f64>>>,
    wrapped: Option<Vec<Point3<f64>>>,
}

impl PositionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn original(&self) -> Option<&[Point3<f64>]> {
        self.original.as_deref()
    }

    pub fn wrapped(&self) -> Option<&[Point3<f64>]> {
        self.wrapped.as_deref()
    }

    pub fn has_original(&self) -> bool {
        self.original.is_some()
    }

    pub fn has_wrapped(&self) -> bool {
        self.wrapped.is_some()
    }

    /// Stores the original snapshot unless one already exists, returning the cached one.
    pub fn capture_original(&mut self, positions: &[Point3<f64>]) -> &[Point3<f64>] {
        self.original.get_or_insert_with(|| positions.to_vec())
    }

    pub fn store_wrapped(&mut self, positions: Vec<Point3<f64>>) -> &[Point3<f64>] {
        self.wrapped.insert(positions)
    }
}
