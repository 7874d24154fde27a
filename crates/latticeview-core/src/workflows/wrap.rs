use crate::core::models::structure::LoadedStructure;
use crate::engine::error::EngineError;
use crate::engine::progress::ProgressReporter;
use crate::engine::wrap::{WrapSource, wrap_positions};
use nalgebra::Point3;
use thiserror::Error;
use tracing::{info, instrument, warn};

/// A renderer failed to redraw after the live positions changed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Scene refresh failed: {message}")]
pub struct RefreshError {
    pub message: String,
}

impl RefreshError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The rendering side that must redraw atoms, bonds and polyhedra once the live
/// positions of a structure change.
pub trait SceneRefresher {
    fn refresh(&mut self, positions: &[Point3<f64>]) -> Result<(), RefreshError>;
}

impl<F> SceneRefresher for F
where
    F: FnMut(&[Point3<f64>]) -> Result<(), RefreshError>,
{
    fn refresh(&mut self, positions: &[Point3<f64>]) -> Result<(), RefreshError> {
        self(positions)
    }
}

/// Outcome of a wrap toggle.
#[derive(Debug, Clone, PartialEq)]
pub enum WrapReport {
    /// The structure cannot be wrapped; nothing changed and nothing was refreshed.
    Skipped,
    /// The live positions were replaced and the scene refreshed.
    Applied(WrapSource),
    /// The live positions were replaced but the scene could not be refreshed.
    RefreshFailed(RefreshError),
}

/// Switches the live positions of `structure` between wrapped and original, then
/// asks `refresher` to redraw.
///
/// Holding `structure` exclusively for the whole call keeps concurrent toggles on the
/// same structure from interleaving. A refresh failure is logged and reported, never
/// returned as an error.
///
/// # Errors
///
/// Returns [`EngineError::PositionCountMismatch`] if the structure's atoms changed
/// since its positions were first cached.
#[instrument(skip_all, name = "wrap_workflow", fields(use_wrapped = use_wrapped))]
pub fn apply(
    structure: &mut LoadedStructure,
    use_wrapped: bool,
    refresher: &mut impl SceneRefresher,
    reporter: &ProgressReporter,
) -> Result<WrapReport, EngineError> {
    let (source, positions) = reporter.phase("Wrap", || {
        let (live, cell, cache) = structure.wrap_parts();
        wrap_positions(live, cell, cache, use_wrapped, reporter)
            .map(|output| (output.source, (!output.is_noop()).then(|| output.positions.to_vec())))
    })?;

    let Some(positions) = positions else {
        info!("Structure has nothing to wrap, toggle ignored.");
        return Ok(WrapReport::Skipped);
    };
    structure.set_positions(positions);

    let report = reporter.phase("Refresh", || match refresher.refresh(structure.positions()) {
        Ok(()) => WrapReport::Applied(source),
        Err(error) => {
            warn!(%error, "Live positions updated but the scene was not refreshed.");
            WrapReport::RefreshFailed(error)
        }
    });
    Ok(report)
}
