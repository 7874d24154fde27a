use super::error::EngineError;
use super::progress::{Progress, ProgressReporter};
use crate::core::models::lattice::Periodicity;
use crate::core::models::positions::PositionCache;
use crate::core::models::structure::PeriodicCell;
use crate::core::models::transform::UnitCellTransform;
use nalgebra::{Point3, Vector3};
use tracing::{debug, info, instrument, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Cartesian slack, in length units, by which the wrap window is shifted below zero.
pub const WRAP_EPSILON: f64 = 1e-2;

/// Where the positions returned by [`wrap_positions`] come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapSource {
    /// Nothing to wrap: the input slice itself.
    Input,
    /// The cached snapshot of the original positions.
    Original,
    /// Wrapped positions computed by this call.
    Computed,
    /// Wrapped positions computed by an earlier call.
    Cached,
}

#[derive(Debug, Clone, Copy)]
pub struct WrapOutput<'a> {
    pub source: WrapSource,
    pub positions: &'a [Point3<f64>],
}

impl<'a> WrapOutput<'a> {
    fn new(source: WrapSource, positions: &'a [Point3<f64>]) -> Self {
        Self { source, positions }
    }

    pub fn is_noop(&self) -> bool {
        self.source == WrapSource::Input
    }
}

/// Selects the wrapped or original positions of a structure, computing and caching
/// them on first use.
///
/// Does nothing when the structure has no cell, no fractional transform, or no
/// periodic axis. Otherwise the live positions are snapshotted once into `cache`;
/// later calls ignore `live` apart from checking that the atom count still matches.
/// Wrapped positions are computed at most once per cache.
///
/// # Errors
///
/// Returns [`EngineError::PositionCountMismatch`] if `live` no longer has as many
/// atoms as the cached snapshot.
#[instrument(skip_all, name = "wrap_positions", fields(atoms = live.len(), use_wrapped = use_wrapped))]
pub fn wrap_positions<'a>(
    live: &'a [Point3<f64>],
    cell: Option<&PeriodicCell>,
    cache: &'a mut PositionCache,
    use_wrapped: bool,
    reporter: &ProgressReporter,
) -> Result<WrapOutput<'a>, EngineError> {
    let Some((cell, transform)) = cell.and_then(|c| c.transform().map(|t| (c, t))) else {
        trace!("Structure has no cell transform, positions left unchanged.");
        return Ok(WrapOutput::new(WrapSource::Input, live));
    };
    let periodicity = cell.periodicity();
    if !periodicity.any() {
        trace!("Structure is not periodic, positions left unchanged.");
        return Ok(WrapOutput::new(WrapSource::Input, live));
    }

    if let Some(original) = cache.original() {
        if original.len() != live.len() {
            return Err(EngineError::PositionCountMismatch {
                expected: original.len(),
                found: live.len(),
            });
        }
    }

    if !use_wrapped {
        debug!("Using original positions.");
        return Ok(WrapOutput::new(WrapSource::Original, cache.capture_original(live)));
    }

    if cache.has_wrapped() {
        debug!("Using cached wrapped positions.");
        return Ok(WrapOutput::new(
            WrapSource::Cached,
            cache.wrapped().unwrap_or_default(),
        ));
    }

    let wrapped = wrap_into_cell(cache.capture_original(live), transform, periodicity, reporter);
    info!(atoms = wrapped.len(), "Wrapped positions into the periodic cell.");
    Ok(WrapOutput::new(WrapSource::Computed, cache.store_wrapped(wrapped)))
}

/// Lower bound of the fractional wrap window for each axis.
///
/// The window `[start, start + 1)` sits slightly below zero so that atoms lying on a
/// cell face are not flipped to the opposite face by rounding noise. Non-periodic
/// axes are never wrapped and report zero.
pub fn wrap_window_start(transform: &UnitCellTransform, periodicity: Periodicity) -> [f64; 3] {
    let epsilon = fractional_epsilon(transform);
    let center = 0.5;
    std::array::from_fn(|i| {
        if periodicity.is_periodic(i) {
            center - 0.5 - epsilon[i]
        } else {
            0.0
        }
    })
}

fn fractional_epsilon(transform: &UnitCellTransform) -> Vector3<f64> {
    transform
        .to_fractional(&Point3::new(WRAP_EPSILON, WRAP_EPSILON, WRAP_EPSILON))
        .coords
}

/// Wraps every position into the cell along its periodic axes.
pub fn wrap_into_cell(
    positions: &[Point3<f64>],
    transform: &UnitCellTransform,
    periodicity: Periodicity,
    reporter: &ProgressReporter,
) -> Vec<Point3<f64>> {
    let epsilon = fractional_epsilon(transform);
    let window = wrap_window_start(transform, periodicity);

    reporter.report(Progress::TaskStart {
        total_steps: positions.len() as u64,
    });

    #[cfg(not(feature = "parallel"))]
    let iterator = positions.iter();

    #[cfg(feature = "parallel")]
    let iterator = positions.par_iter();

    let wrapped: Vec<Point3<f64>> = iterator
        .map(|position| {
            let mut frac = transform.to_fractional(position);
            for axis in 0..3 {
                if !periodicity.is_periodic(axis) {
                    continue;
                }
                let shift = window[axis];
                let mut remainder = (frac[axis] - shift) % 1.0 + shift;
                if remainder < -epsilon[axis] {
                    remainder += 1.0;
                }
                frac[axis] = remainder;
            }
            transform.to_cartesian(&frac)
        })
        .collect();

    reporter.report(Progress::TaskIncrement {
        steps: wrapped.len() as u64,
    });
    reporter.report(Progress::TaskFinish);
    wrapped
}
