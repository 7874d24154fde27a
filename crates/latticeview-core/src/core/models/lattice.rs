use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Length below which a basis vector is treated as collapsed.
pub const DEFAULT_COLLAPSE_THRESHOLD: f64 = 1e-8;

/// Identifies one of the three lattice basis vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BasisLabel {
    A,
    B,
    C,
}

impl BasisLabel {
    pub const ALL: [BasisLabel; 3] = [BasisLabel::A, BasisLabel::B, BasisLabel::C];

    pub fn index(self) -> usize {
        match self {
            BasisLabel::A => 0,
            BasisLabel::B => 1,
            BasisLabel::C => 2,
        }
    }

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 3]
    }
}

impl fmt::Display for BasisLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BasisLabel::A => "a",
            BasisLabel::B => "b",
            BasisLabel::C => "c",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown basis label '{0}', expected one of a, b, c")]
pub struct ParseBasisLabelError(pub String);

impl FromStr for BasisLabel {
    type Err = ParseBasisLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" => Ok(BasisLabel::A),
            "b" => Ok(BasisLabel::B),
            "c" => Ok(BasisLabel::C),
            _ => Err(ParseBasisLabelError(s.to_string())),
        }
    }
}

/// The three basis vectors `(a, b, c)` of a (possibly degenerate) parallelepiped cell.
///
/// Vectors may have zero length; such "collapsed" directions describe structures of
/// lower dimensionality and are never used to emit degenerate geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BasisSet {
    vectors: [Vector3<f64>; 3],
}

impl BasisSet {
    pub fn new(a: Vector3<f64>, b: Vector3<f64>, c: Vector3<f64>) -> Self {
        Self { vectors: [a, b, c] }
    }

    pub fn from_rows(rows: [[f64; 3]; 3]) -> Self {
        Self::new(
            Vector3::from(rows[0]),
            Vector3::from(rows[1]),
            Vector3::from(rows[2]),
        )
    }

    pub fn a(&self) -> &Vector3<f64> {
        &self.vectors[0]
    }

    pub fn b(&self) -> &Vector3<f64> {
        &self.vectors[1]
    }

    pub fn c(&self) -> &Vector3<f64> {
        &self.vectors[2]
    }

    pub fn get(&self, label: BasisLabel) -> &Vector3<f64> {
        &self.vectors[label.index()]
    }

    pub fn vectors(&self) -> &[Vector3<f64>; 3] {
        &self.vectors
    }

    /// Vector at `index`, wrapping modulo three so callers can walk cyclic neighbours.
    pub fn cyclic(&self, index: usize) -> &Vector3<f64> {
        &self.vectors[index % 3]
    }

    /// Flags each basis vector whose length is not above `threshold`.
    pub fn collapsed(&self, threshold: f64) -> CollapsedFlags {
        CollapsedFlags(self.vectors.map(|v| v.norm() <= threshold))
    }
}

/// Per-axis periodic boundary flags, index-aligned with the basis vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Periodicity(pub [bool; 3]);

impl Periodicity {
    pub const FULL: Periodicity = Periodicity([true, true, true]);
    pub const NONE: Periodicity = Periodicity([false, false, false]);

    pub fn is_periodic(&self, index: usize) -> bool {
        self.0[index % 3]
    }

    pub fn any(&self) -> bool {
        self.0.iter().any(|&p| p)
    }

    pub fn count(&self) -> usize {
        self.0.iter().filter(|&&p| p).count()
    }
}

/// Per-axis flags marking basis vectors of (near-)zero length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollapsedFlags(pub [bool; 3]);

impl CollapsedFlags {
    pub const NONE: CollapsedFlags = CollapsedFlags([false, false, false]);

    pub fn is_collapsed(&self, index: usize) -> bool {
        self.0[index % 3]
    }
}
