use super::config::CellStyle;
use crate::core::models::lattice::{BasisSet, CollapsedFlags, Periodicity};
use crate::core::models::structure::PeriodicCell;
use crate::core::primitives::{LineSegment, LineStyle};
use nalgebra::Point3;
use serde::Serialize;
use tracing::debug;

/// The wireframe of a periodic cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellGeometry {
    pub edges: Vec<LineSegment>,
    pub style: LineStyle,
}

/// Emits the edges of the parallelepiped spanned by `basis` at `origin`.
///
/// For every basis vector `v[i]` four parallel edges are produced: `v[i]` itself and
/// its translates by `v[i+1]`, `v[i+2]` and `v[i+1] + v[i+2]`. An edge is omitted
/// when its vector is collapsed and one of the axes it touches is non-periodic.
/// Shared edges are not deduplicated, so a full cell yields exactly 12 segments.
pub fn build_cell_edges(
    origin: &Point3<f64>,
    basis: &BasisSet,
    collapsed: CollapsedFlags,
    periodicity: Periodicity,
) -> Vec<LineSegment> {
    let mut edges = Vec::with_capacity(12);
    let open = |axis: usize| !periodicity.is_periodic(axis);

    for i in 0..3 {
        let v = basis.cyclic(i);
        let v1 = basis.cyclic(i + 1);
        let v2 = basis.cyclic(i + 2);

        let candidates = [
            (*origin, open(i)),
            (origin + v1, open(i) || open(i + 1)),
            (origin + v2, open(i) || open(i + 2)),
            (origin + v1 + v2, periodicity.count() < 3),
        ];

        for (start, non_periodic) in candidates {
            if non_periodic && collapsed.is_collapsed(i) {
                continue;
            }
            edges.push(LineSegment::new(start, start + v));
        }
    }

    edges
}

/// Builds the wireframe of `cell` at the cartesian origin.
pub fn build_cell(cell: &PeriodicCell, style: &CellStyle) -> CellGeometry {
    let edges = build_cell_edges(
        &Point3::origin(),
        cell.basis(),
        cell.collapsed(),
        cell.periodicity(),
    );
    debug!(edges = edges.len(), "Built cell wireframe.");
    CellGeometry {
        edges,
        style: style.line_style(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    const TOLERANCE: f64 = 1e-12;

    fn skewed() -> BasisSet {
        BasisSet::from_rows([[3.0, 0.0, 0.0], [1.0, 2.5, 0.0], [0.5, 0.5, 4.0]])
    }

    fn contains_point(points: &[Point3<f64>], p: &Point3<f64>) -> bool {
        points.iter().any(|q| (q - p).norm() < TOLERANCE)
    }

    #[test]
    fn full_periodic_cell_yields_twelve_edges_over_eight_vertices() {
        let basis = skewed();
        let edges = build_cell_edges(
            &Point3::origin(),
            &basis,
            CollapsedFlags::NONE,
            Periodicity::FULL,
        );
        assert_eq!(edges.len(), 12);

        let mut vertices: Vec<Point3<f64>> = Vec::new();
        for edge in &edges {
            for p in [edge.start, edge.end] {
                if !contains_point(&vertices, &p) {
                    vertices.push(p);
                }
            }
        }
        assert_eq!(vertices.len(), 8);

        for i in 0..2 {
            for j in 0..2 {
                for k in 0..2 {
                    let corner = Point3::from(
                        basis.a() * i as f64 + basis.b() * j as f64 + basis.c() * k as f64,
                    );
                    assert!(contains_point(&vertices, &corner), "missing corner {corner:?}");
                }
            }
        }
    }

    #[test]
    fn every_edge_runs_along_a_basis_vector() {
        let basis = skewed();
        let edges = build_cell_edges(
            &Point3::origin(),
            &basis,
            CollapsedFlags::NONE,
            Periodicity::FULL,
        );
        for (index, edge) in edges.iter().enumerate() {
            let expected = basis.cyclic(index / 4);
            assert!((edge.direction() - expected).norm() < TOLERANCE);
        }
    }

    #[test]
    fn non_periodic_collapsed_axis_drops_its_four_edges() {
        let basis = BasisSet::new(
            Vector3::new(3.0, 0.0, 0.0),
            Vector3::new(0.0, 3.0, 0.0),
            Vector3::zeros(),
        );
        let collapsed = basis.collapsed(1e-8);
        let edges = build_cell_edges(
            &Point3::origin(),
            &basis,
            collapsed,
            Periodicity([true, true, false]),
        );
        assert_eq!(edges.len(), 8);
        assert!(edges.iter().all(|e| e.length() > 0.0));
    }

    #[test]
    fn non_periodic_axis_with_length_is_still_drawn() {
        let edges = build_cell_edges(
            &Point3::origin(),
            &skewed(),
            CollapsedFlags::NONE,
            Periodicity([true, false, false]),
        );
        assert_eq!(edges.len(), 12);
    }

    #[test]
    fn periodic_collapsed_axis_keeps_its_edges() {
        let basis = BasisSet::new(Vector3::x(), Vector3::y(), Vector3::zeros());
        let edges = build_cell_edges(
            &Point3::origin(),
            &basis,
            basis.collapsed(1e-8),
            Periodicity::FULL,
        );
        assert_eq!(edges.len(), 12);
    }

    #[test]
    fn edges_are_translated_by_the_origin() {
        let origin = Point3::new(1.0, -2.0, 0.5);
        let edges = build_cell_edges(&origin, &skewed(), CollapsedFlags::NONE, Periodicity::FULL);
        assert_eq!(edges[0].start, origin);
    }

    #[test]
    fn build_cell_uses_configured_style() {
        let cell = PeriodicCell::new(skewed(), Periodicity::FULL);
        let style = CellStyle {
            dash_size: 0.3,
            ..CellStyle::default()
        };
        let geometry = build_cell(&cell, &style);
        assert_eq!(geometry.edges.len(), 12);
        assert!(geometry.style.dash.is_some());
    }
}
