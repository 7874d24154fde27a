use super::config::DisplayLimits;
use crate::core::models::selection::Selection;
use serde::Serialize;

/// How a structure of a given size should be displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplayDecision {
    pub atoms: usize,
    pub show_bonds: bool,
    /// Whether the host must ask before building geometry for this structure.
    pub requires_confirmation: bool,
}

impl DisplayLimits {
    pub fn evaluate(&self, atoms: usize) -> DisplayDecision {
        DisplayDecision {
            atoms,
            show_bonds: atoms <= self.bond_limit,
            requires_confirmation: atoms > self.size_limit,
        }
    }
}

/// Whether the cell and lattice annotations make sense for the selected part of
/// a system.
///
/// Molecules, monomers and groups made only of monomers are not periodic
/// objects, so their cell is hidden.
pub fn cell_visible<S: AsRef<str>>(structural_type: &str, child_types: &[S]) -> bool {
    match structural_type {
        "molecule" | "monomer" => false,
        "group" => {
            child_types.is_empty() || !child_types.iter().all(|t| t.as_ref() == "monomer")
        }
        _ => true,
    }
}

/// Cell visibility for an optional selection; without a selection the whole
/// system is shown, cell included.
pub fn selection_shows_cell(selection: Option<&Selection>) -> bool {
    selection.is_none_or(|s| cell_visible(&s.structural_type, &s.child_types))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_systems_show_bonds_without_confirmation() {
        let decision = DisplayLimits::default().evaluate(12);
        assert!(decision.show_bonds);
        assert!(!decision.requires_confirmation);
    }

    #[test]
    fn bonds_are_hidden_above_the_bond_limit() {
        let limits = DisplayLimits::default();
        assert!(limits.evaluate(500).show_bonds);
        assert!(!limits.evaluate(501).show_bonds);
    }

    #[test]
    fn large_systems_require_confirmation() {
        let limits = DisplayLimits::default();
        assert!(!limits.evaluate(40_000).requires_confirmation);
        assert!(limits.evaluate(40_001).requires_confirmation);
    }

    #[test]
    fn cell_is_hidden_for_molecular_selections() {
        let none: [&str; 0] = [];
        assert!(!cell_visible("molecule", &none));
        assert!(!cell_visible("monomer", &none));
        assert!(!cell_visible("group", &["monomer", "monomer"]));
    }

    #[test]
    fn cell_is_shown_for_periodic_selections() {
        let none: [&str; 0] = [];
        assert!(cell_visible("bulk", &none));
        assert!(cell_visible("subsystem", &["molecule"]));
        assert!(cell_visible("group", &["monomer", "molecule"]));
        assert!(cell_visible("group", &none));
    }

    #[test]
    fn missing_selection_shows_the_cell() {
        assert!(selection_shows_cell(None));
        let monomers = Selection::new("group").with_children(["monomer"]);
        assert!(!selection_shows_cell(Some(&monomers)));
    }
}
