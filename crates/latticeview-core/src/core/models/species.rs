use crate::core::color::Color;
use phf::{Map, phf_map};
use serde::Serialize;

const FALLBACK_COLOR: u32 = 0xff1493;
const FALLBACK_RADIUS: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementInfo {
    pub atomic_number: u8,
    pub color: u32,
    pub vdw_radius: f64,
}

#[rustfmt::skip]
static ELEMENTS: Map<&'static str, ElementInfo> = phf_map! {
    "H" => ElementInfo { atomic_number: 1, color: 0xffffff, vdw_radius: 1.1 },
    "D" => ElementInfo { atomic_number: 1, color: 0xffffc0, vdw_radius: 1.1 },
    "T" => ElementInfo { atomic_number: 1, color: 0xffffa0, vdw_radius: 1.1 },
    "HE" => ElementInfo { atomic_number: 2, color: 0xd9ffff, vdw_radius: 1.4 },
    "LI" => ElementInfo { atomic_number: 3, color: 0xcc80ff, vdw_radius: 1.81 },
    "BE" => ElementInfo { atomic_number: 4, color: 0xc2ff00, vdw_radius: 1.53 },
    "B" => ElementInfo { atomic_number: 5, color: 0xffb5b5, vdw_radius: 1.92 },
    "C" => ElementInfo { atomic_number: 6, color: 0x909090, vdw_radius: 1.7 },
    "N" => ElementInfo { atomic_number: 7, color: 0x3050f8, vdw_radius: 1.55 },
    "O" => ElementInfo { atomic_number: 8, color: 0xff0d0d, vdw_radius: 1.52 },
    "F" => ElementInfo { atomic_number: 9, color: 0x90e050, vdw_radius: 1.47 },
    "NE" => ElementInfo { atomic_number: 10, color: 0xb3e3f5, vdw_radius: 1.54 },
    "NA" => ElementInfo { atomic_number: 11, color: 0xab5cf2, vdw_radius: 2.27 },
    "MG" => ElementInfo { atomic_number: 12, color: 0x8aff00, vdw_radius: 1.73 },
    "AL" => ElementInfo { atomic_number: 13, color: 0xbfa6a6, vdw_radius: 1.84 },
    "SI" => ElementInfo { atomic_number: 14, color: 0xf0c8a0, vdw_radius: 2.1 },
    "P" => ElementInfo { atomic_number: 15, color: 0xff8000, vdw_radius: 1.8 },
    "S" => ElementInfo { atomic_number: 16, color: 0xffff30, vdw_radius: 1.8 },
    "CL" => ElementInfo { atomic_number: 17, color: 0x1ff01f, vdw_radius: 1.75 },
    "AR" => ElementInfo { atomic_number: 18, color: 0x80d1e3, vdw_radius: 1.88 },
    "K" => ElementInfo { atomic_number: 19, color: 0x8f40d4, vdw_radius: 2.75 },
    "CA" => ElementInfo { atomic_number: 20, color: 0x3dff00, vdw_radius: 2.31 },
    "SC" => ElementInfo { atomic_number: 21, color: 0xe6e6e6, vdw_radius: 2.3 },
    "TI" => ElementInfo { atomic_number: 22, color: 0xbfc2c7, vdw_radius: 2.15 },
    "V" => ElementInfo { atomic_number: 23, color: 0xa6a6ab, vdw_radius: 2.05 },
    "CR" => ElementInfo { atomic_number: 24, color: 0x8a99c7, vdw_radius: 2.05 },
    "MN" => ElementInfo { atomic_number: 25, color: 0x9c7ac7, vdw_radius: 2.05 },
    "FE" => ElementInfo { atomic_number: 26, color: 0xe06633, vdw_radius: 2.05 },
    "CO" => ElementInfo { atomic_number: 27, color: 0xf090a0, vdw_radius: 2.0 },
    "NI" => ElementInfo { atomic_number: 28, color: 0x50d050, vdw_radius: 2.0 },
    "CU" => ElementInfo { atomic_number: 29, color: 0xc88033, vdw_radius: 2.0 },
    "ZN" => ElementInfo { atomic_number: 30, color: 0x7d80b0, vdw_radius: 2.1 },
    "GA" => ElementInfo { atomic_number: 31, color: 0xc28f8f, vdw_radius: 1.87 },
    "GE" => ElementInfo { atomic_number: 32, color: 0x668f8f, vdw_radius: 2.11 },
    "AS" => ElementInfo { atomic_number: 33, color: 0xbd80e3, vdw_radius: 1.85 },
    "SE" => ElementInfo { atomic_number: 34, color: 0xffa100, vdw_radius: 1.9 },
    "BR" => ElementInfo { atomic_number: 35, color: 0xa62929, vdw_radius: 1.83 },
    "KR" => ElementInfo { atomic_number: 36, color: 0x5cb8d1, vdw_radius: 2.02 },
    "RB" => ElementInfo { atomic_number: 37, color: 0x702eb0, vdw_radius: 3.03 },
    "SR" => ElementInfo { atomic_number: 38, color: 0x00ff00, vdw_radius: 2.49 },
    "Y" => ElementInfo { atomic_number: 39, color: 0x94ffff, vdw_radius: 2.4 },
    "ZR" => ElementInfo { atomic_number: 40, color: 0x94e0e0, vdw_radius: 2.3 },
    "NB" => ElementInfo { atomic_number: 41, color: 0x73c2c9, vdw_radius: 2.15 },
    "MO" => ElementInfo { atomic_number: 42, color: 0x54b5b5, vdw_radius: 2.1 },
    "TC" => ElementInfo { atomic_number: 43, color: 0x3b9e9e, vdw_radius: 2.05 },
    "RU" => ElementInfo { atomic_number: 44, color: 0x248f8f, vdw_radius: 2.05 },
    "RH" => ElementInfo { atomic_number: 45, color: 0x0a7d8c, vdw_radius: 2.0 },
    "PD" => ElementInfo { atomic_number: 46, color: 0x006985, vdw_radius: 2.05 },
    "AG" => ElementInfo { atomic_number: 47, color: 0xc0c0c0, vdw_radius: 2.1 },
    "CD" => ElementInfo { atomic_number: 48, color: 0xffd98f, vdw_radius: 2.2 },
    "IN" => ElementInfo { atomic_number: 49, color: 0xa67573, vdw_radius: 2.2 },
    "SN" => ElementInfo { atomic_number: 50, color: 0x668080, vdw_radius: 1.93 },
    "SB" => ElementInfo { atomic_number: 51, color: 0x9e63b5, vdw_radius: 2.17 },
    "TE" => ElementInfo { atomic_number: 52, color: 0xd47a00, vdw_radius: 2.06 },
    "I" => ElementInfo { atomic_number: 53, color: 0x940094, vdw_radius: 1.98 },
    "XE" => ElementInfo { atomic_number: 54, color: 0x940094, vdw_radius: 2.16 },
    "CS" => ElementInfo { atomic_number: 55, color: 0x57178f, vdw_radius: 3.43 },
    "BA" => ElementInfo { atomic_number: 56, color: 0x00c900, vdw_radius: 2.68 },
    "LA" => ElementInfo { atomic_number: 57, color: 0x70d4ff, vdw_radius: 2.5 },
    "CE" => ElementInfo { atomic_number: 58, color: 0xffffc7, vdw_radius: 2.48 },
    "PR" => ElementInfo { atomic_number: 59, color: 0xd9ffc7, vdw_radius: 2.47 },
    "ND" => ElementInfo { atomic_number: 60, color: 0xc7ffc7, vdw_radius: 2.45 },
    "PM" => ElementInfo { atomic_number: 61, color: 0xa3ffc7, vdw_radius: 2.43 },
    "SM" => ElementInfo { atomic_number: 62, color: 0x8fffc7, vdw_radius: 2.42 },
    "EU" => ElementInfo { atomic_number: 63, color: 0x61ffc7, vdw_radius: 2.4 },
    "GD" => ElementInfo { atomic_number: 64, color: 0x45ffc7, vdw_radius: 2.38 },
    "TB" => ElementInfo { atomic_number: 65, color: 0x30ffc7, vdw_radius: 2.37 },
    "DY" => ElementInfo { atomic_number: 66, color: 0x1fffc7, vdw_radius: 2.35 },
    "HO" => ElementInfo { atomic_number: 67, color: 0x00ff9c, vdw_radius: 2.33 },
    "ER" => ElementInfo { atomic_number: 68, color: 0x00e675, vdw_radius: 2.32 },
    "TM" => ElementInfo { atomic_number: 69, color: 0x00d452, vdw_radius: 2.3 },
    "YB" => ElementInfo { atomic_number: 70, color: 0x00bf38, vdw_radius: 2.28 },
    "LU" => ElementInfo { atomic_number: 71, color: 0x00ab24, vdw_radius: 2.27 },
    "HF" => ElementInfo { atomic_number: 72, color: 0x4dc2ff, vdw_radius: 2.25 },
    "TA" => ElementInfo { atomic_number: 73, color: 0x4da6ff, vdw_radius: 2.2 },
    "W" => ElementInfo { atomic_number: 74, color: 0x2194d6, vdw_radius: 2.1 },
    "RE" => ElementInfo { atomic_number: 75, color: 0x267dab, vdw_radius: 2.05 },
    "OS" => ElementInfo { atomic_number: 76, color: 0x266696, vdw_radius: 2.0 },
    "IR" => ElementInfo { atomic_number: 77, color: 0x175487, vdw_radius: 2.0 },
    "PT" => ElementInfo { atomic_number: 78, color: 0xd0d0e0, vdw_radius: 2.05 },
    "AU" => ElementInfo { atomic_number: 79, color: 0xffd123, vdw_radius: 2.1 },
    "HG" => ElementInfo { atomic_number: 80, color: 0xb8b8d0, vdw_radius: 2.05 },
    "TL" => ElementInfo { atomic_number: 81, color: 0xa6544d, vdw_radius: 1.96 },
    "PB" => ElementInfo { atomic_number: 82, color: 0x575961, vdw_radius: 2.02 },
    "BI" => ElementInfo { atomic_number: 83, color: 0x9e4fb5, vdw_radius: 2.07 },
    "PO" => ElementInfo { atomic_number: 84, color: 0xab5c00, vdw_radius: 1.97 },
    "AT" => ElementInfo { atomic_number: 85, color: 0x754f45, vdw_radius: 2.02 },
    "RN" => ElementInfo { atomic_number: 86, color: 0x428296, vdw_radius: 2.2 },
    "FR" => ElementInfo { atomic_number: 87, color: 0x420066, vdw_radius: 3.48 },
    "RA" => ElementInfo { atomic_number: 88, color: 0x007d00, vdw_radius: 2.83 },
    "AC" => ElementInfo { atomic_number: 89, color: 0x70abfa, vdw_radius: 2.0 },
    "TH" => ElementInfo { atomic_number: 90, color: 0x00baff, vdw_radius: 2.4 },
    "PA" => ElementInfo { atomic_number: 91, color: 0x00a1ff, vdw_radius: 2.0 },
    "U" => ElementInfo { atomic_number: 92, color: 0x008fff, vdw_radius: 2.3 },
    "NP" => ElementInfo { atomic_number: 93, color: 0x0080ff, vdw_radius: 2.0 },
    "PU" => ElementInfo { atomic_number: 94, color: 0x006bff, vdw_radius: 2.0 },
    "AM" => ElementInfo { atomic_number: 95, color: 0x545cf2, vdw_radius: 2.0 },
    "CM" => ElementInfo { atomic_number: 96, color: 0x785ce3, vdw_radius: 2.0 },
    "BK" => ElementInfo { atomic_number: 97, color: 0x8a4fe3, vdw_radius: 2.0 },
    "CF" => ElementInfo { atomic_number: 98, color: 0xa136d4, vdw_radius: 2.0 },
    "ES" => ElementInfo { atomic_number: 99, color: 0xb31fd4, vdw_radius: 2.0 },
    "FM" => ElementInfo { atomic_number: 100, color: 0xb31fba, vdw_radius: 2.0 },
    "MD" => ElementInfo { atomic_number: 101, color: 0xb30da6, vdw_radius: 2.0 },
    "NO" => ElementInfo { atomic_number: 102, color: 0xbd0d87, vdw_radius: 2.0 },
    "LR" => ElementInfo { atomic_number: 103, color: 0xc70066, vdw_radius: 2.0 },
    "RF" => ElementInfo { atomic_number: 104, color: 0xcc0059, vdw_radius: 2.0 },
    "DB" => ElementInfo { atomic_number: 105, color: 0xd1004f, vdw_radius: 2.0 },
    "SG" => ElementInfo { atomic_number: 106, color: 0xd90045, vdw_radius: 2.0 },
    "BH" => ElementInfo { atomic_number: 107, color: 0xe00038, vdw_radius: 2.0 },
    "HS" => ElementInfo { atomic_number: 108, color: 0xe6002e, vdw_radius: 2.0 },
    "MT" => ElementInfo { atomic_number: 109, color: 0xeb0026, vdw_radius: 2.0 },
    "DS" => ElementInfo { atomic_number: 110, color: 0xffffff, vdw_radius: 2.0 },
    "RG" => ElementInfo { atomic_number: 111, color: 0xffffff, vdw_radius: 2.0 },
    "CN" => ElementInfo { atomic_number: 112, color: 0xffffff, vdw_radius: 2.0 },
    "NH" => ElementInfo { atomic_number: 113, color: 0xff1493, vdw_radius: 2.0 },
    "FL" => ElementInfo { atomic_number: 114, color: 0xffffff, vdw_radius: 2.0 },
    "MC" => ElementInfo { atomic_number: 115, color: 0xff1493, vdw_radius: 2.0 },
    "LV" => ElementInfo { atomic_number: 116, color: 0xffffff, vdw_radius: 2.0 },
    "TS" => ElementInfo { atomic_number: 117, color: 0xff1493, vdw_radius: 2.0 },
    "OG" => ElementInfo { atomic_number: 118, color: 0xff1493, vdw_radius: 2.0 },
};

/// Display properties of one chemical species present in a structure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Species {
    pub label: String,
    pub color: Color,
    pub radius: f64,
    pub atomic_number: u8,
}

impl Species {
    /// Looks up the display properties for an element symbol.
    ///
    /// Unknown symbols get a deep-pink color, a 0.1 Å radius and atomic number 0, so
    /// that they stay visible instead of failing the whole structure.
    pub fn from_symbol(symbol: &str) -> Self {
        let info = ELEMENTS.get(symbol.trim().to_ascii_uppercase().as_str());
        Self {
            label: symbol.to_string(),
            color: Color::from_hex(info.map_or(FALLBACK_COLOR, |e| e.color)),
            radius: info.map_or(FALLBACK_RADIUS, |e| e.vdw_radius),
            atomic_number: info.map_or(0, |e| e.atomic_number),
        }
    }
}

/// Returns one [`Species`] per distinct element symbol, in order of first appearance.
pub fn species_of(elements: &[String]) -> Vec<Species> {
    let mut seen = std::collections::HashSet::new();
    elements
        .iter()
        .filter(|symbol| seen.insert(symbol.as_str()))
        .map(|symbol| Species::from_symbol(symbol))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_element_uses_table_values() {
        let na = Species::from_symbol("Na");
        assert_eq!(na.atomic_number, 11);
        assert_eq!(na.color, Color::from_hex(0xab5cf2));
        assert!((na.radius - 2.27).abs() < 1e-12);
    }

    #[test]
    fn unknown_element_falls_back_to_visible_defaults() {
        let x = Species::from_symbol("Xx");
        assert_eq!(x.atomic_number, 0);
        assert_eq!(x.color, Color::from_hex(FALLBACK_COLOR));
        assert!((x.radius - FALLBACK_RADIUS).abs() < 1e-12);
    }

    #[test]
    fn species_are_deduplicated_in_first_appearance_order() {
        let elements: Vec<String> = ["O", "H", "H", "O", "C"].iter().map(|s| s.to_string()).collect();
        let labels: Vec<_> = species_of(&elements).into_iter().map(|s| s.label).collect();
        assert_eq!(labels, vec!["O", "H", "C"]);
    }
}
