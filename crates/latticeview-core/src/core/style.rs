use crate::core::color::Color;
use crate::core::models::lattice::BasisLabel;
use serde::{Deserialize, Serialize};

pub const DEFAULT_LABEL_FONT: &str = "Titillium Web,sans-serif";
pub const DEFAULT_LABEL_SIZE: f64 = 0.7;
pub const DEFAULT_STROKE_WIDTH: f64 = 0.06;

/// One of the six annotated lattice parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LatticeParameter {
    A,
    B,
    C,
    Alpha,
    Beta,
    Gamma,
}

impl LatticeParameter {
    pub const ALL: [LatticeParameter; 6] = [
        LatticeParameter::A,
        LatticeParameter::B,
        LatticeParameter::C,
        LatticeParameter::Alpha,
        LatticeParameter::Beta,
        LatticeParameter::Gamma,
    ];

    /// Looks a parameter up by its configuration key (`a`, `alpha`, ...).
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "a" => Some(LatticeParameter::A),
            "b" => Some(LatticeParameter::B),
            "c" => Some(LatticeParameter::C),
            "alpha" => Some(LatticeParameter::Alpha),
            "beta" => Some(LatticeParameter::Beta),
            "gamma" => Some(LatticeParameter::Gamma),
            _ => None,
        }
    }

    pub fn axis(label: BasisLabel) -> Self {
        match label {
            BasisLabel::A => LatticeParameter::A,
            BasisLabel::B => LatticeParameter::B,
            BasisLabel::C => LatticeParameter::C,
        }
    }

    /// The angle spanned by the basis pair `(i, i + 1 mod 3)`.
    ///
    /// `(a, b)` spans gamma, `(b, c)` spans alpha and `(c, a)` spans beta.
    pub fn angle_after(first: BasisLabel) -> Self {
        match first {
            BasisLabel::A => LatticeParameter::Gamma,
            BasisLabel::B => LatticeParameter::Alpha,
            BasisLabel::C => LatticeParameter::Beta,
        }
    }

    pub fn default_color(self) -> Color {
        match self {
            LatticeParameter::A => Color::from_hex(0xc52929),
            LatticeParameter::B => Color::from_hex(0x47a823),
            LatticeParameter::C => Color::from_hex(0x3b5796),
            LatticeParameter::Alpha | LatticeParameter::Beta | LatticeParameter::Gamma => {
                Color::WHITE
            }
        }
    }

    pub fn default_label(self) -> &'static str {
        match self {
            LatticeParameter::A => "a",
            LatticeParameter::B => "b",
            LatticeParameter::C => "c",
            LatticeParameter::Alpha => "α",
            LatticeParameter::Beta => "β",
            LatticeParameter::Gamma => "γ",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StrokeStyle {
    pub width: f64,
    pub color: Color,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            width: DEFAULT_STROKE_WIDTH,
            color: Color::BLACK,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StrokeOverride {
    pub width: Option<f64>,
    pub color: Option<Color>,
}

/// Per-parameter overrides. Every unset field falls back to the group-level value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParameterStyle {
    pub enabled: Option<bool>,
    pub color: Option<Color>,
    pub font: Option<String>,
    pub size: Option<f64>,
    pub label: Option<String>,
    pub stroke: Option<StrokeOverride>,
}

/// Label styling for the lattice-constant annotations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LatticeLabelStyle {
    pub font: String,
    pub size: f64,
    /// Group-level text color. When unset, each parameter uses its own default color.
    pub color: Option<Color>,
    pub stroke: StrokeStyle,
    pub a: ParameterStyle,
    pub b: ParameterStyle,
    pub c: ParameterStyle,
    pub alpha: ParameterStyle,
    pub beta: ParameterStyle,
    pub gamma: ParameterStyle,
}

impl Default for LatticeLabelStyle {
    fn default() -> Self {
        Self {
            font: DEFAULT_LABEL_FONT.to_string(),
            size: DEFAULT_LABEL_SIZE,
            color: None,
            stroke: StrokeStyle::default(),
            a: ParameterStyle::default(),
            b: ParameterStyle::default(),
            c: ParameterStyle::default(),
            alpha: ParameterStyle::default(),
            beta: ParameterStyle::default(),
            gamma: ParameterStyle::default(),
        }
    }
}

/// A fully resolved label style with no missing fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLabelStyle {
    pub enabled: bool,
    pub color: Color,
    pub font: String,
    pub size: f64,
    pub label: String,
    pub stroke_width: f64,
    pub stroke_color: Color,
}

impl LatticeLabelStyle {
    pub fn parameter(&self, parameter: LatticeParameter) -> &ParameterStyle {
        match parameter {
            LatticeParameter::A => &self.a,
            LatticeParameter::B => &self.b,
            LatticeParameter::C => &self.c,
            LatticeParameter::Alpha => &self.alpha,
            LatticeParameter::Beta => &self.beta,
            LatticeParameter::Gamma => &self.gamma,
        }
    }

    pub fn parameter_mut(&mut self, parameter: LatticeParameter) -> &mut ParameterStyle {
        match parameter {
            LatticeParameter::A => &mut self.a,
            LatticeParameter::B => &mut self.b,
            LatticeParameter::C => &mut self.c,
            LatticeParameter::Alpha => &mut self.alpha,
            LatticeParameter::Beta => &mut self.beta,
            LatticeParameter::Gamma => &mut self.gamma,
        }
    }

    /// Resolves the style of one parameter, falling back field by field to the
    /// group-level defaults.
    pub fn resolve(&self, parameter: LatticeParameter) -> ResolvedLabelStyle {
        let own = self.parameter(parameter);
        let stroke = own.stroke.as_ref();
        ResolvedLabelStyle {
            enabled: own.enabled.unwrap_or(true),
            color: own
                .color
                .or(self.color)
                .unwrap_or_else(|| parameter.default_color()),
            font: own.font.clone().unwrap_or_else(|| self.font.clone()),
            size: own.size.unwrap_or(self.size),
            label: own
                .label
                .clone()
                .unwrap_or_else(|| parameter.default_label().to_string()),
            stroke_width: stroke.and_then(|s| s.width).unwrap_or(self.stroke.width),
            stroke_color: stroke.and_then(|s| s.color).unwrap_or(self.stroke.color),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameters_are_found_by_their_keys() {
        for parameter in LatticeParameter::ALL {
            let key = toml::Value::try_from(parameter).unwrap();
            assert_eq!(LatticeParameter::from_key(key.as_str().unwrap()), Some(parameter));
        }
        assert_eq!(LatticeParameter::from_key("delta"), None);
    }

    #[test]
    fn default_style_resolves_builtin_colors_and_labels() {
        let style = LatticeLabelStyle::default();
        let a = style.resolve(LatticeParameter::A);
        assert!(a.enabled);
        assert_eq!(a.color, Color::from_hex(0xc52929));
        assert_eq!(a.label, "a");
        assert_eq!(a.font, DEFAULT_LABEL_FONT);
        assert_eq!(a.size, DEFAULT_LABEL_SIZE);
        assert_eq!(a.stroke_width, DEFAULT_STROKE_WIDTH);

        let gamma = style.resolve(LatticeParameter::Gamma);
        assert_eq!(gamma.color, Color::WHITE);
        assert_eq!(gamma.label, "γ");
    }

    #[test]
    fn per_parameter_fields_override_group_fields_individually() {
        let mut style = LatticeLabelStyle::default();
        style.b.size = Some(1.2);
        style.b.stroke = Some(StrokeOverride {
            width: None,
            color: Some(Color::WHITE),
        });

        let b = style.resolve(LatticeParameter::B);
        assert_eq!(b.size, 1.2);
        assert_eq!(b.stroke_color, Color::WHITE);
        assert_eq!(b.stroke_width, DEFAULT_STROKE_WIDTH);
        assert_eq!(b.font, DEFAULT_LABEL_FONT);
    }

    #[test]
    fn group_color_replaces_builtin_defaults_but_not_explicit_colors() {
        let mut style = LatticeLabelStyle::default();
        style.color = Some(Color::BLACK);
        style.c.color = Some(Color::WHITE);

        assert_eq!(style.resolve(LatticeParameter::A).color, Color::BLACK);
        assert_eq!(style.resolve(LatticeParameter::C).color, Color::WHITE);
    }

    #[test]
    fn angle_after_maps_basis_pairs_to_opposite_angles() {
        assert_eq!(LatticeParameter::angle_after(BasisLabel::A), LatticeParameter::Gamma);
        assert_eq!(LatticeParameter::angle_after(BasisLabel::B), LatticeParameter::Alpha);
        assert_eq!(LatticeParameter::angle_after(BasisLabel::C), LatticeParameter::Beta);
    }

    #[test]
    fn parameter_mut_edits_the_matching_field() {
        let mut style = LatticeLabelStyle::default();
        style.parameter_mut(LatticeParameter::Beta).enabled = Some(false);
        assert!(!style.resolve(LatticeParameter::Beta).enabled);
        assert!(style.resolve(LatticeParameter::Alpha).enabled);
    }
}
