use crate::core::color::Color;
use crate::core::models::lattice::BasisLabel;
use crate::core::primitives::LineStyle;
use crate::core::style::LatticeLabelStyle;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for '{parameter}': {reason}")]
    InvalidValue {
        parameter: &'static str,
        reason: String,
    },
}

/// A fixed direction in view space.
///
/// `right` maps to −X and `left` to +X: the camera looks at the scene from the
/// back, so screen right is the negative world X axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewDirection {
    Up,
    Down,
    Left,
    Right,
    Front,
    Back,
}

impl ViewDirection {
    pub fn target(self) -> Vector3<f64> {
        match self {
            ViewDirection::Up => Vector3::new(0.0, 1.0, 0.0),
            ViewDirection::Down => Vector3::new(0.0, -1.0, 0.0),
            ViewDirection::Right => Vector3::new(-1.0, 0.0, 0.0),
            ViewDirection::Left => Vector3::new(1.0, 0.0, 0.0),
            ViewDirection::Front => Vector3::new(0.0, 0.0, -1.0),
            ViewDirection::Back => Vector3::new(0.0, 0.0, 1.0),
        }
    }

    /// Index of the view axis this direction locks once satisfied.
    pub fn locked_axis(self) -> usize {
        match self {
            ViewDirection::Left | ViewDirection::Right => 0,
            ViewDirection::Up | ViewDirection::Down => 1,
            ViewDirection::Front | ViewDirection::Back => 2,
        }
    }
}

impl fmt::Display for ViewDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ViewDirection::Up => "up",
            ViewDirection::Down => "down",
            ViewDirection::Left => "left",
            ViewDirection::Right => "right",
            ViewDirection::Front => "front",
            ViewDirection::Back => "back",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown view direction '{0}', expected one of up, down, left, right, front, back")]
pub struct ParseDirectionError(pub String);

impl FromStr for ViewDirection {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(ViewDirection::Up),
            "down" => Ok(ViewDirection::Down),
            "left" => Ok(ViewDirection::Left),
            "right" => Ok(ViewDirection::Right),
            "front" => Ok(ViewDirection::Front),
            "back" => Ok(ViewDirection::Back),
            _ => Err(ParseDirectionError(s.to_string())),
        }
    }
}

/// Align the basis vector `target` with the view direction `direction`.
///
/// Written as `direction=label` in configuration files and on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Alignment {
    pub direction: ViewDirection,
    pub target: BasisLabel,
}

impl Alignment {
    pub fn new(direction: ViewDirection, target: BasisLabel) -> Self {
        Self { direction, target }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.direction, self.target)
    }
}

impl FromStr for Alignment {
    type Err = super::error::EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (direction, target) = s
            .split_once('=')
            .ok_or_else(|| super::error::EngineError::InvalidAlignment(s.to_string()))?;
        Ok(Self {
            direction: direction.parse()?,
            target: target.parse()?,
        })
    }
}

impl TryFrom<String> for Alignment {
    type Error = super::error::EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Alignment> for String {
    fn from(alignment: Alignment) -> Self {
        alignment.to_string()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewConfig {
    /// Applied in order; at most two are accepted by the alignment solver.
    pub alignments: Vec<Alignment>,
    /// Extra XYZ Euler rotations in degrees, applied after the alignment.
    pub rotations: Vec<[f64; 3]>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            alignments: vec![
                Alignment::new(ViewDirection::Up, BasisLabel::C),
                Alignment::new(ViewDirection::Right, BasisLabel::A),
            ],
            rotations: vec![[0.0, 30.0, 0.0], [30.0, 0.0, 0.0]],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellStyle {
    pub color: Color,
    pub line_width: f64,
    pub dash_size: f64,
    pub gap_size: f64,
}

impl CellStyle {
    pub fn line_style(&self) -> LineStyle {
        LineStyle::new(self.color, self.line_width, self.dash_size, self.gap_size)
    }
}

impl Default for CellStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            line_width: 1.0,
            dash_size: 0.0,
            gap_size: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayLimits {
    /// Systems with more atoms than this require confirmation before display.
    pub size_limit: usize,
    /// Bonds are not drawn for systems with more atoms than this.
    pub bond_limit: usize,
}

impl Default for DisplayLimits {
    fn default() -> Self {
        Self {
            size_limit: 40_000,
            bond_limit: 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub view: ViewConfig,
    pub cell_style: CellStyle,
    pub lattice_style: LatticeLabelStyle,
    pub wrap: bool,
    pub show_cell: bool,
    pub show_lattice_constants: bool,
    pub limits: DisplayLimits,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            view: ViewConfig::default(),
            cell_style: CellStyle::default(),
            lattice_style: LatticeLabelStyle::default(),
            wrap: true,
            show_cell: true,
            show_lattice_constants: true,
            limits: DisplayLimits::default(),
        }
    }
}

/// Builds a [`SceneConfig`], starting from the defaults and validating the
/// numeric parameters on `build`.
#[derive(Debug, Default)]
pub struct SceneConfigBuilder {
    alignments: Option<Vec<Alignment>>,
    rotations: Option<Vec<[f64; 3]>>,
    cell_style: Option<CellStyle>,
    lattice_style: Option<LatticeLabelStyle>,
    wrap: Option<bool>,
    show_cell: Option<bool>,
    show_lattice_constants: Option<bool>,
    size_limit: Option<usize>,
    bond_limit: Option<usize>,
}

impl SceneConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alignments(mut self, alignments: Vec<Alignment>) -> Self {
        self.alignments = Some(alignments);
        self
    }
    pub fn rotations(mut self, rotations: Vec<[f64; 3]>) -> Self {
        self.rotations = Some(rotations);
        self
    }
    pub fn cell_style(mut self, style: CellStyle) -> Self {
        self.cell_style = Some(style);
        self
    }
    pub fn lattice_style(mut self, style: LatticeLabelStyle) -> Self {
        self.lattice_style = Some(style);
        self
    }
    pub fn wrap(mut self, wrap: bool) -> Self {
        self.wrap = Some(wrap);
        self
    }
    pub fn show_cell(mut self, show: bool) -> Self {
        self.show_cell = Some(show);
        self
    }
    pub fn show_lattice_constants(mut self, show: bool) -> Self {
        self.show_lattice_constants = Some(show);
        self
    }
    pub fn size_limit(mut self, limit: usize) -> Self {
        self.size_limit = Some(limit);
        self
    }
    pub fn bond_limit(mut self, limit: usize) -> Self {
        self.bond_limit = Some(limit);
        self
    }

    pub fn build(self) -> Result<SceneConfig, ConfigError> {
        let defaults = SceneConfig::default();

        let cell_style = self.cell_style.unwrap_or(defaults.cell_style);
        if cell_style.line_width.is_nan() || cell_style.line_width <= 0.0 {
            return Err(ConfigError::InvalidValue {
                parameter: "cell.line-width",
                reason: format!("must be positive, got {}", cell_style.line_width),
            });
        }
        if cell_style.dash_size < 0.0 || cell_style.gap_size < 0.0 {
            return Err(ConfigError::InvalidValue {
                parameter: "cell.dash-size",
                reason: "dash and gap sizes must not be negative".to_string(),
            });
        }

        let lattice_style = self.lattice_style.unwrap_or(defaults.lattice_style);
        if lattice_style.size.is_nan() || lattice_style.size <= 0.0 {
            return Err(ConfigError::InvalidValue {
                parameter: "lattice.size",
                reason: format!("must be positive, got {}", lattice_style.size),
            });
        }

        let rotations = self.rotations.unwrap_or(defaults.view.rotations);
        if rotations.iter().flatten().any(|angle| !angle.is_finite()) {
            return Err(ConfigError::InvalidValue {
                parameter: "view.rotations",
                reason: "rotation angles must be finite".to_string(),
            });
        }

        Ok(SceneConfig {
            view: ViewConfig {
                alignments: self.alignments.unwrap_or(defaults.view.alignments),
                rotations,
            },
            cell_style,
            lattice_style,
            wrap: self.wrap.unwrap_or(defaults.wrap),
            show_cell: self.show_cell.unwrap_or(defaults.show_cell),
            show_lattice_constants: self
                .show_lattice_constants
                .unwrap_or(defaults.show_lattice_constants),
            limits: DisplayLimits {
                size_limit: self.size_limit.unwrap_or(defaults.limits.size_limit),
                bond_limit: self.bond_limit.unwrap_or(defaults.limits.bond_limit),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::error::EngineError;

    #[test]
    fn unknown_direction_surfaces_through_the_engine_error() {
        let err = "sideways=a".parse::<Alignment>().unwrap_err();
        assert!(matches!(&err, EngineError::UnknownDirection(e) if e.0 == "sideways"));
        assert_eq!(
            err.to_string(),
            "unknown view direction 'sideways', expected one of up, down, left, right, front, back"
        );
    }

    #[test]
    fn alignment_parses_direction_and_label() {
        let alignment: Alignment = " Up=c".parse().unwrap();
        assert_eq!(alignment, Alignment::new(ViewDirection::Up, BasisLabel::C));
        assert_eq!(alignment.to_string(), "up=c");
    }

    #[test]
    fn alignment_without_separator_is_rejected() {
        let err = "upc".parse::<Alignment>().unwrap_err();
        assert!(matches!(err, EngineError::InvalidAlignment(s) if s == "upc"));
    }

    #[test]
    fn alignment_with_unknown_parts_reports_which_part_failed() {
        assert!(matches!(
            "sideways=a".parse::<Alignment>(),
            Err(EngineError::UnknownDirection(_))
        ));
        assert!(matches!(
            "up=d".parse::<Alignment>(),
            Err(EngineError::UnknownBasisLabel(_))
        ));
    }

    #[test]
    fn right_and_left_use_screen_space_convention() {
        assert_eq!(ViewDirection::Right.target(), Vector3::new(-1.0, 0.0, 0.0));
        assert_eq!(ViewDirection::Left.target(), Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(ViewDirection::Front.locked_axis(), 2);
    }

    #[test]
    fn builder_without_overrides_matches_defaults() {
        let config = SceneConfigBuilder::new().build().unwrap();
        assert_eq!(config, SceneConfig::default());
        assert_eq!(config.view.alignments.len(), 2);
        assert_eq!(config.limits.size_limit, 40_000);
    }

    #[test]
    fn builder_applies_overrides() {
        let config = SceneConfigBuilder::new()
            .wrap(false)
            .show_cell(false)
            .alignments(vec![])
            .bond_limit(10)
            .build()
            .unwrap();
        assert!(!config.wrap);
        assert!(!config.show_cell);
        assert!(config.view.alignments.is_empty());
        assert_eq!(config.limits.bond_limit, 10);
        assert_eq!(config.limits.size_limit, 40_000);
    }

    #[test]
    fn builder_rejects_non_positive_line_width() {
        let style = CellStyle {
            line_width: 0.0,
            ..CellStyle::default()
        };
        let err = SceneConfigBuilder::new().cell_style(style).build().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                parameter: "cell.line-width",
                ..
            }
        ));
    }

    #[test]
    fn builder_rejects_non_finite_rotations() {
        let err = SceneConfigBuilder::new()
            .rotations(vec![[f64::NAN, 0.0, 0.0]])
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { parameter: "view.rotations", .. }));
    }

    #[test]
    fn default_cell_style_is_solid_black() {
        let style = CellStyle::default().line_style();
        assert_eq!(style.color, Color::BLACK);
        assert!(style.dash.is_none());
    }
}
