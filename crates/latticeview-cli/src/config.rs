use crate::cli::ConfigArgs;
use crate::error::{CliError, Result};
use latticeview::core::color::Color;
use latticeview::core::style::{LatticeLabelStyle, LatticeParameter, StrokeOverride};
use latticeview::engine::config::{Alignment, CellStyle, SceneConfigBuilder};
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialViewConfig {
    alignments: Option<Vec<Alignment>>,
    rotations: Option<Vec<[f64; 3]>>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialDisplayConfig {
    wrap: Option<bool>,
    show_cell: Option<bool>,
    show_lattice_constants: Option<bool>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialCellConfig {
    color: Option<Color>,
    line_width: Option<f64>,
    dash_size: Option<f64>,
    gap_size: Option<f64>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialLimitsConfig {
    size_limit: Option<usize>,
    bond_limit: Option<usize>,
}

/// A scene configuration file where every value is optional.
///
/// ```toml
/// [view]
/// alignments = ["up=c", "right=a"]
/// rotations = [[0.0, 30.0, 0.0], [30.0, 0.0, 0.0]]
///
/// [display]
/// wrap = true
/// show-cell = true
/// show-lattice-constants = true
///
/// [cell]
/// color = "#000000"
/// line-width = 1.0
///
/// [lattice]
/// size = 0.7
/// alpha = { enabled = false }
///
/// [limits]
/// size-limit = 40000
/// bond-limit = 500
/// ```
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialSceneConfig {
    view: Option<PartialViewConfig>,
    display: Option<PartialDisplayConfig>,
    cell: Option<PartialCellConfig>,
    lattice: Option<LatticeLabelStyle>,
    limits: Option<PartialLimitsConfig>,
}

impl PartialSceneConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Loads the configuration file named in `args`, if any, and merges the command
    /// line on top of it.
    pub fn load(args: &ConfigArgs) -> Result<SceneConfigBuilder> {
        let partial = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        partial.merge_with_cli(args)
    }

    /// Applies `-S` overrides and the alignment flags, yielding a builder the
    /// commands can refine further before validation.
    pub fn merge_with_cli(mut self, args: &ConfigArgs) -> Result<SceneConfigBuilder> {
        self.apply_set_values(&args.set_values)?;

        let view = self.view.take().unwrap_or_default();
        let display = self.display.take().unwrap_or_default();
        let cell = self.cell.take().unwrap_or_default();
        let limits = self.limits.take().unwrap_or_default();

        let alignments = if args.alignments.is_empty() {
            view.alignments
        } else {
            Some(
                args.alignments
                    .iter()
                    .map(|s| Alignment::from_str(s))
                    .collect::<std::result::Result<Vec<_>, _>>()?,
            )
        };
        let rotations = if args.no_rotations {
            Some(Vec::new())
        } else {
            view.rotations
        };

        let mut builder = SceneConfigBuilder::new().cell_style(Self::merge_cell(cell));
        if let Some(alignments) = alignments {
            builder = builder.alignments(alignments);
        }
        if let Some(rotations) = rotations {
            builder = builder.rotations(rotations);
        }
        if let Some(lattice) = self.lattice {
            builder = builder.lattice_style(lattice);
        }
        if let Some(wrap) = display.wrap {
            builder = builder.wrap(wrap);
        }
        if let Some(show) = display.show_cell {
            builder = builder.show_cell(show);
        }
        if let Some(show) = display.show_lattice_constants {
            builder = builder.show_lattice_constants(show);
        }
        if let Some(limit) = limits.size_limit {
            builder = builder.size_limit(limit);
        }
        if let Some(limit) = limits.bond_limit {
            builder = builder.bond_limit(limit);
        }
        Ok(builder)
    }

    fn merge_cell(partial: PartialCellConfig) -> CellStyle {
        let defaults = CellStyle::default();
        CellStyle {
            color: partial.color.unwrap_or(defaults.color),
            line_width: partial.line_width.unwrap_or(defaults.line_width),
            dash_size: partial.dash_size.unwrap_or(defaults.dash_size),
            gap_size: partial.gap_size.unwrap_or(defaults.gap_size),
        }
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };

            match key {
                "display.wrap" => {
                    self.display.get_or_insert_with(Default::default).wrap =
                        Some(parse_value(key, value_str)?);
                }
                "display.show-cell" => {
                    self.display.get_or_insert_with(Default::default).show_cell =
                        Some(parse_value(key, value_str)?);
                }
                "display.show-lattice-constants" => {
                    self.display
                        .get_or_insert_with(Default::default)
                        .show_lattice_constants = Some(parse_value(key, value_str)?);
                }
                "cell.color" => {
                    self.cell.get_or_insert_with(Default::default).color =
                        Some(parse_value(key, value_str)?);
                }
                "cell.line-width" => {
                    self.cell.get_or_insert_with(Default::default).line_width =
                        Some(parse_value(key, value_str)?);
                }
                "cell.dash-size" => {
                    self.cell.get_or_insert_with(Default::default).dash_size =
                        Some(parse_value(key, value_str)?);
                }
                "cell.gap-size" => {
                    self.cell.get_or_insert_with(Default::default).gap_size =
                        Some(parse_value(key, value_str)?);
                }
                "lattice.font" => {
                    self.lattice.get_or_insert_with(Default::default).font = value_str.to_string();
                }
                "lattice.size" => {
                    self.lattice.get_or_insert_with(Default::default).size =
                        parse_value(key, value_str)?;
                }
                "lattice.color" => {
                    self.lattice.get_or_insert_with(Default::default).color =
                        Some(parse_value(key, value_str)?);
                }
                "limits.size-limit" => {
                    self.limits.get_or_insert_with(Default::default).size_limit =
                        Some(parse_value(key, value_str)?);
                }
                "limits.bond-limit" => {
                    self.limits.get_or_insert_with(Default::default).bond_limit =
                        Some(parse_value(key, value_str)?);
                }
                _ => self.apply_parameter_value(key, value_str)?,
            }
        }
        Ok(())
    }

    /// Handles `lattice.<parameter>.<field>` keys, e.g. `lattice.alpha.enabled=false`.
    fn apply_parameter_value(&mut self, key: &str, value_str: &str) -> Result<()> {
        let unsupported =
            || CliError::Config(format!("Unsupported configuration key for --set: '{}'", key));

        let mut parts = key.splitn(3, '.');
        let (Some("lattice"), Some(name), Some(field)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(unsupported());
        };
        let parameter = LatticeParameter::from_key(name).ok_or_else(unsupported)?;
        let style = self
            .lattice
            .get_or_insert_with(Default::default)
            .parameter_mut(parameter);

        match field {
            "enabled" => style.enabled = Some(parse_value(key, value_str)?),
            "color" => style.color = Some(parse_value(key, value_str)?),
            "font" => style.font = Some(value_str.to_string()),
            "size" => style.size = Some(parse_value(key, value_str)?),
            "label" => style.label = Some(value_str.to_string()),
            "stroke-width" => {
                style.stroke.get_or_insert_with(StrokeOverride::default).width =
                    Some(parse_value(key, value_str)?)
            }
            "stroke-color" => {
                style.stroke.get_or_insert_with(StrokeOverride::default).color =
                    Some(parse_value(key, value_str)?)
            }
            _ => return Err(unsupported()),
        }
        Ok(())
    }
}

fn parse_value<T: FromStr>(key: &str, value_str: &str) -> Result<T> {
    value_str
        .trim()
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid value for {}: {}", key, value_str)))
}
