use super::load_structure;
use crate::cli::AlignArgs;
use crate::config::PartialSceneConfig;
use crate::error::{CliError, Result};
use crate::utils::output::write_json;
use latticeview::engine::alignment::compute_view_orientation;
use serde::Serialize;
use tracing::info;

/// The camera orientation of a structure, as printed by `latticeview align`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ViewOrientation {
    /// Quaternion components in `[x, y, z, w]` order.
    pub quaternion: [f64; 4],
    pub angle_degrees: f64,
}

pub fn orientation(args: &AlignArgs) -> Result<ViewOrientation> {
    let config = PartialSceneConfig::load(&args.config)?
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;
    let (structure, _) = load_structure(&args.input)?;

    if structure.cell().is_none() {
        info!("Structure has no cell, only the extra rotations apply.");
    }
    let q = compute_view_orientation(structure.cell().map(|c| c.basis()), &config.view)?;
    Ok(ViewOrientation {
        quaternion: [q.i, q.j, q.k, q.w],
        angle_degrees: q.angle().to_degrees(),
    })
}

pub fn run(args: AlignArgs) -> Result<()> {
    let orientation = orientation(&args)?;
    write_json(&orientation, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ConfigArgs;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    const CUBIC: &str = r#"
[cell]
a = [4.0, 0.0, 0.0]
b = [0.0, 4.0, 0.0]
c = [0.0, 0.0, 4.0]

[[atoms]]
element = "Po"
position = [0.0, 0.0, 0.0]
"#;

    fn align_args(input: PathBuf, alignments: &[&str]) -> AlignArgs {
        AlignArgs {
            input,
            config: ConfigArgs {
                alignments: alignments.iter().map(|s| s.to_string()).collect(),
                no_rotations: true,
                ..ConfigArgs::default()
            },
        }
    }

    #[test]
    fn up_c_turns_a_cubic_cell_by_ninety_degrees() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("cubic.toml");
        fs::write(&input, CUBIC).unwrap();

        let result = orientation(&align_args(input, &["up=c"])).unwrap();
        assert!((result.angle_degrees - 90.0).abs() < 1e-9);
        let [x, y, z, w] = result.quaternion;
        assert!((x * x + y * y + z * z + w * w - 1.0).abs() < 1e-12);
    }

    #[test]
    fn no_alignment_and_no_rotation_is_the_identity() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("cubic.toml");
        fs::write(&input, CUBIC).unwrap();

        let config_path = dir.path().join("scene.toml");
        fs::write(&config_path, "[view]\nalignments = []\n").unwrap();
        let mut args = align_args(input, &[]);
        args.config.config = Some(config_path);

        let result = orientation(&args).unwrap();
        assert_eq!(result.quaternion, [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn three_alignments_are_rejected() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("cubic.toml");
        fs::write(&input, CUBIC).unwrap();

        let err = orientation(&align_args(input, &["up=c", "right=a", "front=b"])).unwrap_err();
        assert!(matches!(err, CliError::Engine(_)));
    }
}
