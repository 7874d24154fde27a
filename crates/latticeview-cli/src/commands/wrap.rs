use super::{load_structure, progress_handler};
use crate::cli::WrapArgs;
use crate::error::{CliError, Result};
use crate::utils::output::write_json;
use latticeview::core::io::toml_format::TomlStructureFile;
use latticeview::core::io::traits::StructureFormat;
use latticeview::engine::progress::ProgressReporter;
use latticeview::workflows::{
    self,
    wrap::{RefreshError, WrapReport},
};
use nalgebra::Point3;
use std::path::Path;
use tracing::{debug, info, warn};

fn writes_structure(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}

pub fn run(args: WrapArgs, quiet: bool) -> Result<()> {
    let (mut structure, metadata) = load_structure(&args.input)?;

    let handler = progress_handler(quiet);
    let reporter = ProgressReporter::with_callback(handler.callback());

    // Nothing is rendered here; the refresh step only records the new positions.
    let mut refresher = |positions: &[Point3<f64>]| -> std::result::Result<(), RefreshError> {
        debug!(atoms = positions.len(), "Positions updated.");
        Ok(())
    };

    let report = workflows::wrap::apply(&mut structure, !args.unwrap, &mut refresher, &reporter)?;
    match &report {
        WrapReport::Skipped => {
            warn!("The structure has no periodic cell, positions are written unchanged.")
        }
        WrapReport::Applied(source) => info!(?source, "Positions updated."),
        WrapReport::RefreshFailed(error) => warn!(%error, "Positions updated without refresh."),
    }

    match args.output.as_deref() {
        Some(path) if writes_structure(path) => {
            info!("Writing structure to {:?}", path);
            TomlStructureFile::write_to_path(&structure, &metadata, path).map_err(|e| {
                CliError::FileWriting {
                    path: path.to_path_buf(),
                    source: e.into(),
                }
            })?;
        }
        output => write_json(&structure.positions(), output)?,
    }

    if let Some(path) = &args.output {
        eprintln!("Positions written to: {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    const OUTSIDE: &str = r#"
[cell]
a = [1.0, 0.0, 0.0]
b = [0.0, 1.0, 0.0]
c = [0.0, 0.0, 1.0]

[[atoms]]
element = "Cu"
position = [1.5, 0.2, -0.1]
"#;

    fn wrap_args(input: PathBuf, output: PathBuf, unwrap: bool) -> WrapArgs {
        WrapArgs {
            input,
            output: Some(output),
            unwrap,
        }
    }

    #[test]
    fn wrapped_positions_are_written_as_json() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("cu.toml");
        let output = dir.path().join("positions.json");
        fs::write(&input, OUTSIDE).unwrap();

        run(wrap_args(input, output.clone(), false), true).unwrap();

        let positions: Vec<[f64; 3]> =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        let expected = [0.5, 0.2, 0.9];
        for (actual, expected) in positions[0].iter().zip(expected) {
            assert!((actual - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn toml_output_writes_a_full_structure() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("cu.toml");
        let output = dir.path().join("wrapped.toml");
        fs::write(&input, OUTSIDE).unwrap();

        run(wrap_args(input, output.clone(), false), true).unwrap();

        let (structure, _) = TomlStructureFile::read_from_path(&output).unwrap();
        assert!(structure.cell().is_some());
        assert!((structure.positions()[0] - Point3::new(0.5, 0.2, 0.9)).norm() < 1e-9);
    }

    #[test]
    fn unwrap_keeps_the_original_positions() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("cu.toml");
        let output = dir.path().join("positions.json");
        fs::write(&input, OUTSIDE).unwrap();

        run(wrap_args(input, output.clone(), true), true).unwrap();

        let positions: Vec<[f64; 3]> =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(positions, vec![[1.5, 0.2, -0.1]]);
    }

    #[test]
    fn output_format_follows_the_extension() {
        assert!(writes_structure(Path::new("out.toml")));
        assert!(writes_structure(Path::new("out.TOML")));
        assert!(!writes_structure(Path::new("out.json")));
        assert!(!writes_structure(Path::new("out")));
    }
}
