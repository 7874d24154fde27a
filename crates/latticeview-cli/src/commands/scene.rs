use super::{load_structure, progress_handler};
use crate::cli::SceneArgs;
use crate::config::PartialSceneConfig;
use crate::error::{CliError, Result};
use crate::utils::output::write_json;
use latticeview::engine::config::SceneConfig;
use latticeview::engine::progress::ProgressReporter;
use latticeview::workflows::{self, scene::SceneGeometry};
use serde::Serialize;
use tracing::{info, warn};

#[derive(Serialize)]
struct SceneDocument<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(flatten)]
    scene: &'a SceneGeometry,
}

fn resolve_config(args: &SceneArgs) -> Result<SceneConfig> {
    let mut builder = PartialSceneConfig::load(&args.config)?;
    if args.no_wrap {
        builder = builder.wrap(false);
    }
    if args.no_cell {
        builder = builder.show_cell(false);
    }
    if args.no_lattice_constants {
        builder = builder.show_lattice_constants(false);
    }
    builder.build().map_err(|e| CliError::Config(e.to_string()))
}

pub fn run(args: SceneArgs, quiet: bool) -> Result<()> {
    let config = resolve_config(&args)?;
    let (mut structure, metadata) = load_structure(&args.input)?;

    let decision = config.limits.evaluate(structure.atom_count());
    if decision.requires_confirmation && !args.yes {
        return Err(CliError::Argument(format!(
            "The structure has {} atoms, more than the display limit of {}. Pass --yes to build the scene anyway.",
            decision.atoms, config.limits.size_limit
        )));
    }
    if !decision.show_bonds {
        warn!(
            "The structure has more than {} atoms, bonds should not be drawn.",
            config.limits.bond_limit
        );
    }

    let handler = progress_handler(quiet);
    let reporter = ProgressReporter::with_callback(handler.callback());

    info!("Invoking the scene workflow...");
    let scene = workflows::scene::build(
        &mut structure,
        metadata.selection.as_ref(),
        &config,
        &reporter,
    )?;

    let document = SceneDocument {
        title: metadata.title.as_deref(),
        scene: &scene,
    };
    write_json(&document, args.output.as_deref())?;

    if let Some(path) = &args.output {
        eprintln!("Scene written to: {}", path.display());
    }
    Ok(())
}
