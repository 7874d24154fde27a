use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use latticeview::engine::progress::{Progress, ProgressCallback};

const PHASE_TEMPLATE: &str = "{msg}";
const ATOMS_TEMPLATE: &str = "{msg} [{bar:30}] {pos}/{len} atoms";

/// Human-readable line shown while a workflow phase runs.
fn phase_label(name: &str) -> &str {
    match name {
        "View" => "Aligning view to the lattice",
        "Cell" => "Building cell wireframe",
        "Lattice" => "Annotating lattice constants",
        "Positions" => "Collecting atom positions",
        "Wrap" => "Wrapping positions into the cell",
        "Refresh" => "Refreshing scene",
        other => other,
    }
}

/// Shows scene and wrap progress on stderr.
///
/// Each workflow phase is one status line; the coordinate wrapper's task turns
/// it into a bar over the atoms of the structure. A finished phase is echoed
/// with a check mark above the bar.
#[derive(Clone)]
pub struct CliProgressHandler {
    pb: ProgressBar,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        Self::with_target(ProgressDrawTarget::stderr())
    }

    /// A handler that tracks events without drawing anything.
    pub fn hidden() -> Self {
        Self::with_target(ProgressDrawTarget::hidden())
    }

    fn with_target(target: ProgressDrawTarget) -> Self {
        let pb = ProgressBar::with_draw_target(Some(0), target).with_style(Self::phase_style());
        Self { pb }
    }

    pub fn callback(&self) -> ProgressCallback<'static> {
        let pb = self.pb.clone();

        Box::new(move |progress: Progress| match progress {
            Progress::PhaseStart { name } => {
                pb.reset();
                pb.set_length(0);
                pb.set_style(Self::phase_style());
                pb.set_message(phase_label(name).to_string());
            }
            Progress::TaskStart { total_steps } => {
                pb.set_style(Self::atoms_style());
                pb.set_length(total_steps);
                pb.set_position(0);
            }
            Progress::TaskIncrement { steps } => pb.inc(steps),
            Progress::TaskFinish => {
                if let Some(length) = pb.length() {
                    pb.set_position(length);
                }
            }
            Progress::PhaseFinish => {
                pb.println(format!("✓ {}", pb.message()));
                pb.finish_and_clear();
            }
        })
    }

    fn phase_style() -> ProgressStyle {
        ProgressStyle::with_template(PHASE_TEMPLATE).unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn atoms_style() -> ProgressStyle {
        ProgressStyle::with_template(ATOMS_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ")
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}
