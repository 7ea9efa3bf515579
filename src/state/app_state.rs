use std::path::PathBuf;

use crate::state::measurement::MeasurementStore;
use crate::state::theme::Theme;
use crate::state::workspace::Workspace;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Everything the application owns: created at startup, dropped on exit.
#[derive(Debug)]
pub struct AppState {
    pub workspace: Workspace,
    pub store: MeasurementStore,
    pub theme: Theme,
    /// Starting directory for the next export dialog.
    pub export_dir: Option<PathBuf>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            workspace: Workspace::new(),
            store: MeasurementStore::new(),
            theme: Theme::default(),
            export_dir: None,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
