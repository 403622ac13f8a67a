use serde::Deserialize;
use termcolor::ColorChoice;

/// Mode holds the workflow configuration for a gqlfmt run.
///
/// Rendering itself has no knobs: indentation is fixed at two spaces per
/// nesting level. Mode only controls how files are discovered, checked,
/// diffed, and reported.
#[derive(Debug, Clone, Deserialize)]
pub struct Mode {
    /// Report files that would change without writing them.
    #[serde(default)]
    pub check: bool,

    /// Print a diff for files that would change, without writing them.
    #[serde(default)]
    pub diff: bool,

    /// Glob patterns to exclude while collecting files.
    #[serde(default)]
    pub exclude: Vec<String>,

    #[serde(default)]
    pub verbose: bool,

    #[serde(default)]
    pub quiet: bool,

    #[serde(default)]
    pub no_progressbar: bool,

    #[serde(default)]
    pub no_color: bool,

    #[serde(default)]
    pub force_color: bool,

    /// Number of threads for parallel processing (0 = all cores).
    #[serde(default)]
    pub threads: usize,

    #[serde(default)]
    pub single_process: bool,
}

impl Mode {
    /// Color choice for diff output. `--force-color` wins over `--no-color`,
    /// which wins over the `NO_COLOR` environment variable.
    pub fn color_choice(&self) -> ColorChoice {
        if self.force_color {
            return ColorChoice::Always;
        }
        if self.no_color || std::env::var_os("NO_COLOR").is_some() {
            return ColorChoice::Never;
        }
        ColorChoice::Auto
    }

    /// File extensions treated as GraphQL source.
    pub fn graphql_extensions(&self) -> &[&str] {
        &["graphql", "gql", "graphqls"]
    }

    /// Whether to show a progress bar while formatting many files.
    pub fn show_progressbar(&self, file_count: usize) -> bool {
        !self.no_progressbar && !self.quiet && file_count > 1
    }
}

impl Default for Mode {
    fn default() -> Self {
        Self {
            check: false,
            diff: false,
            exclude: Vec::new(),
            verbose: false,
            quiet: false,
            no_progressbar: false,
            no_color: false,
            force_color: false,
            threads: 0,
            single_process: false,
        }
    }
}
