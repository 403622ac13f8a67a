use std::path::PathBuf;

/// Outcome of formatting a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    /// Already formatted; nothing to do.
    Unchanged,
    /// Reformatted (or would be, under `--check`/`--diff`).
    Changed,
    /// The file could not be processed.
    Error,
}

#[derive(Debug, Clone)]
pub struct FileResult {
    pub path: PathBuf,
    pub status: FileStatus,
    pub error: Option<String>,
}

impl FileResult {
    pub fn unchanged(path: PathBuf) -> Self {
        Self {
            path,
            status: FileStatus::Unchanged,
            error: None,
        }
    }

    pub fn changed(path: PathBuf) -> Self {
        Self {
            path,
            status: FileStatus::Changed,
            error: None,
        }
    }

    pub fn error(path: PathBuf, message: String) -> Self {
        Self {
            path,
            status: FileStatus::Error,
            error: Some(message),
        }
    }
}

/// Aggregated outcome of a formatting run.
#[derive(Debug, Default)]
pub struct Report {
    pub results: Vec<FileResult>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, result: FileResult) {
        self.results.push(result);
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    fn count(&self, status: FileStatus) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }

    pub fn unchanged(&self) -> usize {
        self.count(FileStatus::Unchanged)
    }

    pub fn changed(&self) -> usize {
        self.count(FileStatus::Changed)
    }

    pub fn errors(&self) -> usize {
        self.count(FileStatus::Error)
    }

    pub fn has_errors(&self) -> bool {
        self.errors() > 0
    }

    pub fn has_changes(&self) -> bool {
        self.changed() > 0
    }

    /// Process exit code for this run: 2 on any error, 1 when `--check`
    /// found files that would change, 0 otherwise.
    pub fn exit_code(&self, check: bool) -> i32 {
        if self.has_errors() {
            2
        } else if check && self.has_changes() {
            1
        } else {
            0
        }
    }

    pub fn summary(&self) -> String {
        let mut parts = vec![format!("{} file(s) processed", self.total())];
        if self.changed() > 0 {
            parts.push(format!("{} reformatted", self.changed()));
        }
        if self.unchanged() > 0 {
            parts.push(format!("{} unchanged", self.unchanged()));
        }
        if self.errors() > 0 {
            parts.push(format!("{} error(s)", self.errors()));
        }
        parts.join(", ")
    }

    pub fn print_errors(&self) {
        for result in &self.results {
            if let Some(ref error) = result.error {
                eprintln!("error: {}: {}", result.path.display(), error);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> Report {
        let mut report = Report::new();
        report.add(FileResult::changed(PathBuf::from("a.graphql")));
        report.add(FileResult::unchanged(PathBuf::from("b.graphql")));
        report.add(FileResult::error(
            PathBuf::from("c.graphql"),
            "read error".to_string(),
        ));
        report
    }

    #[test]
    fn test_counts() {
        let report = sample_report();
        assert_eq!(report.total(), 3);
        assert_eq!(report.changed(), 1);
        assert_eq!(report.unchanged(), 1);
        assert_eq!(report.errors(), 1);
        assert!(report.has_errors());
        assert!(report.has_changes());
    }

    #[test]
    fn test_summary_mentions_each_bucket() {
        let summary = sample_report().summary();
        assert!(summary.contains("3 file(s) processed"));
        assert!(summary.contains("1 reformatted"));
        assert!(summary.contains("1 unchanged"));
        assert!(summary.contains("1 error(s)"));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(sample_report().exit_code(false), 2);

        let mut clean = Report::new();
        clean.add(FileResult::unchanged(PathBuf::from("a.graphql")));
        assert_eq!(clean.exit_code(false), 0);
        assert_eq!(clean.exit_code(true), 0);

        let mut dirty = Report::new();
        dirty.add(FileResult::changed(PathBuf::from("a.graphql")));
        assert_eq!(dirty.exit_code(false), 0);
        assert_eq!(dirty.exit_code(true), 1);
    }
}
