use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};

use indicatif::ProgressBar;
use termcolor::{Color, ColorSpec, StandardStream, WriteColor};

use crate::formatter;
use crate::mode::Mode;
use crate::report::{FileResult, Report};

/// Format a GraphQL source string.
///
/// Total over all inputs: malformed or unbalanced queries produce a
/// best-effort rendering rather than an error.
pub fn format_string(source: &str) -> String {
    formatter::format(source)
}

/// Format a source string into its canonical on-disk form: the rendered
/// output followed by a single trailing newline (empty output stays empty).
pub fn format_file_contents(source: &str) -> String {
    let mut formatted = format_string(source);
    if !formatted.is_empty() {
        formatted.push('\n');
    }
    formatted
}

/// Run the formatter on a collection of files and directories.
pub fn run(files: &[PathBuf], mode: &Mode) -> Report {
    let matching_paths = get_matching_paths(files, mode);
    let mut report = Report::new();

    let progress = if mode.show_progressbar(matching_paths.len()) {
        ProgressBar::new(matching_paths.len() as u64)
    } else {
        ProgressBar::hidden()
    };

    if mode.single_process || matching_paths.len() <= 1 {
        for path in &matching_paths {
            report.add(format_file(path, mode));
            progress.inc(1);
        }
    } else {
        use rayon::prelude::*;

        let num_threads = mode.threads; // 0 = rayon default, all cores
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build();

        let results: Vec<FileResult> = match pool {
            Ok(pool) => pool.install(|| {
                matching_paths
                    .par_iter()
                    .map(|path| {
                        let result = format_file(path, mode);
                        progress.inc(1);
                        result
                    })
                    .collect()
            }),
            // Fall back to sequential processing if the pool cannot start.
            Err(_) => matching_paths
                .iter()
                .map(|path| {
                    let result = format_file(path, mode);
                    progress.inc(1);
                    result
                })
                .collect(),
        };
        for result in results {
            report.add(result);
        }
    }

    progress.finish_and_clear();
    report
}

/// Format a single file in place (or check/diff it, per mode).
fn format_file(path: &Path, mode: &Mode) -> FileResult {
    let source = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => return FileResult::error(path.to_path_buf(), format!("Read error: {}", e)),
    };

    let formatted = format_file_contents(&source);

    if source == formatted {
        return FileResult::unchanged(path.to_path_buf());
    }

    if mode.check || mode.diff {
        if mode.diff {
            print_diff(path, &source, &formatted, mode);
        }
        return FileResult::changed(path.to_path_buf());
    }

    match std::fs::write(path, &formatted) {
        Ok(()) => FileResult::changed(path.to_path_buf()),
        Err(e) => FileResult::error(path.to_path_buf(), format!("Write error: {}", e)),
    }
}

/// All GraphQL file paths reachable from the given inputs, deduplicated and
/// sorted for a deterministic processing order.
pub fn get_matching_paths(paths: &[PathBuf], mode: &Mode) -> Vec<PathBuf> {
    let extensions = mode.graphql_extensions();
    let mut result = HashSet::new();

    for path in paths {
        if path.is_file() {
            if is_graphql_file(path, extensions) {
                result.insert(path.clone());
            }
        } else if path.is_dir() {
            collect_graphql_files(path, extensions, &mode.exclude, &mut result);
        }
    }

    let mut sorted: Vec<PathBuf> = result.into_iter().collect();
    sorted.sort();
    sorted
}

fn is_graphql_file(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| extensions.contains(&ext.as_str()))
}

/// Recursively collect GraphQL files, skipping hidden entries and names
/// matching an exclude pattern.
fn collect_graphql_files(
    dir: &Path,
    extensions: &[&str],
    exclude: &[String],
    result: &mut HashSet<PathBuf>,
) {
    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(_) => return,
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        if name.starts_with('.') {
            continue;
        }
        if exclude.iter().any(|pattern| {
            glob::Pattern::new(pattern)
                .map(|p| p.matches(&name))
                .unwrap_or(false)
        }) {
            continue;
        }

        if path.is_dir() {
            collect_graphql_files(&path, extensions, exclude, result);
        } else if is_graphql_file(&path, extensions) {
            result.insert(path);
        }
    }
}

/// Print a line diff between original and formatted content to stderr,
/// colored when the mode and environment allow it.
fn print_diff(path: &Path, original: &str, formatted: &str, mode: &Mode) {
    use similar::{ChangeTag, TextDiff};

    let mut stderr = StandardStream::stderr(mode.color_choice());
    let _ = writeln!(stderr, "--- {}", path.display());
    let _ = writeln!(stderr, "+++ {}", path.display());

    let diff = TextDiff::from_lines(original, formatted);
    for change in diff.iter_all_changes() {
        let (sign, color) = match change.tag() {
            ChangeTag::Delete => ("-", Some(Color::Red)),
            ChangeTag::Insert => ("+", Some(Color::Green)),
            ChangeTag::Equal => (" ", None),
        };
        let _ = stderr.set_color(ColorSpec::new().set_fg(color));
        let _ = write!(stderr, "{}{}", sign, change);
    }
    let _ = stderr.reset();
}
