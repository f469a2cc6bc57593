//! Shared components for CLI commands

use crate::cli::args::Args;
use crate::constants::ANG_EXTENSION;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Set up structured logging on stderr
pub fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ang_scan={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .try_init()
        .context("Failed to initialise logging")?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Expand files and directories into the `.ang` files they name
///
/// Files given explicitly are kept whatever their extension so the reader
/// can report why they are unsupported. Directories are searched recursively
/// for `.ang` files.
pub fn discover_ang_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            let mut found = Vec::new();
            for entry in WalkDir::new(path).follow_links(false) {
                let entry = entry
                    .with_context(|| format!("Failed to walk directory {}", path.display()))?;
                if entry.file_type().is_file() && has_ang_extension(entry.path()) {
                    found.push(entry.into_path());
                }
            }
            found.sort();
            debug!("Found {} .ang file(s) under {}", found.len(), path.display());
            files.extend(found);
        } else {
            files.push(path.clone());
        }
    }

    Ok(files)
}

fn has_ang_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(ANG_EXTENSION))
}

/// Format a byte count in human-readable units
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.2} {}", size, UNITS[unit_index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_discover_ang_files_recursively() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("nested/deeper")).unwrap();
        fs::write(dir.path().join("b.ang"), "").unwrap();
        fs::write(dir.path().join("nested/a.ANG"), "").unwrap();
        fs::write(dir.path().join("nested/deeper/c.ang"), "").unwrap();
        fs::write(dir.path().join("nested/notes.txt"), "").unwrap();
        fs::write(dir.path().join("scan.osc"), "").unwrap();

        let files = discover_ang_files(&[dir.path().to_path_buf()]).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|f| f.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names.len(), 3);
        assert!(names.contains(&"b.ang".to_string()));
        assert!(names.contains(&"a.ANG".to_string()));
        assert!(names.contains(&"c.ang".to_string()));
    }

    #[test]
    fn test_explicit_files_are_kept() {
        let files = discover_ang_files(&[PathBuf::from("scan.osc")]).unwrap();
        assert_eq!(files, vec![PathBuf::from("scan.osc")]);
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.00 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.00 MB");
    }
}
