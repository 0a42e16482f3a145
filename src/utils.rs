use crate::error::ConfigError;
use anyhow::{Context, Result};
use colored::Colorize;
use log::{debug, error, info, warn};
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use walkdir::WalkDir;

// --- Constants & Config ---

pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/* meters per unit. `ac` and `ha` are area units; they are kept as plain
scalars so existing radius strings keep working. */
pub const UNIT_CONVERSIONS: &[(&str, f64)] = &[
    ("m", 1.0),
    ("km", 1000.0),
    ("mi", 1609.34),
    ("ft", 0.3048),
    ("yd", 0.9144),
    ("ac", 63.614907234075),
    ("ha", 10000.0),
];

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub extensions: Vec<String>,
    pub recursive: bool,
    pub dry_run: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            extensions: SUPPORTED_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            recursive: false,
            dry_run: false,
        }
    }
}

/// Per-run tally of what happened to each candidate image.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub copied: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} copied, {} skipped, {} failed",
            self.copied, self.skipped, self.failed
        )
    }
}

// --- Units ---

pub fn unit_factor(unit: &str) -> Option<f64> {
    let unit = unit.to_lowercase();
    UNIT_CONVERSIONS
        .iter()
        .find(|(name, _)| *name == unit)
        .map(|(_, factor)| *factor)
}

fn radius_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d+(?:\.\d+)?)([a-zA-Z]*)$").expect("valid radius regex"))
}

/// Parses strings like `1000m`, `1.5km` or `500` (meters) into meters.
pub fn parse_radius(s: &str) -> Result<f64, ConfigError> {
    let s = s.trim();
    let caps = radius_regex()
        .captures(s)
        .ok_or_else(|| ConfigError::InvalidFormat(s.to_string()))?;

    let value: f64 = caps[1]
        .parse()
        .map_err(|_| ConfigError::InvalidFormat(s.to_string()))?;

    let unit = match &caps[2] {
        "" => "m",
        u => u,
    };

    let factor = unit_factor(unit).ok_or_else(|| ConfigError::UnsupportedUnit(unit.to_lowercase()))?;
    Ok(value * factor)
}

// --- Helpers ---

pub fn is_valid_image(config: &AppConfig, path: &Path) -> bool {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    config.extensions.contains(&ext)
}

/// Maps a directory under `input` to the same relative location under `output`.
pub fn destination_dir(input: &Path, output: &Path, dir: &Path) -> Result<PathBuf> {
    let relative = dir
        .strip_prefix(input)
        .with_context(|| format!("{:?} is not inside {:?}", dir, input))?;
    Ok(output.join(relative))
}

/// Collects the images of every directory to process, keyed by directory.
/// Only the top level of `input` is read unless `config.recursive` is set.
pub fn get_images_by_dir(
    config: &AppConfig,
    input: &Path,
    output: &Path,
) -> BTreeMap<PathBuf, Vec<PathBuf>> {
    let max_depth = if config.recursive { usize::MAX } else { 1 };
    let skip = fs::canonicalize(output).ok();

    let walker = WalkDir::new(input)
        .max_depth(max_depth)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            if e.depth() == 0 || !e.file_type().is_dir() {
                return true;
            }
            match (&skip, fs::canonicalize(e.path())) {
                (Some(out), Ok(dir)) => dir != *out,
                _ => true,
            }
        });

    let mut dirs: BTreeMap<PathBuf, Vec<PathBuf>> = BTreeMap::new();
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        let path = entry.path();
        if !path.is_file() || !is_valid_image(config, path) {
            continue;
        }
        if let Some(parent) = path.parent() {
            dirs.entry(parent.to_path_buf())
                .or_default()
                .push(path.to_path_buf());
        }
    }
    dirs
}

/// Copies `src` to `dest`, creating parent directories as needed. Failures
/// are logged and counted, never returned.
pub fn copy_file(config: &AppConfig, src: &Path, dest: &Path, report: &mut RunReport) {
    if config.dry_run {
        println!(
            "{}",
            format!("DRY-RUN: {:?} -> {:?}", src, dest).green()
        );
        report.copied += 1;
        return;
    }

    let result = dest
        .parent()
        .map_or(Ok(()), fs::create_dir_all)
        .and_then(|_| fs::copy(src, dest));

    match result {
        Ok(_) => {
            info!("{:?} -> {:?}", src, dest);
            report.copied += 1;
        }
        Err(e) => {
            error!("Failed to copy {:?} to {:?}: {}", src, dest, e);
            report.failed += 1;
        }
    }
}

/// Red `Error: ...` line for failures that abort the run.
pub fn fatal_message(err: &anyhow::Error) -> String {
    format!("Error: {:#}", err).red().bold().to_string()
}

pub fn skip_file(path: &Path, reason: &str, report: &mut RunReport) {
    debug!("Skipping {:?}: {}", path, reason);
    report.skipped += 1;
}
