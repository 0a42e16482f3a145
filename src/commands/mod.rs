pub mod group;
pub mod rename;

#[cfg(test)]
pub(crate) mod fixtures;

use crate::cli::Cli;
use crate::error::ConfigError;
use crate::metadata::MetadataReader;
use crate::utils::{parse_radius, AppConfig, RunReport};
use anyhow::{Context, Result};
use colored::Colorize;
use group::cmd_group;
use rename::cmd_rename;
use std::fs;

/// Validates the invocation, prepares the output root and runs the selected
/// mode. Returns `None` when no mode was selected.
///
/// Nothing is written unless the input root exists and the radius parses.
pub fn run(cli: &Cli, reader: &dyn MetadataReader) -> Result<Option<RunReport>> {
    let config = AppConfig {
        recursive: cli.recursive,
        dry_run: cli.dry_run,
        ..AppConfig::default()
    };

    if !cli.input.exists() {
        return Err(ConfigError::MissingInput(cli.input.clone()).into());
    }

    // an empty radius means unbounded
    let radius = cli
        .radius
        .as_deref()
        .filter(|r| !r.trim().is_empty())
        .map(parse_radius)
        .transpose()?;

    if !cli.rename && !cli.group {
        println!("No operation specified. Use --rename or --group.");
        return Ok(None);
    }

    if !config.dry_run {
        fs::create_dir_all(&cli.output)
            .with_context(|| format!("Failed to create output folder {:?}", cli.output))?;
    }

    let report = if cli.rename {
        println!("{}", "Renaming images by EXIF date-time...".bold());
        cmd_rename(&config, reader, &cli.input, &cli.output, &cli.format)?
    } else {
        println!("{}", "Grouping images by location...".bold());
        cmd_group(&config, reader, &cli.input, &cli.output, radius)?
    };
    Ok(Some(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::{touch, tree, with_gps, with_timestamp, FixtureReader};
    use clap::Parser;
    use std::path::Path;
    use tempfile::TempDir;

    fn cli(input: &Path, output: &Path, flags: &[&str]) -> Cli {
        let mut args = vec![
            "exif_sort".to_string(),
            input.to_string_lossy().to_string(),
            output.to_string_lossy().to_string(),
        ];
        args.extend(flags.iter().map(|f| f.to_string()));
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_run_missing_input() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("missing");
        let output = tmp.path().join("out");

        let err = run(&cli(&input, &output, &["-n"]), &FixtureReader::default()).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ConfigError>(),
            Some(&ConfigError::MissingInput(input))
        );
        assert!(!output.exists());
    }

    #[test]
    fn test_run_bad_radius_changes_nothing() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("in");
        let output = tmp.path().join("out");
        touch(&input.join("a.jpg"));
        let mut reader = FixtureReader::default();
        reader.insert("a.jpg", with_gps(1.0, 2.0));

        let err = run(&cli(&input, &output, &["-g", "--radius", "5xx"]), &reader).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ConfigError>(),
            Some(&ConfigError::UnsupportedUnit("xx".to_string()))
        );
        assert!(!output.exists());

        let err = run(&cli(&input, &output, &["-g", "--radius", "abc"]), &reader).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::InvalidFormat(_))
        ));
        assert!(!output.exists());
    }

    #[test]
    fn test_run_without_mode() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("in");
        let output = tmp.path().join("out");
        touch(&input.join("a.jpg"));

        let report = run(&cli(&input, &output, &[]), &FixtureReader::default()).unwrap();
        assert_eq!(report, None);
        assert!(!output.exists());
    }

    #[test]
    fn test_run_creates_output_root() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("in");
        let output = tmp.path().join("nested/out");
        touch(&input.join("a.jpg"));
        let mut reader = FixtureReader::default();
        reader.insert("a.jpg", with_timestamp("2023:05:10 14:30:00"));

        let report = run(&cli(&input, &output, &["-n", "-f", "%Y-%m-%d"]), &reader)
            .unwrap()
            .unwrap();
        assert_eq!(report.copied, 1);
        assert_eq!(tree(&output), vec!["2023-05-10.jpg"]);

        let empty_input = tmp.path().join("empty");
        std::fs::create_dir_all(&empty_input).unwrap();
        let empty_output = tmp.path().join("empty_out");
        run(&cli(&empty_input, &empty_output, &["-g"]), &reader).unwrap();
        assert!(empty_output.is_dir());
    }

    #[test]
    fn test_run_empty_radius_is_unbounded() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("in");
        let output = tmp.path().join("out");
        touch(&input.join("a.jpg"));
        touch(&input.join("b.jpg"));
        let mut reader = FixtureReader::default();
        reader.insert("a.jpg", with_gps(45.0, 7.0));
        reader.insert("b.jpg", with_gps(-10.0, -70.0));

        let report = run(&cli(&input, &output, &["-g", "--radius", ""]), &reader)
            .unwrap()
            .unwrap();
        assert_eq!(report.copied, 2);
        assert_eq!(
            tree(&output),
            vec![
                "all_images_45.000000_7.000000/a.jpg",
                "all_images_45.000000_7.000000/b.jpg",
            ]
        );
    }

    #[test]
    fn test_run_dry_run_creates_nothing() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("in");
        let output = tmp.path().join("out");
        touch(&input.join("a.jpg"));
        let mut reader = FixtureReader::default();
        reader.insert("a.jpg", with_gps(1.0, 2.0));

        let report = run(&cli(&input, &output, &["-g", "--dry-run"]), &reader)
            .unwrap()
            .unwrap();
        assert_eq!(report.copied, 1);
        assert!(!output.exists());
    }
}
