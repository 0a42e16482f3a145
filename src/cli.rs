use crate::utils::DEFAULT_DATE_FORMAT;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "exif_sort")]
#[command(about = "rename or group photos using their EXIF metadata")]
#[command(after_help = "Examples:\n  \
    exif_sort input output --rename\n  \
    exif_sort input output --group --radius 1000m")]
pub struct Cli {
    /// Folder containing the images
    pub input: PathBuf,

    /// Folder the processed copies are written to
    pub output: PathBuf,

    /// Process subfolders recursively
    #[arg(short = 'r', long, default_value_t = false)]
    pub recursive: bool,

    /// Rename images using their EXIF date and time
    #[arg(short = 'n', long, default_value_t = false, conflicts_with = "group")]
    pub rename: bool,

    /// Date format used when renaming
    #[arg(short = 'f', long, default_value = DEFAULT_DATE_FORMAT)]
    pub format: String,

    /// Group images into folders by GPS location
    #[arg(short = 'g', long, default_value_t = false)]
    pub group: bool,

    /// Grouping radius, e.g. "1000m", "1km", "0.5mi". Unbounded if omitted
    #[arg(long)]
    pub radius: Option<String>,

    /// Print the copies without performing them
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Log every skipped file
    #[arg(short = 'v', long, default_value_t = false)]
    pub verbose: bool,
}
