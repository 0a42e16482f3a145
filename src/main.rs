use clap::Parser;
use colored::Colorize;
use exif_sort::cli::Cli;
use exif_sort::commands::run;
use exif_sort::metadata::ExifReader;
use exif_sort::utils::fatal_message;
use std::process;

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(&cli, &ExifReader) {
        Ok(Some(report)) => println!("{}", format!("Done: {}", report).bold()),
        Ok(None) => {}
        Err(e) => {
            eprintln!("{}", fatal_message(&e));
            process::exit(1);
        }
    }
}
