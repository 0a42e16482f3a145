use crate::metadata::{format_timestamp, MetadataReader};
use crate::utils::{copy_file, destination_dir, get_images_by_dir, skip_file, AppConfig, RunReport};
use anyhow::Result;
use std::path::Path;

/// Copies every image with a usable timestamp to the mirrored output
/// directory, named `<formatted timestamp><original extension>`.
pub fn cmd_rename(
    config: &AppConfig,
    reader: &dyn MetadataReader,
    input: &Path,
    output: &Path,
    date_format: &str,
) -> Result<RunReport> {
    let mut report = RunReport::default();

    for (dir, images) in get_images_by_dir(config, input, output) {
        let dest_dir = destination_dir(input, output, &dir)?;

        for image in images {
            let Some(metadata) = reader.read(&image) else {
                skip_file(&image, "no metadata", &mut report);
                continue;
            };
            let Some(raw) = metadata.timestamp() else {
                skip_file(&image, "no timestamp", &mut report);
                continue;
            };
            let Some(name) = format_timestamp(raw, date_format) else {
                skip_file(&image, "unusable timestamp", &mut report);
                continue;
            };

            let ext = image
                .extension()
                .map(|e| format!(".{}", e.to_string_lossy()))
                .unwrap_or_default();

            copy_file(config, &image, &dest_dir.join(name + &ext), &mut report);
        }
    }
    Ok(report)
}
