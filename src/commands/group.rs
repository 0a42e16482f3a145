use crate::cluster::{folder_names, Clusterer};
use crate::geo::extract_coordinates;
use crate::metadata::MetadataReader;
use crate::utils::{copy_file, destination_dir, get_images_by_dir, skip_file, AppConfig, RunReport};
use anyhow::Result;
use log::debug;
use std::path::Path;

/// Clusters the geotagged images of each directory on their own and copies
/// them to `<mirrored dir>/<cluster folder>/<file name>`.
pub fn cmd_group(
    config: &AppConfig,
    reader: &dyn MetadataReader,
    input: &Path,
    output: &Path,
    radius: Option<f64>,
) -> Result<RunReport> {
    let mut report = RunReport::default();
    let clusterer = Clusterer::new(radius);

    for (dir, images) in get_images_by_dir(config, input, output) {
        let dest_dir = destination_dir(input, output, &dir)?;

        let mut entries = Vec::new();
        for image in images {
            let Some(metadata) = reader.read(&image) else {
                skip_file(&image, "no metadata", &mut report);
                continue;
            };
            match metadata.gps.as_ref().and_then(extract_coordinates) {
                Some(location) => entries.push((location, image)),
                None => skip_file(&image, "no GPS coordinates", &mut report),
            }
        }

        let clusters = clusterer.cluster(entries);
        debug!("{:?}: {} cluster(s)", dir, clusters.len());

        for (cluster, name) in clusters.iter().zip(folder_names(&clusters)) {
            let cluster_dir = dest_dir.join(name);
            for image in &cluster.images {
                let Some(file_name) = image.file_name() else {
                    continue;
                };
                copy_file(config, image, &cluster_dir.join(file_name), &mut report);
            }
        }
    }
    Ok(report)
}
