use crate::metadata::{Metadata, MetadataReader, TagMap, TagValue};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Serves canned metadata keyed by file name.
#[derive(Default)]
pub struct FixtureReader {
    files: HashMap<String, Metadata>,
}

impl FixtureReader {
    pub fn insert(&mut self, name: &str, metadata: Metadata) {
        self.files.insert(name.to_string(), metadata);
    }
}

impl MetadataReader for FixtureReader {
    fn read(&self, path: &Path) -> Option<Metadata> {
        let name = path.file_name()?.to_str()?;
        self.files.get(name).cloned()
    }
}

pub fn with_timestamp(raw: &str) -> Metadata {
    let mut metadata = Metadata::default();
    metadata
        .tags
        .insert("DateTime".to_string(), TagValue::Text(raw.to_string()));
    metadata
}

pub fn with_gps(lat: f64, lon: f64) -> Metadata {
    let mut gps = TagMap::new();
    gps.insert(
        "GPSLatitude".to_string(),
        TagValue::Numbers(vec![lat.abs(), 0.0, 0.0]),
    );
    gps.insert(
        "GPSLatitudeRef".to_string(),
        TagValue::Text(if lat < 0.0 { "S" } else { "N" }.to_string()),
    );
    gps.insert(
        "GPSLongitude".to_string(),
        TagValue::Numbers(vec![lon.abs(), 0.0, 0.0]),
    );
    gps.insert(
        "GPSLongitudeRef".to_string(),
        TagValue::Text(if lon < 0.0 { "W" } else { "E" }.to_string()),
    );
    Metadata {
        tags: TagMap::new(),
        gps: Some(gps),
    }
}

pub fn touch(path: &Path) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, path.to_string_lossy().as_bytes()).unwrap();
    path.to_path_buf()
}

/// Relative paths of every file under `root`, sorted.
pub fn tree(root: &Path) -> Vec<String> {
    let mut files: Vec<String> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            e.path()
                .strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    files.sort();
    files
}
