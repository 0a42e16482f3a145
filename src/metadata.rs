use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDateTime;
use exif::{Context, In, Reader, Value};
use log::{debug, warn};
use regex::Regex;
use std::collections::HashMap;
use std::fmt::Write;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::OnceLock;

pub const EXIF_DATETIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// A decoded tag value. Rationals and integers are widened to `f64`.
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    Text(String),
    Number(f64),
    Numbers(Vec<f64>),
}

impl TagValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TagValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_numbers(&self) -> Option<&[f64]> {
        match self {
            TagValue::Numbers(v) => Some(v),
            TagValue::Number(n) => Some(std::slice::from_ref(n)),
            TagValue::Text(_) => None,
        }
    }
}

pub type TagMap = HashMap<String, TagValue>;

/// Tags of one file: the flat primary-image map plus the GPS sub-map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    pub tags: TagMap,
    pub gps: Option<TagMap>,
}

impl Metadata {
    /// `DateTime`, falling back to `DateTimeOriginal`.
    pub fn timestamp(&self) -> Option<&str> {
        self.tags
            .get("DateTime")
            .or_else(|| self.tags.get("DateTimeOriginal"))
            .and_then(TagValue::as_text)
    }
}

pub trait MetadataReader {
    /// Returns `None` when the file has no extractable metadata.
    fn read(&self, path: &Path) -> Option<Metadata>;
}

/// Reads EXIF blocks from JPEG, PNG and TIFF containers.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExifReader;

impl MetadataReader for ExifReader {
    fn read(&self, path: &Path) -> Option<Metadata> {
        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Error opening {:?}: {}", path, e);
                return None;
            }
        };
        let mut reader = BufReader::new(file);
        let exif = match Reader::new().read_from_container(&mut reader) {
            Ok(exif) => exif,
            Err(e) => {
                debug!("No EXIF data in {:?}: {}", path, e);
                return None;
            }
        };

        let mut metadata = Metadata::default();
        for field in exif.fields().filter(|f| f.ifd_num == In::PRIMARY) {
            let Some(value) = convert_value(&field.value) else {
                continue;
            };
            let name = field.tag.to_string();
            if field.tag.context() == Context::Gps {
                metadata.gps.get_or_insert_with(TagMap::new).insert(name, value);
            } else {
                metadata.tags.insert(name, value);
            }
        }

        if metadata.tags.is_empty() && metadata.gps.is_none() {
            return None;
        }
        Some(metadata)
    }
}

fn convert_value(value: &Value) -> Option<TagValue> {
    let numbers: Vec<f64> = match value {
        Value::Ascii(vec) => {
            let text = vec.first()?;
            return Some(TagValue::Text(
                String::from_utf8_lossy(text)
                    .trim_end_matches('\0')
                    .to_string(),
            ));
        }
        Value::Byte(v) => v.iter().map(|&n| n as f64).collect(),
        Value::Short(v) => v.iter().map(|&n| n as f64).collect(),
        Value::Long(v) => v.iter().map(|&n| n as f64).collect(),
        Value::SByte(v) => v.iter().map(|&n| n as f64).collect(),
        Value::SShort(v) => v.iter().map(|&n| n as f64).collect(),
        Value::SLong(v) => v.iter().map(|&n| n as f64).collect(),
        Value::Float(v) => v.iter().map(|&n| n as f64).collect(),
        Value::Double(v) => v.clone(),
        Value::Rational(v) => v.iter().map(|r| r.to_f64()).collect(),
        Value::SRational(v) => v.iter().map(|r| r.to_f64()).collect(),
        _ => return None,
    };

    match numbers.as_slice() {
        [] => None,
        [n] => Some(TagValue::Number(*n)),
        _ => Some(TagValue::Numbers(numbers)),
    }
}

fn exif_datetime_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\d{4}:\d{2}:\d{2} \d{2}:\d{2}:\d{2}$").expect("valid datetime regex")
    })
}

/// Reformats an EXIF `YYYY:MM:DD HH:MM:SS` timestamp with a strftime-style
/// `date_format`. Returns `None` if either the timestamp or the format is bad.
pub fn format_timestamp(raw: &str, date_format: &str) -> Option<String> {
    let parsed = if exif_datetime_regex().is_match(raw) {
        NaiveDateTime::parse_from_str(raw, EXIF_DATETIME_FORMAT).ok()
    } else {
        None
    };
    let datetime = match parsed {
        Some(dt) => dt,
        None => {
            warn!("Could not parse EXIF date-time: {}", raw);
            return None;
        }
    };

    let items: Vec<Item> = StrftimeItems::new(date_format).collect();
    if items.iter().any(|i| matches!(i, Item::Error)) {
        warn!("Invalid date format: {}", date_format);
        return None;
    }

    let mut out = String::new();
    if write!(out, "{}", datetime.format_with_items(items.into_iter())).is_err() {
        warn!("Could not format {} with {}", raw, date_format);
        return None;
    }
    Some(out)
}
