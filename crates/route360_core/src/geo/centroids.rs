//! Live country centroid dataset.
//!
//! # Responsibility
//! - Parse centroid payloads and join them with id-to-name tables.
//! - Track the once-per-session load outcome.
//!
//! # Invariants
//! - A load is attempted at most once per `CentroidState`; failures are not
//!   retried.
//! - Every failure (I/O, malformed payload) degrades to an empty dataset.
//!   No error escapes `CentroidState::load_from`.

use crate::model::geo::GeocodedCentroid;
use log::{info, warn};
use serde_json::Value;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Failure to obtain or decode a centroid payload.
#[derive(Debug)]
pub enum CentroidLoadError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Shape(String),
}

impl Display for CentroidLoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "centroid payload unreadable: {err}"),
            Self::Json(err) => write!(f, "centroid payload is not JSON: {err}"),
            Self::Shape(details) => write!(f, "unexpected centroid payload shape: {details}"),
        }
    }
}

impl Error for CentroidLoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::Shape(_) => None,
        }
    }
}

impl From<std::io::Error> for CentroidLoadError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for CentroidLoadError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Supplier of the live centroid dataset.
pub trait CentroidSource {
    fn fetch(&self) -> Result<Vec<GeocodedCentroid>, CentroidLoadError>;
}

/// Centroid keyed by dataset feature id, before names are joined in.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentifiedCentroid {
    pub id: String,
    pub lat: f64,
    pub lng: f64,
}

/// Parses a JSON array of `{name, lat, lng}` objects.
///
/// Rows without a string name or with non-finite coordinates are skipped.
pub fn parse_centroid_payload(json: &str) -> Result<Vec<GeocodedCentroid>, CentroidLoadError> {
    let rows = parse_rows(json)?;
    Ok(rows
        .iter()
        .filter_map(|row| {
            let name = row.get("name")?.as_str()?.trim();
            if name.is_empty() {
                return None;
            }
            let (lat, lng) = row_coordinate(row)?;
            Some(GeocodedCentroid {
                name: name.to_string(),
                lat,
                lng,
            })
        })
        .collect())
}

/// Parses a JSON array of `{id, lat, lng}` objects. Ids may be strings or
/// numbers; numeric ids keep their JSON text.
pub fn parse_identified_payload(json: &str) -> Result<Vec<IdentifiedCentroid>, CentroidLoadError> {
    let rows = parse_rows(json)?;
    Ok(rows
        .iter()
        .filter_map(|row| {
            let id = match row.get("id")? {
                Value::String(id) => id.trim().to_string(),
                Value::Number(id) => id.to_string(),
                _ => return None,
            };
            let (lat, lng) = row_coordinate(row)?;
            Some(IdentifiedCentroid { id, lat, lng })
        })
        .collect())
}

/// Joins id-keyed centroids with a `id<TAB>name` table.
///
/// The first TSV line is a header. Centroids whose id has no name are
/// dropped.
pub fn join_country_names(
    centroids: Vec<IdentifiedCentroid>,
    names_tsv: &str,
) -> Vec<GeocodedCentroid> {
    let names: HashMap<&str, &str> = names_tsv
        .lines()
        .skip(1)
        .filter_map(|line| {
            let mut fields = line.trim_end_matches('\r').split('\t');
            let id = fields.next()?.trim();
            let name = fields.next()?.trim();
            (!id.is_empty() && !name.is_empty()).then_some((id, name))
        })
        .collect();

    centroids
        .into_iter()
        .filter_map(|centroid| {
            let name = names.get(centroid.id.as_str())?;
            Some(GeocodedCentroid {
                name: (*name).to_string(),
                lat: centroid.lat,
                lng: centroid.lng,
            })
        })
        .collect()
}

fn parse_rows(json: &str) -> Result<Vec<Value>, CentroidLoadError> {
    match serde_json::from_str::<Value>(json)? {
        Value::Array(rows) => Ok(rows),
        other => Err(CentroidLoadError::Shape(format!(
            "expected array, got {}",
            json_kind(&other)
        ))),
    }
}

fn row_coordinate(row: &Value) -> Option<(f64, f64)> {
    let lat = row.get("lat")?.as_f64()?;
    let lng = row.get("lng")?.as_f64()?;
    (lat.is_finite() && lng.is_finite()).then_some((lat, lng))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Reads centroids from files on disk.
///
/// With only a payload path the file must hold named rows. With a names
/// table the payload holds id rows and names are joined in.
#[derive(Debug, Clone)]
pub struct FileCentroidSource {
    payload: PathBuf,
    names_tsv: Option<PathBuf>,
}

impl FileCentroidSource {
    pub fn new(payload: impl Into<PathBuf>) -> Self {
        Self {
            payload: payload.into(),
            names_tsv: None,
        }
    }

    pub fn with_names(payload: impl Into<PathBuf>, names_tsv: impl Into<PathBuf>) -> Self {
        Self {
            payload: payload.into(),
            names_tsv: Some(names_tsv.into()),
        }
    }
}

impl CentroidSource for FileCentroidSource {
    fn fetch(&self) -> Result<Vec<GeocodedCentroid>, CentroidLoadError> {
        let payload = std::fs::read_to_string(&self.payload)?;
        match &self.names_tsv {
            None => parse_centroid_payload(&payload),
            Some(names_path) => {
                let names = std::fs::read_to_string(names_path)?;
                Ok(join_country_names(
                    parse_identified_payload(&payload)?,
                    &names,
                ))
            }
        }
    }
}

/// Session-scoped load state of the live dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CentroidState {
    #[default]
    NotLoaded,
    Loaded(Vec<GeocodedCentroid>),
    Failed,
}

impl CentroidState {
    /// Centroids usable for resolution. Empty unless loaded.
    pub fn centroids(&self) -> &[GeocodedCentroid] {
        match self {
            Self::Loaded(centroids) => centroids,
            Self::NotLoaded | Self::Failed => &[],
        }
    }

    /// Whether a load attempt has finished, successfully or not.
    pub fn is_settled(&self) -> bool {
        !matches!(self, Self::NotLoaded)
    }

    /// Fetches from `source` unless an attempt already finished.
    ///
    /// Returns whether the state changed.
    pub fn load_from(&mut self, source: &dyn CentroidSource) -> bool {
        if self.is_settled() {
            return false;
        }
        self.settle(source.fetch())
    }

    /// Records the outcome of a fetch performed elsewhere, for callers that
    /// run the fetch asynchronously. Ignored once settled.
    ///
    /// Returns whether the state changed.
    pub fn settle(&mut self, outcome: Result<Vec<GeocodedCentroid>, CentroidLoadError>) -> bool {
        if self.is_settled() {
            return false;
        }
        *self = match outcome {
            Ok(centroids) => {
                info!(
                    "event=centroids_load module=geo status=ok count={}",
                    centroids.len()
                );
                Self::Loaded(centroids)
            }
            Err(err) => {
                warn!("event=centroids_load module=geo status=degraded error={err}");
                Self::Failed
            }
        };
        true
    }
}
