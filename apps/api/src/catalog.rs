//! Static institution dataset, loaded once at startup and shared read-only.

use std::path::Path;

use anyhow::{Context, Result};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::info;

use crate::geo::distance::Locatable;

/// A candidate institution. Only `zip` is interpreted; every field is
/// carried through untouched and in dataset order to the recommendation
/// payload, followed by `distance`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct School {
    // Invariant: holds a string `zip` and never a `distance` key.
    fields: Map<String, Value>,
    /// Miles from the user's postal code. Serialized as `null` when unresolved.
    pub distance: Option<f64>,
}

impl School {
    pub fn zip(&self) -> &str {
        self.fields
            .get("zip")
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(Value::as_str)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl TryFrom<Map<String, Value>> for School {
    type Error = String;

    fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
        match fields.get("zip") {
            Some(Value::String(_)) => {}
            Some(other) => return Err(format!("field `zip` must be a string, got {other}")),
            None => return Err("missing field `zip`".to_string()),
        }

        // A precomputed distance in the dataset is taken as the starting value;
        // the key itself is re-emitted last on serialization.
        let distance = fields.get("distance").and_then(Value::as_f64);
        let fields = fields
            .into_iter()
            .filter(|(key, _)| key != "distance")
            .collect();

        Ok(Self { fields, distance })
    }
}

impl Serialize for School {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.serialize_entry("distance", &self.distance)?;
        map.end()
    }
}

impl Locatable for School {
    fn postal_code(&self) -> &str {
        self.zip()
    }

    fn set_distance(&mut self, miles: Option<f64>) {
        self.distance = miles;
    }
}

pub fn load_schools(path: impl AsRef<Path>) -> Result<Vec<School>> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read institution dataset {}", path.display()))?;
    let schools = parse_schools(&raw)
        .with_context(|| format!("Invalid institution dataset {}", path.display()))?;
    info!("Loaded {} institutions from {}", schools.len(), path.display());
    Ok(schools)
}

pub fn parse_schools(raw: &str) -> Result<Vec<School>> {
    let schools: Vec<School> = serde_json::from_str(raw)?;
    Ok(schools)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;

    pub(crate) const SAMPLE_SCHOOLS: &str = r#"[
        {"name": "Morehouse College", "zip": "30314", "tuition": 29000, "online_programs": false, "majors": ["Business", "STEM"]},
        {"name": "Howard University", "zip": "20059", "tuition": 31000, "online_programs": true, "majors": ["Nursing", "Political Science"]},
        {"name": "Mystery College", "zip": "99999", "tuition": 12000, "online_programs": true, "majors": ["Education"]}
    ]"#;

    #[test]
    fn test_parse_keeps_fields_in_dataset_order() {
        let schools = parse_schools(SAMPLE_SCHOOLS).unwrap();
        assert_eq!(schools.len(), 3);
        assert_eq!(schools[0].zip(), "30314");
        assert_eq!(schools[0].name(), Some("Morehouse College"));
        assert_eq!(schools[0].distance, None);

        let keys: Vec<&str> = schools[0].fields().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["name", "zip", "tuition", "online_programs", "majors"]);
    }

    #[test]
    fn test_serialization_keeps_zip_in_place_and_appends_distance() {
        let mut schools = parse_schools(
            r#"[{"name":"Howard University","city":"Washington","zip":"20059","tuition":31000}]"#,
        )
        .unwrap();
        assert_eq!(
            serde_json::to_string(&schools[0]).unwrap(),
            r#"{"name":"Howard University","city":"Washington","zip":"20059","tuition":31000,"distance":null}"#
        );

        schools[0].set_distance(Some(491.23));
        assert_eq!(
            serde_json::to_string(&schools[0]).unwrap(),
            r#"{"name":"Howard University","city":"Washington","zip":"20059","tuition":31000,"distance":491.23}"#
        );
    }

    #[test]
    fn test_dataset_distance_key_is_not_duplicated() {
        let schools =
            parse_schools(r#"[{"distance": 12.5, "zip": "20059", "name": "Howard University"}]"#)
                .unwrap();
        assert_eq!(schools[0].distance, Some(12.5));
        assert_eq!(
            serde_json::to_string(&schools[0]).unwrap(),
            r#"{"zip":"20059","name":"Howard University","distance":12.5}"#
        );
    }

    #[test]
    fn test_non_string_zip_is_rejected() {
        let err = parse_schools(r#"[{"name": "Numeric U", "zip": 20059}]"#).unwrap_err();
        assert!(err.to_string().contains("must be a string"), "got {err}");
    }

    #[test]
    fn test_serialized_school_always_has_distance_key() {
        let schools = parse_schools(SAMPLE_SCHOOLS).unwrap();
        let value = serde_json::to_value(&schools[1]).unwrap();
        let object = value.as_object().unwrap();
        assert!(object.contains_key("distance"));
        assert!(object["distance"].is_null());
        assert_eq!(object["tuition"], 31000);
    }

    #[test]
    fn test_missing_zip_is_rejected() {
        let err = parse_schools(r#"[{"name": "No Zip U"}]"#).unwrap_err();
        assert!(err.to_string().contains("zip"), "got {err}");
    }

    #[test]
    fn test_load_reports_path_on_failure() {
        let err = load_schools("/no/such/schools.json").unwrap_err();
        assert!(format!("{err:#}").contains("/no/such/schools.json"));
    }

    #[test]
    fn test_load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE_SCHOOLS.as_bytes()).unwrap();
        let schools = load_schools(file.path()).unwrap();
        assert_eq!(schools[2].name(), Some("Mystery College"));
    }
}
