use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;
use tracing::info;
use validator::{Validate, ValidationError};

use crate::scan_types::ScanError;

/// Where the settings file is looked up when no path is given
pub const DEFAULT_SETTINGS_PATH: &str = "config/settings.yaml";

/// User settings: which campgrounds and sites to watch
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct Settings {
    /// Campgrounds in the order they are checked
    #[validate(nested)]
    pub campgrounds: Vec<CampgroundSpec>,
}

/// One campground to watch
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CampgroundSpec {
    /// recreation.gov campground ID; YAML integers are accepted
    #[serde(deserialize_with = "label")]
    #[validate(custom(function = "validate_not_blank"))]
    pub id: String,

    /// Site labels to watch, e.g. "012". Leading zeros do not matter.
    #[serde(deserialize_with = "labels")]
    #[validate(
        length(min = 1, message = "Campground must have at least one site"),
        custom(function = "validate_site_labels")
    )]
    pub sites: Vec<String>,
}

/// Load, validate and type the settings file at `path`
pub fn load_settings(path: &Path) -> Result<Settings, ScanError> {
    let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ScanError::ConfigNotFound {
            path: path.to_path_buf(),
        },
        _ => ScanError::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let settings = parse_settings(&contents)?;
    info!("Configuration loaded from {}", path.display());
    Ok(settings)
}

/// Parse and validate settings from YAML text
pub fn parse_settings(contents: &str) -> Result<Settings, ScanError> {
    if contents.trim().is_empty() {
        return Err(invalid("Settings cannot be empty"));
    }

    let value: Value =
        serde_yaml::from_str(contents).map_err(|e| ScanError::ConfigParse(e.to_string()))?;

    let count = validate_settings(&value)?;

    let settings: Settings =
        serde_yaml::from_value(value).map_err(|e| ScanError::Validation(e.to_string()))?;
    settings
        .validate()
        .map_err(|e| ScanError::Validation(e.to_string()))?;

    info!("Configuration validation passed: {} campground(s)", count);
    Ok(settings)
}

/// Check the shape of raw settings, returning the number of campgrounds.
///
/// Runs before typing so each problem gets a message naming the offending entry.
pub fn validate_settings(value: &Value) -> Result<usize, ScanError> {
    let settings = match value {
        Value::Null => return Err(invalid("Settings cannot be empty")),
        Value::Mapping(mapping) if mapping.is_empty() => {
            return Err(invalid("Settings cannot be empty"));
        }
        Value::Mapping(mapping) => mapping,
        _ => return Err(invalid("Settings must be a mapping")),
    };

    let campgrounds = settings
        .get("campgrounds")
        .ok_or_else(|| invalid("Settings must contain 'campgrounds' key"))?
        .as_sequence()
        .ok_or_else(|| invalid("'campgrounds' must be a list"))?;

    for (i, campground) in campgrounds.iter().enumerate() {
        let entry = campground
            .as_mapping()
            .ok_or_else(|| invalid(format!("Campground {} must be a mapping", i)))?;

        let id = entry
            .get("id")
            .ok_or_else(|| invalid(format!("Campground {} must have an 'id' field", i)))?;
        if !is_label(id) {
            return Err(invalid(format!(
                "Campground {} 'id' must be a string or integer",
                i
            )));
        }

        let sites = entry
            .get("sites")
            .ok_or_else(|| invalid(format!("Campground {} must have a 'sites' field", i)))?
            .as_sequence()
            .ok_or_else(|| invalid(format!("Campground {} 'sites' must be a list", i)))?;

        if sites.is_empty() {
            return Err(invalid(format!(
                "Campground {} must have at least one site",
                i
            )));
        }
        if !sites.iter().all(is_label) {
            return Err(invalid(format!(
                "Campground {} site labels must be strings",
                i
            )));
        }
    }

    Ok(campgrounds.len())
}

fn invalid(message: impl Into<String>) -> ScanError {
    ScanError::Validation(message.into())
}

fn is_label(value: &Value) -> bool {
    match value {
        Value::String(_) => true,
        Value::Number(n) => n.is_i64() || n.is_u64(),
        _ => false,
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Label {
    Text(String),
    Number(u64),
    Signed(i64),
}

impl From<Label> for String {
    fn from(label: Label) -> Self {
        match label {
            Label::Text(text) => text,
            Label::Number(n) => n.to_string(),
            Label::Signed(n) => n.to_string(),
        }
    }
}

fn label<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Label::deserialize(deserializer).map(String::from)
}

fn labels<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Vec::<Label>::deserialize(deserializer)
        .map(|labels| labels.into_iter().map(String::from).collect())
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank_campground_id")
            .with_message(Cow::from("Campground ID cannot be blank")));
    }
    Ok(())
}

fn validate_site_labels(sites: &[String]) -> Result<(), ValidationError> {
    if sites.iter().any(|site| site.trim().is_empty()) {
        return Err(ValidationError::new("blank_site_label")
            .with_message(Cow::from("Site labels cannot be blank")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn validation_message(yaml: &str) -> String {
        match parse_settings(yaml) {
            Err(ScanError::Validation(msg)) => msg,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_valid_settings() {
        let settings = parse_settings(
            r#"
campgrounds:
  - id: 232447
    sites: ["012", "7"]
  - id: "232450"
    sites: [42]
"#,
        )
        .unwrap();

        assert_eq!(settings.campgrounds.len(), 2);
        assert_eq!(settings.campgrounds[0].id, "232447");
        assert_eq!(settings.campgrounds[0].sites, vec!["012", "7"]);
        assert_eq!(settings.campgrounds[1].id, "232450");
        assert_eq!(settings.campgrounds[1].sites, vec!["42"]);
    }

    #[test]
    fn test_empty_campground_list_is_valid() {
        let settings = parse_settings("campgrounds: []").unwrap();
        assert!(settings.campgrounds.is_empty());
    }

    #[test]
    fn test_empty_settings_rejected() {
        assert_eq!(validation_message(""), "Settings cannot be empty");
        assert_eq!(validation_message("null"), "Settings cannot be empty");
        assert_eq!(validation_message("{}"), "Settings cannot be empty");
        assert_eq!(validation_message("- 1\n- 2"), "Settings must be a mapping");
    }

    #[test]
    fn test_campgrounds_key_rules() {
        assert_eq!(
            validation_message("other: 1"),
            "Settings must contain 'campgrounds' key"
        );
        assert_eq!(
            validation_message("campgrounds: 232447"),
            "'campgrounds' must be a list"
        );
        assert_eq!(
            validation_message("campgrounds:\n  - 232447"),
            "Campground 0 must be a mapping"
        );
    }

    #[test]
    fn test_campground_entry_rules() {
        assert_eq!(
            validation_message("campgrounds:\n  - sites: ['1']"),
            "Campground 0 must have an 'id' field"
        );
        assert_eq!(
            validation_message(
                "campgrounds:\n  - id: 1\n    sites: ['1']\n  - id: 2"
            ),
            "Campground 1 must have a 'sites' field"
        );
        assert_eq!(
            validation_message("campgrounds:\n  - id: 1\n    sites: '12'"),
            "Campground 0 'sites' must be a list"
        );
        assert_eq!(
            validation_message("campgrounds:\n  - id: 1\n    sites: []"),
            "Campground 0 must have at least one site"
        );
        assert_eq!(
            validation_message("campgrounds:\n  - id: [1]\n    sites: ['1']"),
            "Campground 0 'id' must be a string or integer"
        );
        assert_eq!(
            validation_message("campgrounds:\n  - id: 1\n    sites: [{a: 1}]"),
            "Campground 0 site labels must be strings"
        );
    }

    #[test]
    fn test_blank_labels_rejected() {
        let msg = validation_message("campgrounds:\n  - id: ' '\n    sites: ['1']");
        assert!(msg.contains("Campground ID cannot be blank"), "{}", msg);

        let msg = validation_message("campgrounds:\n  - id: 1\n    sites: ['']");
        assert!(msg.contains("Site labels cannot be blank"), "{}", msg);
    }

    #[test]
    fn test_invalid_yaml_is_a_parse_error() {
        assert!(matches!(
            parse_settings("campgrounds: [unclosed"),
            Err(ScanError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_load_settings_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "campgrounds:\n  - id: 232447\n    sites: ['12']").unwrap();

        let settings = load_settings(file.path()).unwrap();
        assert_eq!(settings.campgrounds[0].sites, vec!["12"]);
    }

    #[test]
    fn test_load_settings_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.yaml");

        match load_settings(&path) {
            Err(ScanError::ConfigNotFound { path: missing }) => assert_eq!(missing, path),
            other => panic!("expected ConfigNotFound, got {:?}", other),
        }
    }
}
