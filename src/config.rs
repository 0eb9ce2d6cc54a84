//! YAML configuration file, validated against a built-in JSON schema.

use crate::error::{MdroffError, Result};
use crate::options::{ConvertOptions, Dialect, EmphasisMarkers, SynopsisStyle};
use chrono::NaiveDate;
use jsonschema::validator_for;
use serde_json::{Map as JsonMap, Number as JsonNumber, Value as JsonValue};
use std::fs;
use std::path::Path;
use yaml_rust2::{Yaml, YamlLoader, yaml::Hash};

pub const CONFIG_SCHEMA: &str = include_str!("../data/config_schema.yml");

/// Settings read from a configuration file. Unset keys leave options alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileConfig {
    pub dialect: Option<Dialect>,
    pub official: Option<bool>,
    pub emphasis: Option<EmphasisMarkers>,
    pub synopsis_style: Option<SynopsisStyle>,
    pub suppressed_sections: Option<Vec<String>>,
    pub dictionary: Option<Vec<(String, String)>>,
    pub date: Option<NaiveDate>,
}

impl FileConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|err| {
            MdroffError::Config(format!("cannot read '{}': {err}", path.display()))
        })?;
        Self::from_yaml_str(&source)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let docs = YamlLoader::load_from_str(yaml)
            .map_err(|err| MdroffError::Yaml(err.to_string()))?;
        let Some(document) = docs.first() else {
            return Ok(Self::default());
        };
        if matches!(document, Yaml::Null) {
            return Ok(Self::default());
        }
        validate_against_schema(document, CONFIG_SCHEMA)?;

        let map = ensure_mapping(document, "configuration")?;
        let dictionary = match map_get_sequence(map, "dictionary")? {
            None => None,
            Some(entries) => Some(
                entries
                    .iter()
                    .map(|entry| {
                        let entry = ensure_mapping(entry, "dictionary entry")?;
                        let wrong = map_get_string(entry, "wrong")?;
                        let correct = map_get_string(entry, "correct")?;
                        match (wrong, correct) {
                            (Some(wrong), Some(correct)) => Ok((wrong, correct)),
                            _ => Err(MdroffError::Config(
                                "dictionary entries need 'wrong' and 'correct'".to_string(),
                            )),
                        }
                    })
                    .collect::<Result<Vec<_>>>()?,
            ),
        };
        let suppressed_sections = map_get_sequence(map, "suppressed_sections")?
            .map(|names| names.iter().map(yaml_value_to_string).collect());

        Ok(Self {
            dialect: map_get_string(map, "dialect")?
                .map(|value| value.parse())
                .transpose()?,
            official: map_get_bool(map, "official")?,
            emphasis: map_get_string(map, "emphasis")?
                .map(|value| value.parse())
                .transpose()?,
            synopsis_style: map_get_string(map, "synopsis_style")?
                .map(|value| value.parse())
                .transpose()?,
            suppressed_sections,
            dictionary,
            date: map_get_string(map, "date")?
                .map(|value| parse_date(&value))
                .transpose()?,
        })
    }

    /// Copies every set value into `options`.
    pub fn apply(&self, options: &mut ConvertOptions) {
        if let Some(dialect) = self.dialect {
            options.dialect = dialect;
        }
        if let Some(official) = self.official {
            options.official = official;
        }
        if let Some(emphasis) = self.emphasis {
            options.emphasis = emphasis;
        }
        if let Some(style) = self.synopsis_style {
            options.synopsis_style = style;
        }
        if let Some(sections) = &self.suppressed_sections {
            options.suppressed_sections = sections.clone();
        }
        if let Some(dictionary) = &self.dictionary {
            options.dictionary = Some(dictionary.clone());
        }
        if let Some(date) = self.date {
            options.date = Some(date);
        }
    }
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|err| MdroffError::Config(format!("invalid date '{value}': {err}")))
}

/// Checks a configuration document against the built-in schema without loading it.
pub fn validate_config_str(yaml: &str) -> Result<()> {
    let docs = YamlLoader::load_from_str(yaml)
        .map_err(|err| MdroffError::Yaml(err.to_string()))?;
    match docs.first() {
        None | Some(Yaml::Null) => Ok(()),
        Some(document) => validate_against_schema(document, CONFIG_SCHEMA),
    }
}

fn validate_against_schema(document: &Yaml, schema_source: &str) -> Result<()> {
    let schema_docs = YamlLoader::load_from_str(schema_source)
        .map_err(|err| MdroffError::Schema(err.to_string()))?;
    let schema_yaml = schema_docs
        .first()
        .ok_or_else(|| MdroffError::Schema("empty schema document".to_string()))?;
    let schema_json = yaml_to_json(schema_yaml);
    let instance_json = yaml_to_json(document);
    let validator =
        validator_for(&schema_json).map_err(|err| MdroffError::Schema(err.to_string()))?;
    validator
        .validate(&instance_json)
        .map_err(|error| MdroffError::Schema(error.to_string()))
}

fn ensure_mapping<'a>(value: &'a Yaml, context: &str) -> Result<&'a Hash> {
    value
        .as_hash()
        .ok_or_else(|| MdroffError::Yaml(format!("expected mapping for {context}")))
}

fn map_get_string(map: &Hash, key: &str) -> Result<Option<String>> {
    match map.get(&Yaml::String(key.to_string())) {
        None | Some(Yaml::Null) => Ok(None),
        Some(Yaml::String(value)) => Ok(Some(value.clone())),
        Some(other) => Err(MdroffError::Yaml(format!(
            "expected string for key '{key}', found {}",
            yaml_type_name(other)
        ))),
    }
}

fn map_get_bool(map: &Hash, key: &str) -> Result<Option<bool>> {
    match map.get(&Yaml::String(key.to_string())) {
        None | Some(Yaml::Null) => Ok(None),
        Some(Yaml::Boolean(value)) => Ok(Some(*value)),
        Some(other) => Err(MdroffError::Yaml(format!(
            "expected bool for key '{key}', found {}",
            yaml_type_name(other)
        ))),
    }
}

fn map_get_sequence<'a>(map: &'a Hash, key: &str) -> Result<Option<&'a [Yaml]>> {
    match map.get(&Yaml::String(key.to_string())) {
        None | Some(Yaml::Null) => Ok(None),
        Some(Yaml::Array(values)) => Ok(Some(values)),
        Some(other) => Err(MdroffError::Yaml(format!(
            "expected sequence for key '{key}', found {}",
            yaml_type_name(other)
        ))),
    }
}

/// Scalars as written; anything else by its type name.
fn yaml_value_to_string(value: &Yaml) -> String {
    match value {
        Yaml::Boolean(value) => value.to_string(),
        Yaml::Integer(value) => value.to_string(),
        Yaml::Real(value) | Yaml::String(value) => value.clone(),
        other => yaml_type_name(other).to_string(),
    }
}

fn yaml_type_name(value: &Yaml) -> &'static str {
    match value {
        Yaml::Null => "null",
        Yaml::Boolean(_) => "bool",
        Yaml::Integer(_) => "int",
        Yaml::Real(_) => "float",
        Yaml::String(_) => "string",
        Yaml::Array(_) => "sequence",
        Yaml::Hash(_) => "mapping",
        Yaml::Alias(_) => "alias",
        Yaml::BadValue => "bad",
    }
}

fn yaml_to_json(value: &Yaml) -> JsonValue {
    match value {
        Yaml::Null => JsonValue::Null,
        Yaml::Boolean(value) => JsonValue::Bool(*value),
        Yaml::Integer(value) => JsonValue::Number(JsonNumber::from(*value)),
        Yaml::Real(value) => value
            .parse::<f64>()
            .ok()
            .and_then(JsonNumber::from_f64)
            .map(JsonValue::Number)
            .unwrap_or_else(|| JsonValue::String(value.clone())),
        Yaml::String(value) => JsonValue::String(value.clone()),
        Yaml::Array(values) => JsonValue::Array(values.iter().map(yaml_to_json).collect()),
        Yaml::Hash(map) => {
            let mut out = JsonMap::new();
            for (key, value) in map.iter() {
                out.insert(yaml_value_to_string(key), yaml_to_json(value));
            }
            JsonValue::Object(out)
        }
        Yaml::Alias(_) | Yaml::BadValue => JsonValue::Null,
    }
}
