use mdroff::{ConvertOptions, Dialect, FileConfig, MdroffError, SynopsisStyle};
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

#[test]
fn valid_fixture_passes_schema() {
    let yaml = fs::read_to_string(fixture_path("official.yml")).expect("fixture should load");
    mdroff::validate_config_str(&yaml).expect("fixture should validate against schema");
}

#[test]
fn invalid_fixture_fails_schema() {
    let yaml = fs::read_to_string(fixture_path("invalid.yml")).expect("fixture should load");
    let err = mdroff::validate_config_str(&yaml).expect_err("fixture should fail schema");
    assert!(matches!(err, MdroffError::Schema(_)));
}

#[test]
fn loaded_fixture_drives_conversion() {
    let config = FileConfig::load(fixture_path("official.yml")).expect("config should load");
    let mut options = ConvertOptions::new(Dialect::Mm);
    config.apply(&mut options);

    assert_eq!(options.dialect, Dialect::Man);
    assert!(options.official);
    assert_eq!(options.synopsis_style, SynopsisStyle::Sy);
    assert_eq!(options.suppressed_sections, vec!["AUTHORS", "COPYRIGHT"]);

    let roff = mdroff::convert_to_string(
        "tool",
        "# tool 1\n## DESCRIPTION\nA builtin colour.\n## AUTHORS\nSomeone\n",
        &options,
    )
    .expect("conversion");
    assert!(roff.contains(".TH TOOL 1 \"Jan 1 2026\"\n"));
    assert!(roff.contains("A built-in color.\n"));
    assert!(!roff.contains("Someone"));
}

#[test]
fn missing_file_is_a_config_error() {
    let dir = tempdir().expect("tempdir");
    let err = FileConfig::load(dir.path().join("absent.yml")).expect_err("missing file");
    assert!(matches!(err, MdroffError::Config(_)));
}

#[test]
fn empty_file_changes_nothing() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("empty.yml");
    fs::write(&path, "").expect("write config");
    let config = FileConfig::load(&path).expect("empty config");
    let mut options = ConvertOptions::default();
    config.apply(&mut options);
    assert_eq!(options, ConvertOptions::default());
}

#[test]
fn dictionary_entries_need_both_words() {
    let err = FileConfig::from_yaml_str("dictionary:\n  - wrong: colour\n")
        .expect_err("incomplete entry");
    assert!(matches!(err, MdroffError::Schema(_) | MdroffError::Config(_)));
}
