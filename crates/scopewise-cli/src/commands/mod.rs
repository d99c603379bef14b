//! CLI command implementations for Scopewise.

pub mod check;
pub mod db;
pub mod estimate;
pub mod partners;
pub mod report;
pub mod serve;
pub mod share;

use anyhow::{Context, Result};
use scopewise_core::{RequirementsRecord, ScopewiseConfig};
use std::fs;
use std::path::Path;

/// Load a requirements record. `.json` files are parsed as JSON, anything
/// else as YAML.
pub fn load_record(path: &Path) -> Result<RequirementsRecord> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read record {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let record = if is_json {
        RequirementsRecord::from_json(&content)
            .with_context(|| format!("Invalid JSON record {}", path.display()))?
    } else {
        RequirementsRecord::from_yaml(&content)
            .with_context(|| format!("Invalid YAML record {}", path.display()))?
    };
    Ok(record)
}

/// Load the configuration, falling back to the defaults when the file is absent.
pub fn load_config(path: &Path) -> Result<ScopewiseConfig> {
    let config = ScopewiseConfig::load_or_default(path)
        .with_context(|| format!("Failed to load configuration {}", path.display()))?;
    if !path.exists() {
        tracing::debug!(path = %path.display(), "No configuration file; using defaults");
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scopewise_core::{DataVolume, Feature};

    #[test]
    fn test_load_record_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let yaml = dir.path().join("record.yaml");
        fs::write(
            &yaml,
            "contact:\n  companyName: Acme\nfeatures:\n  lakehouse: true\ndataVolume: large\n",
        )
        .unwrap();
        let record = load_record(&yaml).unwrap();
        assert_eq!(record.contact.company_name, "Acme");
        assert!(record.features.get(Feature::Lakehouse));
        assert_eq!(record.data_volume, DataVolume::Large);

        let json = dir.path().join("record.JSON");
        fs::write(&json, r#"{"contact":{"companyName":"Beta"},"features":{"dataFactory":true}}"#).unwrap();
        let record = load_record(&json).unwrap();
        assert_eq!(record.contact.company_name, "Beta");
        assert!(record.features.get(Feature::DataFactory));
    }

    #[test]
    fn test_load_record_errors_name_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_record(&path).unwrap_err();
        assert!(format!("{}", err).contains("broken.json"));

        let missing = load_record(&dir.path().join("missing.yaml")).unwrap_err();
        assert!(format!("{}", missing).contains("Failed to read record"));
    }

    #[test]
    fn test_sample_files_load() {
        let samples = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../samples");

        let record = load_record(&samples.join("record.yaml")).unwrap();
        assert_eq!(record.contact.company_name, "Northwind Retail GmbH");
        assert_eq!(record.features.count_enabled(), 3);

        let config = load_config(&samples.join("scopewise.yaml")).unwrap();
        assert_eq!(config.project.as_deref(), Some("scopewise-demo"));
        assert_eq!(config.wizard.default_locale.as_str(), "en");
    }

    #[test]
    fn test_load_config_missing_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("scopewise.yaml")).unwrap();
        assert_eq!(config.server.port, 8080);
    }
}
