//! `scopewise partners` command implementation.
//!
//! Loads a partner directory from a YAML list into an in-memory gateway and
//! ranks it exactly the way `GET /api/partners` does.

use anyhow::{Context, Result, bail};
use scopewise_core::{Feature, MatchPreferences};
use scopewise_estimator::ScoredPartner;
use scopewise_gateway::{MemoryGateway, PersistenceGateway, Table};
use serde_json::Value as JsonValue;
use std::fs;
use std::path::Path;

pub async fn run(
    file: &Path,
    features: &[String],
    industry: Option<String>,
    language: Option<String>,
) -> Result<()> {
    let preferences = MatchPreferences {
        features: parse_features(features)?,
        industry,
        language,
    };

    let gateway = load_directory(file).await?;
    let ranked = scopewise_intake::list_partners(&gateway, &preferences).await?;

    if ranked.is_empty() {
        println!("No approved partners in {}", file.display());
        return Ok(());
    }
    print!("{}", render_ranking(&ranked));
    Ok(())
}

/// Parse `--feature` values given as wire names (`dataWarehouse`).
pub fn parse_features(names: &[String]) -> Result<Vec<Feature>> {
    names
        .iter()
        .map(|name| match Feature::from_wire(name.trim()) {
            Some(feature) => Ok(feature),
            None => {
                let known: Vec<&str> = Feature::ALL.iter().map(|f| f.as_str()).collect();
                bail!("Unknown feature '{}'. Expected one of: {}", name, known.join(", "))
            }
        })
        .collect()
}

/// Read a YAML list of partners into a fresh in-memory directory. Entries
/// without an `approved` key are listed.
pub async fn load_directory(file: &Path) -> Result<MemoryGateway> {
    let content = fs::read_to_string(file)
        .with_context(|| format!("Failed to read partner file {}", file.display()))?;
    let entries: Vec<JsonValue> = serde_yaml::from_str(&content)
        .with_context(|| format!("Invalid partner file {}", file.display()))?;

    let gateway = MemoryGateway::new();
    for (index, mut entry) in entries.into_iter().enumerate() {
        let Some(object) = entry.as_object_mut() else {
            bail!("Partner entry {} in {} is not a mapping", index + 1, file.display());
        };
        object.remove("id");
        object
            .entry("approved")
            .or_insert(JsonValue::Bool(true));
        gateway.insert(Table::Partners, entry).await?;
    }
    tracing::debug!(count = gateway.len(Table::Partners), "Loaded partner directory");
    Ok(gateway)
}

fn render_ranking(ranked: &[ScoredPartner]) -> String {
    let mut out = format!("{:>5}  {:<30}{}\n", "Score", "Partner", "Services");
    out.push_str(&format!("{}\n", "─".repeat(60)));
    for scored in ranked {
        let partner = &scored.partner;
        let name = if partner.premium {
            format!("{} ★", partner.name)
        } else {
            partner.name.clone()
        };
        let services: Vec<&str> = partner.services.iter().map(|s| s.label()).collect();
        out.push_str(&format!(
            "{:>5}  {:<30}{}\n",
            scored.score,
            name,
            services.join(", ")
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DIRECTORY: &str = r#"
- name: Northwind Data
  services: [lakehouse, dataWarehouse]
  industries: [Retail]
  languages: [English]
- name: Contoso Analytics
  services: [businessIntelligence]
  premium: true
- name: Fabrikam
  services: [lakehouse]
  approved: false
"#;

    #[test]
    fn test_parse_features() {
        let features =
            parse_features(&["lakehouse".to_string(), " dataScience".to_string()]).unwrap();
        assert_eq!(features, vec![Feature::Lakehouse, Feature::DataScience]);

        let err = parse_features(&["warp".to_string()]).unwrap_err();
        assert!(format!("{}", err).starts_with("Unknown feature 'warp'"));
    }

    #[tokio::test]
    async fn test_directory_ranking() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partners.yaml");
        fs::write(&path, DIRECTORY).unwrap();

        let gateway = load_directory(&path).await.unwrap();
        assert_eq!(gateway.len(Table::Partners), 3);

        let preferences = MatchPreferences {
            features: vec![Feature::Lakehouse, Feature::DataWarehouse],
            industry: Some("retail".to_string()),
            language: None,
        };
        let ranked = scopewise_intake::list_partners(&gateway, &preferences)
            .await
            .unwrap();
        let names: Vec<&str> = ranked.iter().map(|s| s.partner.name.as_str()).collect();
        // Premium first, the unapproved entry is hidden
        assert_eq!(names, vec!["Contoso Analytics", "Northwind Data"]);

        let table = render_ranking(&ranked);
        assert!(table.contains("Contoso Analytics ★"));
        assert!(table.contains("Lakehouse, Data Warehouse"));
    }

    #[tokio::test]
    async fn test_rejects_non_mapping_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partners.yaml");
        fs::write(&path, "- just a name\n").unwrap();

        let err = load_directory(&path).await.unwrap_err();
        assert!(format!("{}", err).contains("is not a mapping"));
    }
}
