//! `scopewise report` command implementation.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use scopewise_core::{RequirementsRecord, ScopewiseConfig};
use std::fs;
use std::path::{Path, PathBuf};

pub fn run(
    file: &Path,
    out: Option<&Path>,
    date: Option<NaiveDate>,
    config: &ScopewiseConfig,
) -> Result<()> {
    let record = super::load_record(file)?;
    let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());

    let written = write_report(&record, out, date, config)?;
    println!("✅ Report written to {}", written.path.display());
    println!("   Document:  {}", written.document_id);
    println!("   Pages:     {}", written.page_count);
    println!("   Sections:  {}", written.sections.join(", "));
    Ok(())
}

/// Where a report went and what it contained.
#[derive(Debug)]
pub struct WrittenReport {
    pub path: PathBuf,
    pub document_id: String,
    pub page_count: usize,
    pub sections: Vec<&'static str>,
}

/// Render the report and write it to `out`, or to the generated file name in
/// the current directory. Nothing is written when rendering fails.
pub fn write_report(
    record: &RequirementsRecord,
    out: Option<&Path>,
    date: NaiveDate,
    config: &ScopewiseConfig,
) -> Result<WrittenReport> {
    let report = scopewise_report::generate_report(record, &config.report, date)
        .context("Failed to generate report")?;

    let path = match out {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(&report.file_name),
    };
    fs::write(&path, &report.bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(WrittenReport {
        path,
        document_id: report.document_id,
        page_count: report.page_count,
        sections: report.sections,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use scopewise_core::Feature;

    #[test]
    fn test_write_report_to_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("acme.pdf");

        let mut record = RequirementsRecord::new();
        record.contact.company_name = "Acme".to_string();
        record.features.set(Feature::DataWarehouse, true);
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();

        let written =
            write_report(&record, Some(&out), date, &ScopewiseConfig::default()).unwrap();
        assert_eq!(written.path, out);
        assert_eq!(written.document_id, "SW-ACME-20240305");
        assert!(written.page_count >= 1);

        let bytes = fs::read(&out).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_write_report_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("missing-dir").join("report.pdf");
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();

        let err = write_report(
            &RequirementsRecord::new(),
            Some(&out),
            date,
            &ScopewiseConfig::default(),
        )
        .unwrap_err();
        assert!(format!("{}", err).starts_with("Failed to write"));
    }
}
