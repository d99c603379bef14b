//! # scopewise-report
//!
//! Turns a requirements record into a paginated PDF report and the email and
//! social share templates offered next to it.
//!
//! Generation runs in three stages:
//!
//! 1. [`content`] builds typed [`Block`]s with a [`DocumentBuilder`]
//! 2. [`layout`] measures and paginates them onto A4 pages
//! 3. [`pdf`] encodes the pages with lopdf
//!
//! ```ignore
//! let report = generate_report(&record, &config.report, today)?;
//! std::fs::write(&report.file_name, &report.bytes)?;
//! ```

pub mod content;
pub mod document;
pub mod error;
pub mod layout;
pub mod naming;
pub mod pdf;
pub mod share;
pub mod text;

pub use content::{Section, Subsection, SubsectionBody, report_sections};
pub use document::{Block, Document, DocumentBuilder, TableRow};
pub use error::ReportError;
pub use naming::{company_slug, document_id, report_file_name};
pub use share::{
    EmailTemplate, ShareBundle, email_template, linkedin_share_url, mailto_link, share_bundle,
    social_post, x_share_url,
};

use chrono::NaiveDate;
use scopewise_core::{RequirementsRecord, config::ReportConfig};

/// Content type of [`RenderedReport::bytes`].
pub const CONTENT_TYPE: &str = "application/pdf";

/// A finished report.
#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub file_name: String,
    pub document_id: String,
    pub page_count: usize,
    /// Titles of the body sections that were rendered, in order.
    pub sections: Vec<&'static str>,
    pub bytes: Vec<u8>,
}

/// Generate the PDF report for `record`, dated `date`.
///
/// Either the whole document is produced or an error is returned.
pub fn generate_report(
    record: &RequirementsRecord,
    config: &ReportConfig,
    date: NaiveDate,
) -> Result<RenderedReport, ReportError> {
    let company = &record.contact.company_name;
    let id = document_id(company, date);
    let estimate = scopewise_estimator::estimate_with_details(record);
    let sections = report_sections(record);

    let doc = content::build_document(record, &estimate, &sections, config, &id, date);
    let laid_out = layout::layout(&doc)?;
    let bytes = pdf::encode(&doc, &laid_out)?;

    let report = RenderedReport {
        file_name: report_file_name(company),
        document_id: id,
        page_count: laid_out.pages.len(),
        sections: sections.iter().map(|s| s.title).collect(),
        bytes,
    };
    tracing::info!(
        document_id = %report.document_id,
        pages = report.page_count,
        sections = report.sections.len(),
        size = report.bytes.len(),
        "Generated requirements report"
    );
    Ok(report)
}
