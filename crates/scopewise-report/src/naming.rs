//! File names and document ids derived from the company name.

use chrono::NaiveDate;

const FALLBACK_SLUG: &str = "project";

/// Lowercase ASCII alphanumerics joined by single dashes. Falls back to
/// `project` when nothing usable is left.
pub fn company_slug(company: &str) -> String {
    let mut slug = String::with_capacity(company.len());
    let mut dash = false;
    for ch in company.chars() {
        if ch.is_ascii_alphanumeric() {
            if dash && !slug.is_empty() {
                slug.push('-');
            }
            dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            dash = true;
        }
    }
    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

/// `<slug>-requirements-report.pdf`
pub fn report_file_name(company: &str) -> String {
    format!("{}-requirements-report.pdf", company_slug(company))
}

/// `SW-<SLUG>-<YYYYMMDD>`, printed in every page footer.
pub fn document_id(company: &str, date: NaiveDate) -> String {
    format!(
        "SW-{}-{}",
        company_slug(company).to_ascii_uppercase(),
        date.format("%Y%m%d")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_company_slug() {
        assert_eq!(company_slug("Acme GmbH"), "acme-gmbh");
        assert_eq!(company_slug("  Müller & Söhne, Ltd. "), "m-ller-s-hne-ltd");
        assert_eq!(company_slug("---"), "project");
        assert_eq!(company_slug(""), "project");
        assert_eq!(company_slug("数据"), "project");
    }

    #[test]
    fn test_report_file_name() {
        assert_eq!(
            report_file_name("Corner Shop Ltd"),
            "corner-shop-ltd-requirements-report.pdf"
        );
        assert_eq!(report_file_name(""), "project-requirements-report.pdf");
    }

    #[test]
    fn test_document_id() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        assert_eq!(document_id("Acme GmbH", date), "SW-ACME-GMBH-20260309");
        assert_eq!(document_id("", date), "SW-PROJECT-20260309");
    }
}
