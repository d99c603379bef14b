//! `scopewise check-config` command implementation.
//!
//! Loads the configuration file and reports problems that would otherwise
//! only surface at runtime:
//! - parse and validation errors
//! - environment variables that are referenced but not set
//! - report branding the PDF cannot render

use anyhow::{Result, bail};
use std::path::Path;

use scopewise_core::ScopewiseConfig;
use scopewise_intake::is_valid_email;
use scopewise_report::text::to_win_ansi;

// ============================================================================
// Check Result Types
// ============================================================================

/// Severity level for check results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    /// May indicate a problem.
    Warning,
    /// The configuration cannot be used.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "INFO"),
            Severity::Warning => write!(f, "WARN"),
            Severity::Error => write!(f, "ERROR"),
        }
    }
}

/// A single check finding.
#[derive(Debug, Clone)]
pub struct CheckFinding {
    pub severity: Severity,
    /// Configuration section the finding belongs to.
    pub category: String,
    pub message: String,
    /// Key within the section, e.g. `report.contact_email`.
    pub location: Option<String>,
}

impl CheckFinding {
    fn error(category: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            category: category.into(),
            message: message.into(),
            location: None,
        }
    }

    fn warning(category: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            category: category.into(),
            message: message.into(),
            location: None,
        }
    }

    fn info(category: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            category: category.into(),
            message: message.into(),
            location: None,
        }
    }

    fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

/// Results from running all checks.
#[derive(Debug, Default)]
pub struct CheckResults {
    pub findings: Vec<CheckFinding>,
}

impl CheckResults {
    fn add(&mut self, finding: CheckFinding) {
        self.findings.push(finding);
    }

    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .count()
    }

    pub fn print_summary(&self) {
        for (severity, heading) in [
            (Severity::Error, "❌ Errors"),
            (Severity::Warning, "⚠️  Warnings"),
            (Severity::Info, "ℹ️  Info"),
        ] {
            let mut group: Vec<_> = self
                .findings
                .iter()
                .filter(|f| f.severity == severity)
                .collect();
            if group.is_empty() {
                continue;
            }
            group.sort_by(|a, b| a.category.cmp(&b.category));

            println!("\n{} ({}):", heading, group.len());
            println!("{}", "─".repeat(60));
            for finding in group {
                print_finding(finding);
            }
        }

        println!();
        if self.has_errors() {
            println!(
                "❌ Check failed: {} error(s), {} warning(s)",
                self.count(Severity::Error),
                self.count(Severity::Warning)
            );
        } else if self.count(Severity::Warning) > 0 {
            println!(
                "✅ Configuration usable with {} warning(s)",
                self.count(Severity::Warning)
            );
        } else {
            println!("✅ Configuration OK");
        }
    }
}

fn print_finding(finding: &CheckFinding) {
    match &finding.location {
        Some(location) => println!(
            "  [{}] {}: {} ({})",
            finding.severity, finding.category, finding.message, location
        ),
        None => println!(
            "  [{}] {}: {}",
            finding.severity, finding.category, finding.message
        ),
    }
}

// ============================================================================
// Checks
// ============================================================================

pub fn run(config_path: &Path) -> Result<()> {
    println!("🔍 Checking {}", config_path.display());
    let results = check_file(config_path);
    results.print_summary();

    if results.has_errors() {
        bail!("Configuration check failed");
    }
    Ok(())
}

/// Load `path` and run every check on it.
pub fn check_file(path: &Path) -> CheckResults {
    let mut results = CheckResults::default();

    if !path.exists() {
        results.add(CheckFinding::info(
            "file",
            format!("{} not found; built-in defaults apply", path.display()),
        ));
        check_config(&ScopewiseConfig::default(), &mut results);
        return results;
    }

    match ScopewiseConfig::from_file(path) {
        Ok(config) => check_config(&config, &mut results),
        Err(e) => results.add(CheckFinding::error("file", e.to_string())),
    }
    results
}

/// Checks on an already parsed configuration.
pub fn check_config(config: &ScopewiseConfig, results: &mut CheckResults) {
    check_server(config, results);
    check_database(config, results);
    check_report(config, results);
}

fn env_missing(var: &str) -> bool {
    std::env::var(var).map_or(true, |value| value.is_empty())
}

fn check_server(config: &ScopewiseConfig, results: &mut CheckResults) {
    let server = &config.server;
    if let Some(var) = &server.admin_token_env {
        if env_missing(var) {
            results.add(
                CheckFinding::warning("server", format!("environment variable {} is not set", var))
                    .with_location("server.admin_token_env"),
            );
        }
    }
    if server.resolve_admin_token().is_none() {
        results.add(CheckFinding::warning(
            "server",
            "no admin token resolves; admin endpoints will answer 403",
        ));
    } else if server.admin_token.is_some() {
        results.add(
            CheckFinding::info("server", "admin token is stored in the file")
                .with_location("server.admin_token"),
        );
    }
}

fn check_database(config: &ScopewiseConfig, results: &mut CheckResults) {
    let db = &config.database;
    for (var, location) in [
        (&db.database_url_env, "database.database_url_env"),
        (&db.password_env, "database.password_env"),
    ] {
        if let Some(var) = var {
            if env_missing(var) {
                results.add(
                    CheckFinding::warning(
                        "database",
                        format!("environment variable {} is not set", var),
                    )
                    .with_location(location),
                );
            }
        }
    }
    if db.password.is_some() {
        results.add(
            CheckFinding::warning("database", "password is stored in plain text; prefer password_env")
                .with_location("database.password"),
        );
    }
}

fn check_report(config: &ScopewiseConfig, results: &mut CheckResults) {
    let report = &config.report;
    if !is_valid_email(&report.contact_email) {
        results.add(
            CheckFinding::error(
                "report",
                format!("'{}' is not a valid email address", report.contact_email),
            )
            .with_location("report.contact_email"),
        );
    }
    if !(report.website.starts_with("https://") || report.website.starts_with("http://")) {
        results.add(
            CheckFinding::warning(
                "report",
                format!("'{}' is not an http(s) URL; share links will not open it", report.website),
            )
            .with_location("report.website"),
        );
    }
    for (value, location) in [
        (&report.currency_symbol, "report.currency_symbol"),
        (&report.brand_name, "report.brand_name"),
        (&report.title, "report.title"),
    ] {
        let unprintable = to_win_ansi(value)
            .iter()
            .zip(value.chars())
            .any(|(byte, ch)| *byte == b'?' && ch != '?');
        if unprintable {
            results.add(
                CheckFinding::warning(
                    "report",
                    format!("'{}' contains characters the PDF fonts print as '?'", value),
                )
                .with_location(location),
            );
        }
    }
}
