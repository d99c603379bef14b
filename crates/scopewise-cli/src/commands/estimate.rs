//! `scopewise estimate` command implementation.

use crate::OutputFormat;
use anyhow::Result;
use scopewise_core::{RequirementsRecord, ScopewiseConfig, format_amount};
use scopewise_estimator::Estimate;
use std::path::Path;

pub fn run(file: &Path, explain: bool, format: OutputFormat, config: &ScopewiseConfig) -> Result<()> {
    let record = super::load_record(file)?;
    let estimate = scopewise_estimator::estimate_with_details(&record);

    match format {
        OutputFormat::Json => {
            let output = if explain {
                serde_json::to_string_pretty(&estimate)?
            } else {
                serde_json::to_string_pretty(&estimate.breakdown)?
            };
            println!("{}", output);
        }
        OutputFormat::Text => {
            print!(
                "{}",
                render_text(&record, &estimate, explain, &config.report.currency_symbol)
            );
        }
    }
    Ok(())
}

/// Human-readable estimate, optionally followed by the factors behind it.
pub fn render_text(
    record: &RequirementsRecord,
    estimate: &Estimate,
    explain: bool,
    symbol: &str,
) -> String {
    let b = &estimate.breakdown;
    let mut out = String::new();

    let features = record.selected_feature_labels();
    if features.is_empty() {
        out.push_str("No platform components selected\n");
    } else {
        out.push_str(&format!("Components: {}\n", features.join(", ")));
    }
    out.push_str(&format!("{}\n", "─".repeat(40)));
    for (label, amount) in [
        ("Infrastructure", b.infrastructure),
        ("Development", b.development),
        ("Support", b.support),
    ] {
        out.push_str(&format!("{:<20}{:>20}\n", label, format_amount(symbol, amount)));
    }
    out.push_str(&format!("{}\n", "─".repeat(40)));
    out.push_str(&format!("{:<20}{:>20}\n", "Total", format_amount(symbol, b.total)));
    out.push_str(&format!("{:<20}{:>20}\n", "Per month", format_amount(symbol, b.monthly)));

    if explain {
        let f = &estimate.factors;
        out.push_str("\nFactors:\n");
        out.push_str(&format!("  feature base        {}\n", f.feature_base));
        for (label, value) in [
            ("data volume", f.data_volume),
            ("compute", f.compute),
            ("geographic", f.geographic),
            ("analytics", f.analytics),
            ("governance", f.governance),
            ("authentication", f.authentication),
            ("custom development", f.custom_development),
            ("sla", f.sla),
        ] {
            out.push_str(&format!("  {:<20}x{:.2}\n", label, value));
        }
        out.push_str(&format!(
            "  {:<20}x{:.4}\n",
            "combined",
            f.combined_multiplier()
        ));
        out.push_str(&format!("  {:<20}{:.2}\n", "scaled base", f.scaled_base));
    }
    out
}
