//! `scopewise share` command implementation.

use anyhow::Result;
use scopewise_core::ScopewiseConfig;
use scopewise_report::ShareBundle;
use std::path::Path;

pub fn run(file: &Path, to: &str, config: &ScopewiseConfig) -> Result<()> {
    let record = super::load_record(file)?;
    let breakdown = scopewise_estimator::estimate(&record);
    let bundle = scopewise_report::share_bundle(&record, &breakdown, &config.report, to);
    print!("{}", render_bundle(&bundle));
    Ok(())
}

fn render_bundle(bundle: &ShareBundle) -> String {
    let rule = "─".repeat(60);
    format!(
        "Subject: {}\n{rule}\n{}\n{rule}\nMail link: {}\n\nPost:\n{}\n\nLinkedIn:  {}\nX:         {}\n",
        bundle.email.subject,
        bundle.email.body.trim_end(),
        bundle.mailto,
        bundle.social_post,
        bundle.linkedin_url,
        bundle.x_url,
    )
}
