//! Partner match scoring.

use scopewise_core::{Feature, MatchPreferences, Partner};
use serde::Serialize;

pub const BASE_SCORE: u32 = 50;
pub const SERVICE_MATCH_POINTS: u32 = 10;
pub const INDUSTRY_MATCH_POINTS: u32 = 20;
pub const LANGUAGE_MATCH_POINTS: u32 = 15;
pub const PREMIUM_POINTS: u32 = 10;
pub const MAX_SCORE: u32 = 100;

/// A partner together with its match score.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredPartner {
    pub score: u32,
    #[serde(flatten)]
    pub partner: Partner,
}

/// Score one partner against the prospect's preferences.
///
/// Always within `BASE_SCORE..=MAX_SCORE`.
pub fn match_score(partner: &Partner, preferences: &MatchPreferences) -> u32 {
    let mut score = BASE_SCORE;

    // Each feature counts once, however often it is listed.
    let shared_services = Feature::ALL
        .iter()
        .filter(|feature| {
            preferences.features.contains(feature) && partner.services.contains(feature)
        })
        .count() as u32;
    score += SERVICE_MATCH_POINTS * shared_services;

    if matches_any(preferences.industry.as_deref(), &partner.industries) {
        score += INDUSTRY_MATCH_POINTS;
    }
    if matches_any(preferences.language.as_deref(), &partner.languages) {
        score += LANGUAGE_MATCH_POINTS;
    }
    if partner.premium {
        score += PREMIUM_POINTS;
    }

    score.min(MAX_SCORE)
}

/// Approved partners ordered premium first, then by score, then by name.
pub fn rank_partners(partners: &[Partner], preferences: &MatchPreferences) -> Vec<ScoredPartner> {
    let mut ranked: Vec<ScoredPartner> = partners
        .iter()
        .filter(|partner| partner.approved)
        .map(|partner| ScoredPartner {
            score: match_score(partner, preferences),
            partner: partner.clone(),
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.partner
            .premium
            .cmp(&a.partner.premium)
            .then_with(|| b.score.cmp(&a.score))
            .then_with(|| {
                a.partner
                    .name
                    .to_lowercase()
                    .cmp(&b.partner.name.to_lowercase())
            })
    });

    tracing::debug!(
        candidates = partners.len(),
        ranked = ranked.len(),
        "Ranked partners"
    );
    ranked
}

fn matches_any(wanted: Option<&str>, offered: &[String]) -> bool {
    let Some(wanted) = wanted.map(str::trim).filter(|w| !w.is_empty()) else {
        return false;
    };
    offered
        .iter()
        .any(|candidate| candidate.trim().eq_ignore_ascii_case(wanted))
}
