//! # scopewise-estimator
//!
//! Pure pricing and matching functions:
//!
//! - [`estimate`] / [`estimate_with_details`]: the weighted multiplier cost model
//! - [`match_score`] / [`rank_partners`]: partner directory matching
//!
//! Nothing here performs I/O. The same record always yields the same result.

pub mod cost_model;
pub mod partners;

pub use cost_model::{CostFactors, Estimate, estimate, estimate_with_details};
pub use partners::{ScoredPartner, match_score, rank_partners};
