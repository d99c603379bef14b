//! The requirements wizard controller.
//!
//! [`Wizard`] owns the [`RequirementsRecord`] and the step pointer. Moving
//! forward is gated by the current step's predicate; leaving the contact
//! step prices the record, stores it through the gateway and reveals the
//! results. Storage failures are logged and never block the reveal.

use crate::error::ValidationError;
use crate::steps::{self, Step};
use crate::submission::{CalculatorSubmission, spawn_submission};
use scopewise_core::{CostBreakdown, Locale, RequirementsRecord};
use scopewise_gateway::PersistenceGateway;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

/// Step pointer and transient flags. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardState {
    pub step: Step,
    pub saving: bool,
    pub results_visible: bool,
    pub locale: Locale,
}

impl WizardState {
    fn initial(locale: Locale) -> Self {
        Self {
            step: Step::first(),
            saving: false,
            results_visible: false,
            locale,
        }
    }
}

/// Result of [`Wizard::next`].
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    /// Moved to the given step.
    Moved(Step),
    /// The current step's predicate failed. Nothing changed.
    Blocked(ValidationError),
    /// The record was priced and the results step revealed. `stored_id` is
    /// `None` when storing the submission failed.
    Submitted {
        breakdown: CostBreakdown,
        stored_id: Option<Uuid>,
    },
    /// Already on the results step.
    AtEnd,
}

pub struct Wizard {
    record: RequirementsRecord,
    state: WizardState,
    breakdown: Option<CostBreakdown>,
    gateway: Arc<dyn PersistenceGateway>,
}

impl Wizard {
    pub fn new(gateway: Arc<dyn PersistenceGateway>, locale: Locale) -> Self {
        Self {
            record: RequirementsRecord::new(),
            state: WizardState::initial(locale),
            breakdown: None,
            gateway,
        }
    }

    pub fn record(&self) -> &RequirementsRecord {
        &self.record
    }

    /// Mutable access for field-by-field edits.
    pub fn record_mut(&mut self) -> &mut RequirementsRecord {
        &mut self.record
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn step(&self) -> Step {
        self.state.step
    }

    pub fn locale(&self) -> &Locale {
        &self.state.locale
    }

    /// Price of the last submission.
    pub fn breakdown(&self) -> Option<&CostBreakdown> {
        self.breakdown.as_ref()
    }

    /// Fields blocking the current step.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        self.state.step.missing_fields(&self.record)
    }

    /// Whether `next` would move forward.
    pub fn can_advance(&self) -> bool {
        !self.state.step.is_terminal() && self.missing_fields().is_empty()
    }

    /// Whether every step's predicate holds.
    pub fn is_complete(&self) -> bool {
        steps::is_complete(&self.record)
    }

    /// Advance one step if the current predicate holds.
    pub async fn next(&mut self) -> Advance {
        let current = self.state.step;
        if current.is_terminal() {
            return Advance::AtEnd;
        }
        if let Err(err) = current.validate(&self.record) {
            tracing::debug!(step = current.number(), error = %err, "Step blocked");
            return Advance::Blocked(err);
        }

        if current.is_submission() {
            return self.submit().await;
        }

        let Some(next) = current.next() else {
            return Advance::AtEnd;
        };
        self.state.step = next;
        Advance::Moved(next)
    }

    async fn submit(&mut self) -> Advance {
        let breakdown = scopewise_estimator::estimate(&self.record);
        self.breakdown = Some(breakdown);
        self.state.saving = true;

        let submission = CalculatorSubmission::new(
            self.record.clone(),
            breakdown,
            self.state.locale.clone(),
        );
        let stored_id = match spawn_submission(self.gateway.clone(), submission).await {
            Ok(Ok(row)) => Some(row.id),
            Ok(Err(err)) => {
                tracing::error!(error = %err, "Failed to store calculator submission");
                None
            }
            Err(err) => {
                tracing::error!(error = %err, "Calculator submission task failed");
                None
            }
        };

        self.state.saving = false;
        self.state.step = Step::Results;
        self.state.results_visible = true;
        Advance::Submitted {
            breakdown,
            stored_id,
        }
    }

    /// Go back one step. Returns `false` on the first step.
    pub fn previous(&mut self) -> bool {
        let Some(previous) = self.state.step.previous() else {
            return false;
        };
        self.state.step = previous;
        self.state.results_visible = false;
        true
    }

    /// Every field and flag back to its default, pointer back to step 1.
    pub fn reset(&mut self) {
        self.record = RequirementsRecord::new();
        self.breakdown = None;
        self.state = WizardState::initial(self.state.locale.clone());
    }

    /// Switch the display locale. A different locale resets the wizard.
    /// Returns whether a reset happened.
    pub fn set_locale(&mut self, locale: impl Into<Locale>) -> bool {
        let locale = locale.into();
        if locale == self.state.locale {
            return false;
        }
        tracing::info!(from = %self.state.locale, to = %locale, "Locale changed, resetting wizard");
        self.reset();
        self.state.locale = locale;
        true
    }
}
