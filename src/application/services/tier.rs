//! Tier construction with an interactive repair gate

use std::sync::Arc;

use tracing::{debug, info};

use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::{CourseList, RandomSource, RepairDecision, TierOutcome, TierPlan};
use crate::infrastructure::traits::Prompt;

/// Service building tiered lists.
pub struct TierService {
    prompt: Arc<dyn Prompt>,
}

impl TierService {
    /// Create a new tier service.
    pub fn new(prompt: Arc<dyn Prompt>) -> Self {
        Self { prompt }
    }

    /// Build `tier_count` tiers from `source`, asking before any repair.
    ///
    /// The prompt is consulted at most once, and only when the source does not
    /// divide evenly. A prompt failure aborts the construction; it never counts
    /// as consent.
    pub fn build(
        &self,
        source: &CourseList,
        tier_count: usize,
        rng: &mut dyn RandomSource,
    ) -> ApplicationResult<TierOutcome> {
        let plan = TierPlan::new(source, tier_count)?;
        let decision = match plan.repair_notice() {
            Some(notice) => {
                let ok = self
                    .prompt
                    .confirm(&format!("{notice}. Proceed?"))
                    .with_context("read repair confirmation")?;
                if ok {
                    RepairDecision::Confirmed
                } else {
                    RepairDecision::Declined
                }
            }
            None => RepairDecision::Confirmed,
        };
        debug!("build: tier_count={} decision={:?}", tier_count, decision);
        Self::run(plan, decision, rng)
    }

    /// Build with a decision made up front (e.g. `--yes`).
    pub fn build_with_decision(
        &self,
        source: &CourseList,
        tier_count: usize,
        decision: RepairDecision,
        rng: &mut dyn RandomSource,
    ) -> ApplicationResult<TierOutcome> {
        let plan = TierPlan::new(source, tier_count)?;
        Self::run(plan, decision, rng)
    }

    fn run(
        plan: TierPlan<'_>,
        decision: RepairDecision,
        rng: &mut dyn RandomSource,
    ) -> ApplicationResult<TierOutcome> {
        let outcome = plan.build(decision, rng)?;
        match &outcome {
            TierOutcome::Built(list) => info!("built {} tiers", list.len()),
            TierOutcome::Declined(notice) => info!("tiering cancelled: {notice}"),
        }
        Ok(outcome)
    }
}
