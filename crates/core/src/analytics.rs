//! Funnel and KPI derivation. Pure functions over already-loaded
//! collections; nothing here touches storage or holds state.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::inquiry::Inquiry;
use crate::domain::opportunity::{Opportunity, Stage};
use crate::intake;

/// Headline pipeline numbers for a tenant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PipelineKpis {
    pub new_leads: usize,
    pub proposals_sent: usize,
    pub won_count: usize,
    pub won_value: Decimal,
    pub conversion_rate: f64,
}

impl PipelineKpis {
    pub fn compute(inquiries: &[Inquiry], opportunities: &[Opportunity]) -> Self {
        let new_leads = intake::unassigned(inquiries, opportunities).len();

        // A deal that ever reached proposal counts as a sent proposal, no
        // matter where it ended up.
        let proposals_sent = opportunities
            .iter()
            .filter(|o| matches!(o.stage, Stage::Proposal | Stage::Won | Stage::Lost))
            .count();

        let won: Vec<&Opportunity> =
            opportunities.iter().filter(|o| o.stage == Stage::Won).collect();
        let won_count = won.len();
        let won_value = won.iter().map(|o| o.value).sum();

        let conversion_rate = if opportunities.is_empty() {
            0.0
        } else {
            won_count as f64 / opportunities.len() as f64 * 100.0
        };

        Self { new_leads, proposals_sent, won_count, won_value, conversion_rate }
    }
}

/// One rung of the leads -> quotes -> bound-policies funnel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FunnelStage {
    pub label: &'static str,
    pub value: usize,
    pub conversion_pct: f64,
}

/// Build the three-stage funnel. Each stage's percentage is relative to the
/// stage immediately before it; an empty preceding stage reports 100 rather
/// than dividing by zero.
pub fn funnel(leads: usize, quotes_issued: usize, policies_bound: usize) -> Vec<FunnelStage> {
    vec![
        FunnelStage { label: "leads", value: leads, conversion_pct: 100.0 },
        FunnelStage {
            label: "quotes_issued",
            value: quotes_issued,
            conversion_pct: stage_conversion_pct(quotes_issued, leads),
        },
        FunnelStage {
            label: "policies_bound",
            value: policies_bound,
            conversion_pct: stage_conversion_pct(policies_bound, quotes_issued),
        },
    ]
}

/// Funnel derived straight from the tenant collections: every inquiry is a
/// lead, proposals-or-beyond are issued quotes, won deals are bound policies.
pub fn funnel_from(inquiries: &[Inquiry], opportunities: &[Opportunity]) -> Vec<FunnelStage> {
    let kpis = PipelineKpis::compute(inquiries, opportunities);
    funnel(inquiries.len(), kpis.proposals_sent, kpis.won_count)
}

fn stage_conversion_pct(value: usize, previous: usize) -> f64 {
    if previous == 0 {
        100.0
    } else {
        value as f64 / previous as f64 * 100.0
    }
}
