//! Cross-entity audit over a tenant's opportunities and conversion ledger.
//! Detection only: the engine never repairs what it finds here.

use coverline_core::domain::conversion::Conversion;
use coverline_core::domain::inquiry::InquiryId;
use coverline_core::domain::opportunity::{Opportunity, OpportunityId, Stage};
use coverline_core::intake;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsistencyReport {
    /// Inquiry ids promoted into more than one opportunity.
    pub duplicate_attributions: Vec<InquiryId>,
    /// Won opportunities without exactly one matching ledger entry.
    pub unmatched_won: Vec<OpportunityId>,
    /// Ledger entries whose attribution does not point at a won
    /// opportunity.
    pub stray_conversions: Vec<InquiryId>,
}

impl ConsistencyReport {
    pub fn is_consistent(&self) -> bool {
        self.duplicate_attributions.is_empty()
            && self.unmatched_won.is_empty()
            && self.stray_conversions.is_empty()
    }
}

/// Check that every won opportunity has exactly one conversion with matching
/// value and attribution, that nothing else produced a conversion, and that
/// no inquiry was promoted twice.
pub fn check_conversions(
    opportunities: &[Opportunity],
    conversions: &[Conversion],
) -> ConsistencyReport {
    let duplicate_attributions: Vec<InquiryId> =
        intake::duplicate_promotions(opportunities).into_iter().cloned().collect();

    let mut unmatched_won = Vec::new();
    for opportunity in opportunities.iter().filter(|o| o.stage == Stage::Won) {
        let matching = conversions
            .iter()
            .filter(|c| c.attribution_id == opportunity.inquiry_id && c.value == opportunity.value)
            .count();
        if matching != 1 {
            unmatched_won.push(opportunity.id);
        }
    }

    let mut stray_conversions = Vec::new();
    for conversion in conversions {
        let backs_a_won_deal = opportunities
            .iter()
            .any(|o| o.stage == Stage::Won && o.inquiry_id == conversion.attribution_id);
        if !backs_a_won_deal {
            stray_conversions.push(conversion.attribution_id.clone());
        }
    }

    ConsistencyReport { duplicate_attributions, unmatched_won, stray_conversions }
}
