//! Lead intake filtering: which inbound inquiries still need an owner, and
//! the secondary views layered on top of that set. Pure functions, no I/O.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, Utc};

use crate::domain::inquiry::{Inquiry, InquiryId, InquiryPurpose};
use crate::domain::opportunity::Opportunity;

/// Default window for the "hot" classification.
pub const DEFAULT_HOT_WINDOW_HOURS: i64 = 24;

/// Default source tag for the referral view.
pub const DEFAULT_REFERRAL_SOURCE: &str = "referral";

/// Inquiries that have not been promoted into the pipeline yet, newest
/// first. An inquiry is pipelined as soon as any opportunity references it.
pub fn unassigned<'a>(
    inquiries: &'a [Inquiry],
    opportunities: &[Opportunity],
) -> Vec<&'a Inquiry> {
    let pipelined: HashSet<&InquiryId> =
        opportunities.iter().map(|opportunity| &opportunity.inquiry_id).collect();

    let mut open: Vec<&Inquiry> =
        inquiries.iter().filter(|inquiry| !pipelined.contains(&inquiry.id)).collect();
    open.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    open
}

/// View filter: recently created or explicitly asking for a quote.
/// Non-destructive; membership in `unassigned` is unchanged.
pub fn hot<'a>(
    inquiries: &[&'a Inquiry],
    now: DateTime<Utc>,
    window_hours: i64,
) -> Vec<&'a Inquiry> {
    let cutoff = now - Duration::hours(window_hours);
    inquiries
        .iter()
        .filter(|inquiry| {
            inquiry.created_at >= cutoff || inquiry.purpose == InquiryPurpose::QuoteRequest
        })
        .copied()
        .collect()
}

/// View filter: inquiries whose source equals the referral tag.
pub fn referral<'a>(inquiries: &[&'a Inquiry], referral_source: &str) -> Vec<&'a Inquiry> {
    inquiries.iter().filter(|inquiry| inquiry.source == referral_source).copied().collect()
}

/// Inquiry ids referenced by more than one opportunity. The engine never
/// self-heals this; the check exists so the condition is detectable.
pub fn duplicate_promotions(opportunities: &[Opportunity]) -> Vec<&InquiryId> {
    let mut counts: HashMap<&InquiryId, usize> = HashMap::new();
    for opportunity in opportunities {
        *counts.entry(&opportunity.inquiry_id).or_insert(0) += 1;
    }

    let mut duplicates: Vec<&InquiryId> =
        counts.into_iter().filter(|(_, count)| *count > 1).map(|(id, _)| id).collect();
    duplicates.sort_by(|a, b| a.0.cmp(&b.0));
    duplicates
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use crate::domain::inquiry::{ContactDetails, Inquiry, InquiryId, InquiryPurpose};
    use crate::domain::opportunity::{Opportunity, OpportunityId, Stage};
    use crate::domain::prospect::ProspectId;
    use crate::tenant::{AgencyId, AgentId};

    use super::{duplicate_promotions, hot, referral, unassigned};

    fn inquiry(id: &str, age_hours: i64, purpose: InquiryPurpose, source: &str) -> Inquiry {
        Inquiry {
            id: InquiryId(id.to_string()),
            contact: ContactDetails {
                name: format!("Contact {id}"),
                email: format!("{id}@example.com"),
                phone: None,
            },
            source: source.to_string(),
            purpose,
            policy_interest: "household".to_string(),
            details: None,
            consent_given: true,
            created_at: Utc::now() - Duration::hours(age_hours),
        }
    }

    fn opportunity_for(inquiry_id: &str) -> Opportunity {
        let now = Utc::now();
        Opportunity {
            id: OpportunityId(Uuid::new_v4()),
            title: "pipelined".to_string(),
            value: Decimal::ZERO,
            prospect_id: ProspectId(Uuid::new_v4()),
            inquiry_id: InquiryId(inquiry_id.to_string()),
            stage: Stage::New,
            follow_up_on: None,
            agent_id: AgentId(Uuid::new_v4()),
            agency_id: AgencyId(Uuid::new_v4()),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn unassigned_returns_unpipelined_inquiries_newest_first() {
        let inquiries = vec![
            inquiry("older", 40, InquiryPurpose::General, "web"),
            inquiry("newest", 1, InquiryPurpose::General, "web"),
            inquiry("middle", 10, InquiryPurpose::General, "web"),
        ];

        let open = unassigned(&inquiries, &[]);
        let ids: Vec<&str> = open.iter().map(|inquiry| inquiry.id.0.as_str()).collect();
        assert_eq!(ids, vec!["newest", "middle", "older"]);
    }

    #[test]
    fn promotion_removes_an_inquiry_from_the_unassigned_set() {
        let inquiries = vec![inquiry("i1", 2, InquiryPurpose::QuoteRequest, "web")];

        assert_eq!(unassigned(&inquiries, &[]).len(), 1);

        let promoted = opportunity_for("i1");
        assert!(unassigned(&inquiries, &[promoted]).is_empty());
    }

    #[test]
    fn empty_inputs_yield_empty_output() {
        assert!(unassigned(&[], &[]).is_empty());
        assert!(unassigned(&[], &[opportunity_for("i1")]).is_empty());
    }

    #[test]
    fn hot_matches_recent_or_quote_requests() {
        let inquiries = vec![
            inquiry("fresh", 2, InquiryPurpose::General, "web"),
            inquiry("stale_quote", 72, InquiryPurpose::QuoteRequest, "web"),
            inquiry("stale_general", 72, InquiryPurpose::General, "web"),
        ];
        let open = unassigned(&inquiries, &[]);

        let hot_ids: Vec<&str> =
            hot(&open, Utc::now(), 24).iter().map(|inquiry| inquiry.id.0.as_str()).collect();
        assert!(hot_ids.contains(&"fresh"));
        assert!(hot_ids.contains(&"stale_quote"));
        assert!(!hot_ids.contains(&"stale_general"));
    }

    #[test]
    fn referral_matches_the_source_tag_only() {
        let inquiries = vec![
            inquiry("ref", 2, InquiryPurpose::General, "referral"),
            inquiry("web", 2, InquiryPurpose::General, "web"),
        ];
        let open = unassigned(&inquiries, &[]);

        let referred = referral(&open, "referral");
        assert_eq!(referred.len(), 1);
        assert_eq!(referred[0].id.0, "ref");
    }

    #[test]
    fn duplicate_promotions_surfaces_violated_uniqueness() {
        let opportunities =
            vec![opportunity_for("i1"), opportunity_for("i2"), opportunity_for("i1")];

        let duplicates = duplicate_promotions(&opportunities);
        assert_eq!(duplicates.len(), 1);
        assert_eq!(duplicates[0].0, "i1");
    }
}
