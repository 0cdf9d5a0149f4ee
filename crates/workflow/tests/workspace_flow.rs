//! End-to-end pass over one tenant: intake, promotion, stage movement,
//! ledger, review, and the derived funnel numbers, all against a shared
//! in-memory cache.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use coverline_core::analytics::{funnel_from, PipelineKpis};
use coverline_core::domain::analysis::{AnalysisItem, AnalysisResult};
use coverline_core::domain::finding::{CustomerId, FindingKind};
use coverline_core::domain::inquiry::{ContactDetails, Inquiry, InquiryId, InquiryPurpose};
use coverline_core::domain::opportunity::{Opportunity, Stage};
use coverline_core::tenant::{AgencyId, AgentId, SessionPrincipal};
use coverline_store::{Collection, CollectionKey, InMemoryStore};
use coverline_workflow::{
    check_conversions, PipelineService, ReviewDecision, ReviewService,
};

fn inquiry(id: &str, purpose: InquiryPurpose) -> Inquiry {
    Inquiry {
        id: InquiryId(id.to_string()),
        contact: ContactDetails {
            name: format!("Contact {id}"),
            email: format!("{id}@example.com"),
            phone: None,
        },
        source: "web".to_string(),
        purpose,
        policy_interest: "household".to_string(),
        details: None,
        consent_given: true,
        created_at: Utc::now(),
    }
}

#[tokio::test]
async fn full_tenant_flow_from_intake_to_funnel() {
    let store = Arc::new(InMemoryStore::default());
    let pipeline = PipelineService::new(Arc::clone(&store));
    let review = ReviewService::new(Arc::clone(&store));
    let principal =
        SessionPrincipal::authenticated(AgencyId(Uuid::new_v4()), AgentId(Uuid::new_v4()));
    let ctx = principal.tenant().expect("tenant");

    // Two inbound inquiries land in the cache.
    let inquiries =
        vec![inquiry("i1", InquiryPurpose::QuoteRequest), inquiry("i2", InquiryPurpose::General)];
    let inquiry_collection: Collection<Inquiry> =
        Collection::new(CollectionKey::inquiries(&ctx.agency_id));
    inquiry_collection.write(store.as_ref(), &inquiries).await.expect("seed inquiries");

    // Promote the quote request; the other inquiry stays unassigned.
    let outcome = pipeline
        .promote(&principal, &inquiries[0])
        .await
        .expect("promote")
        .expect("outcome");
    let open = pipeline.unassigned_inquiries(&principal).await.expect("unassigned");
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].id.0, "i2");

    // Work the deal to a win, with a value picked up along the way.
    let opportunity_collection: Collection<Opportunity> =
        Collection::new(CollectionKey::opportunities(&ctx.agency_id));
    let mut deals = opportunity_collection.read(store.as_ref()).await.expect("read deals");
    deals[0].value = Decimal::new(1_800, 0);
    opportunity_collection.write(store.as_ref(), &deals).await.expect("write deals");

    let id = outcome.opportunity.id;
    pipeline.transition(&principal, id, Stage::Contacted).await.expect("to contacted");
    pipeline.transition(&principal, id, Stage::Proposal).await.expect("to proposal");
    pipeline.mark_won(&principal, id).await.expect("mark won").expect("won");

    // Ledger and pipeline agree.
    let deals = opportunity_collection.read(store.as_ref()).await.expect("read deals");
    let conversions = pipeline.ledger().entries(&ctx).await.expect("conversions");
    assert_eq!(conversions.len(), 1);
    assert_eq!(conversions[0].value, Decimal::new(1_800, 0));
    assert!(check_conversions(&deals, &conversions).is_consistent());

    // Derived numbers line up with what happened.
    let kpis = PipelineKpis::compute(&inquiries, &deals);
    assert_eq!(kpis.new_leads, 1);
    assert_eq!(kpis.proposals_sent, 1);
    assert_eq!(kpis.won_count, 1);
    assert_eq!(kpis.won_value, Decimal::new(1_800, 0));
    assert_eq!(kpis.conversion_rate, 100.0);

    let stages = funnel_from(&inquiries, &deals);
    assert_eq!(stages[0].value, 2);
    assert_eq!(stages[1].conversion_pct, 50.0);
    assert_eq!(stages[2].conversion_pct, 100.0);

    // The review lane runs independently of the pipeline.
    let analysis = AnalysisResult {
        gaps: vec![AnalysisItem {
            area: "liability ceiling".to_string(),
            recommendation: "raise the ceiling".to_string(),
            ..AnalysisItem::default()
        }],
        upsell_opportunities: vec![AnalysisItem {
            area: "contents limit".to_string(),
            recommendation: "offer the extended limit".to_string(),
            cost: Some("€240/year".to_string()),
            ..AnalysisItem::default()
        }],
        cross_sell_opportunities: Vec::new(),
    };
    let findings = review
        .ingest_analysis(&principal, &CustomerId("cust-1".to_string()), "run-9", &analysis)
        .await
        .expect("ingest");
    assert_eq!(findings.len(), 2);

    let upsell = findings.iter().find(|f| f.kind == FindingKind::Upsell).expect("upsell");
    review
        .set_status(&principal, upsell.id, ReviewDecision::Verified)
        .await
        .expect("verify")
        .expect("updated");

    let counts = review.verified_opportunity_counts(&principal).await.expect("counts");
    assert_eq!((counts.upsell, counts.cross_sell), (1, 0));
}
