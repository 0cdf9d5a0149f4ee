use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use coverline_core::domain::analysis::AnalysisResult;
use coverline_core::domain::finding::{
    CustomerId, Finding, FindingId, FindingKind, FindingStatus,
};
use coverline_core::tenant::{SessionPrincipal, TenantContext};
use coverline_store::{Collection, CollectionKey, LocalStore};

use crate::errors::WorkflowResult;

/// Reviewer verdict on a pending finding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReviewDecision {
    Verified,
    Rejected,
}

impl ReviewDecision {
    fn status(self) -> FindingStatus {
        match self {
            ReviewDecision::Verified => FindingStatus::Verified,
            ReviewDecision::Rejected => FindingStatus::Rejected,
        }
    }
}

/// Content correction for a finding; leaves the review status untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContentEdit {
    pub title: Option<String>,
    pub description: Option<String>,
    pub benefit: Option<String>,
}

/// Verified findings that represent revenue, by kind. Gap findings are
/// informational and never counted here.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VerifiedCounts {
    pub upsell: usize,
    pub cross_sell: usize,
}

/// Review lifecycle for AI-surfaced account findings, independent of the
/// opportunity pipeline. Findings enter in a batch per analysis run and are
/// verified or rejected one by one.
pub struct ReviewService<S> {
    store: Arc<S>,
}

impl<S> ReviewService<S>
where
    S: LocalStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    fn findings(ctx: &TenantContext) -> Collection<Finding> {
        Collection::new(CollectionKey::findings(&ctx.agency_id))
    }

    /// Materialize one pending finding per analysis item and append the
    /// whole batch in a single store write.
    pub async fn ingest_analysis(
        &self,
        principal: &SessionPrincipal,
        customer_id: &CustomerId,
        analysis_id: &str,
        result: &AnalysisResult,
    ) -> WorkflowResult<Vec<Finding>> {
        let Some(ctx) = principal.tenant() else {
            warn!(analysis = analysis_id, "analysis ingest skipped: no tenant context");
            return Ok(Vec::new());
        };

        let now = Utc::now();
        let new_findings: Vec<Finding> = result
            .categorized()
            .map(|(kind, item)| {
                Finding::from_analysis_item(&ctx, customer_id, analysis_id, kind, item, now)
            })
            .collect();

        if new_findings.is_empty() {
            return Ok(Vec::new());
        }

        let collection = Self::findings(&ctx);
        let mut all = collection.read(self.store.as_ref()).await?;
        all.extend(new_findings.iter().cloned());
        collection.write(self.store.as_ref(), &all).await?;

        info!(
            agency = %ctx.agency_id,
            customer = %customer_id.0,
            analysis = analysis_id,
            count = new_findings.len(),
            "analysis findings ingested"
        );
        Ok(new_findings)
    }

    /// Apply a reviewer decision. Pure field replacement; repeating the
    /// same decision is harmless.
    pub async fn set_status(
        &self,
        principal: &SessionPrincipal,
        finding_id: FindingId,
        decision: ReviewDecision,
    ) -> WorkflowResult<Option<Finding>> {
        let Some(ctx) = principal.tenant() else {
            warn!(finding = %finding_id.0, "review skipped: no tenant context");
            return Ok(None);
        };

        let collection = Self::findings(&ctx);
        let mut all = collection.read(self.store.as_ref()).await?;
        let Some(finding) = all.iter_mut().find(|finding| finding.id == finding_id) else {
            warn!(
                agency = %ctx.agency_id,
                finding = %finding_id.0,
                "review skipped: unknown finding"
            );
            return Ok(None);
        };

        finding.status = decision.status();
        finding.updated_at = Utc::now();
        let updated = finding.clone();
        collection.write(self.store.as_ref(), &all).await?;

        info!(
            agency = %ctx.agency_id,
            finding = %finding_id.0,
            status = ?updated.status,
            "finding reviewed"
        );
        Ok(Some(updated))
    }

    /// Correct a finding's wording without touching its review status.
    pub async fn edit_content(
        &self,
        principal: &SessionPrincipal,
        finding_id: FindingId,
        edit: ContentEdit,
    ) -> WorkflowResult<Option<Finding>> {
        let Some(ctx) = principal.tenant() else {
            warn!(finding = %finding_id.0, "edit skipped: no tenant context");
            return Ok(None);
        };

        let collection = Self::findings(&ctx);
        let mut all = collection.read(self.store.as_ref()).await?;
        let Some(finding) = all.iter_mut().find(|finding| finding.id == finding_id) else {
            warn!(
                agency = %ctx.agency_id,
                finding = %finding_id.0,
                "edit skipped: unknown finding"
            );
            return Ok(None);
        };

        if let Some(title) = edit.title {
            finding.title = title;
        }
        if let Some(description) = edit.description {
            finding.description = description;
        }
        if let Some(benefit) = edit.benefit {
            finding.benefit = Some(benefit);
        }
        finding.updated_at = Utc::now();
        let updated = finding.clone();
        collection.write(self.store.as_ref(), &all).await?;

        Ok(Some(updated))
    }

    /// Count verified upsell and cross-sell findings for the tenant.
    pub async fn verified_opportunity_counts(
        &self,
        principal: &SessionPrincipal,
    ) -> WorkflowResult<VerifiedCounts> {
        let Some(ctx) = principal.tenant() else {
            return Ok(VerifiedCounts::default());
        };

        let all = Self::findings(&ctx).read(self.store.as_ref()).await?;
        let mut counts = VerifiedCounts::default();
        for finding in all.iter().filter(|finding| finding.status == FindingStatus::Verified) {
            match finding.kind {
                FindingKind::Upsell => counts.upsell += 1,
                FindingKind::CrossSell => counts.cross_sell += 1,
                FindingKind::Gap => {}
            }
        }
        Ok(counts)
    }

    /// All findings for the tenant, in storage order.
    pub async fn findings_for(&self, principal: &SessionPrincipal) -> WorkflowResult<Vec<Finding>> {
        let Some(ctx) = principal.tenant() else {
            return Ok(Vec::new());
        };
        Ok(Self::findings(&ctx).read(self.store.as_ref()).await?)
    }
}
