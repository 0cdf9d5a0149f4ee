use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use coverline_core::domain::conversion::Conversion;
use coverline_core::domain::inquiry::Inquiry;
use coverline_core::domain::interaction::{Interaction, InteractionDraft};
use coverline_core::domain::opportunity::{Opportunity, OpportunityId, Stage};
use coverline_core::domain::prospect::Prospect;
use coverline_core::intake;
use coverline_core::tenant::{SessionPrincipal, TenantContext};
use coverline_store::{Collection, CollectionKey, LocalStore};

use crate::errors::WorkflowResult;
use crate::ledger::ConversionLedger;

/// What a successful promotion materialized.
#[derive(Clone, Debug, PartialEq)]
pub struct PromotionOutcome {
    pub prospect: Prospect,
    pub opportunity: Opportunity,
}

/// The opportunity stage machine. Owns every pipeline mutation and the
/// conversion side effect of winning a deal.
///
/// Every operation resolves the tenant scope first and degrades to a no-op
/// when the session has none; none of the degraded paths is an error.
pub struct PipelineService<S> {
    store: Arc<S>,
    ledger: ConversionLedger<S>,
}

impl<S> PipelineService<S>
where
    S: LocalStore,
{
    pub fn new(store: Arc<S>) -> Self {
        let ledger = ConversionLedger::new(Arc::clone(&store));
        Self { store, ledger }
    }

    pub fn ledger(&self) -> &ConversionLedger<S> {
        &self.ledger
    }

    fn inquiries(ctx: &TenantContext) -> Collection<Inquiry> {
        Collection::new(CollectionKey::inquiries(&ctx.agency_id))
    }

    fn prospects(ctx: &TenantContext) -> Collection<Prospect> {
        Collection::new(CollectionKey::prospects(&ctx.agency_id))
    }

    fn opportunities(ctx: &TenantContext) -> Collection<Opportunity> {
        Collection::new(CollectionKey::opportunities(&ctx.agency_id))
    }

    fn interactions(ctx: &TenantContext) -> Collection<Interaction> {
        Collection::new(CollectionKey::interactions(&ctx.agency_id))
    }

    /// Pull an inquiry into the pipeline: materialize a prospect from its
    /// contact block, then open an opportunity at `new` with value zero.
    ///
    /// Promoting the same inquiry twice is a caller error; the resulting
    /// duplicate stays visible through [`intake::duplicate_promotions`].
    pub async fn promote(
        &self,
        principal: &SessionPrincipal,
        inquiry: &Inquiry,
    ) -> WorkflowResult<Option<PromotionOutcome>> {
        let Some(ctx) = principal.tenant() else {
            warn!(inquiry = %inquiry.id.0, "promotion skipped: no tenant context");
            return Ok(None);
        };

        let now = Utc::now();
        let prospect = Prospect::from_inquiry(&ctx, inquiry, now);
        let opportunity = Opportunity::promoted_from(&ctx, inquiry, prospect.id.clone(), now);

        let prospects = Self::prospects(&ctx);
        let mut all_prospects = prospects.read(self.store.as_ref()).await?;
        all_prospects.push(prospect.clone());
        prospects.write(self.store.as_ref(), &all_prospects).await?;

        let opportunities = Self::opportunities(&ctx);
        let mut all_opportunities = opportunities.read(self.store.as_ref()).await?;
        all_opportunities.push(opportunity.clone());
        opportunities.write(self.store.as_ref(), &all_opportunities).await?;

        info!(
            agency = %ctx.agency_id,
            inquiry = %inquiry.id.0,
            opportunity = %opportunity.id.0,
            "inquiry promoted into pipeline"
        );
        Ok(Some(PromotionOutcome { prospect, opportunity }))
    }

    /// Move an opportunity to `next`. Unknown ids and forbidden moves are
    /// reported as "no change" (`Ok(None)`), never raised.
    ///
    /// Winning a deal appends a conversion in the same call; when the
    /// ledger write fails the stage write is rolled back so neither side
    /// lands alone.
    pub async fn transition(
        &self,
        principal: &SessionPrincipal,
        opportunity_id: OpportunityId,
        next: Stage,
    ) -> WorkflowResult<Option<Opportunity>> {
        let Some(ctx) = principal.tenant() else {
            warn!(opportunity = %opportunity_id.0, "transition skipped: no tenant context");
            return Ok(None);
        };

        let collection = Self::opportunities(&ctx);
        let mut all = collection.read(self.store.as_ref()).await?;
        let Some(index) = all.iter().position(|o| o.id == opportunity_id) else {
            warn!(
                agency = %ctx.agency_id,
                opportunity = %opportunity_id.0,
                "transition skipped: unknown opportunity"
            );
            return Ok(None);
        };

        let current = all[index].stage;
        if current == next {
            return Ok(None);
        }

        let now = Utc::now();
        let previous = all.clone();
        if let Err(error) = all[index].transition_to(next, now) {
            warn!(
                agency = %ctx.agency_id,
                opportunity = %opportunity_id.0,
                %error,
                "transition rejected"
            );
            return Ok(None);
        }
        let updated = all[index].clone();
        collection.write(self.store.as_ref(), &all).await?;

        if next == Stage::Won {
            let conversion = Conversion::for_won(&ctx, &updated, now);
            if let Err(error) = self.ledger.append(&ctx, conversion).await {
                // Stage change and ledger entry must land together.
                collection.write(self.store.as_ref(), &previous).await?;
                return Err(error.into());
            }
        }

        info!(
            agency = %ctx.agency_id,
            opportunity = %opportunity_id.0,
            from = ?current,
            to = ?next,
            "stage transition applied"
        );
        Ok(Some(updated))
    }

    /// Close a deal as won. The board never drops into a terminal column,
    /// so this is the supported path to `won`.
    pub async fn mark_won(
        &self,
        principal: &SessionPrincipal,
        opportunity_id: OpportunityId,
    ) -> WorkflowResult<Option<Opportunity>> {
        self.transition(principal, opportunity_id, Stage::Won).await
    }

    /// Close a deal as lost. No conversion is recorded.
    pub async fn mark_lost(
        &self,
        principal: &SessionPrincipal,
        opportunity_id: OpportunityId,
    ) -> WorkflowResult<Option<Opportunity>> {
        self.transition(principal, opportunity_id, Stage::Lost).await
    }

    /// Append an immutable interaction record for the acting agent.
    pub async fn log_interaction(
        &self,
        principal: &SessionPrincipal,
        draft: InteractionDraft,
    ) -> WorkflowResult<Option<Interaction>> {
        let Some(ctx) = principal.tenant() else {
            warn!("interaction skipped: no tenant context");
            return Ok(None);
        };

        let interaction = Interaction::record(&ctx, draft, Utc::now());
        let collection = Self::interactions(&ctx);
        let mut all = collection.read(self.store.as_ref()).await?;
        all.push(interaction.clone());
        collection.write(self.store.as_ref(), &all).await?;

        Ok(Some(interaction))
    }

    /// Inbound inquiries not yet promoted, newest first.
    pub async fn unassigned_inquiries(
        &self,
        principal: &SessionPrincipal,
    ) -> WorkflowResult<Vec<Inquiry>> {
        let Some(ctx) = principal.tenant() else {
            return Ok(Vec::new());
        };

        let inquiries = Self::inquiries(&ctx).read(self.store.as_ref()).await?;
        let opportunities = Self::opportunities(&ctx).read(self.store.as_ref()).await?;
        Ok(intake::unassigned(&inquiries, &opportunities).into_iter().cloned().collect())
    }

    /// The "hot" view over the unassigned set: recent, or asking for a
    /// quote.
    pub async fn hot_inquiries(
        &self,
        principal: &SessionPrincipal,
        window_hours: i64,
    ) -> WorkflowResult<Vec<Inquiry>> {
        let open = self.unassigned_inquiries(principal).await?;
        let refs: Vec<&Inquiry> = open.iter().collect();
        Ok(intake::hot(&refs, Utc::now(), window_hours).into_iter().cloned().collect())
    }

    /// The referral view over the unassigned set.
    pub async fn referral_inquiries(
        &self,
        principal: &SessionPrincipal,
        referral_source: &str,
    ) -> WorkflowResult<Vec<Inquiry>> {
        let open = self.unassigned_inquiries(principal).await?;
        let refs: Vec<&Inquiry> = open.iter().collect();
        Ok(intake::referral(&refs, referral_source).into_iter().cloned().collect())
    }
}
