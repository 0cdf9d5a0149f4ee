use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::inquiry::{Inquiry, InquiryId};
use crate::domain::prospect::ProspectId;
use crate::errors::DomainError;
use crate::tenant::{AgencyId, AgentId, TenantContext};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OpportunityId(pub Uuid);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    New,
    Contacted,
    Proposal,
    Won,
    Lost,
}

impl Stage {
    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Won | Stage::Lost)
    }

    /// Full transition table. A deal moves freely between the open stages
    /// and into either terminal stage; `won` and `lost` accept nothing, so a
    /// closed deal can never be reopened. Same-stage moves are excluded;
    /// callers treat those as "no change".
    pub fn can_transition_to(self, next: Stage) -> bool {
        matches!(
            (self, next),
            (Stage::New, Stage::Contacted | Stage::Proposal | Stage::Won | Stage::Lost)
                | (Stage::Contacted, Stage::New | Stage::Proposal | Stage::Won | Stage::Lost)
                | (Stage::Proposal, Stage::New | Stage::Contacted | Stage::Won | Stage::Lost)
        )
    }
}

/// The pipeline unit: one deal, tracked from promotion to a terminal stage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    pub id: OpportunityId,
    pub title: String,
    pub value: Decimal,
    pub prospect_id: ProspectId,
    pub inquiry_id: InquiryId,
    pub stage: Stage,
    pub follow_up_on: Option<NaiveDate>,
    pub agent_id: AgentId,
    pub agency_id: AgencyId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Opportunity {
    /// Build the opportunity created by promoting an inquiry: stage `new`,
    /// value zero, linked to the inquiry and the prospect it materialized.
    pub fn promoted_from(
        ctx: &TenantContext,
        inquiry: &Inquiry,
        prospect_id: ProspectId,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: OpportunityId(Uuid::new_v4()),
            title: format!("{} - {}", inquiry.contact.name, inquiry.policy_interest),
            value: Decimal::ZERO,
            prospect_id,
            inquiry_id: inquiry.id.clone(),
            stage: Stage::New,
            follow_up_on: None,
            agent_id: ctx.agent_id,
            agency_id: ctx.agency_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn transition_to(&mut self, next: Stage, now: DateTime<Utc>) -> Result<(), DomainError> {
        if !self.stage.can_transition_to(next) {
            return Err(DomainError::InvalidStageTransition { from: self.stage, to: next });
        }
        self.stage = next;
        self.updated_at = now;
        Ok(())
    }
}
