use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::tenant::{AgencyId, AgentId, TenantContext};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InteractionId(pub Uuid);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    Call,
    Email,
    Meeting,
    Note,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Inbound,
    Outbound,
}

/// One logged touchpoint with a contact. Append-only: never mutated after
/// creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    pub id: InteractionId,
    pub agency_id: AgencyId,
    pub agent_id: AgentId,
    pub kind: InteractionKind,
    pub direction: Direction,
    pub content: String,
    pub occurred_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied fields for a new interaction record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InteractionDraft {
    pub kind: InteractionKind,
    pub direction: Direction,
    pub content: String,
    pub occurred_at: DateTime<Utc>,
}

impl Interaction {
    pub fn record(ctx: &TenantContext, draft: InteractionDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: InteractionId(Uuid::new_v4()),
            agency_id: ctx.agency_id,
            agent_id: ctx.agent_id,
            kind: draft.kind,
            direction: draft.direction,
            content: draft.content,
            occurred_at: draft.occurred_at,
            created_at: now,
        }
    }
}
