//! Tenant partition: every read and write in the workspace is scoped to one
//! agency, and operations that cannot resolve one must degrade to a no-op
//! instead of running un-scoped.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgencyId(pub Uuid);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgentId(pub Uuid);

impl fmt::Display for AgencyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fully resolved scope for a mutation: which agency owns the data and which
/// agent is acting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TenantContext {
    pub agency_id: AgencyId,
    pub agent_id: AgentId,
}

/// The authenticated principal as handed over by the session layer. During
/// session bootstrap either id may still be absent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionPrincipal {
    pub agency_id: Option<AgencyId>,
    pub agent_id: Option<AgentId>,
}

impl SessionPrincipal {
    pub fn authenticated(agency_id: AgencyId, agent_id: AgentId) -> Self {
        Self { agency_id: Some(agency_id), agent_id: Some(agent_id) }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Resolve the tenant scope, or `None` when the session is not ready yet.
    pub fn tenant(&self) -> Option<TenantContext> {
        match (self.agency_id, self.agent_id) {
            (Some(agency_id), Some(agent_id)) => Some(TenantContext { agency_id, agent_id }),
            _ => None,
        }
    }
}
