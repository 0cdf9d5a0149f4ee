use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::inquiry::{ContactDetails, Inquiry, InquiryId};
use crate::tenant::{AgencyId, TenantContext};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProspectId(pub Uuid);

/// Contact record materialized when an inquiry is promoted into the
/// pipeline. One prospect per promotion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prospect {
    pub id: ProspectId,
    pub agency_id: AgencyId,
    pub contact: ContactDetails,
    pub inquiry_id: InquiryId,
    pub created_at: DateTime<Utc>,
}

impl Prospect {
    pub fn from_inquiry(ctx: &TenantContext, inquiry: &Inquiry, now: DateTime<Utc>) -> Self {
        Self {
            id: ProspectId(Uuid::new_v4()),
            agency_id: ctx.agency_id,
            contact: inquiry.contact.clone(),
            inquiry_id: inquiry.id.clone(),
            created_at: now,
        }
    }
}
