use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::inquiry::InquiryId;
use crate::domain::opportunity::Opportunity;
use crate::tenant::{AgencyId, TenantContext};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversionId(pub Uuid);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionKind {
    Won,
}

/// Immutable ledger entry recording a won deal. The attribution id points
/// back at the inquiry that originated the opportunity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Conversion {
    pub id: ConversionId,
    pub agency_id: AgencyId,
    pub date: DateTime<Utc>,
    pub kind: ConversionKind,
    pub value: Decimal,
    pub attribution_id: InquiryId,
}

impl Conversion {
    pub fn for_won(ctx: &TenantContext, opportunity: &Opportunity, now: DateTime<Utc>) -> Self {
        Self {
            id: ConversionId(Uuid::new_v4()),
            agency_id: ctx.agency_id,
            date: now,
            kind: ConversionKind::Won,
            value: opportunity.value,
            attribution_id: opportunity.inquiry_id.clone(),
        }
    }
}
