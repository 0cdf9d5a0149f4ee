use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier assigned by the intake channel, opaque to this core.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InquiryId(pub String);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InquiryPurpose {
    QuoteRequest,
    Consultation,
    PolicyChange,
    General,
}

/// An inbound lead. Created by the intake channel and read-only here;
/// the pipeline only ever references it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inquiry {
    pub id: InquiryId,
    pub contact: ContactDetails,
    pub source: String,
    pub purpose: InquiryPurpose,
    pub policy_interest: String,
    pub details: Option<String>,
    pub consent_given: bool,
    pub created_at: DateTime<Utc>,
}
