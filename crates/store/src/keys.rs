//! Key derivation for the per-tenant collections. Partitioning happens at
//! the key, so a store cell never mixes agencies.

use std::fmt;

use coverline_core::tenant::AgencyId;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CollectionKey(String);

impl CollectionKey {
    fn scoped(agency_id: &AgencyId, collection: &str) -> Self {
        Self(format!("agency:{}:{collection}", agency_id.0))
    }

    pub fn inquiries(agency_id: &AgencyId) -> Self {
        Self::scoped(agency_id, "inquiries")
    }

    pub fn prospects(agency_id: &AgencyId) -> Self {
        Self::scoped(agency_id, "prospects")
    }

    pub fn opportunities(agency_id: &AgencyId) -> Self {
        Self::scoped(agency_id, "opportunities")
    }

    pub fn interactions(agency_id: &AgencyId) -> Self {
        Self::scoped(agency_id, "interactions")
    }

    pub fn conversions(agency_id: &AgencyId) -> Self {
        Self::scoped(agency_id, "conversions")
    }

    pub fn findings(agency_id: &AgencyId) -> Self {
        Self::scoped(agency_id, "findings")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CollectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
