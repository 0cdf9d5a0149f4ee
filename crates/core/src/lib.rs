pub mod analytics;
pub mod config;
pub mod domain;
pub mod errors;
pub mod intake;
pub mod tenant;

pub use analytics::{funnel, funnel_from, FunnelStage, PipelineKpis};
pub use config::{ConfigError, ConfigOverrides, LoadOptions, WorkspaceConfig};
pub use domain::analysis::{AnalysisItem, AnalysisResult};
pub use domain::conversion::{Conversion, ConversionId, ConversionKind};
pub use domain::finding::{CustomerId, Finding, FindingId, FindingKind, FindingStatus, Priority};
pub use domain::inquiry::{ContactDetails, Inquiry, InquiryId, InquiryPurpose};
pub use domain::interaction::{
    Direction, Interaction, InteractionDraft, InteractionId, InteractionKind,
};
pub use domain::opportunity::{Opportunity, OpportunityId, Stage};
pub use domain::prospect::{Prospect, ProspectId};
pub use errors::DomainError;
pub use tenant::{AgencyId, AgentId, SessionPrincipal, TenantContext};
