//! Data models: provider wire shapes, normalized source records, and the
//! per-entry verification aggregate.

mod provider;
mod record;
mod result;

pub use provider::{
    CrossrefAuthor, CrossrefWork, DateParts, HandleData, HandleResponse, HandleValue,
    ScholarAuthor, ScholarExternalIds, ScholarPaper, ScholarSearchResponse,
};
pub use record::{HandleRecord, LookupFailure, SourceMetadata, SourceRecord};
pub use result::{
    ClaimedMetadata, IdentifierSource, Issue, OverallStatus, Verification, VerificationResult,
    overall_status,
};
