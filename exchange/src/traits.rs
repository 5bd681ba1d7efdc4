//! Collaborator trait definitions for dependency injection
//!
//! Every outbound call a page controller makes goes through one of these
//! traits so controllers can be tested against mocks.

use async_trait::async_trait;

use shared::{BookRecord, DonatePayload, LookupFailure, ReceivePayload, SubmissionFailure};

/// Book metadata catalog
#[mockall::automock]
#[async_trait]
pub trait MetadataLookup: Send + Sync {
    /// Look up candidates by ISBN; no candidate is an empty list, not an error
    async fn lookup_by_identifier(&self, id: &str) -> Result<Vec<BookRecord>, LookupFailure>;

    /// Keyword search; at least one of title/author must be non-empty
    async fn lookup_by_text(
        &self,
        title: Option<String>,
        author: Option<String>,
    ) -> Result<Vec<BookRecord>, LookupFailure>;
}

/// Exchange backend accepting the mutating calls
#[mockall::automock]
#[async_trait]
pub trait TransactionBackend: Send + Sync {
    /// Record a donation
    async fn donate(&self, payload: DonatePayload) -> Result<(), SubmissionFailure>;

    /// Record that a shelved book was taken
    async fn receive(&self, payload: ReceivePayload) -> Result<(), SubmissionFailure>;
}
