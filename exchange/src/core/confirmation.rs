//! Confirmation page controller
//!
//! State lives behind an async mutex so that overlapping confirm calls on
//! one page instance see each other: the first moves the page to
//! `Submitting` before awaiting the backend, later ones find it there and
//! are ignored. At most one submission is in flight per controller, even
//! across a back-and-reload, and only the submission that is still current
//! may settle the page. A submission is never retried by the client.

use tokio::sync::Mutex;

use shared::{
    DonatePayload, Navigation, PageId, PendingTransaction, ReceivePayload, SubmissionFailure, TransactionKind,
    logging, page_debug, page_info, page_warn,
};
use crate::core::codec;
use crate::traits::TransactionBackend;
use crate::types::{ConfirmOutcome, ConfirmationIssue, ConfirmationState};

pub const CONSENT_MESSAGE: &str = "Please agree to give up ownership of this book before donating.";

/// Page state plus the bookkeeping for the outstanding submission
#[derive(Debug)]
struct PageState {
    current: ConfirmationState,
    /// Id of the latest submission; bumped whenever one starts or is abandoned
    submission: u64,
    in_flight: bool,
}

/// Controller for `/confirm-donate` and `/confirm`
pub struct ConfirmationController<B>
where
    B: TransactionBackend,
{
    kind: TransactionKind,
    backend: B,
    state: Mutex<PageState>,
}

impl<B> ConfirmationController<B>
where
    B: TransactionBackend,
{
    /// Create a controller in `Loading` for the given page kind
    pub fn new(kind: TransactionKind, backend: B) -> Self {
        Self {
            kind,
            backend,
            state: Mutex::new(PageState {
                current: ConfirmationState::Loading,
                submission: 0,
                in_flight: false,
            }),
        }
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    fn page(&self) -> PageId {
        PageId::confirmation(self.kind)
    }

    /// Donations need explicit consent; receiving does not
    pub fn requires_consent(&self) -> bool {
        self.kind == TransactionKind::Donate
    }

    /// Snapshot of the current state
    pub async fn state(&self) -> ConfirmationState {
        self.state.lock().await.current.clone()
    }

    /// Decode the token once the router is ready; resets consent
    ///
    /// Ignored while a submission is outstanding on this page.
    pub async fn load(&self, token: Option<&str>) -> ConfirmationState {
        let next = match codec::decode(token) {
            Ok(transaction) => match self.validate(&transaction) {
                Ok(()) => ConfirmationState::Ready {
                    transaction,
                    consent: false,
                    error: None,
                },
                Err(issue) => {
                    page_warn!(self.page(), issue = ?issue, "Decoded transaction rejected");
                    ConfirmationState::Error(issue)
                }
            },
            Err(error) => {
                page_warn!(self.page(), error = %error, "Transaction token unusable");
                ConfirmationState::Error(ConfirmationIssue::Token(error))
            }
        };

        let mut state = self.state.lock().await;
        if matches!(state.current, ConfirmationState::Submitting { .. }) {
            page_debug!(self.page(), "Reload ignored while submitting");
            return state.current.clone();
        }
        if let Some(transaction) = next.transaction() {
            page_info!(self.page(), "📋 Loaded {} of '{}'", transaction.kind, transaction.book.title);
        }
        state.current = next.clone();
        next
    }

    /// Load from the page's query string
    pub async fn load_query(&self, query: &str) -> ConfirmationState {
        self.load(codec::token_from_query(query)).await
    }

    fn validate(&self, transaction: &PendingTransaction) -> Result<(), ConfirmationIssue> {
        if transaction.kind != self.kind {
            return Err(ConfirmationIssue::WrongKind {
                expected: self.kind,
                found: transaction.kind,
            });
        }
        match self.kind {
            TransactionKind::Receive if !transaction.book.has_isbn() => Err(ConfirmationIssue::Incomplete {
                kind: self.kind,
                field: "isbn",
            }),
            TransactionKind::Donate if !transaction.book.has_title() => Err(ConfirmationIssue::Incomplete {
                kind: self.kind,
                field: "title",
            }),
            _ => Ok(()),
        }
    }

    /// Tick or untick the ownership consent box; only meaningful while Ready
    pub async fn set_consent(&self, given: bool) {
        let mut state = self.state.lock().await;
        if let ConfirmationState::Ready { consent, .. } = &mut state.current {
            *consent = given;
        }
    }

    /// Whether the confirm button is enabled
    pub async fn can_confirm(&self) -> bool {
        let state = self.state.lock().await;
        match &state.current {
            ConfirmationState::Ready { consent, .. } => {
                !state.in_flight && (*consent || !self.requires_consent())
            }
            _ => false,
        }
    }

    /// Submit the decoded transaction exactly once
    pub async fn confirm(&self) -> ConfirmOutcome {
        let (transaction, consent, submission) = {
            let mut state = self.state.lock().await;
            let ready = match &state.current {
                ConfirmationState::Ready { transaction, consent, .. } => Some((transaction.clone(), *consent)),
                _ => None,
            };
            let Some((transaction, consent)) = ready else {
                page_debug!(self.page(), "Confirm ignored in state {}", state.current.name());
                return ConfirmOutcome::Ignored;
            };
            if state.in_flight {
                // an abandoned submission from an earlier load has not settled yet
                page_debug!(self.page(), "Confirm ignored while an earlier submission is outstanding");
                return ConfirmOutcome::Ignored;
            }

            if self.requires_consent() && !consent {
                if let ConfirmationState::Ready { error, .. } = &mut state.current {
                    *error = Some(CONSENT_MESSAGE.to_string());
                }
                return ConfirmOutcome::ConsentRequired;
            }

            state.submission += 1;
            state.in_flight = true;
            state.current = ConfirmationState::Submitting {
                transaction: transaction.clone(),
                consent,
            };
            (transaction, consent, state.submission)
        };

        page_info!(self.page(), "📤 Submitting {} of '{}'", self.kind, transaction.book.title);
        let result = self.submit(&transaction).await;

        let mut state = self.state.lock().await;
        state.in_flight = false;
        let current = state.submission == submission && matches!(state.current, ConfirmationState::Submitting { .. });
        if !current {
            page_debug!(self.page(), "Discarding result of abandoned submission {}", submission);
            return match result {
                Ok(()) => ConfirmOutcome::Submitted,
                Err(failure) => ConfirmOutcome::Failed(failure),
            };
        }

        match result {
            Ok(()) => {
                logging::log_success(self.page(), &format!("{} recorded", self.kind));
                state.current = ConfirmationState::Submitted;
                ConfirmOutcome::Submitted
            }
            Err(failure) => {
                logging::log_error(self.page(), "Submission", &failure);
                state.current = ConfirmationState::Ready {
                    transaction,
                    consent,
                    error: Some(failure.user_message()),
                };
                ConfirmOutcome::Failed(failure)
            }
        }
    }

    /// Issue the single mutating call; the transient origin never leaves the client
    async fn submit(&self, transaction: &PendingTransaction) -> Result<(), SubmissionFailure> {
        match self.kind {
            TransactionKind::Donate => {
                let payload = DonatePayload::from(transaction.clone().into_book());
                self.backend.donate(payload).await
            }
            TransactionKind::Receive => {
                let isbn = transaction.book.isbn().unwrap_or_default().to_string();
                self.backend.receive(ReceivePayload { isbn }).await
            }
        }
    }

    /// Leave the page; in-memory state is discarded without a backend call
    pub async fn back(&self) -> Navigation {
        let mut state = self.state.lock().await;
        page_debug!(self.page(), "Back from state {}", state.current.name());
        if state.in_flight {
            state.submission += 1;
        }
        state.current = ConfirmationState::Loading;
        Navigation::Back
    }
}
