//! Hand-written backends for flow tests that need real timing

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;

use exchange::TransactionBackend;
use shared::{DonatePayload, ReceivePayload, SubmissionFailure};

/// Backend that takes a while to answer and records every call it receives
///
/// Answers are taken from the scripted queue first, then default to success.
#[derive(Clone, Default)]
pub struct SlowBackend {
    delay: Duration,
    calls: Arc<AtomicUsize>,
    in_flight: Arc<AtomicUsize>,
    peak_in_flight: Arc<AtomicUsize>,
    scripted: Arc<Mutex<VecDeque<Result<(), SubmissionFailure>>>>,
    donations: Arc<Mutex<Vec<DonatePayload>>>,
    receipts: Arc<Mutex<Vec<ReceivePayload>>>,
}

#[allow(dead_code)]
impl SlowBackend {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }

    /// Answer the next calls with these results, in order
    pub fn answering(delay: Duration, results: Vec<Result<(), SubmissionFailure>>) -> Self {
        Self {
            delay,
            scripted: Arc::new(Mutex::new(results.into())),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Most calls that were ever outstanding at the same time
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    pub async fn donations(&self) -> Vec<DonatePayload> {
        self.donations.lock().await.clone()
    }

    pub async fn receipts(&self) -> Vec<ReceivePayload> {
        self.receipts.lock().await.clone()
    }

    async fn answer(&self) -> Result<(), SubmissionFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

        let result = self.scripted.lock().await.pop_front().unwrap_or(Ok(()));
        tokio::time::sleep(self.delay).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

#[async_trait]
impl TransactionBackend for SlowBackend {
    async fn donate(&self, payload: DonatePayload) -> Result<(), SubmissionFailure> {
        self.donations.lock().await.push(payload);
        self.answer().await
    }

    async fn receive(&self, payload: ReceivePayload) -> Result<(), SubmissionFailure> {
        self.receipts.lock().await.push(payload);
        self.answer().await
    }
}
