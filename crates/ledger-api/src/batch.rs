//! # Batch Pipeline
//!
//! Runs a fixed per-item operation over every element of a batch
//! concurrently and returns one outcome per input, in input order.
//!
//! ## Guarantees
//!
//! - Each item runs in its own spawned task. The task's `JoinHandle` is the
//!   item's result slot; handles are awaited in input order, so output
//!   position `i` always holds item `i` and every slot is filled before the
//!   batch returns.
//! - A panic inside one item is caught at the task boundary and reported as
//!   [`ItemError::ContainedFault`] in that slot only. Siblings continue.
//! - Every item gets a fresh [`RequestId`] and a child cancellation token.
//!   Cancelling the parent token, hitting the batch deadline, or dropping
//!   the batch future (client disconnect) aborts items still in flight;
//!   they report [`ItemError::Cancelled`].
//! - The operation is called at most once per item.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::error::{ErrorBody, ItemError};
use crate::request_id::RequestId;

/// Per-item context handed to the batch operation.
#[derive(Debug, Clone)]
pub struct ItemContext {
    /// Position of the item in the batch.
    pub index: usize,
    /// Sub-request id for this item. Diagnostic only.
    pub request_id: RequestId,
    /// Id of the HTTP request that carried the batch.
    pub parent_request_id: RequestId,
    /// Cancelled when the batch is abandoned.
    pub cancel: CancellationToken,
}

/// Result of one batch item, tagged with its sub-request id.
#[derive(Debug)]
pub struct ItemOutcome<T> {
    pub request_id: RequestId,
    pub result: Result<T, ItemError>,
}

/// One slot of a batch response: the item's result or a structured error.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BatchItem<T> {
    Succeeded(T),
    Failed(ErrorBody),
}

impl<T> From<ItemOutcome<T>> for BatchItem<T> {
    fn from(outcome: ItemOutcome<T>) -> Self {
        match outcome.result {
            Ok(value) => Self::Succeeded(value),
            Err(err) => Self::Failed(err.to_error_body(outcome.request_id)),
        }
    }
}

/// Run `op` over every item of the batch.
///
/// `cancel` is the caller's token (typically the server shutdown token);
/// the batch derives its own child from it. `deadline` bounds the whole
/// batch, measured from the call.
pub async fn run_batch<I, T, F, Fut>(
    parent_request_id: RequestId,
    cancel: &CancellationToken,
    deadline: Duration,
    items: Vec<I>,
    op: F,
) -> Vec<ItemOutcome<T>>
where
    I: Send + 'static,
    T: Send + 'static,
    F: Fn(ItemContext, I) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, ItemError>> + Send + 'static,
{
    let batch_token = cancel.child_token();
    // Dropping this future (client went away) cancels every item.
    let _abandon = batch_token.clone().drop_guard();
    let deadline_at = tokio::time::Instant::now() + deadline;
    let op = Arc::new(op);

    tracing::debug!(items = items.len(), deadline_ms = deadline.as_millis() as u64, "batch started");

    let slots: Vec<(RequestId, JoinHandle<Result<T, ItemError>>)> = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let ctx = ItemContext {
                index,
                request_id: RequestId::new(),
                parent_request_id,
                cancel: batch_token.child_token(),
            };
            let request_id = ctx.request_id;
            let token = ctx.cancel.clone();
            let span = tracing::info_span!(
                "batch_item",
                index,
                request_id = %request_id,
                parent_request_id = %parent_request_id,
            );
            let op = Arc::clone(&op);
            let handle = tokio::spawn(
                async move {
                    tokio::select! {
                        biased;
                        _ = token.cancelled() => Err(ItemError::Cancelled("batch was cancelled")),
                        _ = tokio::time::sleep_until(deadline_at) => {
                            Err(ItemError::Cancelled("batch deadline exceeded"))
                        }
                        result = op(ctx, item) => result,
                    }
                }
                .instrument(span),
            );
            (request_id, handle)
        })
        .collect();

    let mut outcomes = Vec::with_capacity(slots.len());
    for (index, (request_id, handle)) in slots.into_iter().enumerate() {
        let result = match handle.await {
            Ok(result) => result,
            Err(e) if e.is_panic() => Err(ItemError::ContainedFault(panic_message(e.into_panic()))),
            Err(_) => Err(ItemError::Cancelled("item task was aborted")),
        };
        if let Err(err) = &result {
            err.log(index);
        }
        outcomes.push(ItemOutcome { request_id, result });
    }

    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    tracing::info!(items = outcomes.len(), failed, "batch finished");
    outcomes
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
