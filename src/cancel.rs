// Copyright (c) 2026 Dropbox, Inc.

//! Cooperative cancellation of in-flight calls.

use std::future::Future;
use std::pin::pin;
use futures::future::{self, Either};
use crate::error::Cancelled;

/// Run `call` until it finishes or `signal` fires, whichever comes first.
///
/// `signal` is any future that completes when the call should be abandoned: a cancellation
/// token's `cancelled()`, a timer for a deadline, a shutdown notification. When it wins, the call
/// future is dropped, which aborts the HTTP exchange, and the result is a transport error
/// wrapping [`Cancelled`] (see [`Error::is_cancelled`](crate::Error::is_cancelled)).
///
/// If both are ready at once, the call's own result wins.
///
/// ```no_run
/// # async fn f(dbx: dropbox_client::Dropbox<impl dropbox_client::async_client_trait::HttpClient>)
/// #     -> dropbox_client::Result<()> {
/// use std::time::Duration;
/// let deadline = tokio::time::sleep(Duration::from_secs(10));
/// let account = dropbox_client::with_cancellation(deadline, dbx.users().get_current_account())
///     .await?;
/// # Ok(()) }
/// ```
pub async fn with_cancellation<T, F, S>(signal: S, call: F) -> crate::Result<T>
where
    F: Future<Output = crate::Result<T>>,
    S: Future<Output = ()>,
{
    let call = pin!(call);
    let signal = pin!(signal);
    match future::select(call, signal).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _call)) => {
            debug!("call cancelled before completion");
            Err(Cancelled.into())
        }
    }
}
