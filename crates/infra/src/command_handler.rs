//! Command handler abstraction (application layer).

use tokio_util::sync::CancellationToken;

use catalog_core::Command;

/// Handles one command type, producing a result or an error.
///
/// Handlers receive their collaborators (stores, id generators) through their
/// constructor and keep no per-invocation state, so one instance can serve
/// concurrent invocations.
///
/// `cancel` is honored at the handler's suspension points only; synchronous
/// steps such as validation run to completion.
#[async_trait::async_trait]
pub trait CommandHandler<C>: Send + Sync
where
    C: Command,
{
    type Output: Send;
    type Error: std::error::Error + Send + Sync + 'static;

    async fn handle(&self, command: C, cancel: &CancellationToken) -> Result<Self::Output, Self::Error>;
}
