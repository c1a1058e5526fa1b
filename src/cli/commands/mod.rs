//! CLI command implementations

pub mod check;
pub mod rate_limit;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::warn;

/// Cancel `token` on the first Ctrl-C. Abort the handle once the guarded work is done.
pub(crate) fn cancel_on_ctrl_c(token: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, cancelling");
            token.cancel();
        }
    })
}
