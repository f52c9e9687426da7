use std::{net::SocketAddr, time::Duration};

use axum::{Extension, Router, routing::get};
use tokio::{net::TcpListener, sync::oneshot};
use tracing::debug;

use crate::{
    api::{self, CallbackSlot},
    error::{Error, Result},
};

/// One-shot HTTP listener for the OAuth redirect.
///
/// The socket is bound in [`CallbackServer::bind`] and owned by the server
/// task started in [`CallbackServer::wait_for_code`]; it is released when
/// that task finishes, whichever way the wait ends.
pub struct CallbackServer {
    listener: TcpListener,
}

impl CallbackServer {
    pub async fn bind(addr: SocketAddr) -> Result<Self> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| Error::Auth(format!("cannot listen on {addr}: {e}")))?;
        Ok(Self { listener })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serves until the first redirect carrying a code (or an error)
    /// arrives, or `timeout` elapses.
    ///
    /// Shutdown is signalled to the server task without joining it so the
    /// success page can still be flushed to the browser.
    pub async fn wait_for_code(self, expected_state: &str, timeout: Duration) -> Result<String> {
        let (slot, code_rx) = CallbackSlot::new(expected_state.to_string());
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let app = Router::new()
            .route("/health", get(api::health))
            .route("/callback", get(api::callback))
            .layer(Extension(slot));

        let addr = self.local_addr()?;
        debug!(%addr, "callback server listening");

        let listener = self.listener;
        tokio::spawn(async move {
            let served = axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await;
            if let Err(e) = served {
                debug!(error = %e, "callback server stopped with an error");
            }
        });

        let outcome = tokio::time::timeout(timeout, code_rx).await;
        let _ = shutdown_tx.send(());

        match outcome {
            Ok(Ok(Ok(code))) => Ok(code),
            Ok(Ok(Err(reason))) => Err(Error::Auth(reason)),
            Ok(Err(_)) => Err(Error::Auth(
                "callback server closed before a code arrived".to_string(),
            )),
            Err(_) => Err(Error::Auth(format!(
                "no authorization code received within {}s",
                timeout.as_secs()
            ))),
        }
    }
}
