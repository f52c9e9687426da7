use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};
use tokio::sync::{Mutex, oneshot};

/// What the callback hands back to the waiting authenticator: the
/// authorization code, or the reason the redirect was rejected.
pub(crate) type CallbackOutcome = Result<String, String>;

/// Write-once slot shared between the callback handler and the
/// authenticator waiting on the receiving half.
#[derive(Clone)]
pub struct CallbackSlot {
    expected_state: Arc<String>,
    sender: Arc<Mutex<Option<oneshot::Sender<CallbackOutcome>>>>,
}

impl CallbackSlot {
    pub fn new(expected_state: String) -> (Self, oneshot::Receiver<CallbackOutcome>) {
        let (tx, rx) = oneshot::channel();
        let slot = Self {
            expected_state: Arc::new(expected_state),
            sender: Arc::new(Mutex::new(Some(tx))),
        };
        (slot, rx)
    }

    /// Returns `false` when an earlier redirect already filled the slot.
    async fn deliver(&self, outcome: CallbackOutcome) -> bool {
        match self.sender.lock().await.take() {
            Some(tx) => tx.send(outcome).is_ok(),
            None => false,
        }
    }
}

pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(slot): Extension<CallbackSlot>,
) -> Html<&'static str> {
    // Browsers also ask for favicons and the like; only a redirect that
    // carries a code or an error counts.
    let outcome: CallbackOutcome = match (params.get("error"), params.get("code")) {
        (Some(error), _) => Err(format!("authorization denied: {error}")),
        (None, Some(code)) => Ok(code.clone()),
        (None, None) => return Html("<h4>Missing authorization code.</h4>"),
    };

    // A denial has to come from the same flow as a code would.
    if params.get("state").map(String::as_str) != Some(slot.expected_state.as_str()) {
        slot.deliver(Err("state parameter does not match".to_string()))
            .await;
        return Html("<h4>Login failed.</h4>");
    }

    let denied = outcome.is_err();
    match (denied, slot.deliver(outcome).await) {
        (true, _) => Html("<h4>Authorization was denied.</h4>"),
        (false, true) => {
            Html("<h2>Authorization successful.</h2><p>You can close this window.</p>")
        }
        (false, false) => Html("<h4>Authorization already completed.</h4>"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Query<HashMap<String, String>> {
        Query(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[tokio::test]
    async fn delivers_code_when_state_matches() {
        let (slot, rx) = CallbackSlot::new("xyz".into());
        let Html(body) = callback(
            params(&[("code", "abc"), ("state", "xyz")]),
            Extension(slot),
        )
        .await;

        assert!(body.contains("successful"));
        assert_eq!(rx.await.unwrap(), Ok("abc".to_string()));
    }

    #[tokio::test]
    async fn rejects_wrong_state() {
        let (slot, rx) = CallbackSlot::new("xyz".into());
        callback(
            params(&[("code", "abc"), ("state", "other")]),
            Extension(slot),
        )
        .await;

        assert!(rx.await.unwrap().is_err());
    }

    #[tokio::test]
    async fn reports_denial_with_matching_state() {
        let (slot, rx) = CallbackSlot::new("xyz".into());
        let Html(body) = callback(
            params(&[("error", "access_denied"), ("state", "xyz")]),
            Extension(slot),
        )
        .await;

        assert!(body.contains("denied"));
        let reason = rx.await.unwrap().unwrap_err();
        assert!(reason.contains("access_denied"));
    }

    #[tokio::test]
    async fn denial_with_foreign_state_is_a_state_mismatch() {
        let (slot, rx) = CallbackSlot::new("xyz".into());
        let Html(body) = callback(
            params(&[("error", "access_denied"), ("state", "forged")]),
            Extension(slot),
        )
        .await;

        assert!(body.contains("Login failed"));
        let reason = rx.await.unwrap().unwrap_err();
        assert!(reason.contains("state"));
        assert!(!reason.contains("access_denied"));
    }

    #[tokio::test]
    async fn ignores_requests_without_code() {
        let (slot, mut rx) = CallbackSlot::new("xyz".into());
        callback(params(&[]), Extension(slot.clone())).await;

        assert!(rx.try_recv().is_err());
        callback(
            params(&[("code", "late"), ("state", "xyz")]),
            Extension(slot),
        )
        .await;
        assert_eq!(rx.await.unwrap(), Ok("late".to_string()));
    }

    #[tokio::test]
    async fn only_first_redirect_counts() {
        let (slot, rx) = CallbackSlot::new("xyz".into());
        callback(
            params(&[("code", "first"), ("state", "xyz")]),
            Extension(slot.clone()),
        )
        .await;
        let Html(body) = callback(
            params(&[("code", "second"), ("state", "xyz")]),
            Extension(slot),
        )
        .await;

        assert!(body.contains("already"));
        assert_eq!(rx.await.unwrap(), Ok("first".to_string()));
    }
}
