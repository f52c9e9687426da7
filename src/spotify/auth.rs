use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::{Client, StatusCode, Url, header::AUTHORIZATION};
use tracing::debug;

use crate::{
    config::Settings,
    error::{Error, Result},
    info,
    server::CallbackServer,
    types::{Credentials, TokenResponse},
    utils, warning,
};

/// Permissions requested from the user.
pub const SCOPES: [&str; 6] = [
    "playlist-modify-public",
    "playlist-modify-private",
    "user-library-read",
    "user-library-modify",
    "user-read-private",
    "user-read-email",
];

/// Runs the complete authorization-code flow and returns the token.
///
/// 1. Generates a random `state` value
/// 2. Binds the local callback server
/// 3. Opens the authorization URL in the default browser (or prints it)
/// 4. Waits, bounded by `settings.callback_timeout`, for the redirect
/// 5. Exchanges the code for an access token
///
/// The listener is bound before the browser opens so a fast redirect
/// cannot arrive ahead of it.
///
/// # Errors
///
/// [`Error::Auth`] when the listener cannot bind, the redirect carries an
/// error or a foreign `state`, nothing arrives in time, or the token
/// endpoint answers with anything but 200.
pub async fn authorize(http: &Client, settings: &Settings) -> Result<TokenResponse> {
    let state = utils::generate_state();
    let auth_url = authorization_url(settings, &state)?;

    let server = CallbackServer::bind(settings.server_addr).await?;

    info!("Waiting for authorization in your browser...");
    if webbrowser::open(auth_url.as_str()).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let code = server
        .wait_for_code(&state, settings.callback_timeout)
        .await?;
    debug!("authorization code received");

    exchange_code(http, settings, &code).await
}

/// Builds the browser-facing authorization URL.
pub fn authorization_url(settings: &Settings, state: &str) -> Result<Url> {
    let scope = SCOPES.join(" ");
    Url::parse_with_params(
        &settings.endpoints.auth_url,
        &[
            ("client_id", settings.credentials.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", settings.redirect_uri.as_str()),
            ("state", state),
            ("scope", scope.as_str()),
        ],
    )
    .map_err(|e| Error::Config(format!("invalid authorization URL: {e}")))
}

/// Exchanges an authorization code for an access token.
///
/// Authenticates with HTTP Basic auth built from the client id and secret.
/// Anything but `200 OK` fails with the full response body attached.
pub async fn exchange_code(http: &Client, settings: &Settings, code: &str) -> Result<TokenResponse> {
    let response = http
        .post(&settings.endpoints.token_url)
        .header(
            AUTHORIZATION,
            format!("Basic {}", basic_credentials(&settings.credentials)),
        )
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", settings.redirect_uri.as_str()),
        ])
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;
    if status != StatusCode::OK {
        return Err(Error::Auth(format!(
            "failed to get access token ({status}): {body}"
        )));
    }

    serde_json::from_str(&body)
        .map_err(|e| Error::Auth(format!("unexpected token response: {e}")))
}

fn basic_credentials(credentials: &Credentials) -> String {
    STANDARD.encode(format!(
        "{}:{}",
        credentials.client_id, credentials.client_secret
    ))
}
