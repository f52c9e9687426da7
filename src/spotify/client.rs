use chrono::{DateTime, Utc};
use reqwest::{Client, Method, StatusCode, header::AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::{
    config::Settings,
    error::{Error, Result},
    spotify::auth,
    types::TokenResponse,
};

/// Access token negotiated once per client.
#[derive(Debug, Clone)]
pub struct Session {
    pub access_token: String,
    /// Ready-made `Authorization` header value.
    pub authorization: String,
    pub obtained_at: DateTime<Utc>,
    pub expires_in: Option<u64>,
}

impl Session {
    pub fn new(access_token: impl Into<String>, expires_in: Option<u64>) -> Self {
        let access_token = access_token.into();
        Self {
            authorization: format!("Bearer {access_token}"),
            access_token,
            obtained_at: Utc::now(),
            expires_in,
        }
    }
}

impl From<TokenResponse> for Session {
    fn from(token: TokenResponse) -> Self {
        Session::new(token.access_token, token.expires_in)
    }
}

/// Lifecycle of a [`SpotifyClient`].
///
/// `Unauthenticated → Authenticating → Authenticated → Ready | Failed`.
/// `Failed` is terminal.
#[derive(Debug, Clone)]
pub enum ClientState {
    Unauthenticated,
    Authenticating,
    /// Token obtained but not yet checked against `/me`.
    Authenticated(Session),
    Ready(Session),
    Failed,
}

/// Authenticated access to the Spotify Web API.
///
/// Construction is two-phase: [`SpotifyClient::new`] only prepares the HTTP
/// client, [`SpotifyClient::authenticate`] negotiates the token and checks it.
pub struct SpotifyClient {
    http: Client,
    settings: Settings,
    state: ClientState,
}

impl SpotifyClient {
    pub fn new(settings: Settings) -> Result<Self> {
        let http = Client::builder().timeout(settings.http_timeout).build()?;
        Ok(Self {
            http,
            settings,
            state: ClientState::Unauthenticated,
        })
    }

    /// A client that reuses an access token obtained elsewhere.
    ///
    /// The token still has to pass [`SpotifyClient::validate`].
    pub fn with_access_token(settings: Settings, access_token: impl Into<String>) -> Result<Self> {
        let mut client = Self::new(settings)?;
        client.state = ClientState::Authenticated(Session::new(access_token, None));
        Ok(client)
    }

    /// Runs the browser-based authorization flow, then validates the token.
    ///
    /// A client negotiates at most one token: calling this again on an
    /// authenticated client only (re)validates, and a failed client stays
    /// failed.
    pub async fn authenticate(&mut self) -> Result<()> {
        match self.state {
            ClientState::Unauthenticated => {}
            ClientState::Authenticated(_) => return self.validate().await,
            ClientState::Ready(_) => return Ok(()),
            ClientState::Authenticating | ClientState::Failed => {
                return Err(Error::NotAuthenticated);
            }
        }

        self.state = ClientState::Authenticating;
        match auth::authorize(&self.http, &self.settings).await {
            Ok(token) => self.state = ClientState::Authenticated(token.into()),
            Err(e) => {
                self.state = ClientState::Failed;
                return Err(e);
            }
        }

        self.validate().await
    }

    /// Completes authentication with a code captured outside this client.
    pub async fn authenticate_with_code(&mut self, code: &str) -> Result<()> {
        if !matches!(self.state, ClientState::Unauthenticated) {
            return Err(Error::NotAuthenticated);
        }

        self.state = ClientState::Authenticating;
        match auth::exchange_code(&self.http, &self.settings, code).await {
            Ok(token) => self.state = ClientState::Authenticated(token.into()),
            Err(e) => {
                self.state = ClientState::Failed;
                return Err(e);
            }
        }

        self.validate().await
    }

    /// Probes `GET /me`; a 401 means the token is invalid or expired.
    pub async fn validate(&mut self) -> Result<()> {
        let session = match &self.state {
            ClientState::Authenticated(s) | ClientState::Ready(s) => s.clone(),
            _ => return Err(Error::NotAuthenticated),
        };

        match self.send_request(Method::GET, "/me", &[], None).await {
            Ok(_) => {
                debug!(obtained_at = %session.obtained_at, "access token is valid");
                self.state = ClientState::Ready(session);
                Ok(())
            }
            Err(e) => {
                self.state = ClientState::Failed;
                if e.status() == Some(StatusCode::UNAUTHORIZED) {
                    Err(Error::TokenValidity)
                } else {
                    Err(e)
                }
            }
        }
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, ClientState::Ready(_))
    }

    pub fn session(&self) -> Option<&Session> {
        match &self.state {
            ClientState::Authenticated(s) | ClientState::Ready(s) => Some(s),
            _ => None,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn user_id(&self) -> &str {
        &self.settings.credentials.user_id
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}{}",
            self.settings.endpoints.api_url.trim_end_matches('/'),
            path
        )
    }

    /// The authorized request every API operation is built on.
    ///
    /// Attaches the bearer header, turns non-2xx answers into
    /// [`Error::Api`] and returns `None` for empty success bodies instead of
    /// trying to parse them.
    pub(crate) async fn send_request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Value>,
    ) -> Result<Option<Value>> {
        let session = self.session().ok_or(Error::NotAuthenticated)?;
        let url = self.url(path);

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(AUTHORIZATION, &session.authorization);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = &body {
            request = request.json(body);
        }

        debug!(%method, %url, ?query, ?body, "sending request");
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        debug!(%status, body = %text, "received response");

        if !status.is_success() {
            return Err(Error::Api { status, body: text });
        }
        if text.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_str(&text)?))
    }
}

/// Decodes a response body that must be present.
pub(crate) fn parse<T: DeserializeOwned>(value: Option<Value>) -> Result<T> {
    Ok(serde_json::from_value(value.unwrap_or(Value::Null))?)
}
