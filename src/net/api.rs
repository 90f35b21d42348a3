//! REST client for the user-management API.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by the session controller for login, registration, logout, token
//! refresh and the admin user table. Every call builds `<host><endpoint>`,
//! optionally attaches a bearer token, and resolves exactly once.
//!
//! ERROR HANDLING
//! ==============
//! Responses are classified in priority order:
//! 1. transport failure -> `ApiError::Transport`
//! 2. 2xx or 400 -> body parsed as JSON; an `_error` string is an
//!    `ApiError::Application`, anything else is decoded into the result type
//! 3. any other status -> `ApiError::Http`, body ignored
//!
//! No retries, no caching.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::future::Future;
use std::sync::Arc;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use reqwest::Method;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::error::{ApiError, TransportError};
use super::transport::{HttpRequest, HttpResponse, ReqwestTransport, Timeouts, Transport};
use super::types::{
    AccessTokenResult, AuthTokens, DeletedUser, HealthStatus, LoginPayload, LoginResult,
    LogoutResult, RegisterPayload, User,
};

const ERROR_FIELD: &str = "_error";

/// Credentials to attach to a call.
#[derive(Debug, Clone, Copy, Default)]
pub enum Auth<'a> {
    #[default]
    None,
    /// A single bearer token, sent as-is.
    Token(&'a str),
    /// A full token pair; the access token is sent.
    Pair(&'a AuthTokens),
}

impl Auth<'_> {
    fn bearer(self) -> Option<String> {
        match self {
            Self::None => None,
            Self::Token(token) => Some(format!("Bearer {token}")),
            Self::Pair(tokens) => Some(format!("Bearer {}", tokens.access_token)),
        }
    }
}

/// Typed client for the REST API. Cheap to clone.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    host: String,
}

impl ApiClient {
    #[must_use]
    pub fn new(host: &str, transport: Arc<dyn Transport>) -> Self {
        Self { transport, host: host.trim_end_matches('/').to_owned() }
    }

    /// Client over the real HTTP transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn with_reqwest(host: &str, timeouts: Timeouts) -> Result<Self, TransportError> {
        let transport = ReqwestTransport::new(timeouts)?;
        Ok(Self::new(host, Arc::new(transport)))
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    // =========================================================================
    // AUTH
    // =========================================================================

    /// `POST /login`.
    ///
    /// # Errors
    ///
    /// Returns the classified failure of the call.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResult, ApiError> {
        let payload = LoginPayload { email, password };
        self.call("/login", Method::POST, Some(&payload), Auth::None).await
    }

    /// `POST /registration`.
    ///
    /// # Errors
    ///
    /// Returns the classified failure of the call.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<LoginResult, ApiError> {
        let payload = RegisterPayload { email, password, first_name, last_name };
        self.call("/registration", Method::POST, Some(&payload), Auth::None)
            .await
    }

    /// Revoke both tokens. The two revocations run concurrently; the result
    /// is `Ok` only when both succeed, otherwise the access-token failure
    /// wins over the refresh-token one.
    ///
    /// # Errors
    ///
    /// Returns the first classified failure, in issue order.
    pub async fn logout(&self, tokens: &AuthTokens) -> Result<(), ApiError> {
        let (access, refresh) = tokio::join!(
            self.logout_access(&tokens.access_token),
            self.logout_refresh(&tokens.refresh_token),
        );
        access?;
        refresh?;
        Ok(())
    }

    /// `POST /logout/access` with the access token.
    ///
    /// # Errors
    ///
    /// Returns the classified failure of the call.
    pub async fn logout_access(&self, access_token: &str) -> Result<LogoutResult, ApiError> {
        self.call::<(), _>("/logout/access", Method::POST, None, Auth::Token(access_token))
            .await
    }

    /// `POST /logout/refresh` with the refresh token.
    ///
    /// # Errors
    ///
    /// Returns the classified failure of the call.
    pub async fn logout_refresh(&self, refresh_token: &str) -> Result<LogoutResult, ApiError> {
        self.call::<(), _>("/logout/refresh", Method::POST, None, Auth::Token(refresh_token))
            .await
    }

    /// `POST /token/refresh` with the refresh token; returns the new access token.
    ///
    /// # Errors
    ///
    /// Returns the classified failure of the call.
    pub async fn refresh_access_token(&self, tokens: &AuthTokens) -> Result<String, ApiError> {
        let result: AccessTokenResult = self
            .call::<(), _>("/token/refresh", Method::POST, None, Auth::Token(&tokens.refresh_token))
            .await?;
        Ok(result.access_token)
    }

    // =========================================================================
    // USERS
    // =========================================================================

    /// `GET /users`.
    ///
    /// # Errors
    ///
    /// Returns the classified failure of the call.
    pub async fn get_user_list(&self, tokens: &AuthTokens) -> Result<Vec<User>, ApiError> {
        self.call::<(), _>(&users_endpoint(None), Method::GET, None, Auth::Pair(tokens))
            .await
    }

    /// `GET /users/{email}`.
    ///
    /// # Errors
    ///
    /// Returns the classified failure of the call.
    pub async fn get_user(&self, email: &str, tokens: &AuthTokens) -> Result<User, ApiError> {
        self.call::<(), _>(&users_endpoint(Some(email)), Method::GET, None, Auth::Pair(tokens))
            .await
    }

    /// Create (`POST /users`) or update (`PUT /users/{email}`) a user. The
    /// caller decides which through `is_new`.
    ///
    /// # Errors
    ///
    /// Returns the classified failure of the call.
    pub async fn save_user(
        &self,
        user: &User,
        is_new: bool,
        tokens: &AuthTokens,
    ) -> Result<User, ApiError> {
        let (method, endpoint) = save_user_route(&user.email, is_new);
        self.call(&endpoint, method, Some(user), Auth::Pair(tokens))
            .await
    }

    /// `DELETE /users/{email}`.
    ///
    /// # Errors
    ///
    /// Returns the classified failure of the call.
    pub async fn delete_user(&self, email: &str, tokens: &AuthTokens) -> Result<DeletedUser, ApiError> {
        self.call::<(), _>(&users_endpoint(Some(email)), Method::DELETE, None, Auth::Pair(tokens))
            .await
    }

    /// `GET /` liveness probe.
    ///
    /// # Errors
    ///
    /// Returns the classified failure of the call.
    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.call::<(), _>("/", Method::GET, None, Auth::None).await
    }

    // =========================================================================
    // CALL PRIMITIVE
    // =========================================================================

    /// Send one request and classify the outcome.
    ///
    /// # Errors
    ///
    /// Returns `Transport`, `Http`, `Application` or `Decode` per the
    /// module-level classification rules.
    pub async fn call<P, R>(
        &self,
        endpoint: &str,
        method: Method,
        payload: Option<&P>,
        auth: Auth<'_>,
    ) -> Result<R, ApiError>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = payload
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| ApiError::Decode(format!("request body: {e}")))?;
        let request = build_request(&self.host, endpoint, method.clone(), body, auth);

        debug!(%method, endpoint, authenticated = request.header(&AUTHORIZATION).is_some(), "api request");
        let result = match self.transport.send(request).await {
            Ok(response) => classify(&response),
            Err(err) => Err(ApiError::from(err)),
        };
        if let Err(err) = &result {
            warn!(%method, endpoint, kind = err.kind(), error = %err, "api call failed");
        }
        result
    }
}

/// Race an API call against a cancellation token. Resolves once: either
/// with the call's result or with `ApiError::Cancelled`.
///
/// # Errors
///
/// Returns `ApiError::Cancelled` when the token fires first, otherwise
/// whatever the call returned.
pub async fn cancellable<T, F>(token: &CancellationToken, call: F) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, ApiError>>,
{
    tokio::select! {
        biased;
        () = token.cancelled() => Err(ApiError::Cancelled),
        result = call => result,
    }
}

fn build_request(
    host: &str,
    endpoint: &str,
    method: Method,
    body: Option<String>,
    auth: Auth<'_>,
) -> HttpRequest {
    let mut headers = vec![(CONTENT_TYPE, "application/json".to_owned())];
    if let Some(bearer) = auth.bearer() {
        headers.push((AUTHORIZATION, bearer));
    }
    HttpRequest { method, url: format!("{host}{endpoint}"), headers, body }
}

fn classify<R: DeserializeOwned>(response: &HttpResponse) -> Result<R, ApiError> {
    let status = response.status;
    if !((200..300).contains(&status) || status == 400) {
        return Err(ApiError::Http { status });
    }

    // An empty success body counts as an empty object.
    let value = if response.body.trim().is_empty() {
        Value::Object(serde_json::Map::new())
    } else {
        serde_json::from_str::<Value>(&response.body).map_err(|e| ApiError::Decode(e.to_string()))?
    };

    if let Some(message) = value.get(ERROR_FIELD).and_then(Value::as_str) {
        return Err(ApiError::Application(message.to_owned()));
    }
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Characters escaped in a path segment: the URL path set plus `/` and `%`,
/// so an email always addresses exactly one `/users/<email>` resource.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'%');

fn users_endpoint(email: Option<&str>) -> String {
    match email {
        Some(email) => format!("/users/{}", utf8_percent_encode(email, PATH_SEGMENT)),
        None => "/users".to_owned(),
    }
}

fn save_user_route(email: &str, is_new: bool) -> (Method, String) {
    if is_new {
        (Method::POST, users_endpoint(None))
    } else {
        (Method::PUT, users_endpoint(Some(email)))
    }
}
