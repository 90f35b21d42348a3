//! Wire schema for the user-management REST API.
//!
//! DESIGN
//! ======
//! One type per endpoint payload and result so responses are validated at the
//! boundary by serde instead of being trusted by shape. Field names follow the
//! server's camelCase JSON.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// USER
// =============================================================================

/// Access level assigned to a user account.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ADMIN")]
    Admin,
    #[default]
    #[serde(rename = "USER")]
    User,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::User => "USER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(Self::Admin),
            "USER" => Ok(Self::User),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// A user account as exchanged with the `/users` endpoints.
///
/// `email` is the account key and never changes after creation. `password` is
/// write-only: the server answers with it absent or empty.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub email: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub password: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub first_name: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub last_name: String,
    #[serde(default)]
    pub role: Role,
}

impl User {
    #[must_use]
    pub fn new(email: &str, first_name: &str, last_name: &str, role: Role) -> Self {
        Self {
            email: email.to_owned(),
            password: String::new(),
            first_name: first_name.to_owned(),
            last_name: last_name.to_owned(),
            role,
        }
    }

    #[must_use]
    pub fn with_password(mut self, password: &str) -> Self {
        self.password = password.to_owned();
        self
    }

    /// Copy of this user with the password blanked, safe to display or persist.
    #[must_use]
    pub fn without_password(&self) -> Self {
        Self { password: String::new(), ..self.clone() }
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// `"First Last"`, falling back to the email when both names are blank.
    #[must_use]
    pub fn full_name(&self) -> String {
        let name = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let name = name.trim();
        if name.is_empty() { self.email.clone() } else { name.to_owned() }
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("email", &self.email)
            .field("password", &redacted(&self.password))
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("role", &self.role)
            .finish()
    }
}

// =============================================================================
// TOKENS
// =============================================================================

/// Bearer credentials issued on login or registration.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
}

impl AuthTokens {
    #[must_use]
    pub fn new(access_token: &str, refresh_token: &str) -> Self {
        Self { access_token: access_token.to_owned(), refresh_token: refresh_token.to_owned() }
    }
}

impl fmt::Debug for AuthTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthTokens")
            .field("access_token", &redacted(&self.access_token))
            .field("refresh_token", &redacted(&self.refresh_token))
            .finish()
    }
}

fn redacted(secret: &str) -> &'static str {
    if secret.is_empty() { "" } else { "<redacted>" }
}

// =============================================================================
// PAYLOADS
// =============================================================================

#[derive(Clone, Serialize)]
pub struct LoginPayload<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPayload<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
}

// =============================================================================
// RESULTS
// =============================================================================

/// Result of `/login` and `/registration`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResult {
    pub auth_tokens: AuthTokens,
    pub user: User,
}

/// Result of `DELETE /users/{email}`; lets callers drop the row locally.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedUser {
    pub email: String,
}

/// Result of `POST /token/refresh`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenResult {
    pub access_token: String,
}

/// Result of the logout endpoints. Only the shape (a JSON object) is checked.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct LogoutResult {
    #[serde(default)]
    pub success: Option<bool>,
}

/// Result of `GET /`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub hello: String,
}

fn string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
