//! Session gate: the login form and the in-memory session it produces.

use dioxus_logger::tracing::{info, warn};
use shared_types::{LoginRequest, LoginResponse};

use crate::api::{ApiError, ApiResult, CatalogApi};

pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again.";

/// Authenticated session. Lives in memory only and is gone on reload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token_id: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginMessage {
    Success(String),
    Error(String),
}

impl LoginMessage {
    pub fn text(&self) -> &str {
        match self {
            LoginMessage::Success(text) | LoginMessage::Error(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, LoginMessage::Error(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("a login attempt is already in progress")]
    Submitting,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub token_id: String,
    pub password: String,
    submitting: bool,
    /// Set once a login is accepted; the form stays closed from then on.
    accepted: bool,
    message: Option<LoginMessage>,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// True while a request is in flight or after a login was accepted.
    pub fn is_locked(&self) -> bool {
        self.submitting || self.accepted
    }

    pub fn message(&self) -> Option<&LoginMessage> {
        self.message.as_ref()
    }

    /// Takes the submission lock and builds the request.
    pub fn begin_submit(&mut self) -> Result<LoginRequest, LoginError> {
        if self.is_locked() {
            return Err(LoginError::Submitting);
        }
        if self.token_id.trim().is_empty() {
            return Err(LoginError::Required("Token ID"));
        }
        if self.password.is_empty() {
            return Err(LoginError::Required("Password"));
        }

        self.submitting = true;
        self.message = None;
        Ok(LoginRequest {
            token_id: self.token_id.trim().to_string(),
            password: self.password.clone(),
        })
    }

    /// Ends the request and returns the session if the server accepted it.
    pub fn finish_submit(&mut self, result: ApiResult<LoginResponse>) -> Option<Session> {
        self.submitting = false;
        match result {
            Ok(response) if response.success => {
                let token_id = response
                    .token_id
                    .unwrap_or_else(|| self.token_id.trim().to_string());
                info!(token_id = %token_id, "login accepted");
                self.accepted = true;
                self.message = Some(LoginMessage::Success(response.message.clone()));
                Some(Session {
                    token_id,
                    message: response.message,
                })
            }
            Ok(response) => {
                self.message = Some(LoginMessage::Error(response.message));
                None
            }
            Err(err) => {
                warn!("login request failed: {err}");
                let text = match err {
                    ApiError::Network(_) => NETWORK_ERROR_MESSAGE.to_string(),
                    ApiError::Status { message, .. } => message,
                    ApiError::Payload(_) => NETWORK_ERROR_MESSAGE.to_string(),
                };
                self.message = Some(LoginMessage::Error(text));
                None
            }
        }
    }

    pub async fn submit(&mut self, api: &impl CatalogApi) -> Result<Option<Session>, LoginError> {
        let request = self.begin_submit()?;
        let result = api.authenticate(&request).await;
        Ok(self.finish_submit(result))
    }
}

/// Which side of the gate the app is on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionGate {
    #[default]
    SignedOut,
    SignedIn(Session),
}

impl SessionGate {
    pub fn sign_in(&mut self, session: Session) {
        *self = SessionGate::SignedIn(session);
    }

    pub fn logout(&mut self) {
        *self = SessionGate::SignedOut;
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionGate::SignedIn(session) => Some(session),
            SessionGate::SignedOut => None,
        }
    }
}
