use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::error::SessionError;
use crate::storage::KeyValueStore;

/// Storage key holding the serialized identity.
pub const USER_KEY: &str = "user";

/// Decoded claims of the sign-in credential. Claims beyond name, picture and
/// subject are carried along untouched so the stored record round-trips.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Identity {
    pub sub: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub picture: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub claims: Map<String, Value>,
}

impl Identity {
    /// Reads the payload segment of a JWT credential. The signature is not
    /// checked; the sign-in provider is trusted for that.
    pub fn from_credential(credential: &str) -> Result<Self, SessionError> {
        let mut segments = credential.trim().split('.');
        let payload = match (segments.next(), segments.next(), segments.next(), segments.next()) {
            (Some(_), Some(payload), Some(_), None) if !payload.is_empty() => payload,
            _ => return Err(SessionError::MalformedToken),
        };
        let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    #[default]
    SignedOut,
    SignedIn(Identity),
}

/// The signed-in user, backed by a durable key-value store.
#[derive(Debug)]
pub struct Session<S> {
    store: S,
    state: SessionState,
}

impl<S: KeyValueStore> Session<S> {
    /// A signed-out session over `store`. Call [`Session::load`] to rehydrate.
    pub fn new(store: S) -> Self {
        Self {
            store,
            state: SessionState::SignedOut,
        }
    }

    /// Restores the identity persisted by a previous run. Expiry and signature
    /// are not re-validated. Anything unreadable leaves the session signed out.
    pub fn load(&mut self) -> &SessionState {
        self.state = match self.store.get(USER_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Identity>(&raw) {
                Ok(identity) => {
                    info!(user = %identity.name, "restored signed-in session");
                    SessionState::SignedIn(identity)
                }
                Err(e) => {
                    warn!(error = %e, "stored identity is unreadable, starting signed out");
                    SessionState::SignedOut
                }
            },
            Ok(None) => SessionState::SignedOut,
            Err(e) => {
                warn!(error = %e, "failed to read session storage");
                SessionState::SignedOut
            }
        };
        &self.state
    }

    /// Writes the current identity to storage.
    pub fn save(&mut self) -> Result<(), SessionError> {
        match &self.state {
            SessionState::SignedIn(identity) => {
                let raw = serde_json::to_string(identity)?;
                self.store.set(USER_KEY, raw)
            }
            SessionState::SignedOut => self.store.remove(USER_KEY),
        }
    }

    /// Drops the durable copy of the identity.
    pub fn clear(&mut self) -> Result<(), SessionError> {
        self.store.remove(USER_KEY)
    }

    pub fn sign_in(&mut self, identity: Identity) {
        info!(user = %identity.name, "signed in");
        self.state = SessionState::SignedIn(identity);
        if let Err(e) = self.save() {
            warn!(error = %e, "failed to persist identity");
        }
    }

    /// Handles a credential handed over by the sign-in provider. A credential
    /// that cannot be decoded is logged and leaves the session unchanged.
    pub fn complete_sign_in(&mut self, credential: &str) -> bool {
        match Identity::from_credential(credential) {
            Ok(identity) => {
                self.sign_in(identity);
                true
            }
            Err(e) => {
                warn!(error = %e, "login error");
                false
            }
        }
    }

    /// The sign-in provider reported a failure.
    pub fn sign_in_failed(&self, reason: &str) {
        warn!(reason, "login failed");
    }

    pub fn sign_out(&mut self) {
        self.state = SessionState::SignedOut;
        if let Err(e) = self.clear() {
            warn!(error = %e, "logout error");
        }
        info!("signed out");
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn identity(&self) -> Option<&Identity> {
        match &self.state {
            SessionState::SignedIn(identity) => Some(identity),
            SessionState::SignedOut => None,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.identity().is_some()
    }

    /// Token sent with the article request: the subject id.
    pub fn bearer(&self) -> Option<&str> {
        self.identity().map(|identity| identity.sub.as_str())
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
