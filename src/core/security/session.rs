use async_trait::async_trait;
use http::HeaderMap;
use http::header::{HeaderName, InvalidHeaderName};
use serde::Serialize;
use tracing::{debug, info};

/// An authenticated visitor, as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub user: String,
}

/// Source of the current session for a request.
///
/// Sign-in flows live in the external identity provider; implementations only
/// read what that provider attached to the request.
#[async_trait]
pub trait SessionProvider: Send + Sync + 'static {
    async fn current_session(&self, headers: &HeaderMap) -> Option<Session>;
}

/// Trusts a header set by an authenticating reverse proxy.
pub struct TrustedHeaderSessions {
    header: HeaderName,
}

impl TrustedHeaderSessions {
    pub fn new(header: &str) -> Result<Self, InvalidHeaderName> {
        Ok(Self {
            header: HeaderName::from_bytes(header.as_bytes())?,
        })
    }
}

#[async_trait]
impl SessionProvider for TrustedHeaderSessions {
    async fn current_session(&self, headers: &HeaderMap) -> Option<Session> {
        let user = headers.get(&self.header)?.to_str().ok()?.trim();
        if user.is_empty() {
            return None;
        }
        Some(Session {
            user: user.to_string(),
        })
    }
}

/// Never reports a session.
pub struct NoSessions;

#[async_trait]
impl SessionProvider for NoSessions {
    async fn current_session(&self, _headers: &HeaderMap) -> Option<Session> {
        None
    }
}

/// Outcome of checking a gated view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Render the view for this session.
    Render(Session),
    /// Send the visitor to this location instead.
    Redirect(String),
}

/// Decide whether the view at `target` may render for this request.
pub async fn gate(
    provider: &dyn SessionProvider,
    headers: &HeaderMap,
    login_path: &str,
    target: &str,
) -> GateDecision {
    match provider.current_session(headers).await {
        Some(session) => {
            debug!("Session for '{}' admitted to {}", session.user, target);
            GateDecision::Render(session)
        }
        None => {
            info!("No session for {}, redirecting to login", target);
            GateDecision::Redirect(login_redirect(login_path, target))
        }
    }
}

/// Login location carrying `target` as the `callbackUrl` query parameter.
pub fn login_redirect(login_path: &str, target: &str) -> String {
    match serde_urlencoded::to_string([("callbackUrl", target)]) {
        Ok(query) => format!("{login_path}?{query}"),
        Err(_) => login_path.to_string(),
    }
}
