//! Access guard and the in-process token authority.
//!
//! Every resource handler asks an [`AccessGuard`] whether the raw
//! `Authorization` header is acceptable before touching any collection.
//! [`TokenAuthority`] is the only implementation: it checks logins against a
//! single configured account and accepts the tokens it has issued since
//! process start. Tokens never expire, but at most `max_tokens` are kept:
//! once the cap is exceeded the oldest token is evicted (FIFO).

use std::collections::{HashSet, VecDeque};

use parking_lot::RwLock;
use todo_proto::auth::{LoginRequest, TokenPair};
use uuid::Uuid;

/// Prefix stripped from the `Authorization` header before lookup.
const BEARER_PREFIX: &str = "Bearer ";

/// Default number of live tokens kept before FIFO eviction.
pub const DEFAULT_MAX_TOKENS: usize = 1000;

/// Predicate over the raw `Authorization` header value.
pub trait AccessGuard: Send + Sync {
    /// Returns `true` if the token permits access. Must not mutate state.
    fn validate(&self, token: &str) -> bool;
}

/// An [`AccessGuard`] that can also authenticate a login.
pub trait Authenticator: AccessGuard {
    /// Checks credentials and issues a token pair on success.
    fn login(&self, request: &LoginRequest) -> Option<TokenPair>;
}

/// Live tokens in issue order.
#[derive(Default)]
struct IssuedTokens {
    live: HashSet<String>,
    order: VecDeque<String>,
}

/// Issues opaque random tokens for a single configured account.
pub struct TokenAuthority {
    username: String,
    password: String,
    issued: RwLock<IssuedTokens>,
    max_tokens: usize,
}

impl TokenAuthority {
    /// Creates an authority that accepts logins for `username`/`password`,
    /// keeping up to [`DEFAULT_MAX_TOKENS`] live tokens.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::with_max_tokens(username, password, DEFAULT_MAX_TOKENS)
    }

    /// Creates an authority with a custom live-token cap (minimum 1).
    #[must_use]
    pub fn with_max_tokens(
        username: impl Into<String>,
        password: impl Into<String>,
        max_tokens: usize,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            issued: RwLock::new(IssuedTokens::default()),
            max_tokens: max_tokens.max(1),
        }
    }

    /// Issues a fresh token pair without checking credentials.
    ///
    /// If the live-token cap is exceeded, the oldest token stops validating.
    pub fn issue(&self) -> TokenPair {
        let pair = TokenPair {
            auth_token: Uuid::new_v4().simple().to_string(),
            refresh_token: Uuid::new_v4().simple().to_string(),
        };
        let mut issued = self.issued.write();
        issued.live.insert(pair.auth_token.clone());
        issued.order.push_back(pair.auth_token.clone());
        while issued.order.len() > self.max_tokens {
            let Some(oldest) = issued.order.pop_front() else {
                break;
            };
            issued.live.remove(&oldest);
            tracing::debug!("token cap reached, evicted oldest token");
        }
        drop(issued);
        pair
    }

    #[cfg(test)]
    fn live_count(&self) -> usize {
        self.issued.read().live.len()
    }
}

impl AccessGuard for TokenAuthority {
    fn validate(&self, token: &str) -> bool {
        let token = token.strip_prefix(BEARER_PREFIX).unwrap_or(token).trim();
        !token.is_empty() && self.issued.read().live.contains(token)
    }
}

impl Authenticator for TokenAuthority {
    fn login(&self, request: &LoginRequest) -> Option<TokenPair> {
        if request.username != self.username || request.password != self.password {
            tracing::warn!(username = %request.username, "login rejected");
            return None;
        }
        let pair = self.issue();
        tracing::info!(username = %request.username, "login accepted, token issued");
        Some(pair)
    }
}
