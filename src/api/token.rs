// Bearer-token cache with an injected clock.
use chrono::{DateTime, Duration, Utc};
use std::sync::Mutex;

/// Time source seam so expiry can be tested without wall-clock waits.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

/// Owns the `{token, expiry}` pair the upstream OAuth flow hands out.
/// Tokens are considered stale 60 seconds before their upstream expiry.
pub struct TokenCache<C: Clock = SystemClock> {
    inner: Mutex<Option<CachedToken>>,
    clock: C,
}

const EXPIRY_MARGIN_SECONDS: i64 = 60;

impl TokenCache<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<C: Clock> TokenCache<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            inner: Mutex::new(None),
            clock,
        }
    }

    /// Returns the cached token if it is still valid.
    pub fn valid_token(&self) -> Option<String> {
        let guard = self.inner.lock().expect("token cache poisoned");
        guard
            .as_ref()
            .filter(|t| self.clock.now() < t.expires_at)
            .map(|t| t.access_token.clone())
    }

    /// Stores a freshly issued token with its upstream lifetime in seconds.
    pub fn store(&self, access_token: String, expires_in: i64) {
        let expires_at =
            self.clock.now() + Duration::seconds(expires_in - EXPIRY_MARGIN_SECONDS);
        let mut guard = self.inner.lock().expect("token cache poisoned");
        *guard = Some(CachedToken {
            access_token,
            expires_at,
        });
    }
}
