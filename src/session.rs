//! Simulated sign-in
//!
//! There is no authentication backend. `LoginService` checks that both
//! credentials are present, waits a configurable delay to mimic network
//! latency, and hands back a session for the chosen role. The wait goes
//! through a `Sleeper` so tests run without delay.

use std::thread;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::BoardError;
use crate::navigation::UserRole;

/// Default simulated latency in milliseconds
pub const DEFAULT_LOGIN_DELAY_MS: u64 = 1500;

/// Blocking wait used by the login simulation
pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

/// Sleeps the current thread
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Returns immediately
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl Sleeper for NoDelay {
    fn sleep(&self, _duration: Duration) {}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.email.trim().is_empty() && !self.password.trim().is_empty()
    }
}

/// A signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub role: UserRole,
    pub started_at: DateTime<Utc>,
    /// Signed in through the demo shortcut without credentials
    pub demo: bool,
}

impl Session {
    fn start(role: UserRole, demo: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            started_at: Utc::now(),
            demo,
        }
    }
}

/// Mock login boundary
pub struct LoginService<S: Sleeper = ThreadSleeper> {
    delay: Duration,
    sleeper: S,
}

impl Default for LoginService<ThreadSleeper> {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_LOGIN_DELAY_MS))
    }
}

impl LoginService<ThreadSleeper> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            sleeper: ThreadSleeper,
        }
    }
}

impl<S: Sleeper> LoginService<S> {
    pub fn with_sleeper(delay: Duration, sleeper: S) -> Self {
        Self { delay, sleeper }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Sign in as `role`. Blank credentials fail immediately without waiting.
    pub fn login(&self, credentials: &Credentials, role: UserRole) -> Result<Session, BoardError> {
        if !credentials.is_complete() {
            return Err(BoardError::MissingCredentials);
        }

        debug!(delay_ms = self.delay.as_millis() as u64, "simulating login latency");
        self.sleeper.sleep(self.delay);

        let session = Session::start(role, false);
        info!(session_id = %session.id, role = role.as_str(), "signed in");
        Ok(session)
    }

    /// Sign in without credentials or delay.
    pub fn demo_login(&self, role: UserRole) -> Session {
        let session = Session::start(role, true);
        info!(session_id = %session.id, role = role.as_str(), "signed in (demo)");
        session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingSleeper {
        calls: RefCell<Vec<Duration>>,
    }

    impl Sleeper for &RecordingSleeper {
        fn sleep(&self, duration: Duration) {
            self.calls.borrow_mut().push(duration);
        }
    }

    #[test]
    fn test_login_waits_configured_delay() {
        let sleeper = RecordingSleeper::default();
        let service = LoginService::with_sleeper(Duration::from_millis(1500), &sleeper);

        let session = service
            .login(&Credentials::new("student@example.com", "secret"), UserRole::Student)
            .unwrap();

        assert_eq!(session.role, UserRole::Student);
        assert!(!session.demo);
        assert_eq!(*sleeper.calls.borrow(), vec![Duration::from_millis(1500)]);
    }

    #[test]
    fn test_blank_credentials_fail_without_waiting() {
        let sleeper = RecordingSleeper::default();
        let service = LoginService::with_sleeper(Duration::from_millis(1500), &sleeper);

        for creds in [
            Credentials::new("", "secret"),
            Credentials::new("teacher@example.com", "   "),
        ] {
            let err = service.login(&creds, UserRole::Teacher).unwrap_err();
            assert!(matches!(err, BoardError::MissingCredentials));
        }
        assert!(sleeper.calls.borrow().is_empty());
    }

    #[test]
    fn test_demo_login() {
        let service = LoginService::with_sleeper(Duration::ZERO, NoDelay);
        let session = service.demo_login(UserRole::Teacher);
        assert_eq!(session.role, UserRole::Teacher);
        assert!(session.demo);
    }

    #[test]
    fn test_sessions_get_distinct_ids() {
        let service = LoginService::with_sleeper(Duration::ZERO, NoDelay);
        let creds = Credentials::new("a@example.com", "pw");
        let a = service.login(&creds, UserRole::Student).unwrap();
        let b = service.login(&creds, UserRole::Student).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_default_delay() {
        assert_eq!(LoginService::<ThreadSleeper>::default().delay(), Duration::from_millis(1500));
    }
}
