//! Mock authentication and session state.
//!
//! Login, registration and account upgrade are stand-ins: they verify
//! nothing, resolve unconditionally after a simulated network delay, and
//! exist so the premium gate and the account surfaces have a session to
//! consult. The delay is a deadline checked by the event loop, never a
//! blocking sleep.

use crate::constants::{AUTH_DELAY_MS, STORAGE_KEY_USER};
use crate::models::User;
use crate::storage::Storage;
use std::time::{Duration, Instant};

/// An auth operation in flight (simulated latency not yet elapsed).
#[derive(Debug, Clone)]
enum PendingAuth {
    Login { email: String },
    Register { name: String, email: String },
    Upgrade,
}

/// Completed auth operation, reported to the caller by [`Session::poll`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthEvent {
    /// Login resolved; the session now holds this user
    LoggedIn(User),
    /// Registration resolved; the session now holds this user
    Registered(User),
    /// Upgrade resolved; the session user is now premium
    Upgraded(User),
}

/// The current sign-in state plus any in-flight mock auth call.
#[derive(Debug)]
pub struct Session {
    user: Option<User>,
    pending: Option<(PendingAuth, Instant)>,
}

impl Session {
    /// Creates a signed-out session.
    #[must_use]
    pub fn new() -> Self {
        Self {
            user: None,
            pending: None,
        }
    }

    /// Restores the session from the `user` storage key.
    ///
    /// A missing or unreadable record means signed-out; corrupt JSON is
    /// logged and treated as absent.
    #[must_use]
    pub fn restore(storage: &dyn Storage) -> Self {
        let user = storage.get(STORAGE_KEY_USER).and_then(|json| {
            serde_json::from_str(&json)
                .map_err(|e| {
                    tracing::warn!("Ignoring corrupt stored user record: {e}");
                })
                .ok()
        });
        Self {
            user,
            pending: None,
        }
    }

    /// The signed-in user, if any.
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Whether the signed-in user has the premium tier flag.
    ///
    /// Signed-out sessions are never premium.
    #[must_use]
    pub fn is_premium(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.is_premium)
    }

    /// Whether an auth call is still simulating latency.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Starts a mock login. The password is accepted unchecked.
    ///
    /// Ignored while another auth call is pending.
    pub fn begin_login(&mut self, email: impl Into<String>, _password: &str) {
        self.begin(
            PendingAuth::Login {
                email: email.into(),
            },
            Duration::from_millis(AUTH_DELAY_MS),
        );
    }

    /// Starts a mock registration. The password is accepted unchecked.
    pub fn begin_register(
        &mut self,
        name: impl Into<String>,
        email: impl Into<String>,
        _password: &str,
    ) {
        self.begin(
            PendingAuth::Register {
                name: name.into(),
                email: email.into(),
            },
            Duration::from_millis(AUTH_DELAY_MS),
        );
    }

    /// Starts a mock account upgrade. Ignored when signed out.
    pub fn begin_upgrade(&mut self) {
        if self.user.is_none() {
            return;
        }
        self.begin(PendingAuth::Upgrade, Duration::from_millis(AUTH_DELAY_MS));
    }

    fn begin(&mut self, op: PendingAuth, delay: Duration) {
        if self.pending.is_some() {
            return;
        }
        self.pending = Some((op, Instant::now() + delay));
    }

    /// Resolves the pending auth call once its deadline has passed.
    ///
    /// Mock calls never fail: the resolved user is persisted under the
    /// `user` key (write failures are logged, not surfaced) and reported
    /// as an [`AuthEvent`].
    pub fn poll(&mut self, storage: &mut dyn Storage) -> Option<AuthEvent> {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|(_, at)| Instant::now() >= *at);
        if !due {
            return None;
        }
        let (op, _) = self.pending.take()?;

        let event = match op {
            PendingAuth::Login { email } => {
                let name = email.split('@').next().unwrap_or(&email).to_string();
                let user = User::new(name, email);
                self.user = Some(user.clone());
                AuthEvent::LoggedIn(user)
            }
            PendingAuth::Register { name, email } => {
                let user = User::new(name, email);
                self.user = Some(user.clone());
                AuthEvent::Registered(user)
            }
            PendingAuth::Upgrade => {
                let user = self.user.as_mut()?;
                user.is_premium = true;
                AuthEvent::Upgraded(user.clone())
            }
        };

        self.persist(storage);
        Some(event)
    }

    /// Signs out: clears the session and removes the stored record.
    pub fn logout(&mut self, storage: &mut dyn Storage) {
        self.user = None;
        self.pending = None;
        if let Err(e) = storage.remove(STORAGE_KEY_USER) {
            tracing::warn!("Failed to remove stored user record: {e}");
        }
    }

    fn persist(&self, storage: &mut dyn Storage) {
        let Some(user) = &self.user else {
            return;
        };
        match serde_json::to_string(user) {
            Ok(json) => {
                if let Err(e) = storage.set(STORAGE_KEY_USER, &json) {
                    tracing::warn!("Failed to persist user record: {e}");
                }
            }
            Err(e) => tracing::warn!("Failed to serialize user record: {e}"),
        }
    }

    #[cfg(test)]
    pub(crate) fn force_pending_due(&mut self) {
        if let Some((_, at)) = &mut self.pending {
            *at = Instant::now() - Duration::from_millis(1);
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_login_resolves_with_email_prefix_name() {
        let mut storage = MemoryStorage::new();
        let mut session = Session::new();

        session.begin_login("ada@example.com", "hunter2");
        assert!(session.is_pending());
        // Latency not elapsed yet
        assert!(session.poll(&mut storage).is_none());

        session.force_pending_due();
        let event = session.poll(&mut storage).unwrap();
        let AuthEvent::LoggedIn(user) = event else {
            panic!("expected LoggedIn");
        };
        assert_eq!(user.name, "ada");
        assert_eq!(user.email, "ada@example.com");
        assert!(!user.is_premium);
        assert!(!session.is_pending());

        // Persisted under the user key
        assert!(storage.get(STORAGE_KEY_USER).unwrap().contains("\"ada\""));
    }

    #[test]
    fn test_register_uses_given_name() {
        let mut storage = MemoryStorage::new();
        let mut session = Session::new();

        session.begin_register("Ada Lovelace", "ada@example.com", "pw");
        session.force_pending_due();
        let event = session.poll(&mut storage).unwrap();
        let AuthEvent::Registered(user) = event else {
            panic!("expected Registered");
        };
        assert_eq!(user.name, "Ada Lovelace");
    }

    #[test]
    fn test_second_call_ignored_while_pending() {
        let mut storage = MemoryStorage::new();
        let mut session = Session::new();

        session.begin_login("first@example.com", "pw");
        session.begin_login("second@example.com", "pw");
        session.force_pending_due();

        let AuthEvent::LoggedIn(user) = session.poll(&mut storage).unwrap() else {
            panic!("expected LoggedIn");
        };
        assert_eq!(user.email, "first@example.com");
    }

    #[test]
    fn test_upgrade_sets_premium_and_persists() {
        let mut storage = MemoryStorage::new();
        let mut session = Session::new();

        session.begin_login("ada@example.com", "pw");
        session.force_pending_due();
        session.poll(&mut storage).unwrap();
        assert!(!session.is_premium());

        session.begin_upgrade();
        session.force_pending_due();
        let event = session.poll(&mut storage).unwrap();
        assert!(matches!(event, AuthEvent::Upgraded(ref u) if u.is_premium));
        assert!(session.is_premium());
        assert!(storage
            .get(STORAGE_KEY_USER)
            .unwrap()
            .contains("\"isPremium\":true"));
    }

    #[test]
    fn test_upgrade_ignored_when_signed_out() {
        let mut storage = MemoryStorage::new();
        let mut session = Session::new();
        session.begin_upgrade();
        assert!(!session.is_pending());
        session.force_pending_due();
        assert!(session.poll(&mut storage).is_none());
    }

    #[test]
    fn test_logout_removes_stored_record() {
        let mut storage = MemoryStorage::new();
        let mut session = Session::new();

        session.begin_login("ada@example.com", "pw");
        session.force_pending_due();
        session.poll(&mut storage).unwrap();
        assert!(storage.get(STORAGE_KEY_USER).is_some());

        session.logout(&mut storage);
        assert!(session.user().is_none());
        assert!(storage.get(STORAGE_KEY_USER).is_none());
    }

    #[test]
    fn test_restore_round_trip() {
        let mut storage = MemoryStorage::new();
        let mut session = Session::new();
        session.begin_register("Ada", "ada@example.com", "pw");
        session.force_pending_due();
        session.poll(&mut storage).unwrap();

        let restored = Session::restore(&storage);
        assert_eq!(restored.user(), session.user());
    }

    #[test]
    fn test_restore_ignores_corrupt_record() {
        let mut storage = MemoryStorage::new();
        storage.set(STORAGE_KEY_USER, "{not json").unwrap();
        let session = Session::restore(&storage);
        assert!(session.user().is_none());
    }
}
