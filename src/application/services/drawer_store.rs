//! Session-scoped drawer registry.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crate::application::services::{Drawer, ImageGenerationService};
use crate::utils::session_id::{generate_session_id, is_valid_session_id};

struct Session {
    drawer: Arc<Drawer>,
    last_seen: Instant,
}

/// Owns one [`Drawer`] per browser session.
///
/// Sessions live only in memory. Idle sessions are dropped by
/// [`run_session_sweeper`], together with their entries.
pub struct DrawerStore {
    service: Arc<ImageGenerationService>,
    cancel_on_dismiss: bool,
    sessions: Mutex<HashMap<String, Session>>,
}

impl DrawerStore {
    pub fn new(service: Arc<ImageGenerationService>, cancel_on_dismiss: bool) -> Self {
        Self {
            service,
            cancel_on_dismiss,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    fn sessions(&self) -> MutexGuard<'_, HashMap<String, Session>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the drawer for `session_id`, creating a new session when the
    /// id is missing, malformed or expired.
    ///
    /// # Returns
    ///
    /// `(session_id, drawer, created)`; `created` is true when the caller
    /// must hand a new session id to the client.
    pub fn get_or_create(&self, session_id: Option<&str>) -> (String, Arc<Drawer>, bool) {
        let mut sessions = self.sessions();

        if let Some(id) = session_id.filter(|id| is_valid_session_id(id))
            && let Some(session) = sessions.get_mut(id)
        {
            session.last_seen = Instant::now();
            return (id.to_string(), session.drawer.clone(), false);
        }

        let id = generate_session_id();
        let drawer = Arc::new(Drawer::new(self.service.clone(), self.cancel_on_dismiss));
        sessions.insert(
            id.clone(),
            Session {
                drawer: drawer.clone(),
                last_seen: Instant::now(),
            },
        );
        tracing::debug!(sessions = sessions.len(), "Drawer session created");

        (id, drawer, true)
    }

    /// Returns the drawer for an existing session without creating one.
    ///
    /// A hit counts as activity for idle eviction.
    pub fn get(&self, session_id: &str) -> Option<Arc<Drawer>> {
        if !is_valid_session_id(session_id) {
            return None;
        }

        let mut sessions = self.sessions();
        let session = sessions.get_mut(session_id)?;
        session.last_seen = Instant::now();
        Some(session.drawer.clone())
    }

    /// Drops sessions idle for at least `ttl`. Returns how many were removed.
    pub fn evict_idle(&self, ttl: Duration) -> usize {
        let mut sessions = self.sessions();
        let before = sessions.len();
        sessions.retain(|_, session| session.last_seen.elapsed() < ttl);
        before - sessions.len()
    }

    pub fn len(&self) -> usize {
        self.sessions().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Periodically evicts idle drawer sessions.
///
/// Runs until the process exits; spawn it once at startup.
pub async fn run_session_sweeper(store: Arc<DrawerStore>, ttl: Duration) {
    let period = (ttl / 4).max(Duration::from_secs(1));
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        interval.tick().await;
        let evicted = store.evict_idle(ttl);
        if evicted > 0 {
            tracing::info!(evicted, remaining = store.len(), "Evicted idle drawer sessions");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::image_service::ImageSettings;
    use crate::domain::repositories::MockImageProvider;

    fn store() -> DrawerStore {
        let service = Arc::new(ImageGenerationService::new(
            Arc::new(MockImageProvider::new()),
            ImageSettings::default(),
        ));
        DrawerStore::new(service, false)
    }

    #[test]
    fn test_new_session_is_created_without_id() {
        let store = store();

        let (id, _, created) = store.get_or_create(None);
        assert!(created);
        assert!(is_valid_session_id(&id));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_existing_session_is_reused() {
        let store = store();

        let (id, first, _) = store.get_or_create(None);
        let (same_id, second, created) = store.get_or_create(Some(&id));

        assert!(!created);
        assert_eq!(id, same_id);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_unknown_or_malformed_id_gets_new_session() {
        let store = store();

        let (id, _, created) = store.get_or_create(Some("0123456789abcdef0123456789abcdef"));
        assert!(created);
        assert_ne!(id, "0123456789abcdef0123456789abcdef");

        let (_, _, created) = store.get_or_create(Some("../etc/passwd"));
        assert!(created);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_get_never_creates() {
        let store = store();

        assert!(store.get("0123456789abcdef0123456789abcdef").is_none());
        assert!(store.get("not a session").is_none());
        assert!(store.is_empty());

        let (id, drawer, _) = store.get_or_create(None);
        assert!(Arc::ptr_eq(&store.get(&id).unwrap(), &drawer));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_evict_idle() {
        let store = store();
        store.get_or_create(None);
        store.get_or_create(None);

        assert_eq!(store.evict_idle(Duration::from_secs(3600)), 0);
        assert_eq!(store.evict_idle(Duration::ZERO), 2);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_drawers_are_isolated_per_session() {
        let store = store();
        let (_, a, _) = store.get_or_create(None);
        let (_, b, _) = store.get_or_create(None);

        let entry = a.submit("only in a", None, true);

        assert_eq!(a.len(), 1);
        assert!(b.is_empty());
        assert!(b.get(entry.id).is_none());
    }
}
