//! Session store: conversation history keyed by session id.
//!
//! The in-memory store is bounded and time-expiring. Every mutation happens
//! under one lock, so concurrent appends to the same session never lose a
//! turn.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use legiscan_core::config::SessionConfig;
use legiscan_core::types::{ConversationTurn, SessionId};

/// Storage contract for conversation histories.
pub trait SessionStore: Send + Sync {
    /// History of a live session, oldest turn first.
    fn get(&self, id: &SessionId) -> Option<Vec<ConversationTurn>>;

    /// Replace a session's history, creating the session if needed.
    fn put(&self, id: SessionId, history: Vec<ConversationTurn>);

    /// Append one turn as a single atomic step, creating the session if it
    /// does not exist. Returns the full history after the append.
    fn append(&self, id: &SessionId, turn: ConversationTurn) -> Vec<ConversationTurn>;

    /// Number of live sessions.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

struct Entry {
    history: Vec<ConversationTurn>,
    last_seen: Instant,
}

impl Entry {
    fn new(history: Vec<ConversationTurn>, now: Instant) -> Self {
        Self {
            history,
            last_seen: now,
        }
    }
}

/// Process-local store with idle expiry and least-recently-used eviction.
pub struct MemorySessionStore {
    entries: Mutex<HashMap<SessionId, Entry>>,
    /// `None` disables expiry.
    ttl: Option<Duration>,
    capacity: usize,
}

impl MemorySessionStore {
    /// Create a store. A zero `ttl` disables expiry; `capacity` is at least 1.
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl: (!ttl.is_zero()).then_some(ttl),
            capacity: capacity.max(1),
        }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(
            Duration::from_secs(config.ttl_minutes.saturating_mul(60)),
            config.max_sessions,
        )
    }

    /// Drop every expired session. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let mut entries = self.lock();
        self.remove_expired(&mut entries, Instant::now())
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SessionId, Entry>> {
        // Entries stay consistent even if a holder panicked mid-call.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_expired(&self, entry: &Entry, now: Instant) -> bool {
        self.ttl
            .is_some_and(|ttl| now.saturating_duration_since(entry.last_seen) > ttl)
    }

    fn remove_expired(&self, entries: &mut HashMap<SessionId, Entry>, now: Instant) -> usize {
        let before = entries.len();
        entries.retain(|_, entry| !self.is_expired(entry, now));
        let removed = before - entries.len();
        if removed > 0 {
            tracing::debug!(removed, "Expired conversation sessions dropped");
        }
        removed
    }

    /// Make space for one new session.
    fn make_room(&self, entries: &mut HashMap<SessionId, Entry>, now: Instant) {
        if entries.len() < self.capacity {
            return;
        }
        self.remove_expired(entries, now);
        while entries.len() >= self.capacity {
            let oldest = entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_seen)
                .map(|(id, _)| *id);
            match oldest {
                Some(id) => {
                    entries.remove(&id);
                    tracing::debug!(session_id = %id, "Session evicted, store at capacity");
                }
                None => break,
            }
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, id: &SessionId) -> Option<Vec<ConversationTurn>> {
        let now = Instant::now();
        let mut entries = self.lock();
        let expired = entries.get(id).is_some_and(|e| self.is_expired(e, now));
        if expired {
            entries.remove(id);
            return None;
        }
        entries.get_mut(id).map(|entry| {
            entry.last_seen = now;
            entry.history.clone()
        })
    }

    fn put(&self, id: SessionId, history: Vec<ConversationTurn>) {
        let now = Instant::now();
        let mut entries = self.lock();
        if !entries.contains_key(&id) {
            self.make_room(&mut entries, now);
        }
        entries.insert(id, Entry::new(history, now));
    }

    fn append(&self, id: &SessionId, turn: ConversationTurn) -> Vec<ConversationTurn> {
        let now = Instant::now();
        let mut entries = self.lock();

        let expired = entries.get(id).is_some_and(|e| self.is_expired(e, now));
        if expired {
            entries.remove(id);
        }
        if !entries.contains_key(id) {
            self.make_room(&mut entries, now);
        }

        let entry = entries
            .entry(*id)
            .or_insert_with(|| Entry::new(Vec::new(), now));
        entry.history.push(turn);
        entry.last_seen = now;
        entry.history.clone()
    }

    fn len(&self) -> usize {
        self.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> MemorySessionStore {
        MemorySessionStore::new(Duration::from_secs(3600), 100)
    }

    #[test]
    fn test_get_unknown_session_is_none() {
        assert!(store().get(&SessionId::new()).is_none());
    }

    #[test]
    fn test_put_then_get() {
        let store = store();
        let id = SessionId::new();
        store.put(id, vec![ConversationTurn::human("Hi")]);
        assert_eq!(store.get(&id), Some(vec![ConversationTurn::human("Hi")]));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_put_empty_history_creates_session() {
        let store = store();
        let id = SessionId::new();
        store.put(id, Vec::new());
        assert_eq!(store.get(&id), Some(Vec::new()));
    }

    #[test]
    fn test_append_creates_session_lazily() {
        let store = store();
        let id = SessionId::new();
        let history = store.append(&id, ConversationTurn::human("What is this?"));
        assert_eq!(history, vec![ConversationTurn::human("What is this?")]);
        assert_eq!(store.get(&id).unwrap().len(), 1);
    }

    #[test]
    fn test_append_preserves_order_and_keeps_everything() {
        let store = store();
        let id = SessionId::new();
        for i in 0..20 {
            store.append(&id, ConversationTurn::human(format!("q{}", i)));
            store.append(&id, ConversationTurn::assistant(format!("a{}", i)));
        }
        let history = store.get(&id).unwrap();
        assert_eq!(history.len(), 40);
        assert_eq!(history[0], ConversationTurn::human("q0"));
        assert_eq!(history[39], ConversationTurn::assistant("a19"));
    }

    #[test]
    fn test_sessions_are_isolated() {
        let store = store();
        let a = SessionId::new();
        let b = SessionId::new();
        store.append(&a, ConversationTurn::human("from a"));
        store.append(&b, ConversationTurn::human("from b"));
        assert_eq!(store.get(&a).unwrap(), vec![ConversationTurn::human("from a")]);
        assert_eq!(store.get(&b).unwrap(), vec![ConversationTurn::human("from b")]);
    }

    #[test]
    fn test_idle_session_expires() {
        let store = MemorySessionStore::new(Duration::from_millis(20), 10);
        let id = SessionId::new();
        store.put(id, vec![ConversationTurn::human("old")]);
        std::thread::sleep(Duration::from_millis(60));
        assert!(store.get(&id).is_none());

        // A fresh append after expiry starts an empty history.
        store.put(id, vec![ConversationTurn::human("old")]);
        std::thread::sleep(Duration::from_millis(60));
        let history = store.append(&id, ConversationTurn::human("new"));
        assert_eq!(history, vec![ConversationTurn::human("new")]);
    }

    #[test]
    fn test_purge_expired() {
        let store = MemorySessionStore::new(Duration::from_millis(20), 10);
        store.put(SessionId::new(), Vec::new());
        store.put(SessionId::new(), Vec::new());
        std::thread::sleep(Duration::from_millis(60));
        assert_eq!(store.purge_expired(), 2);
        assert!(store.is_empty());
    }

    #[test]
    fn test_zero_ttl_never_expires() {
        let store = MemorySessionStore::new(Duration::ZERO, 10);
        let id = SessionId::new();
        store.put(id, Vec::new());
        std::thread::sleep(Duration::from_millis(10));
        assert!(store.get(&id).is_some());
    }

    #[test]
    fn test_capacity_evicts_least_recently_used() {
        let store = MemorySessionStore::new(Duration::from_secs(3600), 2);
        let a = SessionId::new();
        let b = SessionId::new();
        let c = SessionId::new();

        store.put(a, Vec::new());
        std::thread::sleep(Duration::from_millis(5));
        store.put(b, Vec::new());
        std::thread::sleep(Duration::from_millis(5));
        // Touch `a` so `b` becomes the oldest.
        assert!(store.get(&a).is_some());
        std::thread::sleep(Duration::from_millis(5));

        store.append(&c, ConversationTurn::human("hi"));
        assert_eq!(store.len(), 2);
        assert!(store.get(&a).is_some());
        assert!(store.get(&b).is_none());
        assert!(store.get(&c).is_some());
    }

    #[test]
    fn test_concurrent_appends_lose_nothing() {
        let store = std::sync::Arc::new(store());
        let id = SessionId::new();
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = std::sync::Arc::clone(&store);
                std::thread::spawn(move || {
                    for i in 0..25 {
                        store.append(&id, ConversationTurn::human(format!("{}-{}", t, i)));
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(store.get(&id).unwrap().len(), 200);
    }

    #[test]
    fn test_from_config() {
        let config = SessionConfig {
            ttl_minutes: 0,
            max_sessions: 0,
            ..SessionConfig::default()
        };
        let store = MemorySessionStore::from_config(&config);
        assert!(store.ttl.is_none());
        assert_eq!(store.capacity, 1);
    }
}
