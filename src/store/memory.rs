use std::sync::{Mutex, MutexGuard};

use chrono::Utc;

use super::{Message, MessageStore, NewMessage};

#[derive(Default)]
struct State {
    next_id: i64,
    pending: Vec<Message>,
    archived: Vec<Message>,
}

/// Process-lifetime storage. Everything lives behind one lock so the id
/// counter and archive's find-and-remove are atomic with respect to every
/// other store operation.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl MessageStore for InMemoryStore {
    fn append(&self, submission: &NewMessage) -> Message {
        let mut state = self.state();
        state.next_id += 1;
        let saved = Message {
            id: state.next_id,
            name: submission.name.clone(),
            email: submission.email.clone(),
            message: submission.message.clone(),
            timestamp: Utc::now(),
            archived_at: None,
        };
        state.pending.push(saved.clone());
        saved
    }

    fn pending(&self) -> Vec<Message> {
        self.state().pending.clone()
    }

    fn archive(&self, id: i64) -> Option<Message> {
        let mut state = self.state();
        let index = state.pending.iter().position(|m| m.id == id)?;
        let mut message = state.pending.remove(index);
        message.archived_at = Some(Utc::now());
        state.archived.push(message.clone());
        Some(message)
    }

    fn archived(&self) -> Vec<Message> {
        self.state().archived.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(text: &str) -> NewMessage {
        NewMessage {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            message: text.to_string(),
            honeypot: None,
        }
    }

    #[test]
    fn ids_are_unique_and_increasing() {
        let store = InMemoryStore::new();
        let a = store.append(&submission("first message"));
        let b = store.append(&submission("second message"));
        let c = store.append(&submission("third message"));

        assert!(a.id < b.id);
        assert!(b.id < c.id);
    }

    #[test]
    fn pending_preserves_insertion_order() {
        let store = InMemoryStore::new();
        let first = store.append(&submission("hello there"));
        let second = store.append(&submission("hello again"));

        let ids: Vec<i64> = store.pending().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[test]
    fn archive_moves_the_message_and_stamps_archived_at() {
        let store = InMemoryStore::new();
        let first = store.append(&submission("hello there"));
        let second = store.append(&submission("hello again"));

        let archived = store.archive(first.id).expect("message was pending");
        assert_eq!(archived.id, first.id);
        assert!(archived.archived_at.is_some());

        let pending: Vec<i64> = store.pending().iter().map(|m| m.id).collect();
        assert_eq!(pending, vec![second.id]);
        let archived_ids: Vec<i64> = store.archived().iter().map(|m| m.id).collect();
        assert_eq!(archived_ids, vec![first.id]);
    }

    #[test]
    fn archived_list_is_in_archival_order() {
        let store = InMemoryStore::new();
        let first = store.append(&submission("hello there"));
        let second = store.append(&submission("hello again"));

        store.archive(second.id).expect("message was pending");
        store.archive(first.id).expect("message was pending");

        let ids: Vec<i64> = store.archived().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[test]
    fn archiving_an_unknown_id_changes_nothing() {
        let store = InMemoryStore::new();
        let kept = store.append(&submission("hello there"));

        assert!(store.archive(kept.id + 42).is_none());

        assert_eq!(store.pending().len(), 1);
        assert_eq!(store.pending()[0].id, kept.id);
        assert!(store.archived().is_empty());
    }

    #[test]
    fn no_message_is_lost_or_duplicated() {
        let store = InMemoryStore::new();
        let mut created: Vec<i64> = (0..4)
            .map(|n| store.append(&submission(&format!("message number {}", n))).id)
            .collect();

        store.archive(created[1]).expect("message was pending");
        store.archive(created[3]).expect("message was pending");

        let mut seen: Vec<i64> = store
            .pending()
            .iter()
            .chain(store.archived().iter())
            .map(|m| m.id)
            .collect();
        created.sort_unstable();
        seen.sort_unstable();
        assert_eq!(seen, created);

        for pending in store.pending() {
            assert!(store.archived().iter().all(|a| a.id != pending.id));
        }
    }

    #[test]
    fn reads_without_writes_are_idempotent() {
        let store = InMemoryStore::new();
        store.append(&submission("hello there"));
        store.append(&submission("hello again"));

        let once: Vec<i64> = store.pending().iter().map(|m| m.id).collect();
        let twice: Vec<i64> = store.pending().iter().map(|m| m.id).collect();
        assert_eq!(once, twice);
        assert!(store.archived().is_empty());
        assert!(store.archived().is_empty());
    }
}
