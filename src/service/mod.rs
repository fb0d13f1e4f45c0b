//! Mutation Service
//!
//! The single entry point both transports use to read or change the log.
//!
//! Every create or delete runs as one critical section over the
//! [`LogStore`]: re-read the snapshot, apply the change, persist, publish.
//! Two mutations arriving together are applied strictly one after the
//! other, so neither can write back a log that is missing the other's
//! change. Publishing inside the section makes broadcast order equal to
//! acceptance order; the send itself never blocks.
//!
//! File I/O runs on the blocking pool. A spawned blocking task runs to
//! completion even if the caller goes away, so a client disconnecting
//! mid-request never rolls back an accepted mutation.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::api::websocket::broadcaster::EventBroadcaster;
use crate::error::{ChatError, ChatResult};
use crate::log_store::LogStore;
use crate::types::{Message, NewMessage};
use crate::validation;

/// Result of a successful create
#[derive(Debug, Clone)]
pub struct Created {
    pub message: Message,
    /// Log length after retention was applied
    pub total: usize,
}

/// Serializes all access to the message log
#[derive(Clone)]
pub struct MutationService {
    store: Arc<Mutex<LogStore>>,
    broadcaster: Arc<EventBroadcaster>,
}

impl MutationService {
    pub fn new(store: LogStore, broadcaster: Arc<EventBroadcaster>) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            broadcaster,
        }
    }

    /// The broadcaster mutations are published to
    pub fn broadcaster(&self) -> &Arc<EventBroadcaster> {
        &self.broadcaster
    }

    /// Validate, append, persist and announce a new message
    pub async fn create_message(&self, payload: NewMessage) -> ChatResult<Created> {
        let draft = validation::validate(payload)?;

        let store = Arc::clone(&self.store);
        let broadcaster = Arc::clone(&self.broadcaster);
        let created = tokio::task::spawn_blocking(move || -> ChatResult<Created> {
            let store = store.lock();
            // Stamped inside the lock so createdAt order matches log order
            let message = draft.stamp();
            let retained = store.append_and_persist(store.read_all(), message.clone())?;
            broadcaster.announce_created(&message);
            Ok(Created {
                message,
                total: retained.len(),
            })
        })
        .await?
        .inspect_err(|e| log::error!("Failed to create message: {}", e))?;

        log::info!(
            "Message {} created by {} ({} in log)",
            created.message.id,
            created.message.username,
            created.total
        );
        Ok(created)
    }

    /// Remove a message and announce the deletion
    pub async fn delete_message(&self, id: String) -> ChatResult<String> {
        let store = Arc::clone(&self.store);
        let broadcaster = Arc::clone(&self.broadcaster);
        let removed = tokio::task::spawn_blocking(move || -> ChatResult<String> {
            let store = store.lock();
            let removed = store.remove_and_persist(&id)?;
            broadcaster.announce_deleted(&removed);
            Ok(removed)
        })
        .await?
        .inspect_err(|e| {
            if let ChatError::Storage(_) = e {
                log::error!("Failed to delete message: {}", e);
            }
        })?;

        log::info!("Message {} deleted", removed);
        Ok(removed)
    }

    /// Current log, oldest first
    pub async fn list_messages(&self) -> ChatResult<Vec<Message>> {
        let store = Arc::clone(&self.store);
        let messages = tokio::task::spawn_blocking(move || store.lock().read_all()).await?;
        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::websocket::events::ChatEvent;
    use crate::error::ValidationError;
    use tempfile::TempDir;

    fn setup(max: usize) -> (TempDir, MutationService) {
        let temp_dir = TempDir::new().unwrap();
        let store = LogStore::open(temp_dir.path().join("messages.json"), max).unwrap();
        let service = MutationService::new(store, Arc::new(EventBroadcaster::new(64)));
        (temp_dir, service)
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let (_dir, service) = setup(200);

        let created = service
            .create_message(NewMessage::new("lexsa", "hi"))
            .await
            .unwrap();
        assert_eq!(created.total, 1);
        assert_eq!(created.message.username, "lexsa");
        assert_eq!(created.message.text, "hi");

        let messages = service.list_messages().await.unwrap();
        assert_eq!(messages, vec![created.message]);
    }

    #[tokio::test]
    async fn test_invalid_create_leaves_log_and_subscribers_alone() {
        let (_dir, service) = setup(200);
        let mut rx = service.broadcaster().subscribe();

        let err = service
            .create_message(NewMessage::new("lexsa", "   "))
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::Validation(ValidationError::TextRequired)));

        assert!(service.list_messages().await.unwrap().is_empty());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_delete_announces_and_removes() {
        let (_dir, service) = setup(200);
        let created = service
            .create_message(NewMessage::new("lexsa", "bye"))
            .await
            .unwrap();

        let mut rx = service.broadcaster().subscribe();
        let id = service.delete_message(created.message.id.clone()).await.unwrap();
        assert_eq!(id, created.message.id);

        let event = rx.recv().await.unwrap().event;
        assert_eq!(event, ChatEvent::Deleted { id });
        assert!(service.list_messages().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_absent_id_is_not_found() {
        let (_dir, service) = setup(200);
        service
            .create_message(NewMessage::new("lexsa", "stay"))
            .await
            .unwrap();
        let mut rx = service.broadcaster().subscribe();

        let err = service
            .delete_message("missing".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::NotFound(_)));
        assert_eq!(service.list_messages().await.unwrap().len(), 1);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_write_failure_is_reported_and_not_broadcast() {
        let (dir, service) = setup(200);
        let kept = service
            .create_message(NewMessage::new("lexsa", "before the disk broke"))
            .await
            .unwrap();
        let mut rx = service.broadcaster().subscribe();

        // A directory at the temp path makes every snapshot write fail
        std::fs::create_dir(dir.path().join("messages.json.tmp")).unwrap();

        let err = service
            .create_message(NewMessage::new("lexsa", "lost"))
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::Storage(_)));

        let err = service
            .delete_message(kept.message.id.clone())
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::Storage(_)));

        assert!(rx.try_recv().is_err());
        assert_eq!(service.list_messages().await.unwrap(), vec![kept.message]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_are_not_lost() {
        let (_dir, service) = setup(200);

        let mut handles = Vec::new();
        for i in 0..32 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                service
                    .create_message(NewMessage::new("lexsa", format!("msg {}", i)))
                    .await
                    .unwrap()
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let messages = service.list_messages().await.unwrap();
        assert_eq!(messages.len(), 32);
        assert!(messages.windows(2).all(|w| w[0].created_at <= w[1].created_at));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_broadcast_order_matches_log_order() {
        let (_dir, service) = setup(200);
        let mut rx = service.broadcaster().subscribe();

        let mut handles = Vec::new();
        for i in 0..16 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                service
                    .create_message(NewMessage::new("lexsa", format!("msg {}", i)))
                    .await
                    .unwrap()
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let log_ids: Vec<String> = service
            .list_messages()
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.id)
            .collect();

        let mut broadcast_ids = Vec::new();
        for expected_seq in 0..16u64 {
            let msg = rx.recv().await.unwrap();
            assert_eq!(msg.sequence_id, expected_seq);
            match msg.event {
                ChatEvent::Created { message } => broadcast_ids.push(message.id),
                other => panic!("unexpected {:?}", other),
            }
        }
        assert_eq!(broadcast_ids, log_ids);
    }
}
