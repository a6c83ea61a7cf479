use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use domain::{LiveEvent, PostId, PresenceEntry, UserId, Viewer};
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::traits::PresenceChannel;

type Rooms = HashMap<PostId, HashMap<UserId, PresenceEntry>>;

/// In-process presence channel. Viewers stay present while they keep
/// heartbeating; entries older than `timeout` are swept.
#[derive(Clone)]
pub struct PresenceHub {
    rooms: Arc<Mutex<Rooms>>,
    timeout: chrono::Duration,
    tx_live: broadcast::Sender<LiveEvent>,
}

impl PresenceHub {
    pub fn new(timeout: Duration, tx_live: broadcast::Sender<LiveEvent>) -> Self {
        Self {
            rooms: Arc::new(Mutex::new(HashMap::new())),
            timeout: chrono::Duration::seconds(timeout.as_secs() as i64),
            tx_live,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Rooms> {
        self.rooms.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn snapshot(rooms: &Rooms, room: &PostId) -> Vec<PresenceEntry> {
        let mut present: Vec<_> = rooms
            .get(room)
            .map(|users| users.values().cloned().collect())
            .unwrap_or_default();
        present.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.user_id.cmp(&b.user_id)));
        present
    }

    fn publish(&self, room_id: PostId, present: Vec<PresenceEntry>) {
        if self
            .tx_live
            .send(LiveEvent::PresenceChanged { room_id, present })
            .is_err()
        {
            debug!("presence changed with no live subscribers");
        }
    }

    pub fn announce_at(&self, room: &PostId, viewer: &Viewer, now: NaiveDateTime) {
        let changed = {
            let mut rooms = self.lock();
            let users = rooms.entry(room.clone()).or_default();
            let joined = match users.get_mut(&viewer.user_id) {
                Some(entry) => {
                    entry.last_seen = now;
                    let renamed = entry.name != viewer.name;
                    entry.name = viewer.name.clone();
                    renamed
                }
                None => {
                    users.insert(
                        viewer.user_id.clone(),
                        PresenceEntry {
                            user_id: viewer.user_id.clone(),
                            name: viewer.name.clone(),
                            last_seen: now,
                        },
                    );
                    true
                }
            };
            joined.then(|| Self::snapshot(&rooms, room))
        };

        if let Some(present) = changed {
            self.publish(room.clone(), present);
        }
    }

    pub fn leave_now(&self, room: &PostId, user_id: &UserId) {
        let changed = {
            let mut rooms = self.lock();
            let removed = match rooms.get_mut(room) {
                Some(users) => users.remove(user_id).is_some(),
                None => false,
            };
            if rooms.get(room).is_some_and(|users| users.is_empty()) {
                rooms.remove(room);
            }
            removed.then(|| Self::snapshot(&rooms, room))
        };

        if let Some(present) = changed {
            self.publish(room.clone(), present);
        }
    }

    /// Drops entries not refreshed since `now - timeout`. Returns how many
    /// were removed.
    pub fn sweep_at(&self, now: NaiveDateTime) -> usize {
        let cutoff = now - self.timeout;
        let mut removed = 0;
        let updates: Vec<(PostId, Vec<PresenceEntry>)> = {
            let mut rooms = self.lock();
            let mut touched = Vec::new();
            for (room, users) in rooms.iter_mut() {
                let before = users.len();
                users.retain(|_, entry| entry.last_seen >= cutoff);
                if users.len() != before {
                    removed += before - users.len();
                    touched.push(room.clone());
                }
            }
            rooms.retain(|_, users| !users.is_empty());
            touched
                .into_iter()
                .map(|room| {
                    let present = Self::snapshot(&rooms, &room);
                    (room, present)
                })
                .collect()
        };

        for (room, present) in updates {
            self.publish(room, present);
        }
        removed
    }

    pub async fn run_sweeper(self, every: Duration, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(every);
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("presence sweeper stopped");
                    break;
                }
                _ = ticker.tick() => {
                    let removed = self.sweep_at(Utc::now().naive_utc());
                    if removed > 0 {
                        debug!("presence sweep removed {} stale viewer(s)", removed);
                    }
                }
            }
        }
    }
}

#[async_trait]
impl PresenceChannel for PresenceHub {
    async fn announce(&self, room: &PostId, viewer: &Viewer) -> Result<()> {
        self.announce_at(room, viewer, Utc::now().naive_utc());
        Ok(())
    }

    async fn leave(&self, room: &PostId, user_id: &UserId) -> Result<()> {
        self.leave_now(room, user_id);
        Ok(())
    }

    async fn present(&self, room: &PostId) -> Result<Vec<PresenceEntry>> {
        Ok(Self::snapshot(&self.lock(), room))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewer(id: &str, name: &str) -> Viewer {
        Viewer {
            user_id: UserId::new(id),
            name: name.into(),
            email: format!("{}@example.com", id),
        }
    }

    fn at(secs: i64) -> NaiveDateTime {
        chrono::DateTime::from_timestamp(secs, 0).unwrap().naive_utc()
    }

    fn hub() -> (PresenceHub, broadcast::Receiver<LiveEvent>) {
        let (tx, rx) = broadcast::channel(16);
        (PresenceHub::new(Duration::from_secs(30), tx), rx)
    }

    fn names(present: &[PresenceEntry]) -> Vec<&str> {
        present.iter().map(|p| p.name.as_str()).collect()
    }

    #[tokio::test]
    async fn rooms_are_isolated() {
        let (hub, _rx) = hub();
        let p1 = PostId::new_unchecked("p1".into());
        let p2 = PostId::new_unchecked("p2".into());
        hub.announce_at(&p1, &viewer("u1", "Ann"), at(0));
        hub.announce_at(&p2, &viewer("u2", "Bob"), at(0));

        assert_eq!(names(&hub.present(&p1).await.unwrap()), vec!["Ann"]);
        assert_eq!(names(&hub.present(&p2).await.unwrap()), vec!["Bob"]);
    }

    #[tokio::test]
    async fn join_publishes_heartbeat_does_not() {
        let (hub, mut rx) = hub();
        let p1 = PostId::new_unchecked("p1".into());
        hub.announce_at(&p1, &viewer("u1", "Ann"), at(0));
        hub.announce_at(&p1, &viewer("u1", "Ann"), at(5));

        match rx.try_recv().unwrap() {
            LiveEvent::PresenceChanged { room_id, present } => {
                assert_eq!(room_id, p1);
                assert_eq!(names(&present), vec!["Ann"]);
            }
            other => panic!("unexpected event {:?}", other),
        }
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn leave_removes_and_publishes() {
        let (hub, mut rx) = hub();
        let p1 = PostId::new_unchecked("p1".into());
        hub.announce_at(&p1, &viewer("u1", "Ann"), at(0));
        hub.announce_at(&p1, &viewer("u2", "Bob"), at(0));
        let _ = rx.try_recv();
        let _ = rx.try_recv();

        hub.leave(&p1, &UserId::new("u1")).await.unwrap();
        assert_eq!(names(&hub.present(&p1).await.unwrap()), vec!["Bob"]);
        assert!(matches!(
            rx.try_recv().unwrap(),
            LiveEvent::PresenceChanged { ref present, .. } if present.len() == 1
        ));

        // leaving twice is a no-op
        hub.leave(&p1, &UserId::new("u1")).await.unwrap();
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn sweep_drops_stale_viewers_only() {
        let (hub, _rx) = hub();
        let p1 = PostId::new_unchecked("p1".into());
        hub.announce_at(&p1, &viewer("u1", "Ann"), at(0));
        hub.announce_at(&p1, &viewer("u2", "Bob"), at(20));

        assert_eq!(hub.sweep_at(at(25)), 0);
        assert_eq!(hub.sweep_at(at(40)), 1);
        assert_eq!(names(&hub.present(&p1).await.unwrap()), vec!["Bob"]);
        assert_eq!(hub.sweep_at(at(100)), 1);
        assert!(hub.present(&p1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn sweeper_stops_on_cancel() {
        let (hub, _rx) = hub();
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(hub.run_sweeper(Duration::from_millis(10), cancel.clone()));
        cancel.cancel();
        handle.await.unwrap();
    }
}
