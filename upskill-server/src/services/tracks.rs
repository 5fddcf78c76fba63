//! Track CRUD

use std::sync::Arc;

use crate::db::TrackStore;
use crate::error::ServerResult;
use crate::models::{NewTrack, Track, TrackChanges};

#[derive(Clone)]
pub struct TrackService {
    store: Arc<dyn TrackStore>,
}

impl TrackService {
    pub fn new(store: Arc<dyn TrackStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, track: NewTrack) -> ServerResult<Track> {
        let created = self.store.create(track).await?;
        tracing::debug!(track_id = created.id, "track created");
        Ok(created)
    }

    pub async fn find_by_id(&self, id: i64) -> ServerResult<Track> {
        Ok(self.store.find_by_id(id).await?)
    }

    pub async fn find_all(&self) -> ServerResult<Vec<Track>> {
        Ok(self.store.find_all().await?)
    }

    pub async fn update(&self, id: i64, changes: TrackChanges) -> ServerResult<Track> {
        let mut track = self.store.find_by_id(id).await?;
        track.apply(changes);
        self.store.update(&track).await?;
        tracing::debug!(track_id = id, "track updated");
        Ok(track)
    }

    pub async fn delete(&self, id: i64) -> ServerResult<()> {
        self.store.delete(id).await?;
        tracing::debug!(track_id = id, "track deleted");
        Ok(())
    }
}
