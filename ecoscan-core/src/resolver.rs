use tracing::info;

use crate::activity::ActivityStore;
use crate::async_backend::AsyncBackend;
use crate::clock::Clock;
use crate::error::ActivityError;
use crate::record::{ActivityKind, LocationRecord};

/// Resolves "last scan" / "last photo" into the reference string stored on a
/// new location.
pub struct AssociationResolver<'a, B, C> {
    store: &'a ActivityStore<B, C>,
}

impl<'a, B: AsyncBackend, C: Clock> AssociationResolver<'a, B, C> {
    pub fn new(store: &'a ActivityStore<B, C>) -> Self {
        Self { store }
    }

    /// Returns the reference for the latest activity of `kind`, or None if
    /// there is none.
    pub async fn resolve_reference(&self, kind: ActivityKind) -> Result<Option<String>, ActivityError> {
        match kind {
            ActivityKind::Scan => self.store.last_scan_content().await,
            ActivityKind::Photo => self.store.last_photo_reference().await,
        }
    }

    /// Like [`resolve_reference`](Self::resolve_reference) but absence is
    /// [`ActivityError::NoPriorActivity`].
    pub async fn require_reference(&self, kind: ActivityKind) -> Result<String, ActivityError> {
        self.resolve_reference(kind)
            .await?
            .ok_or(ActivityError::NoPriorActivity(kind))
    }

    /// Attaches a position to the latest activity of `kind`.
    ///
    /// Nothing is written when there is no prior activity.
    pub async fn tag_location(
        &self,
        kind: ActivityKind,
        latitude: f64,
        longitude: f64,
    ) -> Result<LocationRecord, ActivityError> {
        let reference = self.require_reference(kind).await?;
        let record = self
            .store
            .append_location(kind, &reference, latitude, longitude)
            .await?;
        info!(%kind, reference = %record.reference, "location tagged");
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;

    #[tokio::test]
    async fn resolves_by_kind() {
        let store = ActivityStore::new(MemoryBackend::new());
        store.append_scan("QR-1").await.unwrap();
        store.append_photo("img", "Bench", "").await.unwrap();

        let resolver = AssociationResolver::new(&store);

        assert_eq!(
            resolver.resolve_reference(ActivityKind::Scan).await.unwrap().as_deref(),
            Some("QR-1")
        );
        assert_eq!(
            resolver.resolve_reference(ActivityKind::Photo).await.unwrap().as_deref(),
            Some("Bench")
        );
    }

    #[tokio::test]
    async fn no_prior_activity_aborts_without_writing() {
        let store = ActivityStore::new(MemoryBackend::new());
        let resolver = AssociationResolver::new(&store);

        assert_eq!(resolver.resolve_reference(ActivityKind::Photo).await.unwrap(), None);

        let err = resolver
            .tag_location(ActivityKind::Photo, 1.0, 2.0)
            .await
            .unwrap_err();
        assert!(matches!(err, ActivityError::NoPriorActivity(ActivityKind::Photo)));
        assert!(err.is_informational());
        assert!(store.locations().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn reference_is_a_snapshot() {
        let store = ActivityStore::new(MemoryBackend::new());
        store.append_scan("first").await.unwrap();

        let resolver = AssociationResolver::new(&store);
        resolver.tag_location(ActivityKind::Scan, 0.0, 0.0).await.unwrap();
        store.append_scan("second").await.unwrap();

        let locations = store.locations().await.unwrap();
        assert_eq!(locations[0].reference, "first");
        assert_eq!(locations[0].kind, ActivityKind::Scan);
    }
}
