use anyhow::Result;
use tracing::{info, warn};

use crate::db::{Home, HomeUpdate, NewHome, Store};
use crate::services::uploads::{CleanupOutcome, UploadService};

/// Host-side CRUD over listings. Owns the file-replacement lifecycle and
/// the favourites cascade on delete.
#[derive(Clone)]
pub struct ListingService {
    store: Store,
    uploads: UploadService,
}

impl ListingService {
    #[must_use]
    pub const fn new(store: Store, uploads: UploadService) -> Self {
        Self { store, uploads }
    }

    pub async fn add_home(&self, new_home: NewHome) -> Result<Home> {
        let home = self.store.add_home(new_home).await?;
        info!(home_id = home.id, house_name = %home.house_name, "Home saved");
        Ok(home)
    }

    pub async fn list_homes(&self) -> Result<Vec<Home>> {
        self.store.list_homes().await
    }

    pub async fn get_home(&self, id: i32) -> Result<Option<Home>> {
        self.store.get_home(id).await
    }

    /// Overwrite the scalar fields of a home and swap in any replacement
    /// uploads. Old files are removed best-effort once the record update
    /// succeeds; photo and rules document are handled independently.
    pub async fn edit_home(&self, id: i32, update: HomeUpdate) -> Result<Option<Home>> {
        let Some(existing) = self.store.get_home(id).await? else {
            return Ok(None);
        };

        let replaced_photo = update.photo.is_some().then(|| existing.photo.clone());
        let replaced_rules = if update.rules_document.is_some() {
            existing.rules_document.clone()
        } else {
            None
        };

        let Some(updated) = self.store.update_home(id, update).await? else {
            return Ok(None);
        };

        if let Some(old_photo) = replaced_photo {
            self.cleanup_file(&old_photo, "photo").await;
        }
        if let Some(old_rules) = replaced_rules {
            self.cleanup_file(&old_rules, "rules document").await;
        }

        info!(home_id = id, "Home updated");
        Ok(Some(updated))
    }

    /// Delete a home. Favourite references are cleared first so that no
    /// favourite ever points at a non-existent listing; the two steps are
    /// not atomic and a crash in between can only leave the home itself
    /// behind, never a dangling reference.
    pub async fn delete_home(&self, id: i32) -> Result<bool> {
        let existing = self.store.get_home(id).await?;

        let cleared = self.store.remove_favourites_for_home(id).await?;
        if cleared > 0 {
            info!(home_id = id, cleared, "Cleared favourite references");
        }

        let deleted = self.store.remove_home(id).await?;

        if deleted && let Some(home) = existing {
            self.cleanup_file(&home.photo, "photo").await;
            if let Some(rules) = &home.rules_document {
                self.cleanup_file(rules, "rules document").await;
            }
            info!(home_id = id, "Home deleted");
        }

        Ok(deleted)
    }

    async fn cleanup_file(&self, path: &str, kind: &str) {
        match self.uploads.remove_file(path).await {
            CleanupOutcome::Removed => info!(path, "Removed old {kind}"),
            CleanupOutcome::Missing => warn!(path, "Old {kind} already missing"),
            CleanupOutcome::Failed(e) => {
                warn!(path, error = %e, "Error while deleting the old {kind}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UploadConfig;

    async fn service(dir: &std::path::Path) -> ListingService {
        let store = Store::new("sqlite::memory:").await.unwrap();
        let uploads = UploadService::new(UploadConfig {
            directory: dir.to_string_lossy().into_owned(),
            max_file_size: 1024,
        });
        ListingService::new(store, uploads)
    }

    fn new_home(photo: &str) -> NewHome {
        NewHome {
            house_name: "Sea View".to_string(),
            price: 120.0,
            location: "Lisbon".to_string(),
            rating: 4.5,
            description: None,
            photo: photo.to_string(),
            rules_document: None,
        }
    }

    #[tokio::test]
    async fn edit_with_new_photo_deletes_old_file() {
        let dir = tempfile::tempdir().unwrap();
        let listing = service(dir.path()).await;

        let old_path = dir.path().join("old.png");
        std::fs::write(&old_path, b"old").unwrap();
        let old_path = old_path.to_string_lossy().into_owned();

        let home = listing.add_home(new_home(&old_path)).await.unwrap();

        let updated = listing
            .edit_home(
                home.id,
                HomeUpdate {
                    house_name: "Sea View".to_string(),
                    price: 150.0,
                    location: "Lisbon".to_string(),
                    rating: 4.5,
                    description: None,
                    photo: Some("uploads/new.png".to_string()),
                    rules_document: None,
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.photo, "uploads/new.png");
        assert_eq!(updated.price, 150.0);
        assert!(!std::path::Path::new(&old_path).exists());
    }

    #[tokio::test]
    async fn edit_without_photo_keeps_existing_path() {
        let dir = tempfile::tempdir().unwrap();
        let listing = service(dir.path()).await;

        let home = listing.add_home(new_home("uploads/keep.png")).await.unwrap();

        let updated = listing
            .edit_home(
                home.id,
                HomeUpdate {
                    house_name: "Renamed".to_string(),
                    price: 99.0,
                    location: "Porto".to_string(),
                    rating: 4.0,
                    description: Some("cosy".to_string()),
                    photo: None,
                    rules_document: None,
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.photo, "uploads/keep.png");
        assert_eq!(updated.house_name, "Renamed");
    }

    #[tokio::test]
    async fn delete_cascades_favourites() {
        let dir = tempfile::tempdir().unwrap();
        let listing = service(dir.path()).await;
        let store = listing.store.clone();

        let user = store
            .create_user(
                crate::db::NewUser {
                    first_name: "Ada".to_string(),
                    last_name: String::new(),
                    email: "a@x.com".to_string(),
                    password: "Aa1!aaaa".to_string(),
                    user_type: "guest".to_string(),
                },
                &crate::config::SecurityConfig::default(),
            )
            .await
            .unwrap();

        let home = listing.add_home(new_home("uploads/h.png")).await.unwrap();
        store.add_favourite(user.id, home.id).await.unwrap();
        assert_eq!(store.count_favourites_for_home(home.id).await.unwrap(), 1);

        assert!(listing.delete_home(home.id).await.unwrap());
        assert_eq!(store.count_favourites_for_home(home.id).await.unwrap(), 0);
        assert!(store.get_home(home.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_missing_home_is_false() {
        let dir = tempfile::tempdir().unwrap();
        let listing = service(dir.path()).await;
        assert!(!listing.delete_home(999).await.unwrap());
    }
}
