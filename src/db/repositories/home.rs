use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::entities::homes;

pub use crate::entities::homes::Model as Home;

/// Listing input for a newly created home. The photo path is mandatory;
/// the rules document is not.
#[derive(Debug, Clone)]
pub struct NewHome {
    pub house_name: String,
    pub price: f64,
    pub location: String,
    pub rating: f64,
    pub description: Option<String>,
    pub photo: String,
    pub rules_document: Option<String>,
}

/// Edit input. Scalar fields always overwrite; file paths only when a
/// replacement upload was supplied.
#[derive(Debug, Clone)]
pub struct HomeUpdate {
    pub house_name: String,
    pub price: f64,
    pub location: String,
    pub rating: f64,
    pub description: Option<String>,
    pub photo: Option<String>,
    pub rules_document: Option<String>,
}

pub struct HomeRepository {
    conn: DatabaseConnection,
}

impl HomeRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn add(&self, new_home: NewHome) -> Result<Home> {
        let now = chrono::Utc::now().to_rfc3339();

        let active = homes::ActiveModel {
            house_name: Set(new_home.house_name),
            price: Set(new_home.price),
            location: Set(new_home.location),
            rating: Set(new_home.rating),
            description: Set(new_home.description),
            photo: Set(new_home.photo),
            rules_document: Set(new_home.rules_document),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active.insert(&self.conn).await.context("Failed to save home")?;
        Ok(model)
    }

    pub async fn get(&self, id: i32) -> Result<Option<Home>> {
        homes::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query home by ID")
    }

    pub async fn list_all(&self) -> Result<Vec<Home>> {
        homes::Entity::find()
            .order_by_asc(homes::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list homes")
    }

    pub async fn update(&self, id: i32, update: HomeUpdate) -> Result<Option<Home>> {
        let Some(home) = homes::Entity::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut active: homes::ActiveModel = home.into();
        active.house_name = Set(update.house_name);
        active.price = Set(update.price);
        active.location = Set(update.location);
        active.rating = Set(update.rating);
        active.description = Set(update.description);
        if let Some(photo) = update.photo {
            active.photo = Set(photo);
        }
        if let Some(rules_document) = update.rules_document {
            active.rules_document = Set(Some(rules_document));
        }
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let model = active
            .update(&self.conn)
            .await
            .context("Failed to update home")?;
        Ok(Some(model))
    }

    pub async fn remove(&self, id: i32) -> Result<bool> {
        let result = homes::Entity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete home")?;
        Ok(result.rows_affected > 0)
    }
}
