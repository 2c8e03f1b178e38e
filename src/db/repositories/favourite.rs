use anyhow::{Context, Result};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::{favourites, homes};

pub struct FavouriteRepository {
    conn: DatabaseConnection,
}

impl FavouriteRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Bookmark a home for a user. Idempotent: the unique index on
    /// (user_id, home_id) turns repeat inserts into no-ops.
    pub async fn add(&self, user_id: i32, home_id: i32) -> Result<()> {
        let active = favourites::ActiveModel {
            user_id: Set(user_id),
            home_id: Set(home_id),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        favourites::Entity::insert(active)
            .on_conflict(
                OnConflict::columns([favourites::Column::UserId, favourites::Column::HomeId])
                    .do_nothing()
                    .to_owned(),
            )
            .do_nothing()
            .exec(&self.conn)
            .await
            .context("Failed to add favourite")?;

        Ok(())
    }

    /// Remove a bookmark. A home not in the list is a no-op.
    pub async fn remove(&self, user_id: i32, home_id: i32) -> Result<()> {
        favourites::Entity::delete_many()
            .filter(favourites::Column::UserId.eq(user_id))
            .filter(favourites::Column::HomeId.eq(home_id))
            .exec(&self.conn)
            .await
            .context("Failed to remove favourite")?;

        Ok(())
    }

    pub async fn contains(&self, user_id: i32, home_id: i32) -> Result<bool> {
        let count = favourites::Entity::find()
            .filter(favourites::Column::UserId.eq(user_id))
            .filter(favourites::Column::HomeId.eq(home_id))
            .count(&self.conn)
            .await
            .context("Failed to query favourite")?;

        Ok(count > 0)
    }

    /// Resolve a user's bookmarks to Home records, in bookmark order.
    pub async fn list_homes_for_user(&self, user_id: i32) -> Result<Vec<homes::Model>> {
        let rows = favourites::Entity::find()
            .filter(favourites::Column::UserId.eq(user_id))
            .order_by_asc(favourites::Column::Id)
            .find_also_related(homes::Entity)
            .all(&self.conn)
            .await
            .context("Failed to resolve favourites")?;

        Ok(rows.into_iter().filter_map(|(_, home)| home).collect())
    }

    /// Drop every bookmark referencing a home. Run before the home row is
    /// deleted so no favourite ever points at a missing listing.
    pub async fn remove_all_for_home(&self, home_id: i32) -> Result<u64> {
        let result = favourites::Entity::delete_many()
            .filter(favourites::Column::HomeId.eq(home_id))
            .exec(&self.conn)
            .await
            .context("Failed to clear favourites for home")?;

        Ok(result.rows_affected)
    }

    pub async fn count_for_home(&self, home_id: i32) -> Result<u64> {
        favourites::Entity::find()
            .filter(favourites::Column::HomeId.eq(home_id))
            .count(&self.conn)
            .await
            .context("Failed to count favourites for home")
    }
}
