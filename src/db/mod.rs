use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::home::{Home, HomeUpdate, NewHome};
pub use repositories::user::{NewUser, User};

use crate::config::SecurityConfig;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        // Every pooled connection to :memory: would get its own blank
        // database, so in-memory URLs are pinned to a single connection.
        let (max_connections, min_connections) = if db_url.contains(":memory:") {
            (1, 1)
        } else {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
            (max_connections, min_connections)
        };

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    /// The underlying sqlx pool, shared with the session store.
    #[must_use]
    pub fn sqlite_pool(&self) -> sea_orm::sqlx::SqlitePool {
        self.conn.get_sqlite_connection_pool().clone()
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn home_repo(&self) -> repositories::home::HomeRepository {
        repositories::home::HomeRepository::new(self.conn.clone())
    }

    fn favourite_repo(&self) -> repositories::favourite::FavouriteRepository {
        repositories::favourite::FavouriteRepository::new(self.conn.clone())
    }

    pub async fn create_user(&self, new_user: NewUser, security: &SecurityConfig) -> Result<User> {
        self.user_repo().create(new_user, security).await
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.user_repo().get_by_email(email).await
    }

    pub async fn get_user_by_id(&self, id: i32) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn verify_user_password(&self, email: &str, password: &str) -> Result<bool> {
        self.user_repo().verify_password(email, password).await
    }

    pub async fn add_home(&self, new_home: NewHome) -> Result<Home> {
        self.home_repo().add(new_home).await
    }

    pub async fn get_home(&self, id: i32) -> Result<Option<Home>> {
        self.home_repo().get(id).await
    }

    pub async fn list_homes(&self) -> Result<Vec<Home>> {
        self.home_repo().list_all().await
    }

    pub async fn update_home(&self, id: i32, update: HomeUpdate) -> Result<Option<Home>> {
        self.home_repo().update(id, update).await
    }

    pub async fn remove_home(&self, id: i32) -> Result<bool> {
        self.home_repo().remove(id).await
    }

    pub async fn add_favourite(&self, user_id: i32, home_id: i32) -> Result<()> {
        self.favourite_repo().add(user_id, home_id).await
    }

    pub async fn remove_favourite(&self, user_id: i32, home_id: i32) -> Result<()> {
        self.favourite_repo().remove(user_id, home_id).await
    }

    pub async fn is_favourite(&self, user_id: i32, home_id: i32) -> Result<bool> {
        self.favourite_repo().contains(user_id, home_id).await
    }

    pub async fn list_favourite_homes(&self, user_id: i32) -> Result<Vec<Home>> {
        self.favourite_repo().list_homes_for_user(user_id).await
    }

    pub async fn remove_favourites_for_home(&self, home_id: i32) -> Result<u64> {
        self.favourite_repo().remove_all_for_home(home_id).await
    }

    pub async fn count_favourites_for_home(&self, home_id: i32) -> Result<u64> {
        self.favourite_repo().count_for_home(home_id).await
    }
}
