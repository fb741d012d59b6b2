//! MongoDB connection management and typed collection accessors.

mod directory;

pub use directory::{Directory, MongoDirectory};

use mongodb::bson::doc;
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, Database, IndexModel};
use service_core::error::AppError;

use crate::models::{Department, Organization, Permission, Role, RolePermissions, User};

/// MongoDB wrapper with typed accessors for every directory collection.
#[derive(Clone)]
pub struct MongoDb {
    db: Database,
}

impl MongoDb {
    /// Connect to MongoDB and verify the connection with a ping.
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!("Connecting to MongoDB...");

        let client = Client::with_uri_str(uri).await?;
        let db = client.database(database);
        db.run_command(doc! { "ping": 1 }, None).await?;

        tracing::info!("Successfully connected to MongoDB");

        Ok(Self { db })
    }

    pub fn users(&self) -> Collection<User> {
        self.db.collection("user")
    }

    pub fn organizations(&self) -> Collection<Organization> {
        self.db.collection("organization")
    }

    pub fn departments(&self) -> Collection<Department> {
        self.db.collection("department")
    }

    pub fn roles(&self) -> Collection<Role> {
        self.db.collection("role")
    }

    pub fn role_permissions(&self) -> Collection<RolePermissions> {
        self.db.collection("role_permission")
    }

    pub fn permissions(&self) -> Collection<Permission> {
        self.db.collection("permission")
    }

    /// Create the indexes the service relies on. Safe to call on every
    /// startup; index creation is idempotent.
    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        let unique = IndexOptions::builder().unique(true).build();

        self.users()
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "email": 1 })
                    .options(unique.clone())
                    .build(),
                None,
            )
            .await?;
        self.users()
            .create_index(IndexModel::builder().keys(doc! { "id": 1 }).build(), None)
            .await?;
        self.permissions()
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "name": 1 })
                    .options(unique)
                    .build(),
                None,
            )
            .await?;
        self.roles()
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "organization": 1 })
                    .build(),
                None,
            )
            .await?;
        self.role_permissions()
            .create_index(
                IndexModel::builder().keys(doc! { "role_id": 1 }).build(),
                None,
            )
            .await?;
        self.departments()
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "organization": 1 })
                    .build(),
                None,
            )
            .await?;

        Ok(())
    }

    /// Health check - ping the database.
    pub async fn health_check(&self) -> Result<(), AppError> {
        self.db.run_command(doc! { "ping": 1 }, None).await?;
        Ok(())
    }
}
