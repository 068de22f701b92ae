pub mod estimation_store;

pub use estimation_store::*;

use mongodb::options::{ClientOptions, Credential};
use mongodb::{Client, Collection, Database};
use mongodb::bson::doc;
use std::error::Error;
use crate::config::MongoConfig;

pub const ESTIMATION_COLLECTION: &str = "estimation_result";
const DEFAULT_DATABASE: &str = "estimation";

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    pub async fn new(config: &MongoConfig) -> Result<Self, Box<dyn Error>> {
        let mut client_options = ClientOptions::parse(&config.uri).await?;

        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(2);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        // Explicit credentials win over the ones embedded in the URI
        if let Some(username) = &config.username {
            client_options.credential = Some(
                Credential::builder()
                    .username(username.clone())
                    .password(config.password.clone().unwrap_or_default())
                    .build(),
            );
        }

        let db_name = database_name(config, client_options.default_database.as_deref());

        let client = Client::with_options(client_options)?;
        let db = client.database(&db_name);

        // Test connection
        db.list_collection_names().await?;
        log::info!("📦 Using database '{}'", db_name);

        let mongodb = Self { db };
        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// One vote per (issueKey, userName); also serves the per-issue listing
    async fn ensure_indexes(&self) -> Result<(), Box<dyn Error>> {
        use mongodb::options::IndexOptions;
        use mongodb::IndexModel;

        log::info!("🔧 Creating database indexes...");

        let estimations = self.collection::<mongodb::bson::Document>(ESTIMATION_COLLECTION);

        let vote_index = IndexModel::builder()
            .keys(doc! { "issueKey": 1, "userName": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        match estimations.create_index(vote_index).await {
            Ok(_) => log::info!("   ✅ Index created: {}(issueKey, userName) unique", ESTIMATION_COLLECTION),
            Err(e) => log::warn!("   ⚠️  Could not create unique vote index: {}", e),
        }

        Ok(())
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    pub async fn health_check(&self) -> Result<(), mongodb::error::Error> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}

/// `MONGO_DATABASE`, else the URI's default database, else `estimation`
fn database_name(config: &MongoConfig, uri_default: Option<&str>) -> String {
    config
        .database
        .as_deref()
        .or(uri_default)
        .unwrap_or(DEFAULT_DATABASE)
        .to_string()
}
