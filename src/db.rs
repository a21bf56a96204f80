use crate::config::StoreConfig;
use crate::model::employee::{EmployeeDocument, EmployeeField};
use anyhow::Context;
use mongodb::bson::{Document, doc};
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, IndexModel};
use tracing::{info, warn};

const DEFAULT_DATABASE: &str = "cordrillaDB";

/// Picks the database: explicit config first, then the one named in the
/// connection string, then the service default.
fn database_name(config: &StoreConfig, from_uri: Option<&str>) -> String {
    config
        .database
        .as_deref()
        .or(from_uri)
        .unwrap_or(DEFAULT_DATABASE)
        .to_string()
}

pub async fn init_db(config: &StoreConfig) -> anyhow::Result<Collection<EmployeeDocument>> {
    let options = ClientOptions::parse(&config.mongo_url)
        .await
        .context("Invalid MONGO_URL")?;
    let db_name = database_name(config, options.default_database.as_deref());
    let client = Client::with_options(options)?;
    let db = client.database(&db_name);

    db.run_command(doc! { "ping": 1 }, None)
        .await
        .context("Failed to connect to database")?;
    info!(database = %db_name, "Connected to MongoDB");

    let collection = db.collection::<EmployeeDocument>(&config.collection);
    ensure_indexes(&collection).await;
    Ok(collection)
}

/// Unique index on Emp/IC Code. Existing duplicate data makes the build fail;
/// that is logged and startup continues with the gateway's own check.
async fn ensure_indexes(collection: &Collection<EmployeeDocument>) {
    let mut keys = Document::new();
    keys.insert(EmployeeField::EmpCode.to_string(), 1);
    let index = IndexModel::builder()
        .keys(keys)
        .options(IndexOptions::builder().unique(true).build())
        .build();

    match collection.create_index(index, None).await {
        Ok(_) => info!("Ensured unique index on Emp/IC Code"),
        Err(e) => warn!(error = %e, "Could not create unique index on Emp/IC Code"),
    }
}
