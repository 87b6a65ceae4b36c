use std::sync::Arc;

use classgrid_api::config::ApiConfig;
use classgrid_db::{PgSectionStore, create_pool, schema::initialize_database};
use color_eyre::eyre::Result;
use dotenv::dotenv;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenv().ok();

    let config = ApiConfig::from_env()?;

    // Sections live in the course-management tables
    let db_pool = create_pool(&config.database_url).await?;
    initialize_database(&db_pool).await?;

    let store = Arc::new(PgSectionStore::new(db_pool));
    classgrid_api::start_server(config, store).await?;

    Ok(())
}
