use sqlx::mysql::MySqlPoolOptions;

use cohort::config::DbConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();
    let config = DbConfig::from_env()?;
    let pool = MySqlPoolOptions::new().max_connections(1).connect(&config.connection_url()).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    log::info!("migrations applied");
    Ok(())
}
