use sqlx::mysql::MySqlPoolOptions;
use sqlx::{query, query_scalar};

use cohort::config::DbConfig;

const PROGRAMS: [(&str, bool); 3] = [
    ("Accelerator 2025", true),
    ("Seed Stage Program", true),
    ("Growth Lab", false),
];

const APPLICATIONS: [(&str, &str, &str, &str, &str); 12] = [
    ("Accelerator 2025", "Alex Chen", "alex.chen@gmail.com", "TechFlow", "new"),
    ("Accelerator 2025", "Jordan Lee", "jordan.lee@outlook.com", "GreenScale", "reviewed"),
    ("Accelerator 2025", "Sam Rivera", "sam.rivera@startup.io", "DataPulse", "accepted"),
    ("Seed Stage Program", "Casey Morgan", "casey.morgan@company.com", "CloudNine", "new"),
    ("Seed Stage Program", "Riley Kim", "riley.kim@yahoo.com", "HealthTrack", "rejected"),
    ("Accelerator 2025", "James Wilson", "james.wilson@gmail.com", "PayBridge", "new"),
    ("Accelerator 2025", "Emma Davis", "emma.davis@outlook.com", "EduLearn", "reviewed"),
    ("Accelerator 2025", "Michael Brown", "michael.brown@startup.com", "LogiFlow", "accepted"),
    ("Accelerator 2025", "Sarah Miller", "sarah.miller@gmail.com", "FitTrack", "rejected"),
    ("Seed Stage Program", "David Garcia", "david.garcia@company.co", "SecureVault", "new"),
    ("Seed Stage Program", "Jessica Martinez", "jessica.martinez@yahoo.com", "FoodDash", "new"),
    ("Accelerator 2025", "Chris Taylor", "chris.taylor@startup.io", "ShopLocal", "reviewed"),
];

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();
    let config = DbConfig::from_env()?;
    let pool = MySqlPoolOptions::new().max_connections(1).connect(&config.connection_url()).await?;

    let mut tx = pool.begin().await?;
    query("DELETE FROM application").execute(&mut tx).await?;
    query("DELETE FROM program").execute(&mut tx).await?;
    for (name, is_active) in PROGRAMS {
        query("INSERT INTO program (name, is_active) VALUES (?, ?)")
            .bind(name)
            .bind(is_active)
            .execute(&mut tx)
            .await?;
    }
    for (program_name, founder_name, email, startup_name, status) in APPLICATIONS {
        let program_id: i64 = query_scalar("SELECT id FROM program WHERE name = ?")
            .bind(program_name)
            .fetch_one(&mut tx)
            .await?;
        query("INSERT INTO application (program_id, founder_name, email, startup_name, status) VALUES (?, ?, ?, ?, ?)")
            .bind(program_id)
            .bind(founder_name)
            .bind(email)
            .bind(startup_name)
            .bind(status)
            .execute(&mut tx)
            .await?;
    }
    tx.commit().await?;

    log::info!("seeded {} programs and {} applications", PROGRAMS.len(), APPLICATIONS.len());
    Ok(())
}
