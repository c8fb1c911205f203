use crate::config::Config;
use crate::db;

pub async fn cmd_check(config: &Config) -> anyhow::Result<()> {
    println!("Checking database connection...");

    let store = db::connect_with_retry(&config.database).await?;
    store.ping().await?;
    let posts = store.list_posts().await?;

    println!("✓ Database reachable, migrations applied");
    println!("  Posts stored: {}", posts.len());

    Ok(())
}
