//! Server command implementation

use std::path::Path;

use anyhow::{Context, Result};
use backpack_core::PlannerConfig;

use super::open_db;

pub async fn cmd_serve(
    db_path: &Path,
    config: PlannerConfig,
    host: &str,
    port: u16,
    static_dir: Option<&Path>,
) -> Result<()> {
    println!("🚀 Starting Backpack web server...");
    println!("   Database: {}", db_path.display());
    println!("   Listening: http://{}:{}", host, port);
    if let Some(dir) = static_dir {
        println!("   Static files: {}", dir.display());
    }
    if host != "127.0.0.1" && host != "localhost" {
        println!();
        println!("   ⚠️  There is no authentication - only bind to trusted networks!");
    }
    println!();
    println!("   Press Ctrl+C to stop");

    let db = open_db(db_path)?;

    let static_dir_str = static_dir
        .map(|p| p.to_str().context("Static dir path must be valid UTF-8"))
        .transpose()?;

    let server_config = backpack_server::ServerConfig {
        allowed_origins: vec![],
        planner: config,
    };

    backpack_server::serve_with_config(db, host, port, static_dir_str, server_config).await?;

    Ok(())
}
