use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use ratesx_fix_types::config::Config;
use ratesx_fix_types::error::Result;
use ratesx_fix_types::pass::{dry_run, run_pass, PassReport};
use ratesx_fix_types::store::SqliteStore;
use ratesx_fix_types::types::ALL_COLLECTIONS;

#[tokio::main]
async fn main() {
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cfg.log_level))
        .init();

    if let Err(e) = run(cfg).await {
        error!("Fatal error: {e}");
        std::process::exit(1);
    }
}

async fn run(cfg: Config) -> Result<()> {
    let report = if cfg.dry_run {
        let store = SqliteStore::open_read_only(&cfg.db_path).await?;
        info!("DRY_RUN set: {} opened read-only, coercing an in-memory copy", cfg.db_path);
        dry_run(&store, &ALL_COLLECTIONS).await?
    } else {
        let store = SqliteStore::connect(&cfg.db_path).await?;
        info!("Database ready at {}", cfg.db_path);
        run_pass(&store, &ALL_COLLECTIONS).await?
    };

    log_summary(&report, cfg.dry_run);
    Ok(())
}

fn log_summary(report: &PassReport, dry_run: bool) {
    for c in &report.collections {
        info!(
            collection = c.collection,
            visited = c.visited,
            written = c.written,
            nan_fields = c.nan_fields,
            "[SUMMARY] {:<10} | visited: {} | written: {} | NaN fields: {}",
            c.collection, c.visited, c.written, c.nan_fields,
        );
    }
    info!(
        dry_run,
        "[SUMMARY] total      | visited: {} | written: {} | NaN fields: {}",
        report.visited(),
        report.written(),
        report.nan_fields(),
    );
}
