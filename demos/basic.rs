//! Basic usage: template logging, audit records and accumulation.
//!
//! Run with: cargo run --example basic

use logward::{Logward, Template};
use std::sync::Arc;
use tracing_subscriber::prelude::*;

const BATCH_DONE: Template = Template::with_threshold("BATCH_DONE", "Finished batch {} of {}", 5);

#[tokio::main]
async fn main() {
    // Rendered lines surface as tracing events; a fmt subscriber prints them
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .init();

    let logward = Arc::new(
        Logward::builder()
            .with_templates(&[BATCH_DONE])
            .build()
            .expect("valid config"),
    );

    let logger = logward.logger("demo::server");
    logger.log_rest_server_start();
    logger.log_api_access("GET", "api/vertices", 200, "u1", "admin", 12);

    // Structured audit records go to the audit channel
    logger.audit().log_create_user("u1", "admin");
    logger.audit().log_user_access_denied("u2", "write", "graph/g1");

    // 20 batches at threshold 5: four lines, one per five batches
    for i in 0..20 {
        logger.accumulate("BATCH_DONE", &[&i, &20]);
    }

    // Alternate severity as a tag; unknown tags degrade to INFO
    logger.log("warn", "REDUNDANT_CONFIG_OPTION", &[&"graph.cache_size"]);

    logger.log_server_shutdown();

    // Drain queued accumulation emissions before exit
    logward.shutdown().await.expect("drain failed");
}
