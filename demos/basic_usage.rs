//! Basic usage example for fieldlog

use fieldlog::options::with_name;
use fieldlog::prelude::*;
use fieldlog::{info, warn};

fn main() -> fieldlog::Result<()> {
    // Default configuration: JSON to stderr, caller capture on, stack
    // traces attached at error level.
    let logger = fieldlog::default_logger(vec![with_name("demo")])?;

    // Key/value pairs become typed fields.
    info!(logger, "server started", "port", 8080i64, "tls", false);

    // Ready-made field constructors mix freely with pairs.
    warn!(
        logger,
        "slow query",
        Field::duration("took", std::time::Duration::from_millis(250)),
        "table",
        "accounts",
    );

    // A clone with baked-in fields; the original is untouched.
    let worker = logger.with(vec![Arg::from("worker"), Arg::from(3i64)]);
    info!(worker, "picked up job", "job_id", 12345i64);

    // Malformed argument lists degrade to diagnostic fields instead of
    // failing the call.
    info!(logger, "odd arguments", "orphan-key");

    logger.error("something broke", vec![Arg::from("attempt"), Arg::from(2i64)]);

    logger.sync()
}
