//! Request-scoped context extraction example

use fieldlog::options::{with_context_handlers, with_name};
use fieldlog::prelude::*;
use fieldlog::{info_ctx, warn_ctx};

fn main() -> fieldlog::Result<()> {
    let logger = fieldlog::default_logger(vec![
        with_name("api"),
        // Handlers run in registration order on every context-aware call.
        with_context_handlers(vec![
            ContextHandler::from_key("request-id"),
            ContextHandler::from_key_as("x-tenant", "tenant"),
        ]),
    ])?;

    // Ambient values travel with the request, not with the logger.
    let ctx = Context::new()
        .with_value("request-id", 42i64)
        .with_value("x-tenant", "acme")
        .with_value("irrelevant", "never extracted");

    info_ctx!(logger, &ctx, "request received", "path", "/orders");
    warn_ctx!(logger, &ctx, "retrying upstream", "attempt", 2i64);

    // Promote the context into a reusable logger when one request spans
    // many call sites.
    let request_logger = logger.with_context(&ctx);
    request_logger.info("no context needed anymore", vec![]);

    logger.sync()
}
