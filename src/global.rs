//! Process-wide default logger
//!
//! A single swappable logger slot for code that does not thread a
//! `Logger` value through. It starts as a no-op until [`set_global`] is
//! called, so importing the crate never opens sinks behind the caller's
//! back.

use crate::core::chain::NopCore;
use crate::core::context::Context;
use crate::core::error::Result;
use crate::core::level::Level;
use crate::core::logger::Logger;
use crate::core::record::Arg;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::sync::Arc;

static GLOBAL: Lazy<RwLock<Arc<Logger>>> =
    Lazy::new(|| RwLock::new(Arc::new(Logger::new(Arc::new(NopCore)))));

/// Replace the process-wide logger.
pub fn set_global(logger: Logger) {
    *GLOBAL.write() = Arc::new(logger);
}

/// The current process-wide logger.
pub fn global() -> Arc<Logger> {
    Arc::clone(&GLOBAL.read())
}

pub fn log(level: Level, msg: impl AsRef<str>, args: Vec<Arg>) {
    global().log(level, msg, args);
}

pub fn log_context(ctx: &Context, level: Level, msg: impl AsRef<str>, args: Vec<Arg>) {
    global().log_context(ctx, level, msg, args);
}

pub fn debug(msg: impl AsRef<str>, args: Vec<Arg>) {
    global().debug(msg, args);
}

pub fn debug_context(ctx: &Context, msg: impl AsRef<str>, args: Vec<Arg>) {
    global().debug_context(ctx, msg, args);
}

pub fn info(msg: impl AsRef<str>, args: Vec<Arg>) {
    global().info(msg, args);
}

pub fn info_context(ctx: &Context, msg: impl AsRef<str>, args: Vec<Arg>) {
    global().info_context(ctx, msg, args);
}

pub fn warn(msg: impl AsRef<str>, args: Vec<Arg>) {
    global().warn(msg, args);
}

pub fn warn_context(ctx: &Context, msg: impl AsRef<str>, args: Vec<Arg>) {
    global().warn_context(ctx, msg, args);
}

pub fn error(msg: impl AsRef<str>, args: Vec<Arg>) {
    global().error(msg, args);
}

pub fn error_context(ctx: &Context, msg: impl AsRef<str>, args: Vec<Arg>) {
    global().error_context(ctx, msg, args);
}

pub fn sync() -> Result<()> {
    global().sync()
}
