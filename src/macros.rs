//! Logging macros for ergonomic argument passing
//!
//! The level methods take their arguments as `Vec<Arg>`; these macros
//! build that vector from any mix of fields, keys, and values.
//!
//! # Examples
//!
//! ```
//! use fieldlog::prelude::*;
//! use fieldlog::{info, warn};
//! use std::sync::Arc;
//!
//! let logger = Logger::new(Arc::new(NopCore));
//!
//! // Key/value pairs
//! info!(logger, "user logged in", "user", "alice", "attempts", 2i64);
//!
//! // Ready-made fields mix freely
//! warn!(logger, "slow query", Field::duration("took", std::time::Duration::from_millis(250)));
//! ```

/// Build a `Vec<Arg>` from a heterogeneous argument list.
#[macro_export]
macro_rules! log_args {
    () => {
        ::std::vec::Vec::new()
    };
    ($($arg:expr),+ $(,)?) => {
        vec![$($crate::Arg::from($arg)),+]
    };
}

/// Log at an explicit level.
///
/// # Examples
///
/// ```
/// # use fieldlog::prelude::*;
/// # use std::sync::Arc;
/// # let logger = Logger::new(Arc::new(NopCore));
/// use fieldlog::log;
/// log!(logger, Level::Info, "simple message");
/// log!(logger, Level::Error, "failed", "code", 500i64);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $msg:expr $(, $arg:expr)* $(,)?) => {
        $logger.log($level, $msg, $crate::log_args!($($arg),*))
    };
}

/// Log at an explicit level with a request context.
#[macro_export]
macro_rules! log_ctx {
    ($logger:expr, $ctx:expr, $level:expr, $msg:expr $(, $arg:expr)* $(,)?) => {
        $logger.log_context($ctx, $level, $msg, $crate::log_args!($($arg),*))
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $msg:expr $(, $arg:expr)* $(,)?) => {
        $logger.debug($msg, $crate::log_args!($($arg),*))
    };
}

/// Log a debug-level message with a request context.
#[macro_export]
macro_rules! debug_ctx {
    ($logger:expr, $ctx:expr, $msg:expr $(, $arg:expr)* $(,)?) => {
        $logger.debug_context($ctx, $msg, $crate::log_args!($($arg),*))
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $msg:expr $(, $arg:expr)* $(,)?) => {
        $logger.info($msg, $crate::log_args!($($arg),*))
    };
}

/// Log an info-level message with a request context.
#[macro_export]
macro_rules! info_ctx {
    ($logger:expr, $ctx:expr, $msg:expr $(, $arg:expr)* $(,)?) => {
        $logger.info_context($ctx, $msg, $crate::log_args!($($arg),*))
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $msg:expr $(, $arg:expr)* $(,)?) => {
        $logger.warn($msg, $crate::log_args!($($arg),*))
    };
}

/// Log a warning-level message with a request context.
#[macro_export]
macro_rules! warn_ctx {
    ($logger:expr, $ctx:expr, $msg:expr $(, $arg:expr)* $(,)?) => {
        $logger.warn_context($ctx, $msg, $crate::log_args!($($arg),*))
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $msg:expr $(, $arg:expr)* $(,)?) => {
        $logger.error($msg, $crate::log_args!($($arg),*))
    };
}

/// Log an error-level message with a request context.
#[macro_export]
macro_rules! error_ctx {
    ($logger:expr, $ctx:expr, $msg:expr $(, $arg:expr)* $(,)?) => {
        $logger.error_context($ctx, $msg, $crate::log_args!($($arg),*))
    };
}

#[cfg(test)]
mod tests {
    use crate::core::field::Field;
    use crate::core::level::Level;
    use crate::core::logger::Logger;
    use crate::core::observer::ObserverCore;
    use std::sync::Arc;

    fn observed() -> (Logger, Arc<parking_lot::Mutex<Vec<crate::core::observer::LoggedEntry>>>)
    {
        let observer = ObserverCore::new(Level::Debug);
        let logs = observer.logs();
        (Logger::new(Arc::new(observer)), logs)
    }

    #[test]
    fn test_log_macro() {
        let (logger, logs) = observed();
        log!(logger, Level::Info, "plain");
        log!(logger, Level::Error, "coded", "code", 500i64);

        let written = logs.lock();
        assert_eq!(written[0].entry.message, "plain");
        assert_eq!(written[1].fields, vec![Field::int("code", 500)]);
    }

    #[test]
    fn test_level_macros() {
        let (logger, logs) = observed();
        debug!(logger, "d");
        info!(logger, "i", "n", 1i64);
        warn!(logger, "w");
        error!(logger, "e", Field::bool("fatal", false));

        let written = logs.lock();
        assert_eq!(written.len(), 4);
        assert_eq!(written[0].entry.level, Level::Debug);
        assert_eq!(written[1].fields, vec![Field::int("n", 1)]);
        assert_eq!(written[3].fields, vec![Field::bool("fatal", false)]);
    }

    #[test]
    fn test_ctx_macros() {
        use crate::core::context::{Context, ContextHandler};
        use crate::core::options::with_context_handlers;

        let (logger, logs) = observed();
        let logger = logger.with_options(vec![with_context_handlers(vec![
            ContextHandler::from_key("request-id"),
        ])]);
        let ctx = Context::new().with_value("request-id", 42i64);

        info_ctx!(logger, &ctx, "handled");

        let written = logs.lock();
        assert_eq!(written[0].fields, vec![Field::int("request-id", 42)]);
    }
}
