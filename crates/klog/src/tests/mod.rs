// Unit tests for LogCore, run with host `cargo test` against local instances.

extern crate alloc;

use crate::{LogCore, LogLevel};

/// Test-only logging helper targeting a local `LogCore`.
macro_rules! test_log {
    ($logger:expr, $level:expr, $($arg:tt)*) => {
        $logger.log($level, format_args!($($arg)*))
    };
}
