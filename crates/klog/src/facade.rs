//! `log` crate 门面桥接
//!
//! 框架层代码通过 `log::debug!` 等宏输出，经由 [`KlogLogger`] 落入同一个内核日志缓冲区。

use crate::level::LogLevel;

/// 将 `log` 记录转发到全局 klog 实例
pub struct KlogLogger;

static LOGGER: KlogLogger = KlogLogger;

impl log::Log for KlogLogger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        crate::is_level_enabled(LogLevel::from(metadata.level()))
    }

    fn log(&self, record: &log::Record<'_>) {
        if self.enabled(record.metadata()) {
            crate::log_impl(
                LogLevel::from(record.level()),
                format_args!("{}: {}", record.target(), record.args()),
            );
        }
    }

    fn flush(&self) {}
}

/// 将 klog 安装为 `log` 门面的后端
///
/// 进程内只能成功一次；再次调用返回 `SetLoggerError`。
pub fn init_log_facade() -> Result<(), log::SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}
