//! 内核日志子系统
//!
//! 提供类似 Linux `printk` 的日志接口，是驱动与宿主之间的日志汇聚点。
//!
//! # 组件
//!
//! - [`LogLevel`] - 日志级别（从 Emergency 到 Debug）
//! - [`LogEntry`] - 定长日志条目
//! - [`LogCore`] - 过滤状态与环形缓冲区
//! - 宏 - `pr_info!`, `pr_err!` 等
//! - [`KlogLogger`] - `log` 门面桥接
//!
//! # 双输出策略
//!
//! 1. 达到全局级别（默认 Info）的日志写入环形缓冲区，供 [`read_log`] 消费。
//! 2. 达到控制台级别（默认 Warning）的日志同时通过 [`LogOutput`] 立即打印。
//!
//! # 架构解耦
//!
//! - [`LogContextProvider`]：提供 CPU ID 与时间戳
//! - [`LogOutput`]：提供控制台输出能力
//!
//! 二者均可不注册：缺省时上下文为 0，控制台输出被跳过。

#![no_std]

extern crate alloc;

mod buffer;
mod config;
mod entry;
mod facade;
mod level;
mod log_core;
pub mod macros;

#[cfg(test)]
mod tests;

pub use config::{
    DEFAULT_CONSOLE_LEVEL, DEFAULT_LOG_LEVEL, GLOBAL_LOG_BUFFER_SIZE, MAX_LOG_MESSAGE_LENGTH,
};
pub use entry::LogEntry;
pub use facade::{KlogLogger, init_log_facade};
pub use level::LogLevel;
pub use log_core::{LogCore, format_log_entry};

use sync::SpinLock;

/// 日志上下文提供者
pub trait LogContextProvider: Send + Sync {
    /// 当前 CPU ID
    fn cpu_id(&self) -> usize;
    /// 当前时间戳
    fn timestamp(&self) -> usize;
}

/// 日志输出
pub trait LogOutput: Send + Sync {
    /// 输出字符串到控制台
    fn write_str(&self, s: &str);
}

static CONTEXT_PROVIDER: SpinLock<Option<&'static dyn LogContextProvider>> = SpinLock::new(None);
static LOG_OUTPUT: SpinLock<Option<&'static dyn LogOutput>> = SpinLock::new(None);

/// 注册日志上下文提供者，覆盖之前的注册
pub fn register_context_provider(provider: &'static dyn LogContextProvider) {
    *CONTEXT_PROVIDER.lock() = Some(provider);
}

/// 注册控制台输出，覆盖之前的注册
pub fn register_log_output(output: &'static dyn LogOutput) {
    *LOG_OUTPUT.lock() = Some(output);
}

pub(crate) fn context_provider() -> Option<&'static dyn LogContextProvider> {
    *CONTEXT_PROVIDER.lock()
}

pub(crate) fn log_output() -> Option<&'static dyn LogOutput> {
    *LOG_OUTPUT.lock()
}

/// 全局日志实例
static GLOBAL_LOG: LogCore = LogCore::new(DEFAULT_LOG_LEVEL, DEFAULT_CONSOLE_LEVEL);

/// 核心日志实现（由宏调用）
#[doc(hidden)]
pub fn log_impl(level: LogLevel, args: core::fmt::Arguments<'_>) {
    GLOBAL_LOG.log(level, args);
}

/// 检查日志级别是否启用（由宏调用）
#[doc(hidden)]
pub fn is_level_enabled(level: LogLevel) -> bool {
    GLOBAL_LOG.is_level_enabled(level)
}

/// 读取并移除最旧的未读日志
pub fn read_log() -> Option<LogEntry> {
    GLOBAL_LOG.read()
}

/// 按序号读取日志，不移动读指针
pub fn peek_log(seq: usize) -> Option<LogEntry> {
    GLOBAL_LOG.peek(seq)
}

/// 最旧未读日志的序号
pub fn log_reader_index() -> usize {
    GLOBAL_LOG.reader_index()
}

/// 下一条日志的序号
pub fn log_writer_index() -> usize {
    GLOBAL_LOG.writer_index()
}

/// 未读日志条目数
pub fn log_len() -> usize {
    GLOBAL_LOG.len()
}

/// 已丢弃日志的计数
pub fn log_dropped_count() -> usize {
    GLOBAL_LOG.dropped_count()
}

/// 设置全局日志级别阈值
pub fn set_global_level(level: LogLevel) {
    GLOBAL_LOG.set_global_level(level);
}

/// 当前全局日志级别
pub fn get_global_level() -> LogLevel {
    GLOBAL_LOG.global_level()
}

/// 设置控制台输出级别阈值
pub fn set_console_level(level: LogLevel) {
    GLOBAL_LOG.set_console_level(level);
}

/// 当前控制台输出级别
pub fn get_console_level() -> LogLevel {
    GLOBAL_LOG.console_level()
}
