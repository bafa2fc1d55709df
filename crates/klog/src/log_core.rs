//! 日志系统核心实现
//!
//! 将缓冲区和过滤状态封装到 `LogCore` 中：全局实例服务于 `pr_*!` 宏，
//! 测试可以独立实例化。

use core::fmt;
use core::sync::atomic::{AtomicU8, Ordering};

use crate::buffer::GlobalLogBuffer;
use crate::entry::LogEntry;
use crate::level::LogLevel;

/// 核心日志系统
///
/// 过滤级别使用原子量，缓冲区内部加锁，整个结构体可在线程间共享。
pub struct LogCore {
    buffer: GlobalLogBuffer,

    /// 全局日志级别阈值（控制日志是否缓冲）
    global_level: AtomicU8,

    /// 控制台输出级别阈值（控制是否立即打印）
    console_level: AtomicU8,
}

impl LogCore {
    /// 使用指定级别创建 LogCore
    ///
    /// # 示例
    ///
    /// ```rust
    /// use klog::{LogCore, LogLevel};
    ///
    /// static LOG: LogCore = LogCore::new(LogLevel::Info, LogLevel::Warning);
    /// let test_log = LogCore::new(LogLevel::Debug, LogLevel::Emergency);
    /// test_log.log(LogLevel::Debug, format_args!("probe"));
    /// assert_eq!(test_log.len(), 1);
    /// let _ = &LOG;
    /// ```
    pub const fn new(global_level: LogLevel, console_level: LogLevel) -> Self {
        Self {
            buffer: GlobalLogBuffer::new(),
            global_level: AtomicU8::new(global_level as u8),
            console_level: AtomicU8::new(console_level as u8),
        }
    }

    /// 记录一条日志
    ///
    /// 1. 按全局级别过滤
    /// 2. 收集上下文（时间戳、CPU ID）
    /// 3. 写入缓冲区
    /// 4. 达到控制台级别时立即输出
    pub fn log(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        if !self.is_level_enabled(level) {
            return;
        }

        let (cpu_id, timestamp) = match crate::context_provider() {
            Some(provider) => (provider.cpu_id(), provider.timestamp()),
            None => (0, 0),
        };

        let mut entry = LogEntry::from_args(level, cpu_id, timestamp, args);
        let seq = self.buffer.write(entry);
        entry.set_seq(seq);

        if self.is_console_level(level) {
            Self::direct_print_entry(&entry);
        }
    }

    /// 读取并移除最旧的未读条目
    pub fn read(&self) -> Option<LogEntry> {
        self.buffer.read()
    }

    /// 按序号读取条目，不移动读指针
    pub fn peek(&self, seq: usize) -> Option<LogEntry> {
        self.buffer.peek(seq)
    }

    /// 最旧未读条目的序号
    pub fn reader_index(&self) -> usize {
        self.buffer.reader_index()
    }

    /// 下一条日志将获得的序号
    pub fn writer_index(&self) -> usize {
        self.buffer.writer_index()
    }

    /// 未读条目数
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// 是否没有未读条目
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 因缓冲区溢出被覆盖的条目数
    pub fn dropped_count(&self) -> usize {
        self.buffer.dropped_count()
    }

    /// 设置全局日志级别阈值
    pub fn set_global_level(&self, level: LogLevel) {
        self.global_level.store(level as u8, Ordering::Release);
    }

    /// 当前全局日志级别
    pub fn global_level(&self) -> LogLevel {
        LogLevel::from_u8(self.global_level.load(Ordering::Acquire))
    }

    /// 设置控制台输出级别阈值
    pub fn set_console_level(&self, level: LogLevel) {
        self.console_level.store(level as u8, Ordering::Release);
    }

    /// 当前控制台输出级别
    pub fn console_level(&self) -> LogLevel {
        LogLevel::from_u8(self.console_level.load(Ordering::Acquire))
    }

    /// 级别是否会被记录
    #[inline]
    pub fn is_level_enabled(&self, level: LogLevel) -> bool {
        level as u8 <= self.global_level.load(Ordering::Acquire)
    }

    #[inline]
    fn is_console_level(&self, level: LogLevel) -> bool {
        level as u8 <= self.console_level.load(Ordering::Acquire)
    }

    fn direct_print_entry(entry: &LogEntry) {
        if let Some(output) = crate::log_output() {
            let mut line = format_log_entry(entry);
            line.push('\n');
            output.write_str(&line);
        }
    }
}

/// 格式化日志条目（带 ANSI 颜色和上下文信息）
///
/// # 格式
/// ```text
/// <color_code>[LEVEL] [timestamp] [CPU<id>] message<reset>
/// ```
pub fn format_log_entry(entry: &LogEntry) -> alloc::string::String {
    alloc::format!(
        "{}{} [{:12}] [CPU{}] {}{}",
        entry.level().color_code(),
        entry.level().as_str(),
        entry.timestamp(),
        entry.cpu_id(),
        entry.message(),
        entry.level().reset_color_code()
    )
}
