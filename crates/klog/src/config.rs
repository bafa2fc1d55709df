//! 日志系统配置常量

use crate::level::LogLevel;

/// 环形缓冲区可容纳的日志条目数
///
/// 缓冲区满时覆盖最旧的条目，并计入丢弃计数。
pub const GLOBAL_LOG_BUFFER_SIZE: usize = 256;

/// 单条日志消息的最大字节数，超出部分按字符边界截断
pub const MAX_LOG_MESSAGE_LENGTH: usize = 192;

/// 默认全局日志级别：Info 及以上进入缓冲区
pub const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

/// 默认控制台级别：Warning 及以上立即打印
pub const DEFAULT_CONSOLE_LEVEL: LogLevel = LogLevel::Warning;
