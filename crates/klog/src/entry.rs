//! 日志条目
//!
//! 条目为定长结构，消息直接格式化进内联缓冲区，不做堆分配。

use core::fmt::{self, Write};

use crate::config::MAX_LOG_MESSAGE_LENGTH;
use crate::level::LogLevel;

/// 一条日志记录
#[derive(Clone, Copy)]
pub struct LogEntry {
    seq: usize,
    level: LogLevel,
    cpu_id: usize,
    timestamp: usize,
    len: usize,
    truncated: bool,
    buf: [u8; MAX_LOG_MESSAGE_LENGTH],
}

impl LogEntry {
    pub(crate) const EMPTY: LogEntry = LogEntry {
        seq: 0,
        level: LogLevel::Debug,
        cpu_id: 0,
        timestamp: 0,
        len: 0,
        truncated: false,
        buf: [0; MAX_LOG_MESSAGE_LENGTH],
    };

    /// 由 `format_args!` 构造条目，序号在写入缓冲区时分配
    pub fn from_args(
        level: LogLevel,
        cpu_id: usize,
        timestamp: usize,
        args: fmt::Arguments<'_>,
    ) -> Self {
        let mut entry = LogEntry {
            level,
            cpu_id,
            timestamp,
            ..Self::EMPTY
        };
        let _ = entry.write_fmt(args);
        entry
    }

    pub(crate) fn set_seq(&mut self, seq: usize) {
        self.seq = seq;
    }

    /// 全局递增序号
    pub fn seq(&self) -> usize {
        self.seq
    }

    /// 日志级别
    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// 产生日志的 CPU
    pub fn cpu_id(&self) -> usize {
        self.cpu_id
    }

    /// 时间戳（由 [`LogContextProvider`](crate::LogContextProvider) 提供）
    pub fn timestamp(&self) -> usize {
        self.timestamp
    }

    /// 消息是否被截断
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// 消息正文
    pub fn message(&self) -> &str {
        // 写入时只在字符边界截断
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or("")
    }
}

impl Write for LogEntry {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let room = MAX_LOG_MESSAGE_LENGTH - self.len;
        let mut end = s.len();
        if end > room {
            end = room;
            while !s.is_char_boundary(end) {
                end -= 1;
            }
            self.truncated = true;
        }
        self.buf[self.len..self.len + end].copy_from_slice(&s.as_bytes()[..end]);
        self.len += end;
        Ok(())
    }
}

impl fmt::Debug for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogEntry")
            .field("seq", &self.seq)
            .field("level", &self.level)
            .field("message", &self.message())
            .finish()
    }
}
