//! 日志采集
//!
//! 注意：klog 的缓冲区是进程级全局状态，同一测试二进制中依赖日志条数的测试需要自行串行化。

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use klog::{LogEntry, LogOutput};
use sync::SpinLock;

/// 把控制台输出收集到内存
pub struct CaptureOutput {
    buf: SpinLock<String>,
}

impl CaptureOutput {
    pub const fn new() -> Self {
        Self {
            buf: SpinLock::new(String::new()),
        }
    }

    /// 取出并清空已采集的输出
    pub fn take(&self) -> String {
        core::mem::take(&mut *self.buf.lock())
    }
}

impl Default for CaptureOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl LogOutput for CaptureOutput {
    fn write_str(&self, s: &str) {
        self.buf.lock().push_str(s);
    }
}

/// 全局采集实例
pub static CAPTURE: CaptureOutput = CaptureOutput::new();

/// 注册 [`CAPTURE`] 为 klog 控制台输出
pub fn install_capture() {
    klog::register_log_output(&CAPTURE);
}

/// 读出缓冲区中全部未读日志
pub fn drain_log() -> Vec<LogEntry> {
    let mut entries = Vec::new();
    while let Some(entry) = klog::read_log() {
        entries.push(entry);
    }
    entries
}

/// 读出全部未读日志的消息正文
pub fn drain_messages() -> Vec<String> {
    drain_log().iter().map(|e| e.message().to_string()).collect()
}
