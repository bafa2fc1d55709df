//! 测试支持 crate
//!
//! 提供宿主内核的 Mock 实现和日志采集工具

#![no_std]

extern crate alloc;

pub mod mock;

pub use mock::kernel::{KernelCall, MockKernel, Region};
pub use mock::log::{CAPTURE, drain_log, drain_messages, install_capture};
