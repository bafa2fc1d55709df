//! 同步原语
//!
//! 向驱动框架和宿主模拟提供基本的锁原语。
//!
//! 驱动回调本身不持有共享状态；这里的锁只保护宿主侧的注册表
//! 和日志缓冲区等全局结构。

#![no_std]

mod raw_spin_lock;
mod spin_lock;

pub use raw_spin_lock::RawSpinLock;
pub use spin_lock::{SpinLock, SpinLockGuard};
