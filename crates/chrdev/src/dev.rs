//! 设备号
//!
//! 与宿主内核内部的 `dev_t` 布局一致：高 12 位为 major，低 20 位为 minor。

use core::fmt;

/// minor 号位数
pub const MINORBITS: u32 = 20;
/// minor 号掩码
pub const MINORMASK: u32 = (1 << MINORBITS) - 1;
/// 可表示的最大 major 号
pub const MAX_MAJOR: u32 = (1 << (32 - MINORBITS)) - 1;

/// 设备号 (major, minor)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DevT(u32);

impl DevT {
    /// 由 major/minor 组合设备号，超出位宽的部分被截掉
    pub const fn new(major: u32, minor: u32) -> Self {
        DevT(((major & MAX_MAJOR) << MINORBITS) | (minor & MINORMASK))
    }

    /// 从原始编码恢复
    pub const fn from_raw(raw: u32) -> Self {
        DevT(raw)
    }

    /// 原始编码
    pub const fn as_raw(self) -> u32 {
        self.0
    }

    /// major 号
    pub const fn major(self) -> u32 {
        self.0 >> MINORBITS
    }

    /// minor 号
    pub const fn minor(self) -> u32 {
        self.0 & MINORMASK
    }

    /// `first` 起 `count` 个连续 minor 是否包含本设备号
    pub const fn in_range(self, first: DevT, count: u32) -> bool {
        self.major() == first.major()
            && self.minor() >= first.minor()
            && self.minor() - first.minor() < count
    }
}

impl fmt::Display for DevT {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.major(), self.minor())
    }
}

/// 组合设备号 (`MKDEV`)
pub const fn makedev(major: u32, minor: u32) -> DevT {
    DevT::new(major, minor)
}

/// 提取 major 号 (`MAJOR`)
pub const fn major(dev: DevT) -> u32 {
    dev.major()
}

/// 提取 minor 号 (`MINOR`)
pub const fn minor(dev: DevT) -> u32 {
    dev.minor()
}
