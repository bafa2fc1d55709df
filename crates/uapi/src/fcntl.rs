//! 文件打开标志位

use bitflags::bitflags;

bitflags! {
    /// `open(2)` 的标志位
    ///
    /// 低两位为访问模式（`O_RDONLY` 为 0，不占位）。
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct OpenFlags: u32 {
        const O_RDONLY = 0;
        const O_WRONLY = 0o1;
        const O_RDWR = 0o2;
        const O_CREAT = 0o100;
        const O_EXCL = 0o200;
        const O_NOCTTY = 0o400;
        const O_TRUNC = 0o1000;
        const O_APPEND = 0o2000;
        const O_NONBLOCK = 0o4000;
        const O_CLOEXEC = 0o2000000;
    }
}

impl OpenFlags {
    /// 访问模式掩码
    pub const ACCMODE: u32 = 0o3;

    /// 是否允许读
    pub fn readable(&self) -> bool {
        let mode = self.bits() & Self::ACCMODE;
        mode == Self::O_RDONLY.bits() || mode == Self::O_RDWR.bits()
    }

    /// 是否允许写
    pub fn writable(&self) -> bool {
        let mode = self.bits() & Self::ACCMODE;
        mode == Self::O_WRONLY.bits() || mode == Self::O_RDWR.bits()
    }
}
