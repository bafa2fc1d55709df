//! 宿主内核错误类型
//!
//! 宿主服务与文件回调统一返回 [`KernelError`]，可通过 [`KernelError::to_errno()`]
//! 转换为内核风格的负错误码。

use core::fmt;

use uapi::errno::*;

/// 宿主内核返回的状态码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelError {
    /// 内存不足 (-ENOMEM)
    OutOfMemory,
    /// 资源忙，例如没有空闲的 major 号 (-EBUSY)
    Busy,
    /// 名称或号段已被占用 (-EEXIST)
    AlreadyExists,
    /// 路径不存在 (-ENOENT)
    NotFound,
    /// 设备不存在 (-ENODEV)
    NoDevice,
    /// 设备节点存在但没有驱动绑定 (-ENXIO)
    NoDeviceOrAddress,
    /// 无效参数 (-EINVAL)
    InvalidArgument,
    /// 打开模式不允许该操作 (-EBADF)
    BadFileDescriptor,
    /// 操作不被允许 (-EPERM)
    PermissionDenied,
    /// 操作不支持 (-EOPNOTSUPP)
    NotSupported,
    /// 其它错误码（正数）
    Other(i32),
}

impl KernelError {
    /// 转换为负错误码
    pub fn to_errno(&self) -> i32 {
        let errno = match self {
            KernelError::OutOfMemory => ENOMEM,
            KernelError::Busy => EBUSY,
            KernelError::AlreadyExists => EEXIST,
            KernelError::NotFound => ENOENT,
            KernelError::NoDevice => ENODEV,
            KernelError::NoDeviceOrAddress => ENXIO,
            KernelError::InvalidArgument => EINVAL,
            KernelError::BadFileDescriptor => EBADF,
            KernelError::PermissionDenied => EPERM,
            KernelError::NotSupported => EOPNOTSUPP,
            KernelError::Other(code) => *code,
        };
        -errno
    }

    /// 从错误码恢复，正负均可
    pub fn from_errno(errno: i32) -> Self {
        match errno.saturating_abs() {
            ENOMEM => KernelError::OutOfMemory,
            EBUSY => KernelError::Busy,
            EEXIST => KernelError::AlreadyExists,
            ENOENT => KernelError::NotFound,
            ENODEV => KernelError::NoDevice,
            ENXIO => KernelError::NoDeviceOrAddress,
            EINVAL => KernelError::InvalidArgument,
            EBADF => KernelError::BadFileDescriptor,
            EPERM => KernelError::PermissionDenied,
            EOPNOTSUPP => KernelError::NotSupported,
            code => KernelError::Other(code),
        }
    }
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            KernelError::OutOfMemory => "out of memory",
            KernelError::Busy => "device or resource busy",
            KernelError::AlreadyExists => "already exists",
            KernelError::NotFound => "no such file or directory",
            KernelError::NoDevice => "no such device",
            KernelError::NoDeviceOrAddress => "no such device or address",
            KernelError::InvalidArgument => "invalid argument",
            KernelError::BadFileDescriptor => "bad file descriptor",
            KernelError::PermissionDenied => "operation not permitted",
            KernelError::NotSupported => "operation not supported",
            KernelError::Other(_) => "kernel error",
        };
        write!(f, "{} ({})", msg, self.to_errno())
    }
}
