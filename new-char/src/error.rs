//! 加载错误

use core::fmt;

use chrdev::KernelError;

/// 加载失败的步骤，携带宿主返回的状态码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadError {
    /// 设备号区间分配失败
    IdentifierAllocation(KernelError),
    /// 设备类创建失败
    ClassCreation(KernelError),
    /// 设备节点创建失败
    NodeCreation(KernelError),
}

impl LoadError {
    /// 宿主返回的原始错误
    pub fn kernel_error(&self) -> KernelError {
        match self {
            LoadError::IdentifierAllocation(e)
            | LoadError::ClassCreation(e)
            | LoadError::NodeCreation(e) => *e,
        }
    }

    /// 交还给宿主的负错误码
    pub fn to_errno(&self) -> i32 {
        self.kernel_error().to_errno()
    }
}

impl From<LoadError> for KernelError {
    fn from(err: LoadError) -> Self {
        err.kernel_error()
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::IdentifierAllocation(e) => write!(f, "can't get major number: {}", e),
            LoadError::ClassCreation(e) => write!(f, "can't create device class: {}", e),
            LoadError::NodeCreation(e) => write!(f, "can't create device node: {}", e),
        }
    }
}
