//! 字符设备结构

use alloc::sync::Arc;
use core::fmt;

use crate::file::FileOperations;
use crate::module::ThisModule;

/// 字符设备：把回调表与所属模块绑定在一起
///
/// 通过 [`KernelOps::cdev_add`](crate::KernelOps::cdev_add) 注册到宿主分派表后，
/// 对应设备号上的文件操作都会路由到这里。
pub struct Cdev {
    ops: Arc<dyn FileOperations>,
    owner: Option<&'static ThisModule>,
}

impl Cdev {
    /// 初始化字符设备 (`cdev_init`)
    pub fn new(ops: Arc<dyn FileOperations>) -> Self {
        Self { ops, owner: None }
    }

    /// 设置所属模块
    ///
    /// 打开的文件会持有所属模块的引用，阻止模块在使用中被卸载。
    pub fn set_owner(&mut self, owner: &'static ThisModule) {
        self.owner = Some(owner);
    }

    /// 所属模块
    pub fn owner(&self) -> Option<&'static ThisModule> {
        self.owner
    }

    /// 回调表
    pub fn ops(&self) -> &Arc<dyn FileOperations> {
        &self.ops
    }
}

impl fmt::Debug for Cdev {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cdev")
            .field("owner", &self.owner.map(ThisModule::name))
            .finish_non_exhaustive()
    }
}
