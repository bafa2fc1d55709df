//! 可加载模块
//!
//! [`ThisModule`] 记录模块元数据和引用计数，[`KernelModule`] 是宿主驱动
//! 加载/卸载的入口约定。

use alloc::sync::Arc;
use core::sync::atomic::{AtomicUsize, Ordering};

use crate::error::KernelError;
use crate::ops::KernelOps;

/// 模块元数据与引用计数
#[derive(Debug)]
pub struct ThisModule {
    name: &'static str,
    author: &'static str,
    description: &'static str,
    license: &'static str,
    refcnt: AtomicUsize,
}

impl ThisModule {
    /// 构造模块描述，可用于 `static`
    pub const fn new(
        name: &'static str,
        author: &'static str,
        description: &'static str,
        license: &'static str,
    ) -> Self {
        Self {
            name,
            author,
            description,
            license,
            refcnt: AtomicUsize::new(0),
        }
    }

    /// 模块名
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// 作者
    pub fn author(&self) -> &'static str {
        self.author
    }

    /// 描述
    pub fn description(&self) -> &'static str {
        self.description
    }

    /// 许可证
    pub fn license(&self) -> &'static str {
        self.license
    }

    /// 获取一个引用 (`try_module_get`)
    pub fn get(&self) {
        self.refcnt.fetch_add(1, Ordering::AcqRel);
    }

    /// 释放一个引用 (`module_put`)
    pub fn put(&self) {
        let prev = self.refcnt.fetch_sub(1, Ordering::AcqRel);
        debug_assert!(prev > 0, "module_put on {} without a reference", self.name);
    }

    /// 当前引用数，非零时模块不可卸载
    pub fn refcount(&self) -> usize {
        self.refcnt.load(Ordering::Acquire)
    }
}

/// 可加载模块的入口约定
///
/// `init` 成功即进入已加载状态，返回值就是模块的生命周期上下文；
/// `exit` 消费该上下文，撤销 `init` 建立的全部注册。宿主保证二者不会并发执行。
pub trait KernelModule: Sized + Send + Sync {
    /// 模块自身的描述 (`THIS_MODULE`)
    fn this_module() -> &'static ThisModule;

    /// 模块加载 (`module_init`)
    fn init(kernel: Arc<dyn KernelOps>) -> Result<Self, KernelError>;

    /// 模块卸载 (`module_exit`)
    fn exit(self);
}
