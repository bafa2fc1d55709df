//! 宿主内核服务 trait 定义
//!
//! 驱动只通过 [`KernelOps`] 与宿主交互。宿主在加载模块时把实现交给
//! [`KernelModule::init`](crate::KernelModule::init)，模块把它保存在自己的生命周期上下文里，
//! 卸载时沿用同一个实现。

use alloc::sync::Arc;

use crate::cdev::Cdev;
use crate::class::Class;
use crate::dev::DevT;
use crate::device::{Device, DrvData};
use crate::error::KernelError;

/// 字符设备注册相关的宿主服务
pub trait KernelOps: Send + Sync {
    // ========== 设备号 ==========

    /// 动态分配 `count` 个连续设备号，minor 从 `baseminor` 开始
    fn alloc_chrdev_region(&self, baseminor: u32, count: u32, name: &str)
    -> Result<DevT, KernelError>;

    /// 释放 `first` 起的 `count` 个设备号
    fn unregister_chrdev_region(&self, first: DevT, count: u32) -> Result<(), KernelError>;

    // ========== 设备类 ==========

    /// 创建设备类
    fn class_create(&self, name: &str) -> Result<Arc<Class>, KernelError>;

    /// 销毁设备类
    fn class_destroy(&self, class: &Arc<Class>) -> Result<(), KernelError>;

    // ========== 分派表 ==========

    /// 把字符设备绑定到 `first` 起的 `count` 个设备号
    fn cdev_add(&self, cdev: Arc<Cdev>, first: DevT, count: u32) -> Result<(), KernelError>;

    /// 解除 `first` 起的 `count` 个设备号上的绑定
    fn cdev_del(&self, first: DevT, count: u32) -> Result<(), KernelError>;

    // ========== 设备节点 ==========

    /// 在设备类下创建节点 `/dev/<name>`
    fn device_create(
        &self,
        class: &Arc<Class>,
        parent: Option<&Arc<Device>>,
        devt: DevT,
        drvdata: Option<DrvData>,
        name: &str,
    ) -> Result<Arc<Device>, KernelError>;

    /// 销毁设备类下设备号为 `devt` 的节点
    fn device_destroy(&self, class: &Arc<Class>, devt: DevT) -> Result<(), KernelError>;
}
