//! 字符设备框架
//!
//! 驱动面向的字符设备抽象，包括：
//!
//! - [`DevT`] - 设备号及 `makedev`/`major`/`minor`
//! - [`KernelOps`] trait - 宿主提供的设备号、设备类、分派表与节点服务
//! - [`FileOperations`] trait - 驱动实现的 open/release/read/write 回调
//! - [`Cdev`] - 回调表与所属模块的绑定
//! - [`ThisModule`] / [`KernelModule`] - 模块元数据与加载约定
//! - [`CharDeviceFile`] - 已打开的设备文件，负责分派回调
//!
//! # 架构解耦
//!
//! 框架不持有任何全局注册表：宿主实现 [`KernelOps`]，在加载时交给模块，
//! 由模块保存在自己的生命周期上下文中。

#![no_std]

extern crate alloc;

pub mod cdev;
pub mod char_file;
pub mod class;
pub mod dev;
pub mod device;
pub mod error;
pub mod file;
pub mod module;
pub mod ops;

pub use cdev::Cdev;
pub use char_file::CharDeviceFile;
pub use class::Class;
pub use dev::{DevT, MAX_MAJOR, MINORBITS, MINORMASK, major, makedev, minor};
pub use device::{Device, DrvData};
pub use error::KernelError;
pub use file::{FileOperations, OpenFile};
pub use module::{KernelModule, ThisModule};
pub use ops::KernelOps;

// Re-export uapi types for convenience
pub use uapi::fcntl::OpenFlags;
