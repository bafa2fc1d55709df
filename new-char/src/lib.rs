//! new-char 字符设备驱动
//!
//! 一个最小的字符设备模块：向宿主申请设备号、创建设备类、绑定回调并创建
//! `/dev/new-char` 节点。设备本身不传输任何数据：
//!
//! - 读：总是返回 0（数据结束）
//! - 写：总是报告全部字节已接受，内容被丢弃
//!
//! # 模块结构
//!
//! - [`config`] - 名称、号段与模块元数据
//! - [`fops`] - 文件操作回调 ([`NewCharFops`])
//! - [`module`] - 加载/卸载的生命周期管理 ([`NewChar`])
//! - [`error`] - 加载错误 ([`LoadError`])
//!
//! # 使用
//!
//! 宿主实现 [`chrdev::KernelOps`]，通过 [`chrdev::KernelModule`] 约定驱动本模块：
//!
//! ```ignore
//! let driver = NewChar::load(kernel)?;
//! // ... /dev/new-char 可用 ...
//! driver.unload();
//! ```

#![no_std]

extern crate alloc;

pub mod config;
pub mod error;
pub mod fops;
pub mod module;

pub use config::{
    CLASS_NAME, DEVICE_NAME, DriverConfig, FIRST_MINOR, MINOR_COUNT, REGION_NAME, THIS_MODULE,
};
pub use error::LoadError;
pub use fops::NewCharFops;
pub use module::NewChar;
