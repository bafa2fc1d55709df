//! Mock 实现模块
//!
//! 用内存中的注册表代替宿主内核，供驱动的加载/卸载与文件操作测试使用

pub mod kernel;
pub mod log;
