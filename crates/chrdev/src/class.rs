//! 设备类

use alloc::string::String;

/// 设备类，设备节点在 `/sys/class/<name>` 下按类分组
#[derive(Debug, PartialEq, Eq)]
pub struct Class {
    name: String,
}

impl Class {
    /// 由宿主在 `class_create` 中构造
    pub fn new(name: &str) -> Self {
        Self {
            name: String::from(name),
        }
    }

    /// 类名
    pub fn name(&self) -> &str {
        &self.name
    }
}
