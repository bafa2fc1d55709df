//! 驱动配置常量

use chrdev::ThisModule;

/// 设备号区间名（出现在 `/proc/devices`）
pub const REGION_NAME: &str = "new_char";

/// 设备类名（出现在 `/sys/class`）
pub const CLASS_NAME: &str = "new_char_class";

/// 设备节点名（出现在 `/dev`）
pub const DEVICE_NAME: &str = "new-char";

/// 起始 minor 号
pub const FIRST_MINOR: u32 = 0;

/// 申请的 minor 号数量
pub const MINOR_COUNT: u32 = 1;

/// 模块描述
pub static THIS_MODULE: ThisModule = ThisModule::new(
    "new_char",
    "Karla Mejia",
    "Creating the new-char driver, heavily referenced by dummy-char.c in LDDD",
    "GPL",
);

/// 加载时使用的名称与号段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverConfig {
    /// 设备号区间名
    pub region_name: &'static str,
    /// 设备类名
    pub class_name: &'static str,
    /// 设备节点名
    pub device_name: &'static str,
    /// 起始 minor 号
    pub first_minor: u32,
    /// minor 号数量
    pub minor_count: u32,
}

impl DriverConfig {
    /// 默认配置
    pub const DEFAULT: Self = Self {
        region_name: REGION_NAME,
        class_name: CLASS_NAME,
        device_name: DEVICE_NAME,
        first_minor: FIRST_MINOR,
        minor_count: MINOR_COUNT,
    };
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_metadata() {
        assert_eq!(THIS_MODULE.name(), "new_char");
        assert_eq!(THIS_MODULE.author(), "Karla Mejia");
        assert_eq!(THIS_MODULE.license(), "GPL");
        assert!(THIS_MODULE.description().starts_with("Creating the new-char driver"));
    }

    #[test]
    fn test_default_config_uses_fixed_names() {
        let config = DriverConfig::default();
        assert_eq!(config, DriverConfig::DEFAULT);
        assert_eq!(config.region_name, "new_char");
        assert_eq!(config.class_name, "new_char_class");
        assert_eq!(config.device_name, "new-char");
        assert_eq!((config.first_minor, config.minor_count), (0, 1));
    }
}
