//! 设备节点记录

use alloc::string::String;
use alloc::sync::Arc;
use core::any::Any;
use core::fmt;

use crate::class::Class;
use crate::dev::DevT;

/// 附加到设备上的驱动私有数据
pub type DrvData = Arc<dyn Any + Send + Sync>;

/// 用户可见的设备节点，出现在 `/dev/<name>`
pub struct Device {
    name: String,
    devt: DevT,
    class: Arc<Class>,
    parent: Option<Arc<Device>>,
    drvdata: Option<DrvData>,
}

impl Device {
    /// 由宿主在 `device_create` 中构造
    pub fn new(
        class: Arc<Class>,
        parent: Option<Arc<Device>>,
        devt: DevT,
        drvdata: Option<DrvData>,
        name: &str,
    ) -> Self {
        Self {
            name: String::from(name),
            devt,
            class,
            parent,
            drvdata,
        }
    }

    /// 节点名
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 设备号
    pub fn devt(&self) -> DevT {
        self.devt
    }

    /// 所属设备类
    pub fn class(&self) -> &Arc<Class> {
        &self.class
    }

    /// 父设备
    pub fn parent(&self) -> Option<&Arc<Device>> {
        self.parent.as_ref()
    }

    /// 驱动私有数据
    pub fn drvdata(&self) -> Option<&DrvData> {
        self.drvdata.as_ref()
    }
}

impl fmt::Debug for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Device")
            .field("name", &self.name)
            .field("devt", &self.devt)
            .field("class", &self.class.name())
            .field("has_parent", &self.parent.is_some())
            .field("has_drvdata", &self.drvdata.is_some())
            .finish()
    }
}
