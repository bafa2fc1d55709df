//! 设备生命周期管理
//!
//! 加载顺序：设备号 → 设备类 → cdev 初始化 → 分派表绑定 → `/dev` 节点。
//! 卸载按完全相反的顺序撤销。加载中途失败时只撤销已经成功的步骤，
//! 唯一的例外是分派表绑定：它的结果不参与判断，节点创建失败时也不解除。

use alloc::sync::Arc;

use chrdev::{Cdev, Class, DevT, Device, KernelError, KernelModule, KernelOps, ThisModule};
use klog::{pr_err, pr_info, pr_warn};

use crate::config::{DriverConfig, THIS_MODULE};
use crate::error::LoadError;
use crate::fops::NewCharFops;

/// 已加载的驱动
///
/// 持有加载时获得的全部宿主资源，以及卸载时要用的宿主接口。
/// 该值存在即代表 Loaded 状态；[`NewChar::unload`] 消费它回到 Unloaded。
pub struct NewChar {
    kernel: Arc<dyn KernelOps>,
    config: DriverConfig,
    devt: DevT,
    major: u32,
    class: Arc<Class>,
    cdev: Arc<Cdev>,
    device: Arc<Device>,
}

impl NewChar {
    /// 以默认配置加载
    pub fn load(kernel: Arc<dyn KernelOps>) -> Result<Self, LoadError> {
        Self::load_with(kernel, DriverConfig::DEFAULT)
    }

    /// 以指定配置加载
    pub fn load_with(kernel: Arc<dyn KernelOps>, config: DriverConfig) -> Result<Self, LoadError> {
        let count = config.minor_count;

        let devt = match kernel.alloc_chrdev_region(config.first_minor, count, config.region_name) {
            Ok(devt) => devt,
            Err(e) => {
                pr_err!("Can't get major number: {}", e);
                return Err(LoadError::IdentifierAllocation(e));
            }
        };
        let major = devt.major();

        let class = match kernel.class_create(config.class_name) {
            Ok(class) => class,
            Err(e) => {
                pr_err!("There was an error creating the {} class: {}", config.class_name, e);
                release(&*kernel, "unregister_chrdev_region", |k| {
                    k.unregister_chrdev_region(devt, count)
                });
                return Err(LoadError::ClassCreation(e));
            }
        };

        let mut cdev = Cdev::new(Arc::new(NewCharFops));
        cdev.set_owner(&THIS_MODULE);
        let cdev = Arc::new(cdev);

        // 绑定失败只记录，不中止加载
        if let Err(e) = kernel.cdev_add(cdev.clone(), devt, count) {
            pr_err!("cdev_add for {} failed: {}", devt, e);
        }

        let device = match kernel.device_create(&class, None, devt, None, config.device_name) {
            Ok(device) => device,
            Err(e) => {
                pr_err!("There was an error creating the {} device: {}", config.device_name, e);
                release(&*kernel, "class_destroy", |k| k.class_destroy(&class));
                release(&*kernel, "unregister_chrdev_region", |k| {
                    k.unregister_chrdev_region(devt, count)
                });
                return Err(LoadError::NodeCreation(e));
            }
        };

        pr_info!("Hello. {}'s major number = {}", config.region_name, major);
        pr_info!("{} module has been loaded!", THIS_MODULE.name());

        Ok(Self {
            kernel,
            config,
            devt,
            major,
            class,
            cdev,
            device,
        })
    }

    /// 卸载：节点 → 分派表绑定 → 设备类 → 设备号
    ///
    /// 宿主报告的错误只记录警告，不中断后续步骤。
    pub fn unload(self) {
        let kernel = &*self.kernel;
        let count = self.config.minor_count;

        release(kernel, "device_destroy", |k| k.device_destroy(&self.class, self.devt));
        release(kernel, "cdev_del", |k| k.cdev_del(self.devt, count));
        release(kernel, "class_destroy", |k| k.class_destroy(&self.class));
        release(kernel, "unregister_chrdev_region", |k| {
            k.unregister_chrdev_region(self.devt, count)
        });

        pr_info!("Goodbye. Module has been unloaded.");
    }

    /// 分配到的 major 号
    pub fn major(&self) -> u32 {
        self.major
    }

    /// 起始设备号
    pub fn devt(&self) -> DevT {
        self.devt
    }

    /// 加载时使用的配置
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// 设备类
    pub fn class(&self) -> &Arc<Class> {
        &self.class
    }

    /// 绑定到分派表的字符设备
    pub fn cdev(&self) -> &Arc<Cdev> {
        &self.cdev
    }

    /// `/dev` 节点
    pub fn device(&self) -> &Arc<Device> {
        &self.device
    }
}

impl KernelModule for NewChar {
    fn this_module() -> &'static ThisModule {
        &THIS_MODULE
    }

    fn init(kernel: Arc<dyn KernelOps>) -> Result<Self, KernelError> {
        Self::load(kernel).map_err(KernelError::from)
    }

    fn exit(self) {
        self.unload();
    }
}

/// 执行一个释放步骤，宿主报错时记录警告
fn release<F>(kernel: &dyn KernelOps, step: &str, f: F)
where
    F: FnOnce(&dyn KernelOps) -> Result<(), KernelError>,
{
    if let Err(e) = f(kernel) {
        pr_warn!("{} failed during teardown: {}", step, e);
    }
}
