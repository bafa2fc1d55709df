//! 宿主内核的 Mock 实现
//!
//! [`MockKernel`] 在内存中维护设备号区间、设备类、分派表和 `/dev` 节点，
//! 按宿主的规则分配 major 号，并支持按调用类型注入一次性故障。
//! 所有调用按顺序记入日志，便于断言加载/卸载的顺序。

use alloc::collections::BTreeSet;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;

use chrdev::{
    Cdev, CharDeviceFile, Class, DevT, Device, DrvData, KernelError, KernelModule, KernelOps,
    MINORMASK, OpenFlags,
};
use sync::SpinLock;

/// 动态 major 号的主搜索区间（自高向低）
const CHRDEV_MAJOR_DYN_START: u32 = 254;
const CHRDEV_MAJOR_DYN_END: u32 = 234;
/// 主区间耗尽后的扩展区间
const CHRDEV_MAJOR_DYN_EXT_START: u32 = 511;
const CHRDEV_MAJOR_DYN_EXT_END: u32 = 384;

/// [`KernelOps`] 方法的种类，用于调用日志和故障注入
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelCall {
    AllocChrdevRegion,
    UnregisterChrdevRegion,
    ClassCreate,
    ClassDestroy,
    CdevAdd,
    CdevDel,
    DeviceCreate,
    DeviceDestroy,
}

/// 已分配的设备号区间
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub first: DevT,
    pub count: u32,
    pub name: String,
}

struct Binding {
    first: DevT,
    count: u32,
    cdev: Arc<Cdev>,
}

#[derive(Default)]
struct State {
    regions: Vec<Region>,
    classes: Vec<Arc<Class>>,
    bindings: Vec<Binding>,
    nodes: Vec<Arc<Device>>,
    reserved: BTreeSet<u32>,
    faults: Vec<(KernelCall, KernelError)>,
    calls: Vec<KernelCall>,
}

impl State {
    /// 记录调用，并消费一个匹配的注入故障
    fn enter(&mut self, call: KernelCall) -> Result<(), KernelError> {
        self.calls.push(call);
        match self.faults.iter().position(|(c, _)| *c == call) {
            Some(idx) => Err(self.faults.remove(idx).1),
            None => Ok(()),
        }
    }

    fn major_in_use(&self, major: u32) -> bool {
        self.reserved.contains(&major) || self.regions.iter().any(|r| r.first.major() == major)
    }

    fn find_dynamic_major(&self) -> Option<u32> {
        (CHRDEV_MAJOR_DYN_END..=CHRDEV_MAJOR_DYN_START)
            .rev()
            .chain((CHRDEV_MAJOR_DYN_EXT_END..=CHRDEV_MAJOR_DYN_EXT_START).rev())
            .find(|&major| !self.major_in_use(major))
    }
}

/// 内存中的宿主内核
#[derive(Default)]
pub struct MockKernel {
    state: SpinLock<State>,
}

impl MockKernel {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    // ========== 测试控制 ==========

    /// 让下一次 `call` 返回 `err`（只生效一次，可叠加）
    pub fn fail_next(&self, call: KernelCall, err: KernelError) {
        self.state.lock().faults.push((call, err));
    }

    /// 占用一个 major 号，使动态分配跳过它
    pub fn reserve_major(&self, major: u32) {
        self.state.lock().reserved.insert(major);
    }

    /// 占用全部可动态分配的 major 号
    pub fn exhaust_dynamic_majors(&self) {
        let mut state = self.state.lock();
        state
            .reserved
            .extend(CHRDEV_MAJOR_DYN_END..=CHRDEV_MAJOR_DYN_START);
        state
            .reserved
            .extend(CHRDEV_MAJOR_DYN_EXT_END..=CHRDEV_MAJOR_DYN_EXT_START);
    }

    // ========== 状态查询 ==========

    /// 按顺序返回全部调用（包括失败的调用）
    pub fn calls(&self) -> Vec<KernelCall> {
        self.state.lock().calls.clone()
    }

    /// 清空调用日志
    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }

    pub fn regions(&self) -> Vec<Region> {
        self.state.lock().regions.clone()
    }

    pub fn classes(&self) -> Vec<String> {
        self.state
            .lock()
            .classes
            .iter()
            .map(|c| c.name().to_string())
            .collect()
    }

    pub fn nodes(&self) -> Vec<String> {
        self.state
            .lock()
            .nodes
            .iter()
            .map(|d| d.name().to_string())
            .collect()
    }

    /// 按名称查找 `/dev` 节点
    pub fn node(&self, name: &str) -> Option<Arc<Device>> {
        self.state
            .lock()
            .nodes
            .iter()
            .find(|d| d.name() == name)
            .cloned()
    }

    /// 分派表中各绑定的起始设备号
    pub fn bound(&self) -> Vec<DevT> {
        self.state.lock().bindings.iter().map(|b| b.first).collect()
    }

    /// 设备号上绑定的字符设备
    pub fn cdev_for(&self, devt: DevT) -> Option<Arc<Cdev>> {
        self.state
            .lock()
            .bindings
            .iter()
            .find(|b| devt.in_range(b.first, b.count))
            .map(|b| b.cdev.clone())
    }

    /// 没有任何残留注册
    pub fn is_clean(&self) -> bool {
        let state = self.state.lock();
        state.regions.is_empty()
            && state.classes.is_empty()
            && state.bindings.is_empty()
            && state.nodes.is_empty()
    }

    // ========== 用户空间视角 ==========

    /// 打开 `/dev/<name>`
    ///
    /// 节点不存在返回 `ENOENT`；节点存在但设备号上没有绑定返回 `ENXIO`。
    pub fn open(&self, path: &str, flags: OpenFlags) -> Result<CharDeviceFile, KernelError> {
        let name = path.strip_prefix("/dev/").ok_or(KernelError::NotFound)?;
        let devt = self.node(name).ok_or(KernelError::NotFound)?.devt();
        let cdev = self.cdev_for(devt).ok_or(KernelError::NoDeviceOrAddress)?;
        // 锁已释放，驱动回调不在 Mock 的锁内执行
        CharDeviceFile::open(cdev, devt, flags)
    }

    // ========== 模块加载 ==========

    /// 加载模块 (`insmod`)，失败时返回负错误码
    pub fn insmod<M: KernelModule>(self: &Arc<Self>) -> Result<M, i32> {
        let kernel: Arc<dyn KernelOps> = self.clone();
        M::init(kernel).map_err(|e| e.to_errno())
    }

    /// 卸载模块 (`rmmod`)
    ///
    /// 模块仍被打开的文件引用时拒绝卸载，以 `Err` 把模块原样交还，不调用 `exit`。
    pub fn rmmod<M: KernelModule>(&self, module: M) -> Result<(), M> {
        if M::this_module().refcount() > 0 {
            return Err(module);
        }
        module.exit();
        Ok(())
    }
}

impl KernelOps for MockKernel {
    fn alloc_chrdev_region(
        &self,
        baseminor: u32,
        count: u32,
        name: &str,
    ) -> Result<DevT, KernelError> {
        let mut state = self.state.lock();
        state.enter(KernelCall::AllocChrdevRegion)?;

        if count == 0 || baseminor.saturating_add(count) > MINORMASK + 1 {
            return Err(KernelError::InvalidArgument);
        }
        let major = state.find_dynamic_major().ok_or(KernelError::Busy)?;
        let first = DevT::new(major, baseminor);
        state.regions.push(Region {
            first,
            count,
            name: name.to_string(),
        });
        Ok(first)
    }

    fn unregister_chrdev_region(&self, first: DevT, count: u32) -> Result<(), KernelError> {
        let mut state = self.state.lock();
        state.enter(KernelCall::UnregisterChrdevRegion)?;

        let idx = state
            .regions
            .iter()
            .position(|r| r.first == first && r.count == count)
            .ok_or(KernelError::InvalidArgument)?;
        state.regions.remove(idx);
        Ok(())
    }

    fn class_create(&self, name: &str) -> Result<Arc<Class>, KernelError> {
        let mut state = self.state.lock();
        state.enter(KernelCall::ClassCreate)?;

        if state.classes.iter().any(|c| c.name() == name) {
            return Err(KernelError::AlreadyExists);
        }
        let class = Arc::new(Class::new(name));
        state.classes.push(class.clone());
        Ok(class)
    }

    fn class_destroy(&self, class: &Arc<Class>) -> Result<(), KernelError> {
        let mut state = self.state.lock();
        state.enter(KernelCall::ClassDestroy)?;

        let idx = state
            .classes
            .iter()
            .position(|c| Arc::ptr_eq(c, class))
            .ok_or(KernelError::InvalidArgument)?;
        state.classes.remove(idx);
        Ok(())
    }

    fn cdev_add(&self, cdev: Arc<Cdev>, first: DevT, count: u32) -> Result<(), KernelError> {
        let mut state = self.state.lock();
        state.enter(KernelCall::CdevAdd)?;

        if count == 0 {
            return Err(KernelError::InvalidArgument);
        }
        let overlaps = state.bindings.iter().any(|b| {
            (0..count).any(|i| DevT::new(first.major(), first.minor() + i).in_range(b.first, b.count))
        });
        if overlaps {
            return Err(KernelError::Busy);
        }
        state.bindings.push(Binding { first, count, cdev });
        Ok(())
    }

    fn cdev_del(&self, first: DevT, count: u32) -> Result<(), KernelError> {
        let mut state = self.state.lock();
        state.enter(KernelCall::CdevDel)?;

        let idx = state
            .bindings
            .iter()
            .position(|b| b.first == first && b.count == count)
            .ok_or(KernelError::InvalidArgument)?;
        state.bindings.remove(idx);
        Ok(())
    }

    fn device_create(
        &self,
        class: &Arc<Class>,
        parent: Option<&Arc<Device>>,
        devt: DevT,
        drvdata: Option<DrvData>,
        name: &str,
    ) -> Result<Arc<Device>, KernelError> {
        let mut state = self.state.lock();
        state.enter(KernelCall::DeviceCreate)?;

        if !state.classes.iter().any(|c| Arc::ptr_eq(c, class)) {
            return Err(KernelError::InvalidArgument);
        }
        if state.nodes.iter().any(|d| d.name() == name) {
            return Err(KernelError::AlreadyExists);
        }
        let device = Arc::new(Device::new(
            class.clone(),
            parent.cloned(),
            devt,
            drvdata,
            name,
        ));
        state.nodes.push(device.clone());
        Ok(device)
    }

    fn device_destroy(&self, class: &Arc<Class>, devt: DevT) -> Result<(), KernelError> {
        let mut state = self.state.lock();
        state.enter(KernelCall::DeviceDestroy)?;

        let idx = state
            .nodes
            .iter()
            .position(|d| Arc::ptr_eq(d.class(), class) && d.devt() == devt)
            .ok_or(KernelError::NoDevice)?;
        state.nodes.remove(idx);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dynamic_major_search_order() {
        let kernel = MockKernel::new();
        let a = kernel.alloc_chrdev_region(0, 1, "a").unwrap();
        let b = kernel.alloc_chrdev_region(0, 1, "b").unwrap();
        assert_eq!(a.major(), 254);
        assert_eq!(b.major(), 253);

        kernel.reserve_major(252);
        let c = kernel.alloc_chrdev_region(0, 1, "c").unwrap();
        assert_eq!(c.major(), 251);
    }

    #[test]
    fn test_extended_range_after_primary_exhausted() {
        let kernel = MockKernel::new();
        for major in CHRDEV_MAJOR_DYN_END..=CHRDEV_MAJOR_DYN_START {
            kernel.reserve_major(major);
        }
        let dev = kernel.alloc_chrdev_region(0, 1, "ext").unwrap();
        assert_eq!(dev.major(), 511);
    }

    #[test]
    fn test_exhausted_majors_is_ebusy() {
        let kernel = MockKernel::new();
        kernel.exhaust_dynamic_majors();
        assert_eq!(
            kernel.alloc_chrdev_region(0, 1, "none"),
            Err(KernelError::Busy)
        );
    }

    #[test]
    fn test_injected_fault_fires_once() {
        let kernel = MockKernel::new();
        kernel.fail_next(KernelCall::ClassCreate, KernelError::OutOfMemory);
        assert_eq!(
            kernel.class_create("c").err(),
            Some(KernelError::OutOfMemory)
        );
        assert!(kernel.class_create("c").is_ok());
        assert_eq!(
            kernel.calls(),
            [KernelCall::ClassCreate, KernelCall::ClassCreate]
        );
    }

    #[test]
    fn test_class_and_node_names_unique() {
        let kernel = MockKernel::new();
        let class = kernel.class_create("c").unwrap();
        assert_eq!(kernel.class_create("c").err(), Some(KernelError::AlreadyExists));

        let devt = DevT::new(254, 0);
        kernel.device_create(&class, None, devt, None, "n").unwrap();
        assert_eq!(
            kernel.device_create(&class, None, devt, None, "n").err(),
            Some(KernelError::AlreadyExists)
        );
    }

    #[test]
    fn test_device_create_requires_live_class() {
        let kernel = MockKernel::new();
        let stale = Arc::new(Class::new("stale"));
        assert_eq!(
            kernel
                .device_create(&stale, None, DevT::new(254, 0), None, "n")
                .err(),
            Some(KernelError::InvalidArgument)
        );
    }

    #[test]
    fn test_open_missing_node_and_unbound_node() {
        let kernel = MockKernel::new();
        assert_eq!(
            kernel.open("/dev/nothing", OpenFlags::O_RDONLY).err(),
            Some(KernelError::NotFound)
        );

        let class = kernel.class_create("c").unwrap();
        kernel
            .device_create(&class, None, DevT::new(254, 0), None, "orphan")
            .unwrap();
        assert_eq!(
            kernel.open("/dev/orphan", OpenFlags::O_RDONLY).err(),
            Some(KernelError::NoDeviceOrAddress)
        );
    }
}
