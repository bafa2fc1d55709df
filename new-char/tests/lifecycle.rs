//! Load/unload tests for the new-char driver against the in-memory host.

use std::sync::{Mutex, MutexGuard};

use chrdev::{DevT, KernelError, OpenFlags};
use klog::LogLevel;
use new_char::{DriverConfig, LoadError, NewChar, THIS_MODULE};
use test_support::{CAPTURE, KernelCall, MockKernel, drain_log, drain_messages, install_capture};

/// The log ring and `THIS_MODULE` are process-wide.
static SERIAL: Mutex<()> = Mutex::new(());

fn setup() -> MutexGuard<'static, ()> {
    let guard = SERIAL.lock().unwrap_or_else(|e| e.into_inner());
    drain_log();
    guard
}

fn load(kernel: &std::sync::Arc<MockKernel>) -> Result<NewChar, LoadError> {
    NewChar::load(kernel.clone())
}

#[test]
fn test_load_registers_one_of_each() {
    let _g = setup();
    let kernel = MockKernel::new();

    let driver = load(&kernel).unwrap();

    assert_eq!(driver.major(), 254);
    assert_eq!(driver.devt(), DevT::new(254, 0));

    let regions = kernel.regions();
    assert_eq!(regions.len(), 1);
    assert_eq!(regions[0].first, DevT::new(254, 0));
    assert_eq!(regions[0].count, 1);
    assert_eq!(regions[0].name, "new_char");

    assert_eq!(kernel.classes(), ["new_char_class"]);
    assert_eq!(kernel.nodes(), ["new-char"]);
    assert_eq!(kernel.bound(), [DevT::new(254, 0)]);

    let node = kernel.node("new-char").unwrap();
    assert_eq!(node.devt(), driver.devt());
    assert!(node.parent().is_none());
    assert!(node.drvdata().is_none());
    assert_eq!(node.class().name(), "new_char_class");

    let cdev = kernel.cdev_for(driver.devt()).unwrap();
    assert!(std::sync::Arc::ptr_eq(&cdev, driver.cdev()));
    assert_eq!(cdev.owner().map(|m| m.name()), Some("new_char"));

    assert_eq!(
        kernel.calls(),
        [
            KernelCall::AllocChrdevRegion,
            KernelCall::ClassCreate,
            KernelCall::CdevAdd,
            KernelCall::DeviceCreate,
        ]
    );

    driver.unload();
}

#[test]
fn test_load_logs_major_number() {
    let _g = setup();
    let kernel = MockKernel::new();
    kernel.reserve_major(254);

    let driver = load(&kernel).unwrap();
    assert_eq!(driver.major(), 253);

    let messages = drain_messages();
    assert_eq!(
        messages,
        [
            "Hello. new_char's major number = 253",
            "new_char module has been loaded!",
        ]
    );

    driver.unload();
}

#[test]
fn test_identifier_failure_touches_nothing_else() {
    let _g = setup();
    let kernel = MockKernel::new();
    kernel.exhaust_dynamic_majors();

    let err = load(&kernel).err().unwrap();

    assert_eq!(err, LoadError::IdentifierAllocation(KernelError::Busy));
    assert_eq!(err.to_errno(), -16);
    assert_eq!(kernel.calls(), [KernelCall::AllocChrdevRegion]);
    assert!(kernel.is_clean());

    let entries = drain_log();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].level(), LogLevel::Error);
    assert!(entries[0].message().starts_with("Can't get major number"));
}

#[test]
fn test_class_failure_releases_identifier() {
    let _g = setup();
    let kernel = MockKernel::new();
    kernel.fail_next(KernelCall::ClassCreate, KernelError::OutOfMemory);

    let err = load(&kernel).err().unwrap();

    assert_eq!(err, LoadError::ClassCreation(KernelError::OutOfMemory));
    assert_eq!(
        kernel.calls(),
        [
            KernelCall::AllocChrdevRegion,
            KernelCall::ClassCreate,
            KernelCall::UnregisterChrdevRegion,
        ]
    );
    assert!(kernel.is_clean());

    let entries = drain_log();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].level(), LogLevel::Error);
}

#[test]
fn test_node_failure_releases_class_and_identifier() {
    let _g = setup();
    let kernel = MockKernel::new();
    kernel.fail_next(KernelCall::DeviceCreate, KernelError::OutOfMemory);

    let err = load(&kernel).err().unwrap();

    assert_eq!(err, LoadError::NodeCreation(KernelError::OutOfMemory));
    assert_eq!(err.to_errno(), -12);
    assert_eq!(
        kernel.calls(),
        [
            KernelCall::AllocChrdevRegion,
            KernelCall::ClassCreate,
            KernelCall::CdevAdd,
            KernelCall::DeviceCreate,
            KernelCall::ClassDestroy,
            KernelCall::UnregisterChrdevRegion,
        ]
    );
    assert!(kernel.regions().is_empty());
    assert!(kernel.classes().is_empty());
    assert!(kernel.nodes().is_empty());
}

/// The dispatch-table binding is not undone when node creation fails.
/// This pins the current behavior; the binding outlives the failed load.
#[test]
fn test_node_failure_leaves_binding_in_place() {
    let _g = setup();
    let kernel = MockKernel::new();
    kernel.fail_next(KernelCall::DeviceCreate, KernelError::OutOfMemory);

    assert!(load(&kernel).is_err());

    assert_eq!(kernel.bound(), [DevT::new(254, 0)]);
    assert!(!kernel.calls().contains(&KernelCall::CdevDel));
    assert!(!kernel.is_clean());
}

#[test]
fn test_node_name_collision_reports_host_code() {
    let _g = setup();
    let kernel = MockKernel::new();
    let first = load(&kernel).unwrap();

    let config = DriverConfig {
        region_name: "new_char_2",
        class_name: "new_char_class_2",
        ..DriverConfig::DEFAULT
    };
    let err = NewChar::load_with(kernel.clone(), config).err().unwrap();

    assert_eq!(err, LoadError::NodeCreation(KernelError::AlreadyExists));
    assert_eq!(kernel.regions().len(), 1);
    assert_eq!(kernel.classes(), ["new_char_class"]);

    first.unload();
}

#[test]
fn test_class_name_collision() {
    let _g = setup();
    let kernel = MockKernel::new();
    let first = load(&kernel).unwrap();

    let config = DriverConfig {
        device_name: "new-char-2",
        ..DriverConfig::DEFAULT
    };
    let err = NewChar::load_with(kernel.clone(), config).err().unwrap();

    assert_eq!(err, LoadError::ClassCreation(KernelError::AlreadyExists));
    assert_eq!(kernel.regions().len(), 1);
    assert_eq!(kernel.nodes(), ["new-char"]);

    first.unload();
    assert!(kernel.is_clean());
}

#[test]
fn test_bind_failure_is_logged_but_load_succeeds() {
    let _g = setup();
    let kernel = MockKernel::new();
    kernel.fail_next(KernelCall::CdevAdd, KernelError::Busy);

    let driver = load(&kernel).unwrap();

    assert!(kernel.bound().is_empty());
    assert_eq!(kernel.nodes(), ["new-char"]);
    assert_eq!(
        kernel.open("/dev/new-char", OpenFlags::O_RDWR).err(),
        Some(KernelError::NoDeviceOrAddress)
    );

    let entries = drain_log();
    assert!(
        entries
            .iter()
            .any(|e| e.level() == LogLevel::Error && e.message().starts_with("cdev_add"))
    );

    driver.unload();
    assert!(kernel.is_clean());
}

#[test]
fn test_unload_reverses_load() {
    let _g = setup();
    let kernel = MockKernel::new();
    let driver = load(&kernel).unwrap();
    kernel.clear_calls();
    drain_log();

    driver.unload();

    assert_eq!(
        kernel.calls(),
        [
            KernelCall::DeviceDestroy,
            KernelCall::CdevDel,
            KernelCall::ClassDestroy,
            KernelCall::UnregisterChrdevRegion,
        ]
    );
    assert!(kernel.is_clean());
    assert_eq!(drain_messages(), ["Goodbye. Module has been unloaded."]);
}

#[test]
fn test_reload_after_unload() {
    let _g = setup();
    let kernel = MockKernel::new();

    load(&kernel).unwrap().unload();
    let driver = load(&kernel).unwrap();

    assert_eq!(driver.major(), 254);
    assert_eq!(kernel.nodes(), ["new-char"]);

    driver.unload();
    assert!(kernel.is_clean());
}

#[test]
fn test_unload_host_errors_are_warnings() {
    let _g = setup();
    let kernel = MockKernel::new();
    let driver = load(&kernel).unwrap();
    drain_log();

    kernel.fail_next(KernelCall::DeviceDestroy, KernelError::NoDevice);
    driver.unload();

    // Remaining steps still ran.
    assert!(kernel.regions().is_empty());
    assert!(kernel.classes().is_empty());
    assert!(kernel.bound().is_empty());
    assert_eq!(kernel.nodes(), ["new-char"]);

    let entries = drain_log();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].level(), LogLevel::Warning);
    assert!(entries[0].message().starts_with("device_destroy failed during teardown"));
    assert_eq!(entries[1].message(), "Goodbye. Module has been unloaded.");
}

#[test]
fn test_teardown_warning_reaches_console() {
    let _g = setup();
    install_capture();
    let kernel = MockKernel::new();
    let driver = load(&kernel).unwrap();
    CAPTURE.take();

    kernel.fail_next(KernelCall::DeviceDestroy, KernelError::NoDevice);
    driver.unload();

    // Console threshold defaults to Warning: the farewell stays in the ring only.
    let console = CAPTURE.take();
    assert!(console.contains("device_destroy failed during teardown"));
    assert!(!console.contains("Goodbye"));
    assert!(
        drain_messages()
            .iter()
            .any(|m| m == "Goodbye. Module has been unloaded.")
    );
}

#[test]
fn test_insmod_returns_negative_errno() {
    let _g = setup();
    let kernel = MockKernel::new();
    kernel.fail_next(KernelCall::ClassCreate, KernelError::OutOfMemory);

    assert_eq!(kernel.insmod::<NewChar>().err(), Some(-12));
    assert!(kernel.is_clean());
}

#[test]
fn test_rmmod_refused_while_file_open() {
    let _g = setup();
    let kernel = MockKernel::new();
    let driver = kernel.insmod::<NewChar>().unwrap_or_else(|e| panic!("insmod: {e}"));

    let file = kernel.open("/dev/new-char", OpenFlags::O_RDONLY).unwrap();
    assert_eq!(THIS_MODULE.refcount(), 1);

    let driver = match kernel.rmmod(driver) {
        Ok(()) => panic!("rmmod succeeded with an open file"),
        Err(driver) => driver,
    };
    assert_eq!(kernel.nodes(), ["new-char"]);

    drop(file);
    assert_eq!(THIS_MODULE.refcount(), 0);
    assert!(kernel.rmmod(driver).is_ok());
    assert!(kernel.is_clean());
}
