//! 已打开的字符设备文件
//!
//! 宿主通过设备号找到绑定的 [`Cdev`] 后构造 [`CharDeviceFile`]，
//! 之后的读写都分派到 cdev 的回调表。

use alloc::sync::Arc;

use sync::SpinLock;
use uapi::fcntl::OpenFlags;

use crate::cdev::Cdev;
use crate::dev::DevT;
use crate::error::KernelError;
use crate::file::OpenFile;

/// 字符设备文件
///
/// 生命周期内持有所属模块的引用；drop 时调用一次 `release` 并归还引用。
pub struct CharDeviceFile {
    file: OpenFile,

    /// 绑定的字符设备（回调表 + 所属模块）
    cdev: Arc<Cdev>,

    /// 文件位置，读写期间加锁，同一文件上的读写因此串行
    pos: SpinLock<u64>,
}

impl CharDeviceFile {
    /// 打开设备，调用驱动的 `open` 回调
    pub fn open(cdev: Arc<Cdev>, devt: DevT, flags: OpenFlags) -> Result<Self, KernelError> {
        let file = OpenFile::new(devt, flags);

        if let Some(owner) = cdev.owner() {
            owner.get();
        }

        if let Err(e) = cdev.ops().open(&file) {
            if let Some(owner) = cdev.owner() {
                owner.put();
            }
            log::debug!("chrdev: open {} failed: {}", devt, e);
            return Err(e);
        }

        Ok(Self {
            file,
            cdev,
            pos: SpinLock::new(0),
        })
    }

    /// 设备号
    pub fn devt(&self) -> DevT {
        self.file.devt()
    }

    /// 打开标志
    pub fn flags(&self) -> OpenFlags {
        self.file.flags()
    }

    /// 当前文件位置
    pub fn position(&self) -> u64 {
        *self.pos.lock()
    }

    /// 读取
    ///
    /// 以只写方式打开时返回 `EBADF`，不进入驱动。
    pub fn read(&self, buf: &mut [u8]) -> Result<usize, KernelError> {
        if !self.file.flags().readable() {
            return Err(KernelError::BadFileDescriptor);
        }
        let mut pos = self.pos.lock();
        self.cdev.ops().read(&self.file, buf, &mut pos)
    }

    /// 写入
    ///
    /// 以只读方式打开时返回 `EBADF`，不进入驱动。
    pub fn write(&self, buf: &[u8]) -> Result<usize, KernelError> {
        if !self.file.flags().writable() {
            return Err(KernelError::BadFileDescriptor);
        }
        let mut pos = self.pos.lock();
        self.cdev.ops().write(&self.file, buf, &mut pos)
    }
}

impl Drop for CharDeviceFile {
    fn drop(&mut self) {
        self.cdev.ops().release(&self.file);
        if let Some(owner) = self.cdev.owner() {
            owner.put();
        }
    }
}
