//! 文件操作回调表
//!
//! 宿主在每次 open/close/read/write 时分派到驱动实现的 [`FileOperations`]。

use uapi::fcntl::OpenFlags;

use crate::dev::DevT;
use crate::error::KernelError;

/// 一次打开请求的上下文
///
/// 对驱动而言是不透明的：只暴露设备号和打开标志。
#[derive(Debug, Clone, Copy)]
pub struct OpenFile {
    devt: DevT,
    flags: OpenFlags,
}

impl OpenFile {
    /// 创建打开上下文
    pub fn new(devt: DevT, flags: OpenFlags) -> Self {
        Self { devt, flags }
    }

    /// 被打开的设备号
    pub fn devt(&self) -> DevT {
        self.devt
    }

    /// 打开标志
    pub fn flags(&self) -> OpenFlags {
        self.flags
    }
}

/// 字符设备回调接口
///
/// 回调可能被多个调用者并发进入，实现需自行保证 `Send + Sync`。
/// 未覆盖的 `read`/`write` 返回 `EINVAL`，与宿主对缺失回调的处理一致。
pub trait FileOperations: Send + Sync {
    /// 打开设备
    fn open(&self, _file: &OpenFile) -> Result<(), KernelError> {
        Ok(())
    }

    /// 关闭设备（最后一个引用释放时调用）
    fn release(&self, _file: &OpenFile) {}

    /// 读取到 `buf`，返回读取的字节数，0 表示数据结束
    ///
    /// `pos` 是文件位置，由实现按需推进。
    fn read(&self, _file: &OpenFile, _buf: &mut [u8], _pos: &mut u64) -> Result<usize, KernelError> {
        Err(KernelError::InvalidArgument)
    }

    /// 从 `buf` 写入，返回被接受的字节数
    fn write(&self, _file: &OpenFile, _buf: &[u8], _pos: &mut u64) -> Result<usize, KernelError> {
        Err(KernelError::InvalidArgument)
    }
}
