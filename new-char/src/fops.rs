//! new-char 的文件操作回调
//!
//! 没有任何数据：读总是立即返回数据结束，写总是全部接受并丢弃。
//! 回调不触碰共享状态，可被任意多个调用者并发进入。

use chrdev::{FileOperations, KernelError, OpenFile};
use klog::pr_info;

/// 丢弃型回调表
#[derive(Debug, Default, Clone, Copy)]
pub struct NewCharFops;

impl FileOperations for NewCharFops {
    fn open(&self, _file: &OpenFile) -> Result<(), KernelError> {
        pr_info!("Driver opened.");
        Ok(())
    }

    fn release(&self, _file: &OpenFile) {
        pr_info!("Driver closed.");
    }

    fn read(&self, _file: &OpenFile, _buf: &mut [u8], _pos: &mut u64) -> Result<usize, KernelError> {
        pr_info!("No more data to read.");
        Ok(0)
    }

    fn write(&self, _file: &OpenFile, buf: &[u8], _pos: &mut u64) -> Result<usize, KernelError> {
        pr_info!("No more data to accept.");
        Ok(buf.len())
    }
}
