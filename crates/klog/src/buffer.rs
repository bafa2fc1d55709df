//! 日志环形缓冲区
//!
//! 单把自旋锁保护读写指针。缓冲区满时覆盖最旧条目（与 printk 一致），
//! 被覆盖的未读条目计入 `dropped`。

use sync::SpinLock;

use crate::config::GLOBAL_LOG_BUFFER_SIZE;
use crate::entry::LogEntry;

struct Ring {
    entries: [LogEntry; GLOBAL_LOG_BUFFER_SIZE],
    /// 最旧未读条目的序号
    head: usize,
    /// 下一条写入的序号
    tail: usize,
    dropped: usize,
}

pub(crate) struct GlobalLogBuffer {
    ring: SpinLock<Ring>,
}

impl GlobalLogBuffer {
    pub(crate) const fn new() -> Self {
        Self {
            ring: SpinLock::new(Ring {
                entries: [LogEntry::EMPTY; GLOBAL_LOG_BUFFER_SIZE],
                head: 0,
                tail: 0,
                dropped: 0,
            }),
        }
    }

    /// 写入条目并返回分配的序号
    pub(crate) fn write(&self, mut entry: LogEntry) -> usize {
        let mut ring = self.ring.lock();
        if ring.tail - ring.head == GLOBAL_LOG_BUFFER_SIZE {
            ring.head += 1;
            ring.dropped += 1;
        }
        let seq = ring.tail;
        entry.set_seq(seq);
        ring.entries[seq % GLOBAL_LOG_BUFFER_SIZE] = entry;
        ring.tail += 1;
        seq
    }

    pub(crate) fn read(&self) -> Option<LogEntry> {
        let mut ring = self.ring.lock();
        if ring.head == ring.tail {
            return None;
        }
        let entry = ring.entries[ring.head % GLOBAL_LOG_BUFFER_SIZE];
        ring.head += 1;
        Some(entry)
    }

    /// 按序号读取，不移动读指针
    pub(crate) fn peek(&self, seq: usize) -> Option<LogEntry> {
        let ring = self.ring.lock();
        if seq < ring.head || seq >= ring.tail {
            return None;
        }
        Some(ring.entries[seq % GLOBAL_LOG_BUFFER_SIZE])
    }

    pub(crate) fn reader_index(&self) -> usize {
        self.ring.lock().head
    }

    pub(crate) fn writer_index(&self) -> usize {
        self.ring.lock().tail
    }

    pub(crate) fn len(&self) -> usize {
        let ring = self.ring.lock();
        ring.tail - ring.head
    }

    pub(crate) fn dropped_count(&self) -> usize {
        self.ring.lock().dropped
    }
}
