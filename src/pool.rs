//! Shared pool of reusable byte buffers.
//!
//! Readers that must materialize owned bytes (binary payloads, extension
//! data, tokens that straddle chunk boundaries) rent from a [`BufferPool`].
//! A rented [`PooledBuf`] goes back to its pool when dropped.

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::{Arc, OnceLock};

use crossbeam_queue::ArrayQueue;

/// Number of idle buffers a pool keeps by default.
pub const DEFAULT_CAPACITY: usize = 64;

/// Largest buffer capacity (in bytes) a pool keeps by default.
pub const DEFAULT_MAX_RETAINED: usize = 1024 * 1024;

struct PoolInner {
    free: ArrayQueue<Vec<u8>>,
    max_retained: usize,
}

/// A thread-safe pool of byte buffers. Cloning shares the same pool.
#[derive(Clone)]
pub struct BufferPool {
    inner: Arc<PoolInner>,
}

/// Builder for [`BufferPool`].
#[derive(Debug, Clone)]
pub struct BufferPoolBuilder {
    capacity: usize,
    max_retained: usize,
}

impl Default for BufferPoolBuilder {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            max_retained: DEFAULT_MAX_RETAINED,
        }
    }
}

impl BufferPoolBuilder {
    /// Maximum number of idle buffers kept for reuse. Zero disables pooling.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Buffers whose capacity exceeds this many bytes are freed instead of
    /// being returned to the pool.
    pub fn max_retained(mut self, bytes: usize) -> Self {
        self.max_retained = bytes;
        self
    }

    pub fn build(self) -> BufferPool {
        // ArrayQueue panics on a zero capacity.
        let slots = self.capacity.max(1);
        let max_retained = if self.capacity == 0 { 0 } else { self.max_retained };
        BufferPool {
            inner: Arc::new(PoolInner {
                free: ArrayQueue::new(slots),
                max_retained,
            }),
        }
    }
}

impl BufferPool {
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> BufferPoolBuilder {
        BufferPoolBuilder::default()
    }

    /// The process-wide pool used when callers do not supply their own.
    pub fn shared() -> &'static BufferPool {
        static SHARED: OnceLock<BufferPool> = OnceLock::new();
        SHARED.get_or_init(BufferPool::new)
    }

    /// Rents a zero-filled buffer of exactly `len` bytes.
    pub fn rent(&self, len: usize) -> PooledBuf {
        let mut buf = match self.inner.free.pop() {
            Some(buf) => buf,
            None => {
                tracing::trace!(len, "buffer pool miss");
                Vec::with_capacity(len)
            }
        };
        buf.clear();
        buf.resize(len, 0);
        PooledBuf {
            buf,
            pool: Some(Arc::clone(&self.inner)),
        }
    }

    /// Number of idle buffers currently held.
    pub fn available(&self) -> usize {
        self.inner.free.len()
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BufferPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferPool")
            .field("available", &self.available())
            .field("max_retained", &self.inner.max_retained)
            .finish()
    }
}

/// A buffer rented from a [`BufferPool`].
pub struct PooledBuf {
    buf: Vec<u8>,
    pool: Option<Arc<PoolInner>>,
}

impl PooledBuf {
    /// Returns the buffer to its pool now instead of at drop.
    pub fn release(self) {
        drop(self);
    }

    /// Detaches the bytes from the pool.
    pub fn into_vec(mut self) -> Vec<u8> {
        self.pool = None;
        std::mem::take(&mut self.buf)
    }
}

impl Drop for PooledBuf {
    fn drop(&mut self) {
        let Some(pool) = self.pool.take() else {
            return;
        };
        if pool.max_retained == 0 || self.buf.capacity() > pool.max_retained {
            return;
        }
        // A full pool simply drops the buffer.
        let _ = pool.free.push(std::mem::take(&mut self.buf));
    }
}

impl Deref for PooledBuf {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.buf
    }
}

impl DerefMut for PooledBuf {
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut self.buf
    }
}

impl AsRef<[u8]> for PooledBuf {
    fn as_ref(&self) -> &[u8] {
        &self.buf
    }
}

impl fmt::Debug for PooledBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PooledBuf").field(&self.buf).finish()
    }
}

impl PartialEq for PooledBuf {
    fn eq(&self, other: &Self) -> bool {
        self.buf == other.buf
    }
}

impl PartialEq<[u8]> for PooledBuf {
    fn eq(&self, other: &[u8]) -> bool {
        self.buf == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rent_is_zero_filled_and_recycled() {
        let pool = BufferPool::new();
        let mut buf = pool.rent(4);
        buf.copy_from_slice(&[1, 2, 3, 4]);
        buf.release();
        assert_eq!(pool.available(), 1);

        let buf = pool.rent(2);
        assert_eq!(&buf[..], &[0, 0]);
        assert_eq!(pool.available(), 0);
    }

    #[test]
    fn into_vec_detaches() {
        let pool = BufferPool::new();
        let mut buf = pool.rent(3);
        buf[0] = 9;
        let vec = buf.into_vec();
        assert_eq!(vec, vec![9, 0, 0]);
        assert_eq!(pool.available(), 0);
    }

    #[test]
    fn oversized_buffers_are_not_retained() {
        let pool = BufferPool::builder().max_retained(8).build();
        drop(pool.rent(64));
        assert_eq!(pool.available(), 0);
        drop(pool.rent(8));
        assert_eq!(pool.available(), 1);
    }

    #[test]
    fn capacity_bounds_idle_buffers() {
        let pool = BufferPool::builder().capacity(2).build();
        let rented: Vec<_> = (0..4).map(|_| pool.rent(1)).collect();
        drop(rented);
        assert_eq!(pool.available(), 2);

        let disabled = BufferPool::builder().capacity(0).build();
        drop(disabled.rent(1));
        assert_eq!(disabled.available(), 0);
    }

    #[test]
    fn pool_is_shared_across_threads() {
        let pool = BufferPool::new();
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let pool = pool.clone();
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        let mut buf = pool.rent(16);
                        buf[0] = i;
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert!(pool.available() >= 1);
        assert!(pool.available() <= DEFAULT_CAPACITY);
    }

    #[test]
    fn shared_pool_is_a_singleton() {
        let a = BufferPool::shared() as *const BufferPool;
        let b = BufferPool::shared() as *const BufferPool;
        assert_eq!(a, b);
    }
}
