//! # Pooled SHA3-256
//!
//! A bounded, thread-safe pool of reusable SHA3-256 hashers. Callers take a
//! hasher with [`Sha3Pool::acquire`] and get back a [`PooledSha3`] guard; the
//! guard resets the hasher and returns it to the pool when dropped, on every
//! path including early returns and unwinding.
//!
//! ## Bounds
//!
//! Acquisition never blocks: an empty pool hands out a fresh hasher. At most
//! `max_idle` hashers are retained on release; the rest are dropped.

use std::mem;
use std::sync::OnceLock;

use ledger_core::{ByteSink, Hash};
use parking_lot::Mutex;
use sha3::{Digest, Sha3_256};

/// Idle hashers retained by the global pool.
pub const DEFAULT_MAX_IDLE: usize = 64;

/// Bounded pool of SHA3-256 hashers.
pub struct Sha3Pool {
    idle: Mutex<Vec<Sha3_256>>,
    max_idle: usize,
}

impl Sha3Pool {
    /// Create an empty pool retaining at most `max_idle` released hashers.
    pub fn new(max_idle: usize) -> Self {
        Self {
            idle: Mutex::new(Vec::with_capacity(max_idle)),
            max_idle,
        }
    }

    /// The process-wide pool.
    pub fn global() -> &'static Sha3Pool {
        static POOL: OnceLock<Sha3Pool> = OnceLock::new();
        POOL.get_or_init(|| Sha3Pool::new(DEFAULT_MAX_IDLE))
    }

    /// Take a clean hasher from the pool.
    pub fn acquire(&self) -> PooledSha3<'_> {
        let hasher = self.idle.lock().pop().unwrap_or_default();
        PooledSha3 { pool: self, hasher }
    }

    /// Number of hashers currently idle in the pool.
    pub fn idle_len(&self) -> usize {
        self.idle.lock().len()
    }

    fn release(&self, mut hasher: Sha3_256) {
        Digest::reset(&mut hasher);
        let mut idle = self.idle.lock();
        if idle.len() < self.max_idle {
            idle.push(hasher);
        }
    }
}

impl std::fmt::Debug for Sha3Pool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sha3Pool")
            .field("idle", &self.idle_len())
            .field("max_idle", &self.max_idle)
            .finish()
    }
}

/// A hasher on loan from a [`Sha3Pool`].
pub struct PooledSha3<'a> {
    pool: &'a Sha3Pool,
    hasher: Sha3_256,
}

impl PooledSha3<'_> {
    /// Absorb `data`.
    pub fn update(&mut self, data: &[u8]) {
        Digest::update(&mut self.hasher, data);
    }

    /// Read the 32-byte digest and reset the hasher for further use.
    pub fn finalize(&mut self) -> Hash {
        Hash(self.hasher.finalize_reset().into())
    }
}

impl ByteSink for PooledSha3<'_> {
    fn put(&mut self, bytes: &[u8]) {
        self.update(bytes);
    }
}

impl Drop for PooledSha3<'_> {
    fn drop(&mut self) {
        self.pool.release(mem::take(&mut self.hasher));
    }
}

/// SHA3-256 of `data`, using the global pool.
pub fn sha3_256(data: &[u8]) -> Hash {
    let mut h = Sha3Pool::global().acquire();
    h.update(data);
    h.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ABC: &str = "3a985da74fe225b2045c172d6bd390bd855f086e3e9d525b46bfe24511431532";
    const EMPTY: &str = "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a";

    #[test]
    fn test_known_digests() {
        assert_eq!(sha3_256(b"abc").to_hex(), ABC);
        assert_eq!(sha3_256(b"").to_hex(), EMPTY);
    }

    #[test]
    fn test_release_returns_hasher() {
        let pool = Sha3Pool::new(4);
        assert_eq!(pool.idle_len(), 0);
        {
            let _a = pool.acquire();
            let _b = pool.acquire();
        }
        assert_eq!(pool.idle_len(), 2);
        let _c = pool.acquire();
        assert_eq!(pool.idle_len(), 1);
    }

    #[test]
    fn test_released_hasher_is_clean() {
        let pool = Sha3Pool::new(1);
        {
            let mut h = pool.acquire();
            h.update(b"abandoned without finalize");
        }
        let mut h = pool.acquire();
        h.update(b"abc");
        assert_eq!(h.finalize().to_hex(), ABC);
    }

    #[test]
    fn test_finalize_resets() {
        let pool = Sha3Pool::new(1);
        let mut h = pool.acquire();
        h.update(b"abc");
        assert_eq!(h.finalize().to_hex(), ABC);
        assert_eq!(h.finalize().to_hex(), EMPTY);
    }

    #[test]
    fn test_idle_is_bounded() {
        let pool = Sha3Pool::new(2);
        {
            let _guards: Vec<_> = (0..5).map(|_| pool.acquire()).collect();
        }
        assert_eq!(pool.idle_len(), 2);
    }

    #[test]
    fn test_byte_sink_matches_update() {
        let pool = Sha3Pool::new(1);
        let mut h = pool.acquire();
        ByteSink::put(&mut h, b"a");
        ByteSink::put(&mut h, b"bc");
        assert_eq!(h.finalize().to_hex(), ABC);
    }

    #[test]
    fn test_concurrent_acquisition() {
        let pool = Sha3Pool::new(8);
        std::thread::scope(|s| {
            for t in 0..8u8 {
                let pool = &pool;
                s.spawn(move || {
                    for i in 0..200u32 {
                        let msg = [t, (i & 0xff) as u8];
                        let mut h = pool.acquire();
                        h.update(&msg);
                        let got = h.finalize();
                        assert_eq!(got.0, <[u8; 32]>::from(Sha3_256::digest(msg)));
                    }
                });
            }
        });
        assert!(pool.idle_len() <= 8);
    }
}
