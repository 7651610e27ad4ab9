//! Nonce generation for Shrimpy API authentication.
//!
//! Shrimpy expects the nonce to be the current Unix time in seconds and
//! rejects stale or reused values, so every physical request needs a fresh one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of wall-clock time, in whole seconds since the Unix epoch.
pub trait Clock: Send + Sync {
    /// Current Unix time in seconds.
    fn unix_seconds(&self) -> u64;
}

/// The system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_seconds(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }
}

/// Trait for providing nonces for authenticated requests.
pub trait NonceProvider: Send + Sync {
    /// Generate the nonce for the next request.
    fn next_nonce(&self) -> u64;
}

/// A nonce provider based on Unix seconds.
///
/// Returns `max(now, last + 1)`, so two requests issued within the same
/// second (or from concurrent tasks) never share a nonce.
///
/// # Clock lead
///
/// Each nonce costs one second, so a burst of `n` requests within one second
/// leaves the nonce up to `n - 1` seconds ahead of the wall clock. While the
/// request rate stays above one per second the lead keeps growing; it shrinks
/// again once the rate drops, and the nonce returns to plain wall-clock time
/// when the clock catches up. Clients sustaining more than one request per
/// second should spread load over several API keys.
pub struct UnixSecondsNonce<C = SystemClock> {
    clock: C,
    last_nonce: AtomicU64,
}

impl UnixSecondsNonce<SystemClock> {
    /// Create a nonce provider backed by the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<C: Clock> UnixSecondsNonce<C> {
    /// Create a nonce provider backed by a custom clock.
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            last_nonce: AtomicU64::new(0),
        }
    }
}

impl Default for UnixSecondsNonce<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> NonceProvider for UnixSecondsNonce<C> {
    fn next_nonce(&self) -> u64 {
        let now = self.clock.unix_seconds();

        loop {
            let last = self.last_nonce.load(Ordering::SeqCst);
            let next = now.max(last + 1);

            if self
                .last_nonce
                .compare_exchange(last, next, Ordering::SeqCst, Ordering::SeqCst)
                .is_ok()
            {
                return next;
            }
        }
    }
}

impl<C> std::fmt::Debug for UnixSecondsNonce<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnixSecondsNonce")
            .field("last_nonce", &self.last_nonce.load(Ordering::Relaxed))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    struct FrozenClock(u64);

    impl Clock for FrozenClock {
        fn unix_seconds(&self) -> u64 {
            self.0
        }
    }

    #[test]
    fn test_first_nonce_is_clock_value() {
        let provider = UnixSecondsNonce::with_clock(FrozenClock(1_700_000_000));
        assert_eq!(provider.next_nonce(), 1_700_000_000);
        assert_eq!(provider.next_nonce(), 1_700_000_001);
    }

    struct SteppedClock(AtomicU64);

    impl Clock for SteppedClock {
        fn unix_seconds(&self) -> u64 {
            self.0.load(Ordering::SeqCst)
        }
    }

    #[test]
    fn test_burst_lead_decays_once_clock_catches_up() {
        let provider = UnixSecondsNonce::with_clock(SteppedClock(AtomicU64::new(100)));

        let burst: Vec<u64> = (0..10).map(|_| provider.next_nonce()).collect();
        assert_eq!(burst, (100..110).collect::<Vec<_>>());

        // Clock still behind the last nonce: keep counting from it.
        provider.clock.0.store(105, Ordering::SeqCst);
        assert_eq!(provider.next_nonce(), 110);

        // Clock past the last nonce: back to wall-clock time.
        provider.clock.0.store(200, Ordering::SeqCst);
        assert_eq!(provider.next_nonce(), 200);
        assert_eq!(provider.next_nonce(), 201);
    }

    #[test]
    fn test_system_nonce_tracks_wall_clock() {
        let before = SystemClock.unix_seconds();
        let nonce = UnixSecondsNonce::new().next_nonce();
        let after = SystemClock.unix_seconds();
        assert!(nonce >= before && nonce <= after);
    }

    #[test]
    fn test_nonce_strictly_increasing() {
        let provider = UnixSecondsNonce::new();

        let mut last = 0u64;
        for _ in 0..1000 {
            let nonce = provider.next_nonce();
            assert!(nonce > last, "Nonce must be strictly increasing");
            last = nonce;
        }
    }

    #[test]
    fn test_nonce_unique_across_threads() {
        let provider = Arc::new(UnixSecondsNonce::with_clock(FrozenClock(42)));
        let mut handles = vec![];

        for _ in 0..4 {
            let p = provider.clone();
            handles.push(thread::spawn(move || {
                (0..500).map(|_| p.next_nonce()).collect::<Vec<_>>()
            }));
        }

        let mut all_nonces = HashSet::new();
        for handle in handles {
            for nonce in handle.join().unwrap() {
                assert!(all_nonces.insert(nonce), "Nonce must be unique across threads");
            }
        }
        assert_eq!(all_nonces.len(), 2000);
    }
}
