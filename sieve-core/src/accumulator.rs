//! Sharded concurrent accumulator for integer-keyed sums.
//!
//! Memory Layout:
//! - A fixed boxed slice of shards, each an ordered map behind its own mutex
//! - A key lives in shard `key mod N`, so two writers only contend when their
//!   keys share a shard
//!
//! Threading:
//! - [`ShardedAccumulator::access`] takes `&self` and may be called from any
//!   number of threads.
//! - [`ShardedAccumulator::drain`] takes `&mut self`: the borrow checker rules
//!   out a drain while any [`Access`] guard is alive.

use core::fmt;
use core::ops::{Deref, DerefMut};
use std::collections::BTreeMap;

use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};

/// Integer keys that can pick a shard.
pub trait ShardKey: Copy + Ord + Send {
    /// Returns the shard index for `shard_count` shards.
    fn shard_index(self, shard_count: usize) -> usize;
}

macro_rules! impl_shard_key {
    ($($t:ty),* $(,)?) => {
        $(
            impl ShardKey for $t {
                #[inline(always)]
                fn shard_index(self, shard_count: usize) -> usize {
                    (self as i128).rem_euclid(shard_count as i128) as usize
                }
            }
        )*
    };
}

impl_shard_key!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

/// Exclusive, scope-bound access to one accumulator entry.
///
/// Holds the entry's shard lock until dropped.
pub struct Access<'a, V> {
    guard: MappedMutexGuard<'a, V>,
}

impl<V> Deref for Access<'_, V> {
    type Target = V;

    #[inline(always)]
    fn deref(&self) -> &V {
        &self.guard
    }
}

impl<V> DerefMut for Access<'_, V> {
    #[inline(always)]
    fn deref_mut(&mut self) -> &mut V {
        &mut self.guard
    }
}

/// A map from integer key to value, split into independently locked shards.
pub struct ShardedAccumulator<K, V> {
    shards: Box<[Mutex<BTreeMap<K, V>>]>,
}

impl<K: ShardKey, V: Default> ShardedAccumulator<K, V> {
    /// Creates an accumulator with `shard_count` shards (at least one).
    pub fn new(shard_count: usize) -> Self {
        let shards = (0..shard_count.max(1))
            .map(|_| Mutex::new(BTreeMap::new()))
            .collect();
        Self { shards }
    }

    /// Returns the number of shards.
    #[inline(always)]
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Locks the shard owning `key` and returns the entry, inserting `V::default()`
    /// if absent.
    #[inline]
    pub fn access(&self, key: K) -> Access<'_, V> {
        let shard = &self.shards[key.shard_index(self.shards.len())];
        let guard = MutexGuard::map(shard.lock(), |map| map.entry(key).or_default());
        Access { guard }
    }

    /// Moves every entry into one ordinary map, leaving the accumulator empty.
    pub fn drain(&mut self) -> BTreeMap<K, V> {
        let mut result = BTreeMap::new();
        for shard in self.shards.iter_mut() {
            result.append(shard.get_mut());
        }
        result
    }
}

impl<K, V> fmt::Debug for ShardedAccumulator<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShardedAccumulator")
            .field("shards", &self.shards.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rayon::prelude::*;

    #[test]
    fn zero_shards_clamped_to_one() {
        let acc: ShardedAccumulator<i32, f64> = ShardedAccumulator::new(0);
        assert_eq!(acc.shard_count(), 1);
    }

    #[test]
    fn negative_keys_pick_valid_shards() {
        for key in [-7i32, -1, 0, 1, 7, i32::MIN, i32::MAX] {
            assert!(key.shard_index(3) < 3);
        }
        assert_eq!((-1i32).shard_index(4), 3);
        assert_eq!(u64::MAX.shard_index(2), 1);
    }

    #[test]
    fn access_inserts_default() {
        let mut acc: ShardedAccumulator<i32, f64> = ShardedAccumulator::new(4);
        *acc.access(5) += 1.5;
        *acc.access(5) += 1.0;
        assert_eq!(*acc.access(9), 0.0);

        let map = acc.drain();
        assert_eq!(map.len(), 2);
        assert_eq!(map[&5], 2.5);
        assert_eq!(map[&9], 0.0);
    }

    #[test]
    fn drain_is_ordered_and_empties() {
        let mut acc: ShardedAccumulator<i32, u32> = ShardedAccumulator::new(3);
        for key in [10, 3, 7, -2, 0] {
            *acc.access(key) += 1;
        }
        let keys: Vec<i32> = acc.drain().into_keys().collect();
        assert_eq!(keys, [-2, 0, 3, 7, 10]);
        assert!(acc.drain().is_empty());
    }

    #[test]
    fn concurrent_increments_are_not_lost() {
        let mut acc: ShardedAccumulator<u32, u64> = ShardedAccumulator::new(8);
        (0..10_000u32).into_par_iter().for_each(|i| {
            *acc.access(i % 100) += 1;
        });
        let map = acc.drain();
        assert_eq!(map.len(), 100);
        assert!(map.values().all(|&n| n == 100));
    }

    #[test]
    fn single_shard_still_correct_under_contention() {
        let mut acc: ShardedAccumulator<i64, i64> = ShardedAccumulator::new(1);
        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    for k in 0..250 {
                        *acc.access(k) += 1;
                    }
                });
            }
        });
        let map = acc.drain();
        assert_eq!(map.values().sum::<i64>(), 1000);
    }
}
