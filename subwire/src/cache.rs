// Copyright 2024-2026 Subwire Developers.
// This file is part of subwire.
//
// subwire is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// subwire is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with subwire.  If not, see <http://www.gnu.org/licenses/>.

//! A single-flight cache for node responses.
//!
//! Metadata and account lookups hit the node over RPC; when several signing
//! requests land at once they all need the same answer. The cache keeps one
//! in-flight fetch per key and parks the other callers on it, so N
//! concurrent requests cost one round trip. Completed values expire after a
//! time-to-live. For any key, a stored entry and a pending fetch never
//! coexist: while a fetch is pending, it is the authority.

use parking_lot::{Condvar, Mutex};
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// What a fetch reported when it failed. Cloned to every parked caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("node fetch failed: {0}")]
pub struct FetchError(pub String);

/// Values the cache can hold.
///
/// A "vacant" value (an absent account, an empty response) is handed to the
/// caller but not stored, so the next request asks the node again.
pub trait CacheValue: Clone {
	fn is_vacant(&self) -> bool {
		false
	}
}

impl CacheValue for Vec<u8> {}
impl CacheValue for String {}

impl<T: Clone> CacheValue for Option<T> {
	fn is_vacant(&self) -> bool {
		self.is_none()
	}
}

struct Entry<V> {
	value: V,
	last_invalidated: Instant,
}

struct Flight<V> {
	result: Mutex<Option<Result<V, FetchError>>>,
	done: Condvar,
}

struct Inner<K, V> {
	entries: HashMap<K, Entry<V>>,
	pending: HashMap<K, Arc<Flight<V>>>,
}

pub struct NodeCache<K, V> {
	inner: Mutex<Inner<K, V>>,
	ttl: Duration,
}

impl<K, V> NodeCache<K, V>
where
	K: Eq + Hash + Clone,
	V: CacheValue,
{
	pub fn new(ttl: Duration) -> Self {
		NodeCache {
			inner: Mutex::new(Inner { entries: HashMap::new(), pending: HashMap::new() }),
			ttl,
		}
	}

	/// A stored value if present and not expired. Never blocks and never
	/// triggers a fetch.
	pub fn get(&self, key: &K) -> Option<V> {
		let inner = self.inner.lock();
		inner
			.entries
			.get(key)
			.filter(|entry| entry.last_invalidated.elapsed() < self.ttl)
			.map(|entry| entry.value.clone())
	}

	pub fn insert(&self, key: K, value: V) {
		let mut inner = self.inner.lock();
		inner.entries.insert(key, Entry { value, last_invalidated: Instant::now() });
	}

	pub fn invalidate(&self, key: &K) {
		self.inner.lock().entries.remove(key);
	}

	/// The stored value, or the result of `fetch`. At most one fetch runs
	/// per key at any time; callers arriving while one is in flight park on
	/// it and receive its result, errors included.
	pub fn get_or_fetch(
		&self,
		key: K,
		fetch: impl FnOnce() -> Result<V, FetchError>,
	) -> Result<V, FetchError> {
		let flight = {
			let mut inner = self.inner.lock();
			// a pending fetch outranks whatever is stored
			if let Some(flight) = inner.pending.get(&key) {
				let flight = Arc::clone(flight);
				drop(inner);
				return self.wait(&flight);
			}
			if let Some(entry) = inner.entries.get(&key) {
				if entry.last_invalidated.elapsed() < self.ttl {
					return Ok(entry.value.clone());
				}
				inner.entries.remove(&key);
			}
			let flight = Arc::new(Flight { result: Mutex::new(None), done: Condvar::new() });
			inner.pending.insert(key.clone(), Arc::clone(&flight));
			flight
		};

		let result = fetch();

		{
			let mut slot = flight.result.lock();
			*slot = Some(result.clone());
			flight.done.notify_all();
		}
		let mut inner = self.inner.lock();
		inner.pending.remove(&key);
		if let Ok(value) = &result {
			if !value.is_vacant() {
				inner.entries.insert(key, Entry { value: value.clone(), last_invalidated: Instant::now() });
			}
		}
		result
	}

	fn wait(&self, flight: &Flight<V>) -> Result<V, FetchError> {
		let mut slot = flight.result.lock();
		while slot.is_none() {
			flight.done.wait(&mut slot);
		}
		slot.clone().expect("the wait loop only exits once the result is set; qed")
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::atomic::{AtomicUsize, Ordering};
	use std::sync::Barrier;

	fn cache(ttl_ms: u64) -> NodeCache<&'static str, String> {
		NodeCache::new(Duration::from_millis(ttl_ms))
	}

	#[test]
	fn stores_and_expires() {
		let cache = cache(40);
		cache.insert("meta", "blob".to_owned());
		assert_eq!(cache.get(&"meta"), Some("blob".to_owned()));
		std::thread::sleep(Duration::from_millis(60));
		assert_eq!(cache.get(&"meta"), None);
	}

	#[test]
	fn invalidate_removes_immediately() {
		let cache = cache(10_000);
		cache.insert("meta", "blob".to_owned());
		cache.invalidate(&"meta");
		assert_eq!(cache.get(&"meta"), None);
	}

	#[test]
	fn fetches_once_then_serves_from_memory() {
		let cache = cache(10_000);
		let fetches = AtomicUsize::new(0);
		for _ in 0..5 {
			let value = cache
				.get_or_fetch("meta", || {
					fetches.fetch_add(1, Ordering::SeqCst);
					Ok("blob".to_owned())
				})
				.unwrap();
			assert_eq!(value, "blob");
		}
		assert_eq!(fetches.load(Ordering::SeqCst), 1);
	}

	#[test]
	fn concurrent_callers_coalesce_onto_one_fetch() {
		let cache = cache(10_000);
		let fetches = AtomicUsize::new(0);
		let gate = Barrier::new(8);

		std::thread::scope(|s| {
			for _ in 0..8 {
				s.spawn(|| {
					gate.wait();
					let value = cache
						.get_or_fetch("account", || {
							fetches.fetch_add(1, Ordering::SeqCst);
							// hold the flight open long enough for the rest to park
							std::thread::sleep(Duration::from_millis(30));
							Ok("0x2a".to_owned())
						})
						.unwrap();
					assert_eq!(value, "0x2a");
				});
			}
		});

		assert_eq!(fetches.load(Ordering::SeqCst), 1);
	}

	#[test]
	fn errors_reach_every_parked_caller_and_are_not_stored() {
		let cache = cache(10_000);
		let fetches = AtomicUsize::new(0);
		let gate = Barrier::new(4);

		std::thread::scope(|s| {
			for _ in 0..4 {
				s.spawn(|| {
					gate.wait();
					let result = cache.get_or_fetch("meta", || {
						fetches.fetch_add(1, Ordering::SeqCst);
						std::thread::sleep(Duration::from_millis(30));
						Err(FetchError("node unreachable".into()))
					});
					assert_eq!(result, Err(FetchError("node unreachable".into())));
				});
			}
		});

		assert_eq!(fetches.load(Ordering::SeqCst), 1);
		// the failure left nothing behind; the next call fetches again
		cache.get_or_fetch("meta", || Ok("blob".to_owned())).unwrap();
		assert_eq!(fetches.load(Ordering::SeqCst), 1);
		assert_eq!(cache.get(&"meta"), Some("blob".to_owned()));
	}

	#[test]
	fn expiry_triggers_exactly_one_new_fetch() {
		let cache = cache(30);
		let fetches = AtomicUsize::new(0);
		let mut fetch = || {
			fetches.fetch_add(1, Ordering::SeqCst);
			Ok("blob".to_owned())
		};
		cache.get_or_fetch("meta", &mut fetch).unwrap();
		std::thread::sleep(Duration::from_millis(50));
		cache.get_or_fetch("meta", &mut fetch).unwrap();
		assert_eq!(fetches.load(Ordering::SeqCst), 2);
	}

	#[test]
	fn vacant_values_pass_through_without_being_stored() {
		let cache: NodeCache<&str, Option<String>> = NodeCache::new(Duration::from_secs(10));
		let fetches = AtomicUsize::new(0);
		let mut fetch = || {
			fetches.fetch_add(1, Ordering::SeqCst);
			Ok(None)
		};
		assert_eq!(cache.get_or_fetch("account", &mut fetch).unwrap(), None);
		assert_eq!(cache.get_or_fetch("account", &mut fetch).unwrap(), None);
		assert_eq!(fetches.load(Ordering::SeqCst), 2);
	}
}
