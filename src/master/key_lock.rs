use parking_lot::Mutex;
use std::collections::HashSet;

/// KeyLockTable is the set of keys with a Put or Del in flight.
///
/// Acquisition never waits: a second mutation on a locked key is turned away immediately and
/// the client decides whether to retry.
pub(crate) struct KeyLockTable {
    locked: Mutex<HashSet<String>>,
}

impl KeyLockTable {
    pub(crate) fn new() -> Self {
        KeyLockTable {
            locked: Mutex::new(HashSet::new()),
        }
    }

    /// Returns `None` if `key` is already locked. The lock is held until the guard drops.
    pub(crate) fn try_acquire(&self, key: &str) -> Option<KeyLockGuard<'_>> {
        let newly_locked = self.locked.lock().insert(key.to_string());
        if !newly_locked {
            return None;
        }

        Some(KeyLockGuard {
            table: self,
            key: key.to_string(),
        })
    }

    #[cfg(test)]
    pub(crate) fn is_locked(&self, key: &str) -> bool {
        self.locked.lock().contains(key)
    }

    fn release(&self, key: &str) {
        self.locked.lock().remove(key);
    }
}

/// Releases its key when dropped. That covers normal completion, error returns, and the
/// request future being dropped mid-flight.
pub(crate) struct KeyLockGuard<'a> {
    table: &'a KeyLockTable,
    key: String,
}

impl Drop for KeyLockGuard<'_> {
    fn drop(&mut self) {
        self.table.release(&self.key);
    }
}
