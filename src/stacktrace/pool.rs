//! Generic free-list pool for reusable capture buffers

use parking_lot::Mutex;

/// Internally synchronized object pool.
///
/// `get` pops an idle item or builds a fresh one; `put` returns an item
/// for reuse. A checked-out item is private to the holder and needs no
/// synchronization of its own; callers reset items before `put`.
pub struct Pool<T> {
    items: Mutex<Vec<T>>,
    create: Box<dyn Fn() -> T + Send + Sync>,
}

impl<T> Pool<T> {
    pub fn new(create: impl Fn() -> T + Send + Sync + 'static) -> Self {
        Self {
            items: Mutex::new(Vec::new()),
            create: Box::new(create),
        }
    }

    pub fn get(&self) -> T {
        match self.items.lock().pop() {
            Some(item) => item,
            None => (self.create)(),
        }
    }

    pub fn put(&self, item: T) {
        self.items.lock().push(item);
    }

    /// Number of idle items currently parked in the pool.
    pub fn idle(&self) -> usize {
        self.items.lock().len()
    }
}
