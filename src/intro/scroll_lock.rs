/// Host-side switch that keeps the page from scrolling while the intro plays.
pub trait ScrollLock {
    fn lock(&mut self);
    fn unlock(&mut self);
}

/// For hosts without a scrollable surface.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoScrollLock;

impl ScrollLock for NoScrollLock {
    fn lock(&mut self) {}
    fn unlock(&mut self) {}
}

/// Holds a [`ScrollLock`] engaged until released or dropped.
///
/// Release is idempotent, so teardown, completion and cancellation can all
/// call it without coordinating.
pub struct ScrollLockGuard {
    lock: Option<Box<dyn ScrollLock>>,
}

impl std::fmt::Debug for ScrollLockGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollLockGuard")
            .field("held", &self.is_held())
            .finish()
    }
}

impl ScrollLockGuard {
    pub fn acquire(mut lock: Box<dyn ScrollLock>) -> Self {
        lock.lock();
        Self { lock: Some(lock) }
    }

    pub fn is_held(&self) -> bool {
        self.lock.is_some()
    }

    /// Returns `true` only for the call that actually unlocked.
    pub fn release(&mut self) -> bool {
        match self.lock.take() {
            Some(mut lock) => {
                lock.unlock();
                tracing::debug!("scroll lock released");
                true
            }
            None => false,
        }
    }
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        self.release();
    }
}
