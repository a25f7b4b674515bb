//! Module `lock`
//!
//! FIFO mutual exclusion for one session. The serializer owns the session
//! state; acquiring it hands the state to the caller through a guard, and
//! dropping the guard hands it to the next waiter in arrival order.

use std::collections::VecDeque;
use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::oneshot;

struct Queue<T> {
    /// The value while nobody holds the lock; `None` means "held".
    idle: Option<T>,
    waiters: VecDeque<oneshot::Sender<T>>,
}

/// FIFO async mutex guarding `T`.
///
/// At most one guard exists at a time. Waiters are granted the value in the
/// order they called [`CommandSerializer::acquire`]. The lock is not
/// reentrant: code that already holds a guard must pass the guarded value
/// down instead of acquiring again.
pub struct CommandSerializer<T> {
    queue: Mutex<Queue<T>>,
}

impl<T: Default> CommandSerializer<T> {
    pub fn new(value: T) -> Self {
        Self {
            queue: Mutex::new(Queue {
                idle: Some(value),
                waiters: VecDeque::new(),
            }),
        }
    }

    fn queue(&self) -> MutexGuard<'_, Queue<T>> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Suspends until the caller is the sole holder.
    pub async fn acquire(&self) -> SerialGuard<'_, T> {
        loop {
            let receiver = {
                let mut queue = self.queue();
                if let Some(value) = queue.idle.take() {
                    return SerialGuard { lock: self, value };
                }
                let (sender, receiver) = oneshot::channel();
                queue.waiters.push_back(sender);
                receiver
            };

            let mut pending = PendingAcquire {
                lock: self,
                receiver: Some(receiver),
            };
            if let Some(value) = pending.wait().await {
                return SerialGuard { lock: self, value };
            }
        }
    }

    /// Whether a guard is currently out.
    pub fn is_locked(&self) -> bool {
        self.queue().idle.is_none()
    }

    /// Hands `value` to the next live waiter, or marks the lock free.
    fn release(&self, mut value: T) {
        let mut queue = self.queue();
        while let Some(waiter) = queue.waiters.pop_front() {
            match waiter.send(value) {
                Ok(()) => return,
                // That waiter gave up; try the next one.
                Err(returned) => value = returned,
            }
        }
        queue.idle = Some(value);
    }
}

/// A queued acquire. If it is dropped after being granted but before the
/// value was taken, the value is passed on instead of being lost.
struct PendingAcquire<'a, T: Default> {
    lock: &'a CommandSerializer<T>,
    receiver: Option<oneshot::Receiver<T>>,
}

impl<T: Default> PendingAcquire<'_, T> {
    async fn wait(&mut self) -> Option<T> {
        let receiver = self.receiver.as_mut()?;
        let value = receiver.await.ok();
        self.receiver = None;
        value
    }
}

impl<T: Default> Drop for PendingAcquire<'_, T> {
    fn drop(&mut self) {
        if let Some(mut receiver) = self.receiver.take() {
            receiver.close();
            if let Ok(value) = receiver.try_recv() {
                self.lock.release(value);
            }
        }
    }
}

/// Exclusive access to the serialized value; releases on drop.
pub struct SerialGuard<'a, T: Default> {
    lock: &'a CommandSerializer<T>,
    value: T,
}

impl<T: Default> Deref for SerialGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T: Default> DerefMut for SerialGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.value
    }
}

impl<T: Default> Drop for SerialGuard<'_, T> {
    fn drop(&mut self) {
        let value = std::mem::take(&mut self.value);
        self.lock.release(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_uncontended_acquire_and_release() {
        let lock = CommandSerializer::new(0u32);
        {
            let mut guard = lock.acquire().await;
            *guard += 1;
            assert!(lock.is_locked());
        }
        assert!(!lock.is_locked());
        assert_eq!(*lock.acquire().await, 1);
    }

    #[tokio::test]
    async fn test_waiters_granted_in_fifo_order() {
        let lock = Arc::new(CommandSerializer::new(Vec::<usize>::new()));
        let first = lock.acquire().await;

        let mut tasks = Vec::new();
        for idx in 0..8 {
            let lock = Arc::clone(&lock);
            tasks.push(tokio::spawn(async move {
                let mut guard = lock.acquire().await;
                tokio::task::yield_now().await;
                guard.push(idx);
            }));
            // Let the task enqueue before spawning the next one.
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        drop(first);
        for task in tasks {
            task.await.unwrap();
        }
        assert_eq!(*lock.acquire().await, (0..8).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_release_wakes_exactly_one_waiter() {
        let lock = Arc::new(CommandSerializer::new(0u32));
        let held = lock.acquire().await;

        let waiter = {
            let lock = Arc::clone(&lock);
            tokio::spawn(async move {
                let mut guard = lock.acquire().await;
                *guard += 1;
                // Keep holding so a second waiter would stay blocked.
                tokio::time::sleep(Duration::from_millis(50)).await;
            })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        drop(held);
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(lock.is_locked());
        waiter.await.unwrap();
        assert!(!lock.is_locked());
        assert_eq!(*lock.acquire().await, 1);
    }

    #[tokio::test]
    async fn test_abandoned_waiter_is_skipped() {
        let lock = Arc::new(CommandSerializer::new(0u32));
        let held = lock.acquire().await;

        let abandoned = {
            let lock = Arc::clone(&lock);
            tokio::spawn(async move {
                let _guard = lock.acquire().await;
            })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        abandoned.abort();
        let _ = abandoned.await;

        drop(held);
        let guard = tokio::time::timeout(Duration::from_secs(1), lock.acquire())
            .await
            .expect("lock handed past the aborted waiter");
        assert_eq!(*guard, 0);
    }
}
