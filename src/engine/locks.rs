use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// 按班级 ID 划分的异步互斥锁
///
/// 同一班级上的变更串行执行，不同班级互不阻塞。锁条目在班级删除后移除。
#[derive(Debug, Default)]
pub struct ClassLocks {
    locks: DashMap<i64, Arc<Mutex<()>>>,
}

impl ClassLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock(&self, class_id: i64) -> OwnedMutexGuard<()> {
        // 先克隆 Arc 再等待，避免持有 DashMap 分片锁跨 await
        let mutex = self
            .locks
            .entry(class_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        mutex.lock_owned().await
    }

    /// 持有守卫时移除锁条目，再释放守卫；仍有等待者时保留条目
    pub fn forget(&self, class_id: i64, guard: OwnedMutexGuard<()>) {
        // 表内与守卫各持一份引用，多出的即为等待者
        self.locks
            .remove_if(&class_id, |_, mutex| Arc::strong_count(mutex) <= 2);
        drop(guard);
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_class_is_serialised() {
        let locks = Arc::new(ClassLocks::new());
        let guard = locks.lock(1).await;

        let contender = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _g = locks.lock(1).await;
            })
        };

        tokio::task::yield_now().await;
        assert!(!contender.is_finished());
        drop(guard);
        tokio::time::timeout(Duration::from_secs(1), contender)
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn test_different_classes_do_not_block() {
        let locks = ClassLocks::new();
        let a = locks.lock(1).await;
        let _b = tokio::time::timeout(Duration::from_millis(200), locks.lock(2))
            .await
            .unwrap();
        assert_eq!(locks.len(), 2);

        locks.forget(1, a);
        assert_eq!(locks.len(), 1);
    }

    #[tokio::test]
    async fn test_forget_keeps_entry_while_others_wait() {
        let locks = Arc::new(ClassLocks::new());
        let guard = locks.lock(7).await;

        let waiter = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _g = locks.lock(7).await;
            })
        };
        tokio::task::yield_now().await;
        assert!(!waiter.is_finished());

        // 等待者仍在旧互斥锁上排队，条目不能被移除
        locks.forget(7, guard);
        assert_eq!(locks.len(), 1);
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .unwrap()
            .unwrap();

        let guard = locks.lock(7).await;
        locks.forget(7, guard);
        assert!(locks.is_empty());
    }
}
