use futures::future::join_all;
use log::warn;
use serde_json::Value;
use std::future::Future;

use crate::error::Result;

/// What to do when a task fails
#[derive(Debug, Clone, PartialEq)]
pub enum FailurePolicy {
    /// Fail the whole join with this task's error
    Abort,
    /// Substitute the given value and carry on
    Placeholder(Value),
}

/// A labelled unit of work for [`join_with_policy`]
pub struct Task<F> {
    pub label: String,
    pub policy: FailurePolicy,
    pub future: F,
}

impl<F> Task<F> {
    pub fn abort(label: impl Into<String>, future: F) -> Self {
        Self {
            label: label.into(),
            policy: FailurePolicy::Abort,
            future,
        }
    }

    pub fn placeholder(label: impl Into<String>, placeholder: Value, future: F) -> Self {
        Self {
            label: label.into(),
            policy: FailurePolicy::Placeholder(placeholder),
            future,
        }
    }
}

/// Outcome of one task after its policy was applied
#[derive(Debug, Clone, PartialEq)]
pub enum Settled<T> {
    Value(T),
    Placeholder(Value),
}

impl<T> Settled<T> {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder(_))
    }
}

impl Settled<Value> {
    pub fn into_value(self) -> Value {
        match self {
            Self::Value(value) | Self::Placeholder(value) => value,
        }
    }
}

/// Run every task concurrently and wait until all of them have settled.
///
/// Results keep the order of `tasks`. Failures are resolved only after the
/// barrier: the first failed `Abort` task in order fails the join, every
/// failed `Placeholder` task is replaced by its placeholder.
pub async fn join_with_policy<T, F>(tasks: Vec<Task<F>>) -> Result<Vec<Settled<T>>>
where
    F: Future<Output = Result<T>>,
{
    let outcomes = join_all(tasks.into_iter().map(|task| async move {
        let result = task.future.await;
        (task.label, task.policy, result)
    }))
    .await;

    let mut settled = Vec::with_capacity(outcomes.len());
    for (label, policy, result) in outcomes {
        match (result, policy) {
            (Ok(value), _) => settled.push(Settled::Value(value)),
            (Err(e), FailurePolicy::Abort) => return Err(e),
            (Err(e), FailurePolicy::Placeholder(placeholder)) => {
                warn!("{} failed, using placeholder: {}", label, e);
                settled.push(Settled::Placeholder(placeholder));
            }
        }
    }
    Ok(settled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CompanyInfoError;
    use serde_json::json;
    use std::pin::Pin;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    type BoxFuture = Pin<Box<dyn Future<Output = Result<u32>> + Send>>;

    fn ok_after(value: u32, millis: u64, counter: Arc<AtomicUsize>) -> BoxFuture {
        Box::pin(async move {
            tokio::time::sleep(Duration::from_millis(millis)).await;
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(value)
        })
    }

    fn fail_after(status: u16, millis: u64, counter: Arc<AtomicUsize>) -> BoxFuture {
        Box::pin(async move {
            tokio::time::sleep(Duration::from_millis(millis)).await;
            counter.fetch_add(1, Ordering::SeqCst);
            Err(CompanyInfoError::api_error(status, "failed"))
        })
    }

    #[tokio::test]
    async fn test_placeholders_replace_failures_in_order() {
        let counter = Arc::new(AtomicUsize::new(0));
        let tasks = vec![
            Task::placeholder("a", json!({"error": "a"}), ok_after(1, 20, counter.clone())),
            Task::placeholder("b", json!({"error": "b"}), fail_after(500, 5, counter.clone())),
            Task::placeholder("c", json!({"error": "c"}), ok_after(3, 1, counter.clone())),
        ];

        let settled = join_with_policy(tasks).await.unwrap();
        assert_eq!(
            settled,
            vec![
                Settled::Value(1),
                Settled::Placeholder(json!({"error": "b"})),
                Settled::Value(3),
            ]
        );
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_abort_waits_for_all_tasks() {
        let counter = Arc::new(AtomicUsize::new(0));
        let tasks = vec![
            Task::abort("base", fail_after(404, 1, counter.clone())),
            Task::placeholder("slow", json!({}), ok_after(2, 30, counter.clone())),
        ];

        let err = join_with_policy(tasks).await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        // no short-circuit: the slow task still ran to completion
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_tasks_run_concurrently() {
        let counter = Arc::new(AtomicUsize::new(0));
        let tasks: Vec<_> = (0..7)
            .map(|i| Task::placeholder(format!("t{}", i), json!({}), ok_after(i, 50, counter.clone())))
            .collect();

        let started = std::time::Instant::now();
        let settled = join_with_policy(tasks).await.unwrap();
        assert_eq!(settled.len(), 7);
        assert!(started.elapsed() < Duration::from_millis(300));
    }

    #[tokio::test]
    async fn test_empty_join() {
        let settled = join_with_policy::<u32, BoxFuture>(Vec::new()).await.unwrap();
        assert!(settled.is_empty());
    }
}
