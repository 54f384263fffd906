use std::future::Future;

use crate::Backend;

/// Async string key-value store.
///
/// Mirrors the `Backend` trait but with async methods, matching the
/// suspension points of platform storage plugins. Methods are prefixed with
/// `async_` to avoid name collisions when a type implements both `Backend` and
/// `AsyncBackend`.
pub trait AsyncBackend: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn async_get(&self, key: &str) -> impl Future<Output = Result<Option<String>, Self::Error>> + Send;
    fn async_set(&self, key: &str, value: &str) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

/// Blanket impl: any sync `Backend` is also an `AsyncBackend`.
impl<B: Backend + Send + Sync> AsyncBackend for B {
    type Error = B::Error;

    async fn async_get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        self.get(key)
    }

    async fn async_set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.set(key, value)
    }
}
