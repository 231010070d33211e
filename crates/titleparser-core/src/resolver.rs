use crate::error::ResolveResult;
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;

/// A title extraction strategy.
///
/// Given a URL, a resolver either produces a title (possibly empty, when the
/// resource legitimately has none) or a classified [`ResolveError`]. The URL
/// is passed through as received; resolvers must not assume it was
/// normalized or even that it parses.
///
/// Resolvers must never panic or abort on a failed fetch or parse. Every
/// failure is reported through the returned error.
///
/// [`ResolveError`]: crate::ResolveError
#[async_trait]
pub trait Resolver: Send + Sync + 'static {
    async fn resolve(&self, url: &str) -> ResolveResult<String>;
}

#[async_trait]
impl<R: Resolver + ?Sized> Resolver for Arc<R> {
    async fn resolve(&self, url: &str) -> ResolveResult<String> {
        (**self).resolve(url).await
    }
}

/// A [`Resolver`] backed by an async closure. See [`resolver_fn`].
#[derive(Clone)]
pub struct ResolverFn<F> {
    f: F,
}

impl<F> std::fmt::Debug for ResolverFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolverFn").finish_non_exhaustive()
    }
}

/// Wraps an async function as a [`Resolver`].
///
/// # Examples
///
/// ```
/// use titleparser_core::{resolver_fn, Resolver};
///
/// # async fn example() {
/// let silent = resolver_fn(|_url| async { Ok(String::new()) });
/// assert_eq!(silent.resolve("https://example.com").await, Ok(String::new()));
/// # }
/// ```
pub fn resolver_fn<F, Fut>(f: F) -> ResolverFn<F>
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ResolveResult<String>> + Send + 'static,
{
    ResolverFn { f }
}

#[async_trait]
impl<F, Fut> Resolver for ResolverFn<F>
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ResolveResult<String>> + Send + 'static,
{
    async fn resolve(&self, url: &str) -> ResolveResult<String> {
        (self.f)(url.to_owned()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResolveError;

    #[tokio::test]
    async fn closure_receives_url() {
        let echo = resolver_fn(|url| async move { Ok(format!("title of {url}")) });

        assert_eq!(
            echo.resolve("https://example.com").await,
            Ok("title of https://example.com".to_string())
        );
    }

    #[tokio::test]
    async fn arc_dyn_resolver_delegates() {
        let failing: Arc<dyn Resolver> =
            Arc::new(resolver_fn(|_| async { Err(ResolveError::TitleNotFound) }));

        assert_eq!(
            failing.resolve("https://example.com").await,
            Err(ResolveError::TitleNotFound)
        );
    }
}
