use crate::domain::model::BenchmarkRate;
use async_trait::async_trait;
use std::time::Duration;

/// Source of the benchmark rate for one run.
///
/// Implementations never fail: when the real source is unavailable they
/// return a fallback rate tagged with the reason, and the run goes on.
#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn fetch_rate(&self) -> BenchmarkRate;
}

#[async_trait]
impl<T: RateProvider + ?Sized> RateProvider for Box<T> {
    async fn fetch_rate(&self) -> BenchmarkRate {
        (**self).fetch_rate().await
    }
}

pub trait ConfigProvider: Send + Sync {
    fn rate_endpoint(&self) -> &str;
    fn request_timeout(&self) -> Duration;
    fn rate_field(&self) -> &str;
    fn date_field(&self) -> &str;
    fn fallback_rate(&self) -> f64;
}
