use crate::domain::model::BenchmarkRate;
use crate::domain::ports::{ConfigProvider, RateProvider};
use crate::utils::error::{Result, SimError};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;

pub const DEFAULT_RATE_ENDPOINT: &str =
    "https://api.bcb.gov.br/dados/serie/bcdata.sgs.432/dados/ultimos/1?formato=json";
pub const DEFAULT_RATE_FIELD: &str = "valor";
pub const DEFAULT_DATE_FIELD: &str = "data";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 5;
pub const DEFAULT_FALLBACK_RATE: f64 = 0.10;

const REFERENCE_DATE_FORMAT: &str = "%d/%m/%Y";

/// Fetches the benchmark rate from a JSON endpoint shaped like the BCB SGS
/// series API: `[{"data": "dd/mm/yyyy", "valor": "10.50"}]`, value in percent.
pub struct HttpRateProvider<C: ConfigProvider> {
    config: C,
    client: Client,
}

impl<C: ConfigProvider> HttpRateProvider<C> {
    pub fn new(config: C) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self { config, client })
    }

    /// One GET, no retries. Every failure surfaces as an error here and is
    /// turned into the fallback rate by [`RateProvider::fetch_rate`].
    pub async fn try_fetch(&self) -> Result<BenchmarkRate> {
        tracing::debug!("Making rate request to: {}", self.config.rate_endpoint());
        let response = self.client.get(self.config.rate_endpoint()).send().await?;
        tracing::debug!("Rate response status: {}", response.status());

        if !response.status().is_success() {
            return Err(SimError::HttpStatusError {
                status: response.status().as_u16(),
            });
        }

        let payload: serde_json::Value = response.json().await?;
        let (annual_rate, reference_date) =
            parse_rate_payload(&payload, self.config.rate_field(), self.config.date_field())?;

        Ok(BenchmarkRate::fetched(annual_rate, reference_date))
    }
}

#[async_trait]
impl<C: ConfigProvider> RateProvider for HttpRateProvider<C> {
    async fn fetch_rate(&self) -> BenchmarkRate {
        match self.try_fetch().await {
            Ok(rate) => rate,
            Err(e) => {
                tracing::warn!(
                    "Rate fetch from {} failed: {} (Category: {:?})",
                    self.config.rate_endpoint(),
                    e,
                    e.category()
                );
                BenchmarkRate::fallback(self.config.fallback_rate(), e.to_string())
            }
        }
    }
}

/// Reads the first entry of the payload. The rate must be a numeric string in
/// percent; the date is informational and dropped when it does not parse.
pub fn parse_rate_payload(
    payload: &serde_json::Value,
    rate_field: &str,
    date_field: &str,
) -> Result<(f64, Option<NaiveDate>)> {
    let items = payload.as_array().ok_or_else(|| SimError::RatePayloadError {
        message: "expected a JSON array".to_string(),
    })?;

    let first = items
        .first()
        .and_then(|item| item.as_object())
        .ok_or_else(|| SimError::RatePayloadError {
            message: "expected at least one object in the array".to_string(),
        })?;

    let raw = first
        .get(rate_field)
        .ok_or_else(|| SimError::RatePayloadError {
            message: format!("missing field '{}'", rate_field),
        })?
        .as_str()
        .ok_or_else(|| SimError::RatePayloadError {
            message: format!("field '{}' is not a string", rate_field),
        })?;

    let percent: f64 = raw.trim().parse().map_err(|_| SimError::RatePayloadError {
        message: format!("field '{}' is not numeric: '{}'", rate_field, raw),
    })?;

    if !percent.is_finite() || percent < 0.0 {
        return Err(SimError::RatePayloadError {
            message: format!("rate out of range: {}", percent),
        });
    }

    let reference_date = first
        .get(date_field)
        .and_then(|v| v.as_str())
        .and_then(|s| match NaiveDate::parse_from_str(s.trim(), REFERENCE_DATE_FORMAT) {
            Ok(date) => Some(date),
            Err(e) => {
                tracing::debug!("Ignoring unparseable reference date '{}': {}", s, e);
                None
            }
        });

    Ok((percent / 100.0, reference_date))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::RateSource;
    use approx::assert_abs_diff_eq;
    use httpmock::prelude::*;
    use std::time::Duration;

    struct MockConfig {
        endpoint: String,
        timeout: Duration,
    }

    impl MockConfig {
        fn new(endpoint: String) -> Self {
            Self {
                endpoint,
                timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn rate_endpoint(&self) -> &str {
            &self.endpoint
        }

        fn request_timeout(&self) -> Duration {
            self.timeout
        }

        fn rate_field(&self) -> &str {
            DEFAULT_RATE_FIELD
        }

        fn date_field(&self) -> &str {
            DEFAULT_DATE_FIELD
        }

        fn fallback_rate(&self) -> f64 {
            DEFAULT_FALLBACK_RATE
        }
    }

    #[tokio::test]
    async fn test_fetch_successful_response() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/selic");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([{"data": "17/10/2026", "valor": "14.25"}]));
        });

        let provider = HttpRateProvider::new(MockConfig::new(server.url("/selic"))).unwrap();
        let rate = provider.fetch_rate().await;

        api_mock.assert();
        assert_eq!(rate.source, RateSource::Fetched);
        assert_abs_diff_eq!(rate.annual_rate, 0.1425, epsilon = 1e-12);
        assert_eq!(rate.reference_date, NaiveDate::from_ymd_opt(2026, 10, 17));
    }

    #[tokio::test]
    async fn test_fetch_server_error_falls_back() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/selic");
            then.status(500);
        });

        let provider = HttpRateProvider::new(MockConfig::new(server.url("/selic"))).unwrap();
        let rate = provider.fetch_rate().await;

        api_mock.assert();
        assert!(rate.is_fallback());
        assert_eq!(rate.annual_rate, DEFAULT_FALLBACK_RATE);
        assert!(rate.warning().unwrap().contains("500"));
    }

    #[tokio::test]
    async fn test_fetch_error_status_is_reported() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/selic");
            then.status(404);
        });

        let provider = HttpRateProvider::new(MockConfig::new(server.url("/selic"))).unwrap();
        let err = provider.try_fetch().await.unwrap_err();

        assert!(matches!(err, SimError::HttpStatusError { status: 404 }));
    }

    #[tokio::test]
    async fn test_fetch_empty_array_falls_back() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/selic");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([]));
        });

        let provider = HttpRateProvider::new(MockConfig::new(server.url("/selic"))).unwrap();
        let rate = provider.fetch_rate().await;

        api_mock.assert();
        assert!(rate.is_fallback());
        assert_eq!(rate.annual_rate, DEFAULT_FALLBACK_RATE);
    }

    #[tokio::test]
    async fn test_fetch_invalid_json_falls_back() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/selic");
            then.status(200)
                .header("Content-Type", "application/json")
                .body("<html>maintenance</html>");
        });

        let provider = HttpRateProvider::new(MockConfig::new(server.url("/selic"))).unwrap();
        let rate = provider.fetch_rate().await;

        assert!(rate.is_fallback());
    }

    #[tokio::test]
    async fn test_fetch_timeout_falls_back() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/slow");
            then.status(200)
                .delay(Duration::from_secs(3))
                .json_body(serde_json::json!([{"valor": "14.25"}]));
        });

        let mut config = MockConfig::new(server.url("/slow"));
        config.timeout = Duration::from_millis(200);
        let provider = HttpRateProvider::new(config).unwrap();
        let rate = provider.fetch_rate().await;

        assert!(rate.is_fallback());
        assert_eq!(rate.annual_rate, DEFAULT_FALLBACK_RATE);
    }

    #[tokio::test]
    async fn test_fetch_unreachable_host_falls_back() {
        // Nothing listens on the discard port.
        let provider =
            HttpRateProvider::new(MockConfig::new("http://127.0.0.1:9/selic".to_string()))
                .unwrap();
        let rate = provider.fetch_rate().await;

        assert!(rate.is_fallback());
    }

    #[test]
    fn test_parse_rejects_bad_shapes() {
        let cases = [
            serde_json::json!({"valor": "10.0"}),
            serde_json::json!([]),
            serde_json::json!(["10.0"]),
            serde_json::json!([{"value": "10.0"}]),
            serde_json::json!([{"valor": 10.0}]),
            serde_json::json!([{"valor": "ten"}]),
            serde_json::json!([{"valor": "-1.5"}]),
            serde_json::json!([{"valor": "NaN"}]),
        ];

        for payload in &cases {
            assert!(
                parse_rate_payload(payload, "valor", "data").is_err(),
                "payload should be rejected: {}",
                payload
            );
        }
    }

    #[test]
    fn test_parse_ignores_bad_date() {
        let payload = serde_json::json!([{"data": "2026-10-17", "valor": " 10.50 "}]);
        let (rate, date) = parse_rate_payload(&payload, "valor", "data").unwrap();

        assert_abs_diff_eq!(rate, 0.105, epsilon = 1e-12);
        assert!(date.is_none());
    }

    #[test]
    fn test_parse_uses_first_entry() {
        let payload = serde_json::json!([
            {"data": "16/10/2026", "valor": "13.75"},
            {"data": "17/10/2026", "valor": "14.25"}
        ]);
        let (rate, date) = parse_rate_payload(&payload, "valor", "data").unwrap();

        assert_abs_diff_eq!(rate, 0.1375, epsilon = 1e-12);
        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 10, 16));
    }
}
