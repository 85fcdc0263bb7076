use chrono::{Days, NaiveDate, Utc};
use fx_convert::providers::{BnrSource, FixerSource};
use fx_convert::{CurrencyConverter, ForexProvider, MemoryCacheEngine};
use std::sync::Arc;

mod test_utils {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub const FIXER_LATEST: &str = r#"{
        "success": true,
        "base": "EUR",
        "rates": {"USD": 1.1, "RON": 4.95, "GBP": 0.85}
    }"#;

    pub const BNR_LATEST: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<DataSet xmlns="http://www.bnr.ro/xsd">
    <Body>
        <Subject>Reference rates</Subject>
        <OrigCurrency>RON</OrigCurrency>
        <Cube date="2024-05-10">
            <Rate currency="EUR">4.95</Rate>
            <Rate currency="USD">4.5</Rate>
        </Cube>
    </Body>
</DataSet>"#;

    pub async fn create_mock_server(url_path: &str, mock_response: &str) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(url_path))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .expect(1)
            .mount(&mock_server)
            .await;

        mock_server
    }
}

#[test_log::test(tokio::test)]
async fn test_fixer_conversion_end_to_end() {
    let mock_server = test_utils::create_mock_server("/latest", test_utils::FIXER_LATEST).await;

    let source = FixerSource::new(&mock_server.uri(), "test-key");
    let provider = ForexProvider::new(source, Arc::new(MemoryCacheEngine::new())).unwrap();
    let converter = CurrencyConverter::new(provider);

    let result = converter.convert("EUR", "USD", 10.0).await.unwrap();
    assert_eq!(result, 11.0);

    // Cross rate: 1 USD = 4.95/1.1 = 4.5 RON. The mock's expect(1) verifies
    // this second conversion is served from cache.
    let result = converter.convert("usd", "ron", 10.0).await.unwrap();
    assert_eq!(result, 45.0);
}

#[test_log::test(tokio::test)]
async fn test_fixer_historical_conversion_end_to_end() {
    let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    let mock_server = test_utils::create_mock_server("/2024-03-15", test_utils::FIXER_LATEST).await;

    let source = FixerSource::new(&mock_server.uri(), "test-key");
    let provider = ForexProvider::new(source, Arc::new(MemoryCacheEngine::new())).unwrap();
    let converter = CurrencyConverter::new(provider);

    let result = converter
        .convert_with("EUR", "USD", 10.0, 2, Some(date))
        .await
        .unwrap();
    assert_eq!(result, 11.0);

    // Repeat lookups for the same date stay on the cached collection
    let rates = converter.rates("EUR", Some(date)).await.unwrap();
    assert_eq!(rates.get("RON").unwrap(), 4.95);
}

#[test_log::test(tokio::test)]
async fn test_fixer_future_date_is_rejected_without_network() {
    // No mocks mounted: any request would fail the test
    let mock_server = wiremock::MockServer::start().await;

    let source = FixerSource::new(&mock_server.uri(), "test-key");
    let provider = ForexProvider::new(source, Arc::new(MemoryCacheEngine::new())).unwrap();
    let converter = CurrencyConverter::new(provider);

    let future = Utc::now().date_naive() + Days::new(7);
    let err = converter
        .convert_with("EUR", "USD", 10.0, 2, Some(future))
        .await
        .unwrap_err();
    assert!(matches!(err, fx_convert::ForexError::FutureDate(_)));
}

#[test_log::test(tokio::test)]
async fn test_bnr_conversion_end_to_end() {
    let mock_server = test_utils::create_mock_server("/nbrfxrates.xml", test_utils::BNR_LATEST).await;

    let source = BnrSource::new(&mock_server.uri());
    let provider = ForexProvider::new(source, Arc::new(MemoryCacheEngine::new())).unwrap();
    let converter = CurrencyConverter::new(provider);

    // Feed is RON-per-unit: 1 USD = 4.5 RON
    let result = converter.convert("USD", "RON", 10.0).await.unwrap();
    assert_eq!(result, 45.0);

    // EUR -> USD through RON: (1/4.5) / (1/4.95) = 1.1
    let result = converter.convert("EUR", "USD", 10.0).await.unwrap();
    assert_eq!(result, 11.0);
}
