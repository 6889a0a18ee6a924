use std::fs;
use tracing::info;

mod test_utils {
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub const CURRENCIES: &str = r#"{
        "INR": "Indian Rupee",
        "MYR": "Malaysian Ringgit",
        "USD": "United States Dollar"
    }"#;

    pub async fn create_mock_server() -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/currencies"))
            .respond_with(ResponseTemplate::new(200).set_body_string(CURRENCIES))
            .mount(&mock_server)
            .await;

        mock_server
    }

    pub async fn mount_rate(
        mock_server: &MockServer,
        from: &str,
        to: &str,
        converted: &str,
        expected_calls: u64,
    ) {
        let body = format!(
            r#"{{"amount": 1.0, "base": "{from}", "date": "2024-05-17", "rates": {{"{to}": {converted}}}}}"#
        );
        Mock::given(method("GET"))
            .and(path("/latest"))
            .and(query_param("from", from))
            .and(query_param("to", to))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .expect(expected_calls)
            .mount(mock_server)
            .await;
    }

    pub fn write_config(uri: &str, extra: &str) -> tempfile::NamedTempFile {
        let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        let config_content = format!(
            r#"
providers:
  frankfurter:
    base_url: {uri}
timeout_secs: 5
{extra}
"#
        );
        std::fs::write(config_file.path(), config_content).expect("Failed to write config file");
        config_file
    }
}

fn convert_args(amount: i64, from: &str, to: &str) -> fxc::cli::convert::ConvertArgs {
    fxc::cli::convert::ConvertArgs {
        amount: rust_decimal::Decimal::from(amount),
        from: Some(from.to_string()),
        to: Some(to.to_string()),
        via: None,
        direct: false,
    }
}

#[test_log::test(tokio::test)]
async fn test_currencies_flow_with_mock() {
    let mock_server = test_utils::create_mock_server().await;
    let config_file = test_utils::write_config(&mock_server.uri(), "");

    let result = fxc::run_command(
        fxc::AppCommand::Currencies,
        Some(config_file.path().to_str().unwrap()),
        false,
    )
    .await;
    assert!(result.is_ok(), "Currencies failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_direct_conversion_flow_with_mock() {
    let mock_server = test_utils::create_mock_server().await;
    test_utils::mount_rate(&mock_server, "USD", "INR", "835.0", 1).await;
    let config_file = test_utils::write_config(&mock_server.uri(), "");

    let result = fxc::run_command(
        fxc::AppCommand::Convert(convert_args(10, "usd", "inr")),
        Some(config_file.path().to_str().unwrap()),
        false,
    )
    .await;
    assert!(result.is_ok(), "Convert failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_two_hop_conversion_flow_with_mock() {
    let mock_server = test_utils::create_mock_server().await;
    test_utils::mount_rate(&mock_server, "USD", "MYR", "42.0", 1).await;
    test_utils::mount_rate(&mock_server, "MYR", "INR", "756.0", 1).await;
    let config_file = test_utils::write_config(&mock_server.uri(), r#"base_currency: "MYR""#);

    let result = fxc::run_command(
        fxc::AppCommand::Convert(convert_args(10, "USD", "INR")),
        Some(config_file.path().to_str().unwrap()),
        false,
    )
    .await;
    assert!(result.is_ok(), "Convert failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_direct_flag_overrides_configured_base() {
    let mock_server = test_utils::create_mock_server().await;
    test_utils::mount_rate(&mock_server, "USD", "INR", "835.0", 1).await;
    test_utils::mount_rate(&mock_server, "USD", "MYR", "42.0", 0).await;
    let config_file = test_utils::write_config(&mock_server.uri(), r#"base_currency: "MYR""#);

    let mut args = convert_args(10, "USD", "INR");
    args.direct = true;
    let result = fxc::run_command(
        fxc::AppCommand::Convert(args),
        Some(config_file.path().to_str().unwrap()),
        false,
    )
    .await;
    assert!(result.is_ok(), "Convert failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_same_currency_with_configured_base_makes_no_rate_request() {
    let mock_server = test_utils::create_mock_server().await;
    test_utils::mount_rate(&mock_server, "USD", "MYR", "42.0", 0).await;
    test_utils::mount_rate(&mock_server, "MYR", "USD", "10.0", 0).await;
    let config_file = test_utils::write_config(&mock_server.uri(), r#"base_currency: "MYR""#);

    let result = fxc::run_command(
        fxc::AppCommand::Convert(convert_args(10, "USD", "USD")),
        Some(config_file.path().to_str().unwrap()),
        false,
    )
    .await;
    assert!(result.is_ok(), "Convert failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_first_hop_failure_shows_generic_message() {
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, ResponseTemplate};

    let mock_server = test_utils::create_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/latest"))
        .and(query_param("from", "USD"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;
    test_utils::mount_rate(&mock_server, "MYR", "INR", "756.0", 0).await;
    let config_file = test_utils::write_config(&mock_server.uri(), r#"base_currency: "MYR""#);

    let result = fxc::run_command(
        fxc::AppCommand::Convert(convert_args(10, "USD", "INR")),
        Some(config_file.path().to_str().unwrap()),
        false,
    )
    .await;

    let err = result.expect_err("Conversion should fail");
    assert_eq!(
        err.to_string(),
        fxc::core::error::GENERIC_FAILURE_MESSAGE
    );
}

#[test_log::test(tokio::test)]
async fn test_unknown_currency_with_details() {
    let mock_server = test_utils::create_mock_server().await;
    let config_file = test_utils::write_config(&mock_server.uri(), "show_error_details: true");

    let result = fxc::run_command(
        fxc::AppCommand::Convert(convert_args(10, "USD", "ABC")),
        Some(config_file.path().to_str().unwrap()),
        false,
    )
    .await;

    let err = result.expect_err("Conversion should fail");
    info!(error = %err, "Received expected failure");
    assert!(err.to_string().contains("Unknown currency: ABC"));
}

#[test_log::test(tokio::test)]
async fn test_missing_config_path_fails() {
    let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let missing = dir.path().join("nope.yaml");
    fs::remove_file(&missing).ok();

    let result = fxc::run_command(
        fxc::AppCommand::Currencies,
        Some(missing.to_str().unwrap()),
        false,
    )
    .await;
    assert!(result.is_err());
}

#[test_log::test(tokio::test)]
#[ignore = "hits the live Frankfurter API"]
async fn test_real_frankfurter_api() {
    use fxc::core::{CurrencyRateProvider, RateConverter};
    use fxc::providers::frankfurter::FrankfurterProvider;

    let provider = FrankfurterProvider::new(
        fxc::core::config::DEFAULT_FRANKFURTER_URL,
        std::time::Duration::from_secs(10),
    );
    let catalog = provider
        .fetch_currencies()
        .await
        .expect("Currency list request failed");
    assert!(catalog.contains("USD"));

    let converter = RateConverter::new(&provider);
    let converted = converter
        .convert(rust_decimal::Decimal::from(10), "USD", "EUR")
        .await
        .expect("Conversion request failed");
    info!(%converted, "Real API Response - 10 USD in EUR");
    assert!(converted > rust_decimal::Decimal::ZERO);
}
