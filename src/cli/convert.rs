use super::ui;
use crate::core::config::AppConfig;
use crate::core::converter::normalize_code;
use crate::core::{
    ConversionRequest, ConversionResult, CurrencyCatalog, FxError, RateConverter, Route,
};
use anyhow::Result;
use rust_decimal::Decimal;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct ConvertArgs {
    pub amount: Decimal,
    pub from: Option<String>,
    pub to: Option<String>,
    /// Forces a two-hop conversion through this currency.
    pub via: Option<String>,
    /// Forces a direct conversion even when a base currency is configured.
    pub direct: bool,
}

/// Flags win over config; a configured base currency means two-hop.
pub fn choose_route(args: &ConvertArgs, config: &AppConfig) -> Option<String> {
    if args.direct {
        return None;
    }
    args.via.clone().or_else(|| config.base_currency.clone())
}

/// Flags first, then the configured defaults, then the first code of the catalog.
pub fn resolve_pair(
    args: &ConvertArgs,
    config: &AppConfig,
    catalog: &CurrencyCatalog,
) -> Result<(String, String), FxError> {
    let preferred_from = normalize_code(&config.default_from, None)?;
    let preferred_to = normalize_code(&config.default_to, None)?;
    let (default_from, default_to) = catalog
        .default_pair(&preferred_from, &preferred_to)
        .ok_or_else(|| FxError::Format("Currency catalog is empty".to_string()))?;

    Ok((
        args.from.clone().unwrap_or(default_from),
        args.to.clone().unwrap_or(default_to),
    ))
}

pub fn render_result(result: &ConversionResult) -> String {
    let mut parts = vec![format!("{} {}", ui::format_amount(result.amount), result.from)];
    if let Some((base, mid)) = &result.intermediate {
        parts.push(format!("{} {}", ui::format_amount(*mid), base));
    }
    let converted = format!(
        "{} {}",
        ui::format_amount(result.converted_amount),
        result.to
    );
    parts.push(ui::style_text(&converted, ui::StyleType::Amount));

    let mut output = parts.join(" = ");
    if let Some(date) = result.date {
        output.push_str(&ui::style_text(
            &format!("  (rates as of {date})"),
            ui::StyleType::Subtle,
        ));
    }
    output
}

async fn convert(
    converter: &RateConverter<'_>,
    config: &AppConfig,
    args: &ConvertArgs,
) -> Result<ConversionResult, FxError> {
    // Loaded once and threaded through validation.
    let catalog = converter.load_currencies().await?;

    let (from, to) = resolve_pair(args, config, &catalog)?;

    let request = ConversionRequest::new(args.amount, &from, &to, Some(&catalog))?;
    let route = match choose_route(args, config) {
        Some(base) => Route::Via(normalize_code(&base, Some(&catalog))?),
        None => Route::Direct,
    };
    debug!(?request, ?route, "Converting");

    converter.convert_request(&request, &route).await
}

pub async fn run(
    converter: &RateConverter<'_>,
    config: &AppConfig,
    args: &ConvertArgs,
    show_details: bool,
) -> Result<()> {
    let pb = ui::new_spinner("Fetching live rates...");
    let result = convert(converter, config, args).await;
    pb.finish_and_clear();

    match result {
        Ok(result) => {
            info!(converted = %result.converted_amount, "Conversion complete");
            println!("{}", render_result(&result));
            Ok(())
        }
        Err(e) => {
            debug!(error = %e, "Conversion failed");
            Err(anyhow::anyhow!(e.user_message(show_details)))
        }
    }
}
