//! `forex` endpoint: last quote midpoint for a currency pair.
//!
//! https://finage.co.uk/docs/api/forex-last-quote
//! The result is the midpoint between the ask and the bid.

use ea_core::{
    validate_result_number, AdapterError, AdapterRequest, AdapterResponse, InputParameter,
    ParamKind, Result, SymbolOverrides, ValidatedInput, Validator,
};
use log::debug;

use crate::client::FinageApi;
use crate::config::NAME;
use crate::pairs::PairOrdering;

pub const INPUT_PARAMETERS: &[InputParameter] = &[
    InputParameter {
        name: "base",
        aliases: &["from", "symbol"],
        required: true,
        kind: ParamKind::String,
        description: "The symbol of the currency to query",
    },
    InputParameter {
        name: "quote",
        aliases: &["to", "market"],
        required: true,
        kind: ParamKind::String,
        description: "The symbol of the currency to convert to",
    },
];

/// Canonical uppercase `(base, quote)` after applying the base override.
pub fn resolve_symbols(validated: &ValidatedInput) -> Result<(String, String)> {
    let base = validated.required_str("base")?.trim();
    let quote = validated.required_str("quote")?.trim();

    Ok((
        validated.override_symbol(NAME, base).to_uppercase(),
        quote.to_uppercase(),
    ))
}

/// Midpoint of `ask` and `bid`, mapped back through the pair ordering.
///
/// Forex prices are strictly positive, so a non-positive or non-finite
/// midpoint is treated as bad upstream data rather than inverted.
pub fn normalize_midpoint(ask: f64, bid: f64, pair: &PairOrdering) -> Result<f64> {
    let mid = (ask + bid) / 2.0;

    if !mid.is_finite() || mid <= 0.0 {
        return Err(AdapterError::upstream(
            NAME,
            format!("Invalid midpoint {} from ask {} and bid {}", mid, ask, bid),
        ));
    }

    Ok(pair.apply(mid))
}

pub async fn execute(
    api: &dyn FinageApi,
    overrides: &SymbolOverrides,
    request: &AdapterRequest,
) -> Result<AdapterResponse> {
    let validated = Validator::new(INPUT_PARAMETERS, overrides).validate(request)?;
    let (base, quote) = resolve_symbols(&validated)?;
    let pair = PairOrdering::resolve(&base, &quote);

    debug!(
        "Fetching {}/{} as {}{} (inverted: {})",
        base, quote, pair.from, pair.to, pair.inverted
    );

    let payload = api.last_forex(&pair.from, &pair.to).await?;
    let ask = validate_result_number(NAME, &payload, &["ask"])?;
    let bid = validate_result_number(NAME, &payload, &["bid"])?;
    let result = normalize_midpoint(ask, bid, &pair)?;

    Ok(AdapterResponse::success(
        validated.job_run_id(),
        payload,
        result,
    ))
}
