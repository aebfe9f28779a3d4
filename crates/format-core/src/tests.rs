use serde_json::{json, Value};

use crate::transform::{format_quote_payload, percentify_payload, percentify_values};

/// Helper: one income-statement period in the upstream provider's shape.
fn income_statement_period(date: &str, revenue: i64, net_income: i64, eps: f64) -> Value {
    json!({
        "date": date,
        "symbol": "AAPL",
        "reportedCurrency": "USD",
        "revenue": revenue,
        "costOfRevenue": 210_352_000_000i64,
        "grossProfit": 180_683_000_000i64,
        "grossProfitRatio": 0.4621,
        "operatingIncome": 123_216_000_000i64,
        "netIncome": net_income,
        "eps": eps,
        "epsdiluted": 6.08,
        "weightedAverageShsOut": 15_343_783_000i64,
    })
}

/// Helper: recursive shape comparison — same keys in the same order, same
/// array lengths, containers never become scalars.
fn assert_same_shape(input: &Value, output: &Value) {
    match (input, output) {
        (Value::Array(a), Value::Array(b)) => {
            assert_eq!(a.len(), b.len());
            for (x, y) in a.iter().zip(b) {
                assert_same_shape(x, y);
            }
        }
        (Value::Object(a), Value::Object(b)) => {
            let a_keys: Vec<&String> = a.keys().collect();
            let b_keys: Vec<&String> = b.keys().collect();
            assert_eq!(a_keys, b_keys);
            for (key, field) in a {
                assert_same_shape(field, &b[key]);
            }
        }
        (Value::Array(_) | Value::Object(_), _) | (_, Value::Array(_) | Value::Object(_)) => {
            panic!("tree shape changed: {input} -> {output}");
        }
        _ => {}
    }
}

// =============================================================================
// Income-statement arrays: dollar line items, ratio fields, share counts
// =============================================================================

#[test]
fn income_statement_array_formats_every_period() {
    let input = json!([
        income_statement_period("2024-09-28", 391_035_000_000, 93_736_000_000, 6.11),
        income_statement_period("2023-09-30", 383_285_000_000, 96_995_000_000, 6.16),
    ]);

    let output = percentify_values(input.clone(), None);

    assert_same_shape(&input, &output);
    assert_eq!(output[0]["revenue"], json!("391,035,000,000"));
    assert_eq!(output[0]["netIncome"], json!("93,736,000,000"));
    assert_eq!(output[0]["grossProfitRatio"], json!("46.21%"));
    assert_eq!(output[0]["eps"], json!(6.11));
    assert_eq!(output[0]["epsdiluted"], json!(6.08));
    // integer share count stays a bare number
    assert_eq!(output[0]["weightedAverageShsOut"], json!(15_343_783_000i64));
    // strings pass through untouched
    assert_eq!(output[1]["date"], json!("2023-09-30"));
    assert_eq!(output[1]["reportedCurrency"], json!("USD"));
    assert_eq!(output[1]["revenue"], json!("383,285,000,000"));
}

// =============================================================================
// Key-metrics TTM objects: dual-membership per-share fields, multiples,
// yields, Graham variants
// =============================================================================

#[test]
fn key_metrics_ttm_object_formats_by_category() {
    let input = json!({
        "revenuePerShareTTM": 25.484,
        "netIncomePerShareTTM": 6.108,
        "peRatioTTM": 29.8412,
        "marketCapTTM": 3_450_000_000_000i64,
        "dividendYieldTTM": 0.0044,
        "earningsYieldTTM": 0.0335,
        "roicTTM": 0.579,
        "grahamNumberTTM": 22.533,
    });

    let output = percentify_values(input.clone(), None);

    assert_same_shape(&input, &output);
    // per-share dollar metrics render as strings (dollar wins dual listing)
    assert_eq!(output["revenuePerShareTTM"], json!("25.48"));
    assert_eq!(output["netIncomePerShareTTM"], json!("6.11"));
    assert_eq!(output["peRatioTTM"], json!(29.84));
    assert_eq!(output["marketCapTTM"], json!("3,450,000,000,000"));
    assert_eq!(output["dividendYieldTTM"], json!("0.44%"));
    assert_eq!(output["earningsYieldTTM"], json!("3.35%"));
    assert_eq!(output["roicTTM"], json!("57.90%"));
    assert_eq!(output["grahamNumberTTM"], json!(22.53));
}

// =============================================================================
// Ratios: negatives keep their sign, tiny ratios keep significant digits
// =============================================================================

#[test]
fn ratios_handle_negative_and_tiny_values() {
    let input = json!({
        "netProfitMargin": -0.0412,
        "currentRatio": 0.8673,
        "interestCoverage": 0,
        "stockBasedCompensationToRevenue": 0.0000347,
    });

    let output = percentify_values(input, None);

    assert_eq!(output["netProfitMargin"], json!("-4.12%"));
    assert_eq!(output["currentRatio"], json!(0.87));
    // integer multiple stays a bare number
    assert_eq!(output["interestCoverage"], json!(0));
    assert_eq!(output["stockBasedCompensationToRevenue"], json!("0.0035%"));
}

// =============================================================================
// Payload entry points: raw body string in, formatted body string out
// =============================================================================

#[test]
fn statement_payload_round_trips_as_a_string() {
    let raw = r#"[{"symbol":"MSFT","revenue":245122000000,"netProfitMargin":0.3596,"peRatio":37.1482}]"#;

    let formatted = percentify_payload(raw).unwrap();
    let parsed: Value = serde_json::from_str(&formatted).unwrap();

    assert_eq!(parsed[0]["symbol"], json!("MSFT"));
    assert_eq!(parsed[0]["revenue"], json!("245,122,000,000"));
    assert_eq!(parsed[0]["netProfitMargin"], json!("35.96%"));
    assert_eq!(parsed[0]["peRatio"], json!(37.15));
}

#[test]
fn quote_payload_formats_the_full_allowlist() {
    let raw = r#"{
        "symbol": "AAPL",
        "name": "Apple Inc.",
        "price": 227.52,
        "changesPercentage": 1.3194,
        "change": 2.96,
        "dayLow": 225.77,
        "dayHigh": 228.22,
        "yearHigh": 237.23,
        "yearLow": 164.08,
        "marketCap": 3459000000000,
        "priceAvg50": 226.59,
        "priceAvg200": 205.93,
        "volume": 41855950,
        "avgVolume": 47397823,
        "open": 226.765,
        "previousClose": 224.56,
        "eps": 6.57,
        "pe": 34.63,
        "sharesOutstanding": 15204100000
    }"#;

    let formatted = format_quote_payload(raw).unwrap();
    let parsed: Value = serde_json::from_str(&formatted).unwrap();

    assert_eq!(parsed["price"], json!("227.52"));
    assert_eq!(parsed["changesPercentage"], json!("1.32%"));
    // not in the quote allowlist: left numeric
    assert_eq!(parsed["change"], json!(2.96));
    assert_eq!(parsed["dayLow"], json!("225.77"));
    assert_eq!(parsed["dayHigh"], json!("228.22"));
    assert_eq!(parsed["marketCap"], json!("3,459,000,000,000"));
    assert_eq!(parsed["volume"], json!("41,855,950"));
    assert_eq!(parsed["avgVolume"], json!("47,397,823"));
    assert_eq!(parsed["open"], json!("226.76"));
    assert_eq!(parsed["previousClose"], json!("224.56"));
    assert_eq!(parsed["eps"], json!(6.57));
    assert_eq!(parsed["pe"], json!("34.63"));
    assert_eq!(parsed["sharesOutstanding"], json!("15,204,100,000"));
    assert_eq!(parsed["name"], json!("Apple Inc."));
}

// =============================================================================
// Deep nesting: the generic walk recurses through mixed containers
// =============================================================================

#[test]
fn nested_mixed_containers_format_at_every_depth() {
    let input = json!({
        "profile": {
            "companyName": "Apple Inc.",
            "marketCap": 3_459_000_000_000i64,
            "ratios": [
                { "quickRatio": 0.8251, "roe": 1.5723 },
            ],
        },
        "active": true,
        "note": null,
    });

    let output = percentify_values(input.clone(), None);

    assert_same_shape(&input, &output);
    assert_eq!(output["profile"]["companyName"], json!("Apple Inc."));
    assert_eq!(output["profile"]["marketCap"], json!("3,459,000,000,000"));
    assert_eq!(output["profile"]["ratios"][0]["quickRatio"], json!(0.83));
    assert_eq!(output["profile"]["ratios"][0]["roe"], json!("157.23%"));
    assert_eq!(output["active"], json!(true));
    assert_eq!(output["note"], json!(null));
}
