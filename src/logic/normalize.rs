//! Row Normalizer
//!
//! Shapes a raw CSV row into the fixed record the prediction endpoint expects.
//! Coercion is permissive: anything that is not a number becomes `NaN` and is
//! sent as-is (JSON `null`).

use serde::{Serialize, Serializer};

use super::dataset::RawRecord;

/// Fixed-shape record submitted to the classifier
#[derive(Debug, Clone, Serialize)]
pub struct NormalizedRecord {
    #[serde(serialize_with = "serialize_step")]
    pub step: f64,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub amount: f64,
    #[serde(rename = "oldbalanceOrg")]
    pub old_balance_org: f64,
    #[serde(rename = "newbalanceOrig")]
    pub new_balance_orig: f64,
    #[serde(rename = "oldbalanceDest")]
    pub old_balance_dest: f64,
    #[serde(rename = "newbalanceDest")]
    pub new_balance_dest: f64,
}

/// Normalize one raw row. Pure; never fails.
pub fn normalize(row: &RawRecord) -> NormalizedRecord {
    NormalizedRecord {
        step: coerce_number(row.get("step")),
        kind: row.get("type").map(str::to_string),
        amount: coerce_number(row.get("amount")),
        old_balance_org: coerce_number(row.get("oldbalanceOrg")),
        new_balance_orig: coerce_number(row.get("newbalanceOrig")),
        old_balance_dest: coerce_number(row.get("oldbalanceDest")),
        new_balance_dest: coerce_number(row.get("newbalanceDest")),
    }
}

/// Unary-plus style numeric coercion.
///
/// Missing → `NaN`, blank → `0`, `Infinity` literals and `0x`/`0o`/`0b`
/// integers are recognised, anything else unparsable → `NaN`.
pub fn coerce_number(raw: Option<&str>) -> f64 {
    let Some(raw) = raw else {
        return f64::NAN;
    };
    let s = raw.trim();
    if s.is_empty() {
        return 0.0;
    }

    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match s.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return parse_radix(&s[2..], radix);
    }

    // Rust also accepts "inf"/"nan"; only plain decimal notation is allowed here.
    let decimal_only = s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !decimal_only || !s.chars().any(|c| c.is_ascii_digit()) {
        return f64::NAN;
    }

    s.parse::<f64>().unwrap_or(f64::NAN)
}

fn parse_radix(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    digits
        .chars()
        .try_fold(0.0_f64, |acc, c| {
            c.to_digit(radix).map(|d| acc * radix as f64 + d as f64)
        })
        .unwrap_or(f64::NAN)
}

/// Integral steps go out as JSON integers, everything else as a float
/// (non-finite values become `null`).
fn serialize_step<S: Serializer>(step: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if step.is_finite() && step.fract() == 0.0 && step.abs() < i64::MAX as f64 {
        serializer.serialize_i64(*step as i64)
    } else {
        serializer.serialize_f64(*step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn paysim_row() -> RawRecord {
        RawRecord::from_pairs([
            ("step", "1"),
            ("type", "TRANSFER"),
            ("amount", "250000.0"),
            ("nameOrig", "C999999999"),
            ("oldbalanceOrg", "200000.0"),
            ("newbalanceOrig", "0.0"),
            ("nameDest", "C111111111"),
            ("oldbalanceDest", "0.0"),
            ("newbalanceDest", "0.0"),
        ])
    }

    #[test]
    fn test_selects_fixed_columns() {
        let rec = normalize(&paysim_row());

        assert_eq!(rec.step, 1.0);
        assert_eq!(rec.kind.as_deref(), Some("TRANSFER"));
        assert_eq!(rec.amount, 250000.0);
        assert_eq!(rec.old_balance_org, 200000.0);
        assert_eq!(rec.new_balance_orig, 0.0);
        assert_eq!(rec.old_balance_dest, 0.0);
        assert_eq!(rec.new_balance_dest, 0.0);
    }

    #[test]
    fn test_wire_shape() {
        let value = serde_json::to_value(normalize(&paysim_row())).unwrap();

        assert_eq!(value, json!({
            "step": 1,
            "type": "TRANSFER",
            "amount": 250000.0,
            "oldbalanceOrg": 200000.0,
            "newbalanceOrig": 0.0,
            "oldbalanceDest": 0.0,
            "newbalanceDest": 0.0
        }));
    }

    #[test]
    fn test_missing_columns_become_nan() {
        let rec = normalize(&RawRecord::from_pairs([("step", "4")]));

        assert_eq!(rec.step, 4.0);
        assert!(rec.kind.is_none());
        assert!(rec.amount.is_nan());
        assert!(rec.new_balance_dest.is_nan());

        let value = serde_json::to_value(&rec).unwrap();
        assert!(value.get("type").is_none());
        assert!(value["amount"].is_null());
    }

    #[test]
    fn test_non_numeric_accepted_as_nan() {
        let rec = normalize(&RawRecord::from_pairs([("step", "abc"), ("amount", "12,5")]));
        assert!(rec.step.is_nan());
        assert!(rec.amount.is_nan());
        assert!(serde_json::to_value(&rec).unwrap()["step"].is_null());
    }

    #[test]
    fn test_coercion_rules() {
        assert!(coerce_number(None).is_nan());
        assert_eq!(coerce_number(Some("")), 0.0);
        assert_eq!(coerce_number(Some("   ")), 0.0);
        assert_eq!(coerce_number(Some(" 42 ")), 42.0);
        assert_eq!(coerce_number(Some("-1.5e3")), -1500.0);
        assert_eq!(coerce_number(Some(".5")), 0.5);
        assert_eq!(coerce_number(Some("0x1F")), 31.0);
        assert_eq!(coerce_number(Some("0b101")), 5.0);
        assert_eq!(coerce_number(Some("Infinity")), f64::INFINITY);
        assert_eq!(coerce_number(Some("-Infinity")), f64::NEG_INFINITY);
        assert!(coerce_number(Some("inf")).is_nan());
        assert!(coerce_number(Some("NaN")).is_nan());
        assert!(coerce_number(Some("0x")).is_nan());
        assert!(coerce_number(Some("1e")).is_nan());
        assert!(coerce_number(Some("-")).is_nan());
    }

    #[test]
    fn test_normalize_is_deterministic() {
        let rows = [
            paysim_row(),
            RawRecord::from_pairs([("step", "x"), ("type", "CASH_OUT"), ("amount", "")]),
            RawRecord::from_pairs::<&str, &str>([]),
        ];

        for row in &rows {
            let a = normalize(row);
            let b = normalize(row);
            let bits = |r: &NormalizedRecord| {
                [r.step, r.amount, r.old_balance_org, r.new_balance_orig, r.old_balance_dest, r.new_balance_dest]
                    .map(f64::to_bits)
            };
            assert_eq!(bits(&a), bits(&b));
            assert_eq!(a.kind, b.kind);
            assert_eq!(serde_json::to_string(&a).unwrap(), serde_json::to_string(&b).unwrap());
        }
    }
}
