//! Lenient request coercion.
//!
//! Booking forms send numbers as strings, leave fields blank, or omit them.
//! None of that is an error: anything that does not read as a finite,
//! non-negative number becomes 0 before it reaches the pricing engine.

use crate::domain::model::{Dimensions, ParcelQuote, ServiceLevel};
use serde_json::{Map, Value};

/// Reads a number the way a form field would: numeric strings parse,
/// booleans count as 0/1, everything else is 0. Negative and non-finite
/// results clamp to 0.
pub fn coerce_number(value: Option<&Value>) -> f64 {
    let raw = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().unwrap_or(0.0)
            }
        }
        Some(Value::Bool(true)) => 1.0,
        _ => 0.0,
    };

    if raw.is_finite() && raw > 0.0 {
        raw
    } else {
        0.0
    }
}

/// Truthiness: non-zero numbers, non-empty strings, arrays and objects are true.
pub fn coerce_bool(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(false),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
        Some(Value::Null) | None => false,
    }
}

pub fn coerce_service(value: Option<&Value>) -> ServiceLevel {
    match value {
        Some(Value::String(label)) => ServiceLevel::from_label(label),
        _ => ServiceLevel::Standard,
    }
}

pub fn coerce_dimensions(value: Option<&Value>) -> Dimensions {
    match value {
        Some(Value::Object(dims)) => Dimensions::new(
            coerce_number(dims.get("l")),
            coerce_number(dims.get("w")),
            coerce_number(dims.get("h")),
        ),
        _ => Dimensions::default(),
    }
}

/// Builds a quote from a request body. Missing fields take their defaults;
/// nothing here fails.
pub fn quote_from_body(body: &Map<String, Value>) -> ParcelQuote {
    ParcelQuote {
        weight_kg: coerce_number(body.get("weightKg")),
        dims: coerce_dimensions(body.get("dims")),
        service: coerce_service(body.get("service")),
        insured: coerce_bool(body.get("insured")),
        declared_value: coerce_number(body.get("declaredValue")),
    }
}

/// A required text field: present and non-empty.
pub fn required_text(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

pub fn optional_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    }
}
