//! Per-endpoint validation chains.
//!
//! Each chain is an ordered list of independent checks appending to a shared
//! error list, so one bad field can contribute several entries: a non-numeric
//! price fails both the numeric check and the greater-than-zero check, and a
//! missing price fails all three price checks.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::product::NewProduct;

pub const MSG_INVALID_ID: &str = "ID no valido";
pub const MSG_NAME_EMPTY: &str = "el nombre de producto no puede ir vacio";
pub const MSG_PRICE_NOT_NUMERIC: &str = "Valor no valido";
pub const MSG_PRICE_EMPTY: &str = "el precio de producto no puede ir vacio";
pub const MSG_PRICE_INVALID: &str = "precio no valido";
pub const MSG_AVAILABILITY_NOT_BOOLEAN: &str = "Valor para disponibilidad no valido";

/// One field-level validation failure.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    #[schema(example = "price")]
    pub field: String,
    #[schema(example = "precio no valido")]
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// Fields of a full-update body that passed validation. All three are
/// required by the update chain, so they are `Some` on success; the handler
/// still merges field by field over the existing row.
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateBody {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub availability: Option<bool>,
}

/// Path id rule shared by the by-id endpoints.
pub fn parse_id(raw: &str) -> Result<i32, Vec<FieldError>> {
    raw.parse::<i32>()
        .map_err(|_| vec![FieldError::new("id", MSG_INVALID_ID)])
}

/// Create chain: name non-empty; price numeric, non-empty, and > 0.
pub fn validate_new_product(body: &Value) -> Result<NewProduct, Vec<FieldError>> {
    let mut errors = Vec::new();
    let name = check_name(body, &mut errors);
    let price = check_price(body, &mut errors);
    let availability = body.get("availability").and_then(as_bool).unwrap_or(true);
    match (name, price) {
        (Some(name), Some(price)) if errors.is_empty() => Ok(NewProduct {
            name,
            price,
            availability,
        }),
        _ => Err(errors),
    }
}

/// Full-update chain: the id rule, then the create rules, then availability
/// must be boolean. All failures are collected into one response.
pub fn validate_update_request(
    raw_id: &str,
    body: &Value,
) -> Result<(i32, UpdateBody), Vec<FieldError>> {
    let mut errors = Vec::new();
    let id = match raw_id.parse::<i32>() {
        Ok(id) => Some(id),
        Err(_) => {
            errors.push(FieldError::new("id", MSG_INVALID_ID));
            None
        }
    };
    let name = check_name(body, &mut errors);
    let price = check_price(body, &mut errors);
    let availability = check_availability(body, &mut errors);
    match id {
        Some(id) if errors.is_empty() => Ok((
            id,
            UpdateBody {
                name,
                price,
                availability,
            },
        )),
        _ => Err(errors),
    }
}

fn check_name(body: &Value, errors: &mut Vec<FieldError>) -> Option<String> {
    let value = body.get("name");
    if is_empty(value) {
        errors.push(FieldError::new("name", MSG_NAME_EMPTY));
        return None;
    }
    value.map(json_to_text)
}

fn check_price(body: &Value, errors: &mut Vec<FieldError>) -> Option<f64> {
    let value = body.get("price");
    if !value.map(is_numeric).unwrap_or(false) {
        errors.push(FieldError::new("price", MSG_PRICE_NOT_NUMERIC));
    }
    if is_empty(value) {
        errors.push(FieldError::new("price", MSG_PRICE_EMPTY));
    }
    match value.and_then(numeric_value) {
        Some(n) if n > 0.0 => Some(n),
        _ => {
            errors.push(FieldError::new("price", MSG_PRICE_INVALID));
            None
        }
    }
}

fn check_availability(body: &Value, errors: &mut Vec<FieldError>) -> Option<bool> {
    match body.get("availability").and_then(as_bool) {
        Some(b) => Some(b),
        None => {
            errors.push(FieldError::new("availability", MSG_AVAILABILITY_NOT_BOOLEAN));
            None
        }
    }
}

/// Absent, null, and the empty string all count as empty.
fn is_empty(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

/// A JSON number, or a string that parses as one.
fn is_numeric(value: &Value) -> bool {
    numeric_value(value).is_some()
}

fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse::<f64>().ok(),
        _ => None,
    }
}

/// A JSON bool, or a "true"/"false" string.
fn as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) if s.eq_ignore_ascii_case("true") => Some(true),
        Value::String(s) if s.eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    }
}

fn json_to_text(value: &Value) -> String {
    match value.as_str() {
        Some(s) => s.to_string(),
        None => value.to_string(),
    }
}
