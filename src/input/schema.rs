//! Structural checks of a JSON transaction file, run before deserialising it.
//!
//! Every violation is reported, not only the first one, as
//! `instance[<index>].<field>: <reason>`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::str::FromStr;

const REQUIRED: [&str; 5] = ["date", "user_id", "user_type", "type", "operation"];
const USER_TYPES: [&str; 2] = ["natural", "juridical"];
const TRANSACTION_TYPES: [&str; 2] = ["cash_in", "cash_out"];
const CURRENCIES: [&str; 1] = ["EUR"];
const MIN_AMOUNT: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

pub fn validate(document: &Value) -> Result<(), Vec<String>> {
    let mut violations = Vec::new();

    match document.as_array() {
        Some(items) => {
            for (index, item) in items.iter().enumerate() {
                validate_transaction(&format!("instance[{}]", index), item, &mut violations);
            }
        }
        None => violations.push("instance: is not of a type(s) array".to_string()),
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

fn validate_transaction(path: &str, item: &Value, violations: &mut Vec<String>) {
    let object = match item.as_object() {
        Some(object) => object,
        None => {
            violations.push(format!("{}: is not of a type(s) object", path));
            return;
        }
    };

    for field in REQUIRED {
        if !object.contains_key(field) {
            violations.push(format!("{}: requires property \"{}\"", path, field));
        }
    }

    if let Some(date) = object.get("date") {
        match date.as_str() {
            Some(date) if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok() => {}
            Some(_) => violations.push(format!(
                "{}.date: does not conform to the \"date\" format",
                path
            )),
            None => violations.push(format!("{}.date: is not of a type(s) string", path)),
        }
    }

    if let Some(user_id) = object.get("user_id") {
        match user_id.as_u64() {
            Some(id) if id > u64::from(u32::MAX) => violations.push(format!(
                "{}.user_id: must be less than or equal to {}",
                path,
                u32::MAX
            )),
            Some(id) if id >= 1 => {}
            Some(_) => violations.push(format!(
                "{}.user_id: must be greater than or equal to 1",
                path
            )),
            None if user_id.is_i64() => violations.push(format!(
                "{}.user_id: must be greater than or equal to 1",
                path
            )),
            None => violations.push(format!("{}.user_id: is not of a type(s) integer", path)),
        }
    }

    check_enum(path, object, "user_type", &USER_TYPES, violations);
    check_enum(path, object, "type", &TRANSACTION_TYPES, violations);

    if let Some(operation) = object.get("operation") {
        validate_operation(&format!("{}.operation", path), operation, violations);
    }
}

fn validate_operation(path: &str, operation: &Value, violations: &mut Vec<String>) {
    let object = match operation.as_object() {
        Some(object) => object,
        None => {
            violations.push(format!("{}: is not of a type(s) object", path));
            return;
        }
    };

    for field in ["amount", "currency"] {
        if !object.contains_key(field) {
            violations.push(format!("{}: requires property \"{}\"", path, field));
        }
    }

    if let Some(amount) = object.get("amount") {
        match amount {
            Value::Number(number) => {
                // Compared as decimals: 0.01 must be accepted, whatever f64 thinks of it.
                match Decimal::from_str(&number.to_string())
                    .or_else(|_| Decimal::from_scientific(&number.to_string()))
                {
                    Ok(amount) if amount >= MIN_AMOUNT => {}
                    Ok(_) => violations.push(format!(
                        "{}.amount: must be greater than or equal to {}",
                        path, MIN_AMOUNT
                    )),
                    Err(_) => violations.push(format!("{}.amount: is out of range", path)),
                }
            }
            _ => violations.push(format!("{}.amount: is not of a type(s) number", path)),
        }
    }

    check_enum(path, object, "currency", &CURRENCIES, violations);
}

fn check_enum(
    path: &str,
    object: &Map<String, Value>,
    field: &str,
    allowed: &[&str],
    violations: &mut Vec<String>,
) {
    if let Some(value) = object.get(field) {
        if !value.as_str().map_or(false, |v| allowed.contains(&v)) {
            violations.push(format!(
                "{}.{}: is not one of enum values: {}",
                path,
                field,
                allowed.join(",")
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::validate;
    use serde_json::json;

    #[test]
    fn test_validate_ok() {
        let document = json!([
            { "date": "2016-01-05", "user_id": 1, "user_type": "natural", "type": "cash_in",
              "operation": { "amount": 200.00, "currency": "EUR" } },
            { "date": "2016-01-06", "user_id": 2, "user_type": "juridical", "type": "cash_out",
              "operation": { "amount": 0.01, "currency": "EUR" } }
        ]);
        assert_eq!(Ok(()), validate(&document));
    }

    #[test]
    fn test_validate_not_an_array() {
        assert_eq!(
            Err(vec!["instance: is not of a type(s) array".to_string()]),
            validate(&json!({ "date": "2016-01-05" }))
        );
    }

    #[test]
    // All the violations are collected, in document order.
    fn test_validate_collects_violations() {
        let document = json!([
            { "date": "2016-01-05", "user_id": 1, "user_type": "natural", "type": "cash_in",
              "operation": { "amount": 200.00, "currency": "EUR" } },
            { "date": "05/01/2016", "user_id": 0, "user_type": "robot", "type": "cash_in",
              "operation": { "amount": 0.001, "currency": "USD" } },
            { "user_id": "1", "user_type": "natural", "type": "refund", "operation": {} },
            42
        ]);

        let want: Vec<String> = vec![
            "instance[1].date: does not conform to the \"date\" format",
            "instance[1].user_id: must be greater than or equal to 1",
            "instance[1].user_type: is not one of enum values: natural,juridical",
            "instance[1].operation.amount: must be greater than or equal to 0.01",
            "instance[1].operation.currency: is not one of enum values: EUR",
            "instance[2]: requires property \"date\"",
            "instance[2].user_id: is not of a type(s) integer",
            "instance[2].type: is not one of enum values: cash_in,cash_out",
            "instance[2].operation: requires property \"amount\"",
            "instance[2].operation: requires property \"currency\"",
            "instance[3]: is not of a type(s) object",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        assert_eq!(Err(want), validate(&document));
    }

    #[test]
    fn test_validate_wrong_types() {
        let document = json!([
            { "date": 20160105, "user_id": -3, "user_type": "natural", "type": "cash_in",
              "operation": { "amount": "200", "currency": "EUR" } },
            { "date": "2016-01-05", "user_id": 1, "user_type": "natural", "type": "cash_in",
              "operation": 200 }
        ]);

        let want: Vec<String> = vec![
            "instance[0].date: is not of a type(s) string",
            "instance[0].user_id: must be greater than or equal to 1",
            "instance[0].operation.amount: is not of a type(s) number",
            "instance[1].operation: is not of a type(s) object",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        assert_eq!(Err(want), validate(&document));
    }
}
