//! Нестрогие десериализаторы для записей, созданных формами браузера.
//!
//! Формы сохраняют числа строками (`"100"`), id числами (`1712`) и иногда
//! оставляют поля `null`. Помощники принимают все эти формы и не отбрасывают
//! запись целиком.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Целое количество из числа, строки с числом или `null` (0)
pub fn quantity_from_value(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.round() as i64))
            .unwrap_or(0),
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed
                .parse::<i64>()
                .ok()
                .or_else(|| {
                    trimmed
                        .parse::<f64>()
                        .ok()
                        .filter(|f| f.is_finite())
                        .map(|f| f.round() as i64)
                })
                .unwrap_or(0)
        }
        _ => 0,
    }
}

/// Сумма количеств из хранилища: отрицательные значения считаются нулём,
/// при переполнении результат упирается в `i64::MAX`
pub fn sum_quantities<I: IntoIterator<Item = i64>>(quantities: I) -> i64 {
    quantities
        .into_iter()
        .fold(0i64, |total, q| total.saturating_add(q.max(0)))
}

/// Денежная сумма из числа или строки; всё остальное даёт 0.0
pub fn amount_from_value(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Идентификатор из строки или числа
pub fn id_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Текст из строки или числа; `null` и прочее дают `None`
pub fn text_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub fn quantity<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(quantity_from_value(&value))
}

pub fn amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(amount_from_value(&value))
}

pub fn id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    id_from_value(&value).ok_or_else(|| D::Error::custom("expected string or number id"))
}

pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(text_from_value(&value))
}

/// `true`, `"true"`, `1` считаются включённым флагом
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::String(s) => s.trim().eq_ignore_ascii_case("true"),
        Value::Number(n) => n.as_i64() == Some(1),
        _ => false,
    })
}

/// Список, в котором битые элементы пропускаются, а не валят весь родительский объект
pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        other => {
            log::warn!("expected array, got {}; treating as empty", kind_of(&other));
            Vec::new()
        }
    };
    Ok(parse_each(items, "nested"))
}

/// Разбирает элементы по одному: битая запись логируется и пропускается
pub fn parse_each<T: DeserializeOwned>(items: Vec<Value>, what: &str) -> Vec<T> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<T>(item) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                log::warn!("Skipping malformed {} record #{}: {}", what, index, e);
                None
            }
        })
        .collect()
}

pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_quantity_accepts_strings_and_numbers() {
        assert_eq!(quantity_from_value(&json!(100)), 100);
        assert_eq!(quantity_from_value(&json!("  42 ")), 42);
        assert_eq!(quantity_from_value(&json!("12.6")), 13);
        assert_eq!(quantity_from_value(&json!(7.4)), 7);
        assert_eq!(quantity_from_value(&json!(null)), 0);
        assert_eq!(quantity_from_value(&json!("abc")), 0);
    }

    #[test]
    fn test_sum_quantities_ignores_negatives_and_saturates() {
        assert_eq!(sum_quantities([10, -5, 3]), 13);
        assert_eq!(sum_quantities([i64::MAX, 1, 7]), i64::MAX);
        assert_eq!(sum_quantities(std::iter::empty()), 0);
    }

    #[test]
    fn test_amount_rejects_garbage() {
        assert_eq!(amount_from_value(&json!("1500.50")), 1500.5);
        assert_eq!(amount_from_value(&json!("NaN")), 0.0);
        assert_eq!(amount_from_value(&json!(false)), 0.0);
    }

    #[test]
    fn test_parse_each_skips_bad_items() {
        #[derive(Deserialize)]
        struct Item {
            #[allow(dead_code)]
            id: String,
        }

        let items = vec![json!({"id": "a"}), json!(5), json!({"id": "b"})];
        let parsed: Vec<Item> = parse_each(items, "test");
        assert_eq!(parsed.len(), 2);
    }
}
