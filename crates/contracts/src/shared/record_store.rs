//! Хранилище «ключ → JSON» и защитные помощники чтения и записи.
//!
//! Чтение не падает: отсутствующий или неразбираемый ключ даёт пустую
//! коллекцию, битая запись внутри коллекции пропускается. Запись повторяет
//! цикл форм браузера: коллекция перечитывается целиком, меняется в памяти
//! и записывается обратно (побеждает последняя запись).

use super::error::StoreError;
use crate::domain::common::lenient::{self, kind_of};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Хранилище «строковый ключ → JSON-строка» (localStorage или его аналог)
pub trait RecordStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str);
}

/// Хранилище в памяти для тестов и запуска вне браузера
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Положить значение как есть, без проверки JSON
    pub fn with_raw(mut self, key: &str, raw: &str) -> Self {
        self.items.insert(key.to_string(), raw.to_string());
        self
    }

    pub fn with_json(mut self, key: &str, value: &Value) -> Self {
        self.items.insert(key.to_string(), value.to_string());
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl RecordStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.items.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) {
        self.items.remove(key);
    }
}

// ============================================================================
// Чтение
// ============================================================================

/// Значение ключа как JSON; отсутствие или ошибка разбора дают `None`
pub fn read_value<S: RecordStore + ?Sized>(store: &S, key: &str) -> Option<Value> {
    let raw = store.get(key)?;
    if raw.trim().is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Stored key `{}` is not valid JSON, treating as empty: {}", key, e);
            None
        }
    }
}

/// Коллекция-массив: `[record, ...]`
pub fn read_list<T, S>(store: &S, key: &str) -> Vec<T>
where
    T: DeserializeOwned,
    S: RecordStore + ?Sized,
{
    match read_value(store, key) {
        Some(Value::Array(items)) => lenient::parse_each(items, key),
        Some(other) => {
            log::warn!(
                "Stored key `{}` holds {} instead of array, treating as empty",
                key,
                kind_of(&other)
            );
            Vec::new()
        }
        None => Vec::new(),
    }
}

/// Коллекция-словарь списков: `{ "group": [record, ...], ... }`
pub fn read_keyed_lists<T, S>(store: &S, key: &str) -> IndexMap<String, Vec<T>>
where
    T: DeserializeOwned,
    S: RecordStore + ?Sized,
{
    let mut result = IndexMap::new();
    for (group, value) in read_object(store, key) {
        match value {
            Value::Array(items) => {
                result.insert(group, lenient::parse_each(items, key));
            }
            other => log::warn!(
                "Skipping `{}` entry `{}`: expected array, got {}",
                key,
                group,
                kind_of(&other)
            ),
        }
    }
    result
}

/// Коллекция-словарь записей: `{ "group": record, ... }`
pub fn read_keyed<T, S>(store: &S, key: &str) -> IndexMap<String, T>
where
    T: DeserializeOwned,
    S: RecordStore + ?Sized,
{
    let mut result = IndexMap::new();
    for (group, value) in read_object(store, key) {
        match serde_json::from_value::<T>(value) {
            Ok(record) => {
                result.insert(group, record);
            }
            Err(e) => log::warn!("Skipping `{}` entry `{}`: {}", key, group, e),
        }
    }
    result
}

fn read_object<S: RecordStore + ?Sized>(store: &S, key: &str) -> Map<String, Value> {
    match read_value(store, key) {
        Some(Value::Object(map)) => map,
        Some(other) => {
            log::warn!(
                "Stored key `{}` holds {} instead of object, treating as empty",
                key,
                kind_of(&other)
            );
            Map::new()
        }
        None => Map::new(),
    }
}

// ============================================================================
// Запись (read-modify-write)
// ============================================================================

/// Перечитать ключ, изменить значение и записать обратно целиком.
///
/// Отсутствующий ключ начинается с `empty`. Неразбираемое значение не
/// перезаписывается: возвращается [`StoreError::Corrupted`].
pub fn update_value<S, F>(store: &mut S, key: &str, empty: Value, mutate: F) -> Result<(), StoreError>
where
    S: RecordStore + ?Sized,
    F: FnOnce(&mut Value) -> Result<(), StoreError>,
{
    let mut value = match store.get(key) {
        None => empty,
        Some(raw) if raw.trim().is_empty() => empty,
        Some(raw) => serde_json::from_str::<Value>(&raw).map_err(|_| StoreError::Corrupted {
            key: key.to_string(),
        })?,
    };

    mutate(&mut value)?;

    let serialized = serde_json::to_string(&value).map_err(|e| StoreError::Serialize {
        key: key.to_string(),
        reason: e.to_string(),
    })?;
    store.set(key, serialized)
}

/// Добавить запись в коллекцию-массив
pub fn push_to_list<S: RecordStore + ?Sized>(
    store: &mut S,
    key: &str,
    record: Value,
) -> Result<(), StoreError> {
    update_value(store, key, Value::Array(Vec::new()), |value| {
        let items = value.as_array_mut().ok_or_else(|| StoreError::UnexpectedShape {
            key: key.to_string(),
            expected: "array",
        })?;
        items.push(record);
        Ok(())
    })
}

/// Добавить запись в список `group` коллекции-словаря
pub fn push_to_keyed_list<S: RecordStore + ?Sized>(
    store: &mut S,
    key: &str,
    group: &str,
    record: Value,
) -> Result<(), StoreError> {
    update_value(store, key, Value::Object(Map::new()), |value| {
        let map = value.as_object_mut().ok_or_else(|| StoreError::UnexpectedShape {
            key: key.to_string(),
            expected: "object",
        })?;
        let entry = map
            .entry(group.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        let items = entry.as_array_mut().ok_or_else(|| StoreError::UnexpectedShape {
            key: key.to_string(),
            expected: "array of records per group",
        })?;
        items.push(record);
        Ok(())
    })
}

/// Заменить запись `group` коллекции-словаря (последняя запись побеждает)
pub fn put_keyed<S: RecordStore + ?Sized>(
    store: &mut S,
    key: &str,
    group: &str,
    record: Value,
) -> Result<(), StoreError> {
    update_value(store, key, Value::Object(Map::new()), |value| {
        let map = value.as_object_mut().ok_or_else(|| StoreError::UnexpectedShape {
            key: key.to_string(),
            expected: "object",
        })?;
        map.insert(group.to_string(), record);
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        qty: i64,
    }

    #[test]
    fn test_missing_and_broken_keys_read_as_empty() {
        let store = MemoryStore::new().with_raw("broken", "{not json");
        let missing: Vec<Row> = read_list(&store, "absent");
        let broken: Vec<Row> = read_list(&store, "broken");
        assert!(missing.is_empty());
        assert!(broken.is_empty());
    }

    #[test]
    fn test_wrong_shape_reads_as_empty() {
        let store = MemoryStore::new().with_json("k", &json!({"a": 1}));
        let rows: Vec<Row> = read_list(&store, "k");
        assert!(rows.is_empty());
    }

    #[test]
    fn test_keyed_lists_skip_bad_groups_and_records() {
        let store = MemoryStore::new().with_json(
            "k",
            &json!({
                "1_a": [{"qty": 1}, {"qty": "x"}, {"qty": 3}],
                "1_b": "oops",
            }),
        );
        let groups: IndexMap<String, Vec<Row>> = read_keyed_lists(&store, "k");
        assert_eq!(groups.len(), 1);
        assert_eq!(groups["1_a"], vec![Row { qty: 1 }, Row { qty: 3 }]);
    }

    #[test]
    fn test_push_preserves_other_groups() {
        let mut store = MemoryStore::new().with_json("k", &json!({"x": [{"qty": 1}]}));
        push_to_keyed_list(&mut store, "k", "y", json!({"qty": 2})).unwrap();
        push_to_keyed_list(&mut store, "k", "x", json!({"qty": 5})).unwrap();
        let value = read_value(&store, "k").unwrap();
        assert_eq!(value, json!({"x": [{"qty": 1}, {"qty": 5}], "y": [{"qty": 2}]}));
    }

    #[test]
    fn test_corrupted_value_is_not_overwritten() {
        let mut store = MemoryStore::new().with_raw("k", "[1, 2");
        let err = push_to_list(&mut store, "k", json!({"qty": 1})).unwrap_err();
        assert_eq!(err, StoreError::Corrupted { key: "k".to_string() });
        assert_eq!(store.get("k").as_deref(), Some("[1, 2"));
    }

    #[test]
    fn test_put_keyed_replaces_record() {
        let mut store = MemoryStore::new();
        put_keyed(&mut store, "k", "1_a", json!({"qty": 1})).unwrap();
        put_keyed(&mut store, "k", "1_a", json!({"qty": 9})).unwrap();
        let rows: IndexMap<String, Row> = read_keyed(&store, "k");
        assert_eq!(rows["1_a"], Row { qty: 9 });
    }
}
