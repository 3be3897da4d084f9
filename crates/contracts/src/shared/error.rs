use thiserror::Error;

/// Ошибки записи в хранилище
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Failed to serialize `{key}`: {reason}")]
    Serialize { key: String, reason: String },

    #[error("Failed to write `{key}`: {reason}")]
    Write { key: String, reason: String },

    /// Сохранённое значение не разбирается как JSON; перезаписывать его нельзя
    #[error("Stored value under `{key}` is corrupted, refusing to overwrite it")]
    Corrupted { key: String },

    #[error("Stored value under `{key}` has unexpected shape: expected {expected}")]
    UnexpectedShape { key: String, expected: &'static str },
}

/// Ошибки пользовательского ввода; запись при них не выполняется
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Billing amount must be greater than zero (got {0})")]
    NonPositiveAmount(f64),

    #[error("Field `{0}` must not be empty")]
    EmptyField(&'static str),

    #[error("Quantity `{field}` must not be negative (got {value})")]
    NegativeQuantity { field: &'static str, value: i64 },

    #[error("Quantity `{field}` must be greater than zero (got {value})")]
    NonPositiveQuantity { field: &'static str, value: i64 },

    #[error("Order `{0}` was not found")]
    UnknownOrder(String),
}

/// Результат операции записи: либо ввод отклонён, либо хранилище отказало
#[derive(Debug, Error, Clone, PartialEq)]
pub enum WriteError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
