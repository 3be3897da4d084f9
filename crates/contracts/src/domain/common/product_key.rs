use serde::{Deserialize, Serialize};

/// Составной ключ позиции заказа: `orderId_productId`.
///
/// Под этим ключом формы производства хранят журнал выпуска и приход этикеток.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductKey {
    pub order_id: String,
    pub product_id: String,
}

impl ProductKey {
    pub fn new(order_id: impl Into<String>, product_id: impl Into<String>) -> Self {
        Self {
            order_id: order_id.into(),
            product_id: product_id.into(),
        }
    }

    /// Ключ в том виде, в котором он лежит в хранилище
    pub fn storage_key(&self) -> String {
        format!("{}_{}", self.order_id, self.product_id)
    }
}

impl std::fmt::Display for ProductKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.order_id, self.product_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_key_format() {
        let key = ProductKey::new("1712", "p-3");
        assert_eq!(key.storage_key(), "1712_p-3");
        assert_eq!(key.to_string(), "1712_p-3");
    }
}
