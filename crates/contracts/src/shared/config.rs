use super::field_mapping::FieldMapping;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct DashboardConfig {
    pub keys: StoreKeys,
    pub fields: FieldMapping,
}

/// Имена ключей хранилища, под которыми формы сохраняют коллекции
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct StoreKeys {
    pub orders: String,
    pub production_followups: String,
    pub label_receipts: String,
    pub inventory_verified: String,
    pub sales_billing: String,
    pub goods_returned: String,
    pub stocks_verified: String,
}

impl Default for StoreKeys {
    fn default() -> Self {
        Self {
            orders: "orders".to_string(),
            production_followups: "productionFollowUps".to_string(),
            label_receipts: "labelQuantityReceived".to_string(),
            inventory_verified: "inventoryFollowUps".to_string(),
            sales_billing: "salesBilling".to_string(),
            goods_returned: "goodsReturned".to_string(),
            stocks_verified: "stocksVerified".to_string(),
        }
    }
}

/// Конфигурация по умолчанию, встроенная в бинарник
pub const DEFAULT_CONFIG: &str = r#"
[keys]
orders = "orders"
production_followups = "productionFollowUps"
label_receipts = "labelQuantityReceived"
inventory_verified = "inventoryFollowUps"
sales_billing = "salesBilling"
goods_returned = "goodsReturned"
stocks_verified = "stocksVerified"

[fields]
product_name = ["imlName", "productName", "name"]
category = ["category", "imlType", "productCategory"]
verified_quantity = ["finalQty", "quantityVerified"]
returned_quantity = ["returnedQuantity", "quantity"]
"#;

/// Загрузить конфигурацию из TOML-переопределения
///
/// Секции и ключи, которых нет в переопределении, остаются по умолчанию.
/// Без переопределения используется встроенная конфигурация.
pub fn load_config(override_toml: Option<&str>) -> anyhow::Result<DashboardConfig> {
    match override_toml.map(str::trim).filter(|s| !s.is_empty()) {
        Some(contents) => {
            log::info!("Loading dashboard config from override");
            let config: DashboardConfig = toml::from_str(contents)?;
            Ok(config)
        }
        None => {
            log::debug!("Using default embedded configuration");
            let config: DashboardConfig = toml::from_str(DEFAULT_CONFIG)?;
            Ok(config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = load_config(None).unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.keys.production_followups, "productionFollowUps");
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config = load_config(Some(
            r#"
            [keys]
            orders = "imlOrders"

            [fields]
            verified_quantity = ["quantityVerified"]
            "#,
        ))
        .unwrap();
        assert_eq!(config.keys.orders, "imlOrders");
        assert_eq!(config.keys.sales_billing, "salesBilling");
        assert_eq!(config.fields.verified_quantity, vec!["quantityVerified"]);
        assert_eq!(config.fields.product_name, FieldMapping::default().product_name);
    }

    #[test]
    fn test_invalid_override_is_an_error() {
        assert!(load_config(Some("[keys\norders = ")).is_err());
    }

    #[test]
    fn test_blank_override_falls_back() {
        assert_eq!(load_config(Some("   ")).unwrap(), DashboardConfig::default());
    }
}
