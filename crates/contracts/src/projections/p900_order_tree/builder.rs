use super::dto::{OrderTree, OrderView, ProductStatus, ProductView};
use super::profile::{AggregationProfile, RetainRule, SupplySource, VerificationSource};
use crate::domain::a001_order::aggregate::{Order, Product};
use crate::domain::a002_production_followup::aggregate as production;
use crate::domain::a003_label_receipt::aggregate as labels;
use crate::domain::a004_verification::aggregate as verification;
use crate::domain::a006_goods_return::aggregate as returns;
use crate::domain::common::ProductKey;
use crate::shared::field_mapping::FieldMapping;
use crate::shared::snapshot::StoreSnapshot;
use indexmap::IndexMap;

/// Построить дерево по снимку хранилища.
///
/// Чистая функция: тот же снимок и профиль всегда дают то же дерево.
pub fn aggregate(
    snapshot: &StoreSnapshot,
    profile: &AggregationProfile,
    mapping: &FieldMapping,
) -> OrderTree {
    OrderTreeBuilder::new(snapshot, profile, mapping).build()
}

/// Построитель дерева «компания → заказ → позиция»
pub struct OrderTreeBuilder<'a> {
    snapshot: &'a StoreSnapshot,
    profile: &'a AggregationProfile,
    mapping: &'a FieldMapping,
}

impl<'a> OrderTreeBuilder<'a> {
    pub fn new(
        snapshot: &'a StoreSnapshot,
        profile: &'a AggregationProfile,
        mapping: &'a FieldMapping,
    ) -> Self {
        Self {
            snapshot,
            profile,
            mapping,
        }
    }

    pub fn build(&self) -> OrderTree {
        let mut tree = OrderTree::default();
        let mut skipped_duplicates = 0usize;

        for order in &self.snapshot.orders {
            let Some(view) = self.build_order(order) else {
                continue;
            };
            if !tree.insert(order.company_name(), view) {
                skipped_duplicates += 1;
                log::debug!(
                    "[{}/{}] duplicate order key `{}` under `{}`, keeping first",
                    self.profile.domain,
                    self.profile.name,
                    order.order_key(),
                    order.company_name()
                );
            }
        }

        log::debug!(
            "[{}/{}] aggregated {} orders in {} companies ({} duplicates skipped)",
            self.profile.domain,
            self.profile.name,
            tree.order_count(),
            tree.company_count(),
            skipped_duplicates
        );
        tree
    }

    /// Заказ без отобранных позиций в дерево не попадает
    fn build_order(&self, order: &Order) -> Option<OrderView> {
        let mut products = IndexMap::new();
        for product in &order.products {
            if products.contains_key(&product.id) {
                continue;
            }
            if let Some(view) = self.build_product(order, product) {
                products.insert(product.id.clone(), view);
            }
        }

        if products.is_empty() {
            return None;
        }
        Some(OrderView::new(order, products))
    }

    fn build_product(&self, order: &Order, product: &Product) -> Option<ProductView> {
        let key = ProductKey::new(order.id.as_str(), product.id.as_str()).storage_key();

        // Порядок важен: каждое значение опирается на предыдущие
        let (produced, used_labels, has_supply) = self.supply(order, product, &key);
        let received_labels = if self.profile.use_label_receipts {
            self.snapshot
                .label_receipts
                .get(&key)
                .map(|r| r.received_quantity.max(0))
                .unwrap_or(0)
        } else {
            0
        };
        let remaining_labels = labels::remaining_labels(received_labels, used_labels);
        let (verified, has_verification) = self.verification(order, product);
        let remaining_quantity = produced.saturating_sub(verified).max(0);
        let status = ProductStatus::from_remaining(remaining_quantity);

        let retained = match self.profile.retain {
            RetainRule::MovedToPurchaseWithSupply => product.move_to_purchase && has_supply,
            RetainRule::HasVerification => has_verification,
            RetainRule::HasAnyActivity => has_supply || has_verification,
        };
        if !retained {
            return None;
        }

        Some(ProductView {
            product_id: product.id.clone(),
            name: product.display_name(self.mapping),
            category: product.category(self.mapping),
            size: product.size().map(str::to_string),
            order_quantity: product.order_quantity,
            produced,
            received_labels,
            used_labels,
            remaining_labels,
            verified,
            remaining_quantity,
            in_stock: verified,
            status,
            label_status: ProductStatus::from_remaining(remaining_labels),
        })
    }

    /// (произведено, израсходовано этикеток, есть ли записи)
    fn supply(&self, order: &Order, product: &Product, key: &str) -> (i64, i64, bool) {
        match self.profile.supply {
            SupplySource::Production => match self.snapshot.production.get(key) {
                Some(entries) if !entries.is_empty() => (
                    production::produced_quantity(entries),
                    production::used_labels(entries),
                    true,
                ),
                _ => (0, 0, false),
            },
            SupplySource::GoodsReturned => match self.snapshot.goods_returned.get(&order.id) {
                Some(entries) if entries.iter().any(|e| e.product_id == product.id) => (
                    returns::returned_quantity(entries, &product.id, self.mapping),
                    0,
                    true,
                ),
                _ => (0, 0, false),
            },
        }
    }

    /// (проверено, есть ли записи)
    fn verification(&self, order: &Order, product: &Product) -> (i64, bool) {
        let source = match self.profile.verification {
            VerificationSource::Inventory => &self.snapshot.inventory_verified,
            VerificationSource::Stocks => &self.snapshot.stocks_verified,
        };
        match source.get(&order.id) {
            Some(records) if records.iter().any(|r| r.product_id == product.id) => (
                verification::verified_quantity(records, &product.id, self.mapping),
                true,
            ),
            _ => (0, false),
        }
    }
}
