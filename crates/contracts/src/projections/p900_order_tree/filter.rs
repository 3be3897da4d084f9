use super::dto::{OrderTree, OrderView, ProductStatus};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Фильтры списка; пустой фильтр пропускает всё.
///
/// Условия объединяются через И. Категория и размер проверяются на уровне
/// заказа: заказ проходит, если подходит хотя бы одна его позиция.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Подстрока в названии компании, номере заказа или контактном лице
    pub search: String,
    pub category: Option<String>,
    pub size: Option<String>,
    pub status: Option<ProductStatus>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.search_term().is_none()
            && active(&self.category).is_none()
            && active(&self.size).is_none()
            && self.status.is_none()
    }

    fn search_term(&self) -> Option<String> {
        let term = self.search.trim();
        (!term.is_empty()).then(|| term.to_lowercase())
    }

    /// Подходит ли заказ под все активные условия
    pub fn matches_order(&self, company: &str, order: &OrderView) -> bool {
        self.matches_with(self.search_term().as_deref(), company, order)
    }

    fn matches_with(&self, term: Option<&str>, company: &str, order: &OrderView) -> bool {
        if let Some(term) = term {
            let hit = contains_ci(company, term)
                || contains_ci(&order.order_key, term)
                || order.contact_name().is_some_and(|name| contains_ci(name, term));
            if !hit {
                return false;
            }
        }

        if let Some(category) = active(&self.category) {
            let any = order
                .products
                .values()
                .any(|p| p.category.as_deref() == Some(category));
            if !any {
                return false;
            }
        }

        if let Some(size) = active(&self.size) {
            let any = order.products.values().any(|p| p.size.as_deref() == Some(size));
            if !any {
                return false;
            }
        }

        if let Some(status) = self.status {
            if order.status != status {
                return false;
            }
        }

        true
    }

    /// Новое дерево только с подходящими заказами; исходное не меняется.
    ///
    /// Компании без подходящих заказов убираются, порядок сохраняется.
    pub fn apply(&self, tree: &OrderTree) -> OrderTree {
        let term = self.search_term();
        let mut companies = IndexMap::new();

        for (company, orders) in &tree.companies {
            let kept: IndexMap<String, OrderView> = orders
                .iter()
                .filter(|(_, order)| self.matches_with(term.as_deref(), company, order))
                .map(|(key, order)| (key.clone(), order.clone()))
                .collect();
            if !kept.is_empty() {
                companies.insert(company.clone(), kept);
            }
        }

        OrderTree { companies }
    }
}

fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn contains_ci(haystack: &str, lowered_needle: &str) -> bool {
    haystack.to_lowercase().contains(lowered_needle)
}

/// Значения для выпадающих списков фильтра
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub categories: Vec<String>,
    pub sizes: Vec<String>,
}

impl FilterOptions {
    /// Уникальные категории и размеры в порядке первого появления
    pub fn collect(tree: &OrderTree) -> Self {
        let mut categories = IndexSet::new();
        let mut sizes = IndexSet::new();
        for (_, order) in tree.orders() {
            for product in order.products.values() {
                if let Some(category) = &product.category {
                    categories.insert(category.clone());
                }
                if let Some(size) = &product.size {
                    sizes.insert(size.clone());
                }
            }
        }
        Self {
            categories: categories.into_iter().collect(),
            sizes: sizes.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_order::aggregate::Contact;
    use crate::projections::p900_order_tree::dto::{OrderTotals, ProductView};

    fn product(id: &str, category: Option<&str>, size: &str, remaining: i64) -> ProductView {
        ProductView {
            product_id: id.to_string(),
            name: id.to_string(),
            category: category.map(str::to_string),
            size: Some(size.to_string()),
            order_quantity: 0,
            produced: remaining,
            received_labels: 0,
            used_labels: 0,
            remaining_labels: 0,
            verified: 0,
            remaining_quantity: remaining,
            in_stock: 0,
            status: ProductStatus::from_remaining(remaining),
            label_status: ProductStatus::Complete,
        }
    }

    fn order(key: &str, contact: &str, products: Vec<ProductView>) -> OrderView {
        let status = if products.iter().any(|p| p.status == ProductStatus::InProduction) {
            ProductStatus::InProduction
        } else {
            ProductStatus::Complete
        };
        OrderView {
            order_id: key.to_string(),
            order_key: key.to_string(),
            contact: Contact {
                contact_name: Some(contact.to_string()),
                ..Default::default()
            },
            totals: OrderTotals::of_products(&products),
            products: products.into_iter().map(|p| (p.product_id.clone(), p)).collect(),
            status,
        }
    }

    fn sample() -> OrderTree {
        let mut tree = OrderTree::default();
        tree.insert(
            "Acme Foods",
            order(
                "IML-1",
                "Ravi",
                vec![
                    product("a", Some("Tub"), "500ml", 10),
                    product("b", Some("Lid"), "250ml", 0),
                ],
            ),
        );
        tree.insert("Acme Foods", order("IML-2", "Ravi", vec![product("c", Some("Lid"), "1L", 0)]));
        tree.insert("Bright Dairy", order("IML-3", "Meera", vec![product("d", None, "500ml", 0)]));
        tree
    }

    fn keys(tree: &OrderTree) -> Vec<String> {
        tree.orders().map(|(_, o)| o.order_key.clone()).collect()
    }

    #[test]
    fn test_empty_criteria_returns_equal_tree() {
        let tree = sample();
        let criteria = FilterCriteria::default();
        assert!(criteria.is_empty());
        assert_eq!(criteria.apply(&tree), tree);
    }

    #[test]
    fn test_search_is_case_insensitive_over_company_order_and_contact() {
        let tree = sample();
        let by_company = FilterCriteria { search: "bright".into(), ..Default::default() };
        let by_order = FilterCriteria { search: "iml-2".into(), ..Default::default() };
        let by_contact = FilterCriteria { search: "MEE".into(), ..Default::default() };
        assert_eq!(keys(&by_company.apply(&tree)), vec!["IML-3"]);
        assert_eq!(keys(&by_order.apply(&tree)), vec!["IML-2"]);
        assert_eq!(keys(&by_contact.apply(&tree)), vec!["IML-3"]);
    }

    #[test]
    fn test_category_matches_any_product_and_keeps_all_rows() {
        let tree = sample();
        let criteria = FilterCriteria { category: Some("Lid".into()), ..Default::default() };
        let result = criteria.apply(&tree);
        assert_eq!(keys(&result), vec!["IML-1", "IML-2"]);
        assert_eq!(result.find_order("Acme Foods", "IML-1").unwrap().products.len(), 2);
        assert_eq!(result.company_count(), 1);
    }

    #[test]
    fn test_predicates_combine_with_and() {
        let tree = sample();
        let criteria = FilterCriteria {
            size: Some("500ml".into()),
            status: Some(ProductStatus::Complete),
            ..Default::default()
        };
        assert_eq!(keys(&criteria.apply(&tree)), vec!["IML-3"]);

        let none = FilterCriteria {
            search: "acme".into(),
            size: Some("1L".into()),
            status: Some(ProductStatus::InProduction),
            ..Default::default()
        };
        assert!(none.apply(&tree).is_empty());
    }

    #[test]
    fn test_result_is_subset_and_input_untouched() {
        let tree = sample();
        let before = tree.clone();
        let result = FilterCriteria { search: "a".into(), ..Default::default() }.apply(&tree);
        for (company, order) in result.orders() {
            assert_eq!(tree.find_order(company, &order.order_key), Some(order));
        }
        assert_eq!(tree, before);
    }

    #[test]
    fn test_blank_selects_are_inactive() {
        let tree = sample();
        let criteria = FilterCriteria {
            search: "   ".into(),
            category: Some(String::new()),
            ..Default::default()
        };
        assert!(criteria.is_empty());
        assert_eq!(criteria.apply(&tree), tree);
    }

    #[test]
    fn test_filter_options_first_seen_order() {
        let options = FilterOptions::collect(&sample());
        assert_eq!(options.categories, vec!["Tub", "Lid"]);
        assert_eq!(options.sizes, vec!["500ml", "250ml", "1L"]);
    }
}
