//! Детали выбранного заказа и формы учёта по его позициям.

use super::product_table::{ProductTable, TotalsCells};
use crate::layout::global_context::{use_app_context, Page};
use crate::shared::components::invalid_access::InvalidAccess;
use crate::shared::components::page_header::PageHeader;
use crate::shared::list_utils::parse_quantity;
use crate::shared::storage;
use contracts::domain::a002_production_followup::{aggregate::ProductionEntry, repository as production};
use contracts::domain::a003_label_receipt::{aggregate::LabelReceipt, repository as labels};
use contracts::domain::a004_verification::{aggregate::VerificationRecord, repository as verification};
use contracts::domain::a006_goods_return::{aggregate::ReturnEntry, repository as returns};
use contracts::domain::common::ProductKey;
use contracts::projections::p900_order_tree::profile::SupplySource;
use contracts::projections::p900_order_tree::{aggregate, AggregationProfile, OrderTotals};
use contracts::shared::config::DashboardConfig;
use contracts::shared::navigation::{require_context, OrderSelection};
use contracts::shared::record_store::RecordStore;
use leptos::prelude::*;

/// Что записывает форма
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Production,
    LabelsReceived,
    Verification,
    GoodsReturned,
}

impl ActivityKind {
    pub fn label(&self) -> &'static str {
        match self {
            ActivityKind::Production => "Production output",
            ActivityKind::LabelsReceived => "Labels received",
            ActivityKind::Verification => "Verified quantity",
            ActivityKind::GoodsReturned => "Goods returned",
        }
    }

    /// Доступные записи для страницы профиля
    pub fn for_profile(profile: &AggregationProfile) -> Vec<ActivityKind> {
        let mut kinds = Vec::new();
        if profile.use_label_receipts {
            kinds.push(ActivityKind::Production);
            kinds.push(ActivityKind::LabelsReceived);
        }
        kinds.push(ActivityKind::Verification);
        if profile.supply == SupplySource::GoodsReturned {
            kinds.push(ActivityKind::GoodsReturned);
        }
        kinds
    }
}

/// Значения полей формы как их ввёл пользователь
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityInput {
    pub kind: ActivityKind,
    pub product_id: String,
    pub quantity: String,
    pub rejected: String,
    pub wastage: String,
    pub reason: String,
}

fn quantity_field(input: &str, name: &str) -> Result<i64, String> {
    if input.trim().is_empty() {
        return Ok(0);
    }
    parse_quantity(input).ok_or_else(|| format!("{} must be a whole number", name))
}

/// Записать введённые данные в хранилище
pub fn save_activity<S: RecordStore + ?Sized>(
    store: &mut S,
    config: &DashboardConfig,
    profile: &AggregationProfile,
    order_id: &str,
    input: &ActivityInput,
) -> Result<(), String> {
    if input.product_id.trim().is_empty() {
        return Err("Select a product".to_string());
    }
    let quantity = parse_quantity(&input.quantity)
        .ok_or_else(|| "Quantity must be a whole number".to_string())?;
    let product = ProductKey::new(order_id, input.product_id.as_str());

    let result = match input.kind {
        ActivityKind::Production => {
            let rejected = quantity_field(&input.rejected, "Rejected")?;
            let wastage = quantity_field(&input.wastage, "Label wastage")?;
            let entry = ProductionEntry::new(quantity, rejected, wastage);
            production::append_production_entry(store, &config.keys, &product, &entry)
        }
        ActivityKind::LabelsReceived => {
            labels::record_label_receipt(store, &config.keys, &product, &LabelReceipt::new(quantity))
        }
        ActivityKind::Verification => {
            let target = profile.verification_target();
            let record =
                VerificationRecord::new(input.product_id.as_str(), target.quantity_field(), quantity);
            verification::record_verification(
                store,
                &config.keys,
                &config.fields,
                target,
                order_id,
                &record,
            )
        }
        ActivityKind::GoodsReturned => {
            let field = config
                .fields
                .returned_quantity
                .first()
                .map(String::as_str)
                .unwrap_or("returnedQuantity");
            let mut entry = ReturnEntry::new(input.product_id.as_str(), field, quantity);
            entry.reason = Some(input.reason.trim().to_string()).filter(|r| !r.is_empty());
            returns::record_goods_return(store, &config.keys, &config.fields, order_id, &entry)
        }
    };

    result.map_err(|e| {
        log::warn!("{} for {} rejected: {}", input.kind.label(), product, e);
        e.to_string()
    })
}

/// Свежий снимок выбранного заказа после записи
fn refresh_selection(
    config: &DashboardConfig,
    profile: &AggregationProfile,
    current: &OrderSelection,
) -> Option<OrderSelection> {
    let snapshot = storage::load_snapshot(&config.keys);
    let tree = aggregate(&snapshot, profile, &config.fields);
    let order = tree.find_order(&current.company_name, &current.order_key)?;
    let ids: Vec<&str> = current.products.iter().map(|p| p.product_id.as_str()).collect();
    Some(OrderSelection::with_products(&current.company_name, order, &ids))
}

#[component]
pub fn OrderDetails() -> impl IntoView {
    let ctx = use_app_context();

    move || match require_context(ctx.selection.get(), Page::OrderDetails.id()) {
        Ok(selection) => view! { <SelectionView selection /> }.into_any(),
        Err(e) => view! { <InvalidAccess message=e.to_string() /> }.into_any(),
    }
}

#[component]
fn SelectionView(selection: OrderSelection) -> impl IntoView {
    let ctx = use_app_context();
    let source = ctx.previous.get_untracked();
    let profile = source
        .profile()
        .unwrap_or_else(AggregationProfile::iml_inventory);
    let kinds = ActivityKind::for_profile(&profile);
    let show_labels = profile.use_label_receipts;
    let totals = OrderTotals::of_products(&selection.products);

    let title = format!("{} · {}", selection.company_name, selection.order_key);
    let products = selection.products.clone();
    let contact = &selection.contact;
    let contact_line = [contact.contact_name.as_deref(), contact.phone.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" · ");

    view! {
        <div class="page">
            <PageHeader
                title=title
                subtitle=contact_line
            >
                <button class="button button--secondary" on:click=move |_| ctx.go_back()>
                    {format!("Back to {}", source.title())}
                </button>
            </PageHeader>

            <div class="tree-summary">
                <TotalsCells totals />
            </div>

            <ProductTable products show_labels />

            <ActivityForm selection profile kinds />
        </div>
    }
}

#[component]
fn ActivityForm(
    selection: OrderSelection,
    profile: AggregationProfile,
    kinds: Vec<ActivityKind>,
) -> impl IntoView {
    let ctx = use_app_context();
    let first_kind = kinds.first().copied().unwrap_or(ActivityKind::Verification);
    let first_product = selection
        .products
        .first()
        .map(|p| p.product_id.clone())
        .unwrap_or_default();

    let (kind, set_kind) = signal(first_kind);
    let (product_id, set_product_id) = signal(first_product);
    let (quantity, set_quantity) = signal(String::new());
    let (rejected, set_rejected) = signal(String::new());
    let (wastage, set_wastage) = signal(String::new());
    let (reason, set_reason) = signal(String::new());
    let (error, set_error) = signal(None::<String>);

    let products = selection.products.clone();
    let selection = StoredValue::new(selection);
    let profile = StoredValue::new(profile);
    let kinds = StoredValue::new(kinds);

    let on_save = move |_| {
        let input = ActivityInput {
            kind: kind.get_untracked(),
            product_id: product_id.get_untracked(),
            quantity: quantity.get_untracked(),
            rejected: rejected.get_untracked(),
            wastage: wastage.get_untracked(),
            reason: reason.get_untracked(),
        };
        let config = ctx.config.get_value();
        let order_id = selection.with_value(|s| s.order_id.clone());
        let saved = storage::open_for_write()
            .map_err(|e| e.to_string())
            .and_then(|mut store| {
                profile.with_value(|p| save_activity(&mut store, &config, p, &order_id, &input))
            });
        match saved {
            Ok(()) => {
                set_error.set(None);
                set_quantity.set(String::new());
                set_rejected.set(String::new());
                set_wastage.set(String::new());
                set_reason.set(String::new());
                ctx.notify_saved();
                let refreshed = profile.with_value(|p| {
                    selection.with_value(|current| refresh_selection(&config, p, current))
                });
                if let Some(refreshed) = refreshed {
                    ctx.selection.set(Some(refreshed));
                }
            }
            Err(e) => set_error.set(Some(e)),
        }
    };

    view! {
        <div class="form-card">
            <h3>"Record activity"</h3>
            <div class="form-row">
                <select
                    class="filter-select"
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        let next = kinds.with_value(|all| {
                            all.iter().copied().find(|k| k.label() == value)
                        });
                        if let Some(next) = next {
                            set_kind.set(next);
                        }
                    }
                >
                    {kinds
                        .get_value()
                        .into_iter()
                        .map(|k| view! { <option value=k.label()>{k.label()}</option> })
                        .collect_view()}
                </select>

                <select
                    class="filter-select"
                    prop:value=move || product_id.get()
                    on:change=move |ev| set_product_id.set(event_target_value(&ev))
                >
                    {products
                        .into_iter()
                        .map(|p| view! { <option value=p.product_id.clone()>{p.name}</option> })
                        .collect_view()}
                </select>

                <input
                    type="text"
                    class="form-input"
                    placeholder="Quantity"
                    prop:value=move || quantity.get()
                    on:input=move |ev| set_quantity.set(event_target_value(&ev))
                />

                {move || (kind.get() == ActivityKind::Production).then(|| view! {
                    <input
                        type="text"
                        class="form-input"
                        placeholder="Rejected"
                        prop:value=move || rejected.get()
                        on:input=move |ev| set_rejected.set(event_target_value(&ev))
                    />
                    <input
                        type="text"
                        class="form-input"
                        placeholder="Label wastage"
                        prop:value=move || wastage.get()
                        on:input=move |ev| set_wastage.set(event_target_value(&ev))
                    />
                })}

                {move || (kind.get() == ActivityKind::GoodsReturned).then(|| view! {
                    <input
                        type="text"
                        class="form-input"
                        placeholder="Reason"
                        prop:value=move || reason.get()
                        on:input=move |ev| set_reason.set(event_target_value(&ev))
                    />
                })}

                <button class="button button--primary" on:click=on_save>"Save"</button>
            </div>
            {move || error.get().map(|e| view! { <div class="form-error">{e}</div> })}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::record_store::MemoryStore;
    use contracts::shared::snapshot::StoreSnapshot;
    use serde_json::json;

    fn input(kind: ActivityKind, quantity: &str) -> ActivityInput {
        ActivityInput {
            kind,
            product_id: "p1".to_string(),
            quantity: quantity.to_string(),
            rejected: String::new(),
            wastage: String::new(),
            reason: String::new(),
        }
    }

    fn store() -> MemoryStore {
        MemoryStore::new().with_json(
            "orders",
            &json!([{ "id": "o1", "products": [{ "id": "p1", "moveToPurchase": true }] }]),
        )
    }

    #[test]
    fn test_production_then_verification_updates_snapshot() {
        let config = DashboardConfig::default();
        let profile = AggregationProfile::iml_inventory();
        let mut store = store();

        let mut production = input(ActivityKind::Production, "10");
        production.rejected = "1".to_string();
        save_activity(&mut store, &config, &profile, "o1", &production).unwrap();
        save_activity(&mut store, &config, &profile, "o1", &input(ActivityKind::Verification, "4"))
            .unwrap();

        let snapshot = StoreSnapshot::load(&store, &config.keys);
        let tree = aggregate(&snapshot, &profile, &config.fields);
        let order = tree.find_order("Unknown Company", "o1").unwrap();
        let product = &order.products["p1"];
        assert_eq!(product.produced, 10);
        assert_eq!(product.used_labels, 11);
        assert_eq!(product.verified, 4);
        assert_eq!(product.remaining_quantity, 6);
    }

    #[test]
    fn test_bad_input_is_rejected_before_writing() {
        let config = DashboardConfig::default();
        let profile = AggregationProfile::screen_printing_stocks();
        let mut store = store();

        let err = save_activity(&mut store, &config, &profile, "o1", &input(ActivityKind::GoodsReturned, "x"))
            .unwrap_err();
        assert_eq!(err, "Quantity must be a whole number");
        let err = save_activity(&mut store, &config, &profile, "o1", &input(ActivityKind::GoodsReturned, "0"))
            .unwrap_err();
        assert!(err.contains("greater than zero"));
        assert!(store.get(&config.keys.goods_returned).is_none());
    }

    #[test]
    fn test_kinds_follow_profile() {
        assert_eq!(
            ActivityKind::for_profile(&AggregationProfile::iml_stocks()),
            vec![ActivityKind::Verification]
        );
        assert_eq!(
            ActivityKind::for_profile(&AggregationProfile::screen_printing_stocks()),
            vec![ActivityKind::Verification, ActivityKind::GoodsReturned]
        );
    }
}
