use crate::layout::global_context::use_app_context;
use crate::shared::components::page_header::PageHeader;
use crate::shared::list_utils::{format_activity, format_amount, parse_amount, SearchInput};
use crate::shared::storage;
use contracts::domain::a001_order::aggregate::Order;
use contracts::domain::a005_sales_billing::aggregate::{BillingDraft, BILLING_STATUSES};
use contracts::domain::a005_sales_billing::repository::record_billing;
use contracts::projections::p901_billing_register::{build_register, BillingGroup};
use contracts::shared::config::StoreKeys;
use contracts::shared::record_store::RecordStore;
use leptos::prelude::*;

/// Проверить и сохранить оплату из формы
pub fn submit_payment<S: RecordStore + ?Sized>(
    store: &mut S,
    keys: &StoreKeys,
    orders: &[Order],
    order_id: &str,
    amount: &str,
    status: &str,
) -> Result<(), String> {
    let order = orders
        .iter()
        .find(|o| o.id == order_id)
        .ok_or_else(|| "Select an order".to_string())?;
    let amount = parse_amount(amount).ok_or_else(|| "Amount must be a number".to_string())?;
    let status = Some(status.to_string()).filter(|s| !s.trim().is_empty());
    record_billing(store, keys, BillingDraft::for_order(order, amount, status))
        .map(|_| ())
        .map_err(|e| e.to_string())
}

#[component]
pub fn BillingRegisterList() -> impl IntoView {
    let ctx = use_app_context();
    let (groups, set_groups) = signal(Vec::<BillingGroup>::new());
    let (orders, set_orders) = signal(Vec::<Order>::new());
    let (search, set_search) = signal(String::new());

    Effect::new(move |_| {
        ctx.revision.track();
        let config = ctx.config.get_value();
        let snapshot = storage::load_snapshot(&config.keys);
        let register = build_register(&snapshot.billing);
        log::info!("Billing register: {} orders", register.len());
        set_groups.set(register);
        set_orders.set(snapshot.orders);
    });

    let rows = move || {
        let term = search.get();
        let visible: Vec<BillingGroup> =
            groups.with(|all| all.iter().filter(|g| g.matches(&term)).cloned().collect());
        if visible.is_empty() {
            return view! { <div class="empty-state">"No billing records"</div> }.into_any();
        }
        visible
            .into_iter()
            .map(|group| view! { <BillingGroupRow group /> })
            .collect_view()
            .into_any()
    };

    view! {
        <div class="page">
            <PageHeader title="Sales Billing">
                <SearchInput
                    value=search
                    on_change=Callback::new(move |v: String| set_search.set(v))
                    placeholder="Search company or order..."
                />
            </PageHeader>

            <PaymentForm orders />

            <div class="register">{rows}</div>
        </div>
    }
}

#[component]
fn PaymentForm(orders: ReadSignal<Vec<Order>>) -> impl IntoView {
    let ctx = use_app_context();
    let (order_id, set_order_id) = signal(String::new());
    let (amount, set_amount) = signal(String::new());
    let (status, set_status) = signal(BILLING_STATUSES[0].to_string());
    let (error, set_error) = signal(None::<String>);

    let on_submit = move |_| {
        let config = ctx.config.get_value();
        let result = storage::open_for_write()
            .map_err(|e| e.to_string())
            .and_then(|mut store| {
                orders.with_untracked(|all| {
                    submit_payment(
                        &mut store,
                        &config.keys,
                        all,
                        &order_id.get_untracked(),
                        &amount.get_untracked(),
                        &status.get_untracked(),
                    )
                })
            });
        match result {
            Ok(()) => {
                set_error.set(None);
                set_amount.set(String::new());
                ctx.notify_saved();
            }
            Err(e) => {
                log::warn!("Payment rejected: {}", e);
                set_error.set(Some(e));
            }
        }
    };

    view! {
        <div class="form-card">
            <h3>"Record payment"</h3>
            <div class="form-row">
                <select
                    class="filter-select"
                    prop:value=move || order_id.get()
                    on:change=move |ev| set_order_id.set(event_target_value(&ev))
                >
                    <option value="">"Select order"</option>
                    {move || {
                        orders
                            .get()
                            .into_iter()
                            .map(|o| {
                                let label = format!("{} · {}", o.order_key(), o.company_name());
                                view! { <option value=o.id.clone()>{label}</option> }
                            })
                            .collect_view()
                    }}
                </select>

                <input
                    type="text"
                    class="form-input"
                    placeholder="Amount"
                    prop:value=move || amount.get()
                    on:input=move |ev| set_amount.set(event_target_value(&ev))
                />

                <select
                    class="filter-select"
                    prop:value=move || status.get()
                    on:change=move |ev| set_status.set(event_target_value(&ev))
                >
                    {BILLING_STATUSES
                        .into_iter()
                        .map(|s| view! { <option value=s>{s}</option> })
                        .collect_view()}
                </select>

                <button class="button button--primary" on:click=on_submit>"Save"</button>
            </div>
            {move || error.get().map(|e| view! { <div class="form-error">{e}</div> })}
        </div>
    }
}

#[component]
fn BillingGroupRow(group: BillingGroup) -> impl IntoView {
    let expanded = RwSignal::new(false);
    let title = format!(
        "{} · {}",
        group.company_name,
        group.order_number.as_deref().unwrap_or(&group.order_id)
    );
    let records = group.records.clone();

    let details = move || {
        expanded.get().then(|| {
            let rows = records
                .iter()
                .map(|r| {
                    let when = r.created_at.clone().or_else(|| r.billing_date.clone());
                    view! {
                        <tr>
                            <td>{when.unwrap_or_default()}</td>
                            <td class="num">{format_amount(r.amount)}</td>
                            <td>{r.status.clone().unwrap_or_default()}</td>
                        </tr>
                    }
                })
                .collect_view();
            view! {
                <table class="data-table">
                    <thead>
                        <tr><th>"Date"</th><th>"Amount"</th><th>"Status"</th></tr>
                    </thead>
                    <tbody>{rows}</tbody>
                </table>
            }
        })
    };

    view! {
        <div class="tree-group">
            <div class="tree-group__header" on:click=move |_| expanded.update(|v| *v = !*v)>
                <span class="tree-toggle">{move || if expanded.get() { "▾" } else { "▸" }}</span>
                <span class="tree-group__title">{title}</span>
                <span class="totals">
                    <span class="totals__item" title="Estimated">{format_amount(group.estimated_value)}</span>
                    <span class="totals__item" title="Billed">{format_amount(group.total_billed)}</span>
                    <span class="totals__item totals__item--remaining" title="Balance">
                        {format_amount(group.balance)}
                    </span>
                </span>
                <span class="tree-group__meta">{group.latest_status.clone().unwrap_or_default()}</span>
                <span class="tree-group__meta">{format_activity(group.latest_activity)}</span>
            </div>
            {details}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::record_store::MemoryStore;
    use contracts::shared::snapshot::StoreSnapshot;
    use serde_json::json;

    fn setup() -> (MemoryStore, StoreKeys, Vec<Order>) {
        let keys = StoreKeys::default();
        let store = MemoryStore::new().with_json(
            &keys.orders,
            &json!([{"id": "o1", "orderNumber": "IML-1", "contact": {"company": "Acme"},
                     "orderEstimate": {"total": 1000}}]),
        );
        let orders = StoreSnapshot::load(&store, &keys).orders;
        (store, keys, orders)
    }

    #[test]
    fn test_payment_goes_into_register() {
        let (mut store, keys, orders) = setup();
        submit_payment(&mut store, &keys, &orders, "o1", "400", "Partially Paid").unwrap();

        let snapshot = StoreSnapshot::load(&store, &keys);
        let register = build_register(&snapshot.billing);
        assert_eq!(register.len(), 1);
        assert_eq!(register[0].total_billed, 400.0);
        assert_eq!(register[0].balance, 600.0);
        assert_eq!(register[0].latest_status.as_deref(), Some("Partially Paid"));
    }

    #[test]
    fn test_invalid_payment_shows_message_and_writes_nothing() {
        let (mut store, keys, orders) = setup();
        let err = submit_payment(&mut store, &keys, &orders, "o1", "0", "Paid").unwrap_err();
        assert!(err.contains("greater than zero"));
        assert_eq!(
            submit_payment(&mut store, &keys, &orders, "", "10", "Paid").unwrap_err(),
            "Select an order"
        );
        assert!(store.get(&keys.sales_billing).is_none());
    }
}
