pub mod state;

use self::state::{create_state, OrderTreeState};
use super::product_table::{ProductTable, StatusBadge, TotalsCells};
use crate::layout::global_context::use_app_context;
use crate::shared::components::page_header::PageHeader;
use crate::shared::list_utils::SearchInput;
use crate::shared::storage;
use contracts::projections::p900_order_tree::{
    aggregate, AggregationProfile, OrderTotals, OrderView, ProductStatus,
};
use contracts::shared::navigation::OrderSelection;
use leptos::prelude::*;

fn non_empty(value: String) -> Option<String> {
    (!value.trim().is_empty()).then_some(value)
}

/// Дерево «компания → заказ → позиции» для одного профиля
#[component]
pub fn OrderTreeList(profile: AggregationProfile, #[prop(into)] title: String) -> impl IntoView {
    let ctx = use_app_context();
    let state = create_state();
    let show_labels = profile.use_label_receipts;
    let subtitle = profile.domain.display_name().to_string();
    let profile = StoredValue::new(profile);

    // Перечитать хранилище при открытии и после каждой записи
    Effect::new(move |_| {
        ctx.revision.track();
        let config = ctx.config.get_value();
        let snapshot = storage::load_snapshot(&config.keys);
        let tree = profile.with_value(|p| aggregate(&snapshot, p, &config.fields));
        log::info!(
            "{}: {} companies, {} orders",
            profile.with_value(|p| p.name.clone()),
            tree.company_count(),
            tree.order_count()
        );
        state.update(|s| s.apply_tree(tree));
    });

    let visible = Memo::new(move |_| state.with(|s| s.visible()));

    let summary = move || {
        visible.with(|t| format!("{} companies · {} orders", t.company_count(), t.order_count()))
    };

    let groups = move || {
        let tree = visible.get();
        if tree.is_empty() {
            let message = state.with(|s| {
                if !s.is_loaded {
                    "Loading..."
                } else if s.criteria.is_empty() {
                    "No orders yet"
                } else {
                    "No orders match the filters"
                }
            });
            return view! { <div class="empty-state">{message}</div> }.into_any();
        }
        tree.companies
            .into_iter()
            .map(|(company, orders)| {
                let orders: Vec<OrderView> = orders.into_values().collect();
                view! { <CompanyGroup state company orders show_labels /> }
            })
            .collect_view()
            .into_any()
    };

    view! {
        <div class="page">
            <PageHeader title=title subtitle=subtitle>
                <button class="button" on:click=move |_| state.update(|s| s.expand.set_all(true))>
                    "Expand all"
                </button>
                <button class="button" on:click=move |_| state.update(|s| s.expand.set_all(false))>
                    "Collapse all"
                </button>
            </PageHeader>

            <FilterBar state />

            <div class="tree-summary">
                <span>{summary}</span>
                {move || view! { <TotalsCells totals=visible.with(|t| t.grand_totals()) /> }}
            </div>

            <div class="tree">{groups}</div>
        </div>
    }
}

#[component]
fn FilterBar(state: RwSignal<OrderTreeState>) -> impl IntoView {
    let search = Signal::derive(move || state.with(|s| s.criteria.search.clone()));

    view! {
        <div class="filter-bar">
            <SearchInput
                value=search
                on_change=Callback::new(move |v: String| state.update(|s| s.criteria.search = v))
            />

            <select
                class="filter-select"
                prop:value=move || state.with(|s| s.criteria.category.clone().unwrap_or_default())
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    state.update(|s| s.criteria.category = non_empty(value));
                }
            >
                <option value="">"All categories"</option>
                {move || {
                    state
                        .with(|s| s.options.categories.clone())
                        .into_iter()
                        .map(|c| view! { <option value=c.clone()>{c.clone()}</option> })
                        .collect_view()
                }}
            </select>

            <select
                class="filter-select"
                prop:value=move || state.with(|s| s.criteria.size.clone().unwrap_or_default())
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    state.update(|s| s.criteria.size = non_empty(value));
                }
            >
                <option value="">"All sizes"</option>
                {move || {
                    state
                        .with(|s| s.options.sizes.clone())
                        .into_iter()
                        .map(|size| view! { <option value=size.clone()>{size.clone()}</option> })
                        .collect_view()
                }}
            </select>

            <select
                class="filter-select"
                prop:value=move || {
                    state.with(|s| s.criteria.status.map(|st| st.to_string()).unwrap_or_default())
                }
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    state.update(|s| s.criteria.status = ProductStatus::from_str(&value));
                }
            >
                <option value="">"All statuses"</option>
                {ProductStatus::all()
                    .into_iter()
                    .map(|st| view! { <option value=st.as_str()>{st.as_str()}</option> })
                    .collect_view()}
            </select>

            <button
                class="button button--secondary"
                disabled=move || state.with(|s| s.criteria.is_empty())
                on:click=move |_| state.update(|s| s.reset_filters())
            >
                "Reset"
            </button>
        </div>
    }
}

#[component]
fn CompanyGroup(
    state: RwSignal<OrderTreeState>,
    company: String,
    orders: Vec<OrderView>,
    show_labels: bool,
) -> impl IntoView {
    let mut totals = OrderTotals::default();
    for order in &orders {
        totals += order.totals;
    }
    let order_count = orders.len();

    let key = company.clone();
    let expanded = Memo::new(move |_| state.with(|s| s.expand.is_group_expanded(&key)));
    let key = company.clone();
    let toggle = move |_| state.update(|s| s.expand.toggle_group(&key));

    let parent = company.clone();
    let children = move || {
        expanded.get().then(|| {
            orders
                .iter()
                .cloned()
                .map(|order| {
                    view! { <OrderGroup state company=parent.clone() order show_labels /> }
                })
                .collect_view()
        })
    };

    view! {
        <div class="tree-group">
            <div class="tree-group__header" on:click=toggle>
                <span class="tree-toggle">{move || if expanded.get() { "▾" } else { "▸" }}</span>
                <span class="tree-group__title">{company}</span>
                <span class="tree-group__meta">{format!("{} orders", order_count)}</span>
                <TotalsCells totals />
            </div>
            {children}
        </div>
    }
}

#[component]
fn OrderGroup(
    state: RwSignal<OrderTreeState>,
    company: String,
    order: OrderView,
    show_labels: bool,
) -> impl IntoView {
    let ctx = use_app_context();

    let (parent, child) = (company.clone(), order.order_key.clone());
    let expanded =
        Memo::new(move |_| state.with(|s| s.expand.is_sub_group_expanded(&parent, &child)));
    let (parent, child) = (company.clone(), order.order_key.clone());
    let toggle = move |_| state.update(|s| s.expand.toggle_sub_group(&parent, &child));

    let selection = OrderSelection::from_order(&company, &order);
    let open_details = move |ev: leptos::ev::MouseEvent| {
        ev.stop_propagation();
        ctx.open_order(selection.clone());
    };

    let contact = order.contact_name().unwrap_or("—").to_string();
    let products: Vec<_> = order.products.values().cloned().collect();
    let rows = move || {
        expanded
            .get()
            .then(|| view! { <ProductTable products=products.clone() show_labels /> })
    };

    view! {
        <div class="tree-subgroup">
            <div class="tree-subgroup__header" on:click=toggle>
                <span class="tree-toggle">{move || if expanded.get() { "▾" } else { "▸" }}</span>
                <span class="tree-subgroup__title">{order.order_key.clone()}</span>
                <span class="tree-subgroup__contact">{contact}</span>
                <StatusBadge status=order.status />
                <TotalsCells totals=order.totals />
                <button class="button button--small" on:click=open_details>"Details"</button>
            </div>
            {rows}
        </div>
    }
}
