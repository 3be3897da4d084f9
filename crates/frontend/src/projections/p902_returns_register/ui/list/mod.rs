use crate::layout::global_context::use_app_context;
use crate::shared::components::page_header::PageHeader;
use crate::shared::list_utils::{format_activity, SearchInput};
use crate::shared::storage;
use contracts::projections::p902_returns_register::{build_register, ReturnGroup};
use contracts::shared::field_mapping::FieldMapping;
use leptos::prelude::*;

fn matches(group: &ReturnGroup, search: &str) -> bool {
    let term = search.trim().to_lowercase();
    term.is_empty()
        || group.company_name.to_lowercase().contains(&term)
        || group.order_key.to_lowercase().contains(&term)
}

#[component]
pub fn ReturnsRegisterList() -> impl IntoView {
    let ctx = use_app_context();
    let (groups, set_groups) = signal(Vec::<ReturnGroup>::new());
    let (search, set_search) = signal(String::new());
    let mapping = StoredValue::new(ctx.config.with_value(|c| c.fields.clone()));

    Effect::new(move |_| {
        ctx.revision.track();
        let config = ctx.config.get_value();
        let snapshot = storage::load_snapshot(&config.keys);
        let register = build_register(&snapshot, &config.fields);
        log::info!("Returns register: {} orders", register.len());
        set_groups.set(register);
    });

    let rows = move || {
        let term = search.get();
        let visible: Vec<ReturnGroup> =
            groups.with(|all| all.iter().filter(|g| matches(g, &term)).cloned().collect());
        if visible.is_empty() {
            return view! { <div class="empty-state">"No returns"</div> }.into_any();
        }
        visible
            .into_iter()
            .map(|group| view! { <ReturnGroupRow group mapping=mapping.get_value() /> })
            .collect_view()
            .into_any()
    };

    view! {
        <div class="page">
            <PageHeader title="Goods Returned">
                <SearchInput
                    value=search
                    on_change=Callback::new(move |v: String| set_search.set(v))
                    placeholder="Search company or order..."
                />
            </PageHeader>
            <div class="register">{rows}</div>
        </div>
    }
}

#[component]
fn ReturnGroupRow(group: ReturnGroup, mapping: FieldMapping) -> impl IntoView {
    let expanded = RwSignal::new(false);
    let title = format!("{} · {}", group.company_name, group.order_key);
    let by_product = group
        .returned_by_product
        .iter()
        .map(|(product, qty)| format!("{}: {}", product, qty))
        .collect::<Vec<_>>()
        .join(", ");
    let entries = group.entries.clone();

    let details = move || {
        expanded.get().then(|| {
            let rows = entries
                .iter()
                .map(|e| {
                    let when = e.created_at.clone().or_else(|| e.return_date.clone());
                    view! {
                        <tr>
                            <td>{when.unwrap_or_default()}</td>
                            <td>{e.product_id.clone()}</td>
                            <td class="num">{e.quantity(&mapping)}</td>
                            <td>{e.reason.clone().unwrap_or_default()}</td>
                        </tr>
                    }
                })
                .collect_view();
            view! {
                <table class="data-table">
                    <thead>
                        <tr><th>"Date"</th><th>"Product"</th><th>"Quantity"</th><th>"Reason"</th></tr>
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
                <span class="tree-group__meta">{by_product}</span>
                <span class="totals__item" title="Returned">{group.total_returned}</span>
                <span class="tree-group__meta">{format_activity(group.latest_activity)}</span>
            </div>
            {details}
        </div>
    }
}
