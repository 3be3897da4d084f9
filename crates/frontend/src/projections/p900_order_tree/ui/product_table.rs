use contracts::projections::p900_order_tree::{OrderTotals, ProductStatus, ProductView};
use leptos::prelude::*;

#[component]
pub fn StatusBadge(status: ProductStatus) -> impl IntoView {
    let modifier = match status {
        ProductStatus::InProduction => "in-production",
        ProductStatus::Complete => "complete",
    };
    view! {
        <span class=format!("badge badge--{}", modifier)>{status.as_str()}</span>
    }
}

/// Итоги строкой: произведено / на складе / остаток
#[component]
pub fn TotalsCells(totals: OrderTotals) -> impl IntoView {
    view! {
        <span class="totals">
            <span class="totals__item" title="Produced">{totals.total_produced}</span>
            <span class="totals__item" title="In stock">{totals.total_stock}</span>
            <span class="totals__item totals__item--remaining" title="Remaining">
                {totals.total_remaining}
            </span>
        </span>
    }
}

/// Позиции заказа; колонки этикеток только для страниц с приходом этикеток
#[component]
pub fn ProductTable(products: Vec<ProductView>, show_labels: bool) -> impl IntoView {
    let label_headers = show_labels.then(|| {
        view! {
            <th>"Labels received"</th>
            <th>"Labels used"</th>
            <th>"Labels left"</th>
        }
    });

    let rows = products
        .into_iter()
        .map(|p| {
            let label_cells = show_labels.then(|| {
                view! {
                    <td class="num">{p.received_labels}</td>
                    <td class="num">{p.used_labels}</td>
                    <td class="num">
                        {p.remaining_labels} " " <StatusBadge status=p.label_status />
                    </td>
                }
            });
            view! {
                <tr>
                    <td>{p.name}</td>
                    <td>{p.category.unwrap_or_default()}</td>
                    <td>{p.size.unwrap_or_default()}</td>
                    <td class="num">{p.order_quantity}</td>
                    <td class="num">{p.produced}</td>
                    {label_cells}
                    <td class="num">{p.verified}</td>
                    <td class="num">{p.remaining_quantity}</td>
                    <td class="num">{p.in_stock}</td>
                    <td><StatusBadge status=p.status /></td>
                </tr>
            }
        })
        .collect_view();

    view! {
        <table class="data-table">
            <thead>
                <tr>
                    <th>"Product"</th>
                    <th>"Category"</th>
                    <th>"Size"</th>
                    <th>"Ordered"</th>
                    <th>"Produced"</th>
                    {label_headers}
                    <th>"Verified"</th>
                    <th>"Remaining"</th>
                    <th>"In stock"</th>
                    <th>"Status"</th>
                </tr>
            </thead>
            <tbody>{rows}</tbody>
        </table>
    }
}
