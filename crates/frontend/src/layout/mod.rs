pub mod global_context;
pub mod sidebar;

use crate::projections::p900_order_tree::ui::details::OrderDetails;
use crate::projections::p900_order_tree::ui::list::OrderTreeList;
use crate::projections::p901_billing_register::ui::list::BillingRegisterList;
use crate::projections::p902_returns_register::ui::list::ReturnsRegisterList;
use global_context::{use_app_context, Page};
use leptos::prelude::*;
use sidebar::Sidebar;

/// Оболочка приложения: меню слева, активная страница справа
#[component]
pub fn Shell() -> impl IntoView {
    let ctx = use_app_context();

    let center = move || {
        let page = ctx.active.get();
        match page {
            Page::SalesBilling => view! { <BillingRegisterList /> }.into_any(),
            Page::GoodsReturned => view! { <ReturnsRegisterList /> }.into_any(),
            Page::OrderDetails => view! { <OrderDetails /> }.into_any(),
            list => match list.profile() {
                Some(profile) => view! { <OrderTreeList profile=profile title=list.title() /> }.into_any(),
                None => view! { <div class="empty-state">"Page not found"</div> }.into_any(),
            },
        }
    };

    view! {
        <div class="app-layout">
            <div class="app-body">
                <Sidebar />
                <div class="app-main">
                    {center}
                </div>
            </div>
        </div>
    }
}
