use crate::layout::global_context::{use_app_context, Page};
use leptos::prelude::*;

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <nav class="sidebar">
            <div class="sidebar__title">"Orders Dashboard"</div>
            {Page::menu()
                .into_iter()
                .map(|page| {
                    let is_active = move || ctx.active.get() == page;
                    view! {
                        <button
                            class="sidebar__item"
                            class:active=is_active
                            on:click=move |_| ctx.open_page(page)
                        >
                            {page.title()}
                        </button>
                    }
                })
                .collect_view()}
        </nav>
    }
}
