use crate::layout::global_context::use_app_context;
use leptos::prelude::*;

/// Экран для страницы, открытой без контекста навигации
#[component]
pub fn InvalidAccess(#[prop(into)] message: String) -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <div class="invalid-access">
            <h2>"Invalid Access"</h2>
            <p>{message}</p>
            <button class="button button--secondary" on:click=move |_| ctx.go_back()>
                "Go back"
            </button>
        </div>
    }
}
