use crate::layout::global_context::AppGlobalContext;
use crate::layout::Shell;
use crate::shared::storage;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Конфигурация читается один раз при старте
    let config = storage::load_dashboard_config();
    provide_context(AppGlobalContext::new(config));

    view! {
        <Shell />
    }
}
