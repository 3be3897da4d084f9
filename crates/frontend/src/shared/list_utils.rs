/// Утилиты страниц-списков: поиск с задержкой и форматирование значений
use chrono::{DateTime, Local, Utc};
use gloo_timers::callback::Timeout;
use leptos::prelude::*;

/// Задержка перед применением поиска, мс
const SEARCH_DEBOUNCE_MS: u32 = 300;

/// Поле поиска с debounce и кнопкой очистки
#[component]
pub fn SearchInput(
    /// Текущее значение фильтра
    #[prop(into)]
    value: Signal<String>,
    #[prop(into)]
    on_change: Callback<String>,
    #[prop(optional, into)]
    placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Search company, order or contact...".to_string()
    } else {
        placeholder
    };

    let (input_value, set_input_value) = signal(value.get_untracked());

    // Замена таймера отменяет предыдущий
    let pending = StoredValue::new_local(None::<Timeout>);

    let handle_input_change = move |new_value: String| {
        set_input_value.set(new_value.clone());
        let timeout = Timeout::new(SEARCH_DEBOUNCE_MS, move || on_change.run(new_value));
        pending.update_value(|slot| *slot = Some(timeout));
    };

    let clear_filter = move |_| {
        pending.update_value(|slot| *slot = None);
        set_input_value.set(String::new());
        on_change.run(String::new());
    };

    let is_filter_active = move || !value.get().trim().is_empty();

    view! {
        <div class="search-input">
            <input
                type="text"
                placeholder=placeholder
                class="search-input__field"
                class:active=is_filter_active
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input_change(event_target_value(&ev))
            />
            <Show when=move || !input_value.get().is_empty()>
                <button class="search-input__clear" title="Clear" on:click=clear_filter>
                    "×"
                </button>
            </Show>
        </div>
    }
}

/// Сумма с двумя знаками после запятой
pub fn format_amount(value: f64) -> String {
    format!("{:.2}", value)
}

/// Время в локальном часовом поясе; эпоха означает «нет даты»
pub fn format_activity(value: DateTime<Utc>) -> String {
    if value == DateTime::<Utc>::UNIX_EPOCH {
        return "—".to_string();
    }
    value
        .with_timezone(&Local)
        .format("%d.%m.%Y %H:%M")
        .to_string()
}

/// Разобрать целое количество из поля ввода
pub fn parse_quantity(input: &str) -> Option<i64> {
    input.trim().parse::<i64>().ok()
}

/// Разобрать сумму из поля ввода; запятая допускается как разделитель
pub fn parse_amount(input: &str) -> Option<f64> {
    input.trim().replace(',', ".").parse::<f64>().ok()
}
