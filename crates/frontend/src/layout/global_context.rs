use contracts::projections::p900_order_tree::AggregationProfile;
use contracts::shared::config::DashboardConfig;
use contracts::shared::navigation::OrderSelection;
use leptos::prelude::*;

/// Страницы приложения
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    ImlInventory,
    ImlStocks,
    ScreenPrintingStocks,
    SalesBilling,
    GoodsReturned,
    /// Детали заказа; открывается только из списка
    OrderDetails,
}

impl Page {
    pub fn title(&self) -> &'static str {
        match self {
            Page::ImlInventory => "IML Inventory",
            Page::ImlStocks => "IML Stocks",
            Page::ScreenPrintingStocks => "Screen Printing Stocks",
            Page::SalesBilling => "Sales Billing",
            Page::GoodsReturned => "Goods Returned",
            Page::OrderDetails => "Order Details",
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            Page::ImlInventory => "iml_inventory",
            Page::ImlStocks => "iml_stocks",
            Page::ScreenPrintingStocks => "screen_printing_stocks",
            Page::SalesBilling => "sales_billing",
            Page::GoodsReturned => "goods_returned",
            Page::OrderDetails => "order_details",
        }
    }

    /// Пункты меню; детали заказа в меню не попадают
    pub fn menu() -> [Page; 5] {
        [
            Page::ImlInventory,
            Page::ImlStocks,
            Page::ScreenPrintingStocks,
            Page::SalesBilling,
            Page::GoodsReturned,
        ]
    }

    /// Профиль построения дерева для страниц-списков
    pub fn profile(&self) -> Option<AggregationProfile> {
        match self {
            Page::ImlInventory => Some(AggregationProfile::iml_inventory()),
            Page::ImlStocks => Some(AggregationProfile::iml_stocks()),
            Page::ScreenPrintingStocks => Some(AggregationProfile::screen_printing_stocks()),
            _ => None,
        }
    }
}

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub active: RwSignal<Page>,
    /// Страница, с которой открыли текущую
    pub previous: RwSignal<Page>,
    /// Переходное состояние навигации; живёт только до следующего перехода
    pub selection: RwSignal<Option<OrderSelection>>,
    pub config: StoredValue<DashboardConfig>,
    /// Увеличивается после каждой записи, чтобы списки перечитали хранилище
    pub revision: RwSignal<u64>,
}

impl AppGlobalContext {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            active: RwSignal::new(Page::ImlInventory),
            previous: RwSignal::new(Page::ImlInventory),
            selection: RwSignal::new(None),
            config: StoredValue::new(config),
            revision: RwSignal::new(0),
        }
    }

    pub fn open_page(&self, page: Page) {
        log::debug!("Open page {}", page.id());
        self.previous.set(self.active.get_untracked());
        self.selection.set(None);
        self.active.set(page);
    }

    /// Перейти к деталям, передав выбранный заказ
    pub fn open_order(&self, selection: OrderSelection) {
        log::debug!("Open order {} of {}", selection.order_key, selection.company_name);
        self.previous.set(self.active.get_untracked());
        self.selection.set(Some(selection));
        self.active.set(Page::OrderDetails);
    }

    pub fn go_back(&self) {
        let previous = self.previous.get_untracked();
        self.selection.set(None);
        self.active.set(previous);
    }

    pub fn notify_saved(&self) {
        self.revision.update(|r| *r += 1);
    }
}

pub fn use_app_context() -> AppGlobalContext {
    use_context::<AppGlobalContext>().expect("AppGlobalContext not found")
}
