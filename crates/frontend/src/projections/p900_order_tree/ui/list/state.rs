use contracts::projections::p900_order_tree::{FilterCriteria, FilterOptions, OrderTree};
use contracts::shared::view_state::ExpandState;
use leptos::prelude::*;

#[derive(Clone, Debug, Default)]
pub struct OrderTreeState {
    /// Полное дерево после последней загрузки
    pub tree: OrderTree,
    pub options: FilterOptions,
    pub criteria: FilterCriteria,
    pub expand: ExpandState,
    pub is_loaded: bool,
}

impl OrderTreeState {
    /// Принять перезагруженное дерево, сохранив раскрытие известных групп
    pub fn apply_tree(&mut self, tree: OrderTree) {
        self.expand = ExpandState::for_tree(&tree, &self.expand);
        self.options = FilterOptions::collect(&tree);
        self.tree = tree;
        self.is_loaded = true;
    }

    pub fn visible(&self) -> OrderTree {
        self.criteria.apply(&self.tree)
    }

    pub fn reset_filters(&mut self) {
        self.criteria = FilterCriteria::default();
    }
}

pub fn create_state() -> RwSignal<OrderTreeState> {
    RwSignal::new(OrderTreeState::default())
}
