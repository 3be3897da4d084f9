//! Состояние раскрытия групп списка, не зависящее от UI-фреймворка.
//!
//! Группы (компании) и подгруппы (заказы внутри компании) хранятся отдельно.
//! Подгруппа адресуется парой ключей «родитель + потомок», поэтому одинаковые
//! номера заказов у разных компаний не пересекаются.

use crate::projections::p900_order_tree::OrderTree;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubGroupKey {
    pub parent: String,
    pub child: String,
}

impl SubGroupKey {
    pub fn new(parent: impl Into<String>, child: impl Into<String>) -> Self {
        Self {
            parent: parent.into(),
            child: child.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpandState {
    groups: HashMap<String, bool>,
    sub_groups: HashMap<SubGroupKey, bool>,
}

impl ExpandState {
    /// Начальное состояние для свежезагруженного дерева
    pub fn seed<'a, I, C>(groups: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, C)>,
        C: IntoIterator<Item = &'a str>,
    {
        Self::reseed(groups, &Self::default())
    }

    /// Состояние после перезагрузки дерева.
    ///
    /// Известные ключи сохраняют значение из `previous`. Новая группа
    /// раскрыта; из её подгрупп раскрыта только первая. Ключи, которых больше
    /// нет в дереве, отбрасываются.
    pub fn reseed<'a, I, C>(groups: I, previous: &ExpandState) -> Self
    where
        I: IntoIterator<Item = (&'a str, C)>,
        C: IntoIterator<Item = &'a str>,
    {
        let mut next = Self::default();
        for (parent, children) in groups {
            let expanded = previous.groups.get(parent).copied().unwrap_or(true);
            next.groups.insert(parent.to_string(), expanded);

            for (index, child) in children.into_iter().enumerate() {
                let key = SubGroupKey::new(parent, child);
                let expanded = previous
                    .sub_groups
                    .get(&key)
                    .copied()
                    .unwrap_or(index == 0);
                next.sub_groups.insert(key, expanded);
            }
        }
        next
    }

    /// Состояние для дерева заказов: компании и номера заказов внутри них
    pub fn for_tree(tree: &OrderTree, previous: &ExpandState) -> Self {
        Self::reseed(
            tree.companies
                .iter()
                .map(|(company, orders)| (company.as_str(), orders.keys().map(String::as_str))),
            previous,
        )
    }

    pub fn is_group_expanded(&self, group: &str) -> bool {
        self.groups.get(group).copied().unwrap_or(false)
    }

    pub fn is_sub_group_expanded(&self, parent: &str, child: &str) -> bool {
        self.sub_groups
            .get(&SubGroupKey::new(parent, child))
            .copied()
            .unwrap_or(false)
    }

    /// Переключить одну группу; подгруппы не затрагиваются
    pub fn toggle_group(&mut self, group: &str) {
        let entry = self.groups.entry(group.to_string()).or_insert(false);
        *entry = !*entry;
    }

    pub fn toggle_sub_group(&mut self, parent: &str, child: &str) {
        let entry = self
            .sub_groups
            .entry(SubGroupKey::new(parent, child))
            .or_insert(false);
        *entry = !*entry;
    }

    /// Раскрыть или свернуть все известные группы и подгруппы
    pub fn set_all(&mut self, expanded: bool) {
        self.groups.values_mut().for_each(|v| *v = expanded);
        self.sub_groups.values_mut().for_each(|v| *v = expanded);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups() -> Vec<(&'static str, Vec<&'static str>)> {
        vec![("Acme", vec!["IML-1", "IML-2"]), ("Bright", vec!["IML-1"])]
    }

    #[test]
    fn test_seed_expands_groups_and_first_child() {
        let state = ExpandState::seed(groups());
        assert!(state.is_group_expanded("Acme"));
        assert!(state.is_group_expanded("Bright"));
        assert!(state.is_sub_group_expanded("Acme", "IML-1"));
        assert!(!state.is_sub_group_expanded("Acme", "IML-2"));
        assert!(state.is_sub_group_expanded("Bright", "IML-1"));
    }

    #[test]
    fn test_toggle_does_not_cascade() {
        let mut state = ExpandState::seed(groups());
        state.toggle_group("Acme");
        assert!(!state.is_group_expanded("Acme"));
        assert!(state.is_sub_group_expanded("Acme", "IML-1"));
        assert!(state.is_group_expanded("Bright"));

        state.toggle_sub_group("Bright", "IML-1");
        assert!(!state.is_sub_group_expanded("Bright", "IML-1"));
        assert!(state.is_sub_group_expanded("Acme", "IML-1"));
    }

    #[test]
    fn test_reseed_keeps_known_keys_and_defaults_new_ones() {
        let mut previous = ExpandState::seed(groups());
        previous.toggle_group("Acme");
        previous.toggle_sub_group("Acme", "IML-2");

        let reloaded = vec![
            ("Acme", vec!["IML-1", "IML-2"]),
            ("Cello", vec!["IML-9", "IML-10"]),
        ];
        let state = ExpandState::reseed(reloaded, &previous);
        assert!(!state.is_group_expanded("Acme"));
        assert!(state.is_sub_group_expanded("Acme", "IML-2"));
        assert!(state.is_group_expanded("Cello"));
        assert!(state.is_sub_group_expanded("Cello", "IML-9"));
        assert!(!state.is_sub_group_expanded("Cello", "IML-10"));
        // Bright пропал из дерева
        assert!(!state.is_group_expanded("Bright"));
    }

    #[test]
    fn test_unknown_group_toggles_to_expanded() {
        let mut state = ExpandState::default();
        state.toggle_group("New");
        assert!(state.is_group_expanded("New"));
    }
}
