use crate::filter::{FilterError, FilterKey, FilterSet, Filterable};
use std::cmp::Ordering;

/// A record that can be listed, selected and ordered
pub trait Listed: Filterable {
    fn id(&self) -> i32;

    /// The display order shared by the server and every list view
    fn compare(&self, other: &Self) -> Ordering;
}

/// In-memory list state for one entity page
///
/// Holds the last accepted fetch, the active filters, the derived visible
/// subset and the currently expanded record. Fetches are tagged with
/// tickets from [`ListView::begin_fetch`]; a response carrying an older
/// ticket than the last accepted one is dropped.
#[derive(Debug, Clone)]
pub struct ListView<T> {
    items: Vec<T>,
    filters: FilterSet,
    visible: Vec<usize>,
    selected: Option<i32>,
    issued: u64,
    accepted: u64,
}

impl<T> Default for ListView<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            filters: FilterSet::new(),
            visible: Vec::new(),
            selected: None,
            issued: 0,
            accepted: 0,
        }
    }
}

impl<T: Listed> ListView<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves a ticket for a fetch that is about to be issued
    pub fn begin_fetch(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Installs a fetched list, unless a newer fetch was already accepted
    ///
    /// Returns whether the list was installed.
    pub fn replace(&mut self, ticket: u64, mut items: Vec<T>) -> bool {
        if ticket < self.accepted {
            return false;
        }

        self.accepted = ticket;
        items.sort_by(T::compare);
        self.items = items;

        if let Some(id) = self.selected
            && !self.items.iter().any(|item| item.id() == id)
        {
            self.selected = None;
        }

        self.refresh();
        true
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn set_filter(&mut self, key: FilterKey, raw: &str) -> Result<(), FilterError> {
        self.filters.set(key, raw)?;
        self.refresh();
        Ok(())
    }

    pub fn set_search(&mut self, term: &str) {
        // search never fails to parse
        let _ = self.filters.set(FilterKey::Search, term);
        self.refresh();
    }

    pub fn apply(&mut self, filters: FilterSet) {
        self.filters = filters;
        self.refresh();
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.refresh();
    }

    /// Every held record, in display order
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// The records passing the current filters, in display order
    pub fn visible(&self) -> impl Iterator<Item = &T> {
        self.visible.iter().map(|&idx| &self.items[idx])
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn get(&self, id: i32) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Expands `id`, or collapses it when it is already expanded
    pub fn toggle(&mut self, id: i32) -> Option<&T> {
        if self.selected == Some(id) {
            self.selected = None;
        } else if self.get(id).is_some() {
            self.selected = Some(id);
        }

        self.selected()
    }

    pub fn selected(&self) -> Option<&T> {
        self.selected.and_then(|id| self.get(id))
    }

    fn refresh(&mut self) {
        self.visible = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| self.filters.matches(*item))
            .map(|(idx, _)| idx)
            .collect();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::filter::Field;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: i32,
        name: &'static str,
        grade: &'static str,
    }

    impl Filterable for Row {
        fn search_fields(&self) -> Vec<&str> {
            vec![self.name]
        }

        fn field(&self, key: FilterKey) -> Option<Field<'_>> {
            match key {
                FilterKey::Grade => Some(Field::Text(Some(self.grade))),
                _ => None,
            }
        }
    }

    impl Listed for Row {
        fn id(&self) -> i32 {
            self.id
        }

        fn compare(&self, other: &Self) -> Ordering {
            self.name.cmp(other.name).then(self.id.cmp(&other.id))
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { id: 3, name: "Cruz", grade: "8" },
            Row { id: 1, name: "Abad", grade: "7" },
            Row { id: 2, name: "Bautista", grade: "8" },
        ]
    }

    fn names(view: &ListView<Row>) -> Vec<&'static str> {
        view.visible().map(|row| row.name).collect()
    }

    #[test]
    fn test_replace_sorts_and_shows_everything() {
        let mut view = ListView::new();
        let ticket = view.begin_fetch();
        assert!(view.replace(ticket, rows()));
        assert_eq!(names(&view), vec!["Abad", "Bautista", "Cruz"]);
    }

    #[test]
    fn test_filter_changes_rederive_view() {
        let mut view = ListView::new();
        let ticket = view.begin_fetch();
        view.replace(ticket, rows());

        view.set_filter(FilterKey::Grade, "8").unwrap();
        assert_eq!(names(&view), vec!["Bautista", "Cruz"]);

        view.set_search("cr");
        assert_eq!(names(&view), vec!["Cruz"]);

        view.set_filter(FilterKey::Grade, "").unwrap();
        view.set_search("");
        assert_eq!(view.visible_len(), 3);
    }

    #[test]
    fn test_stale_fetch_is_dropped() {
        let mut view = ListView::new();
        let older = view.begin_fetch();
        let newer = view.begin_fetch();

        assert!(view.replace(newer, vec![Row { id: 9, name: "Newest", grade: "7" }]));
        assert!(!view.replace(older, rows()));
        assert_eq!(names(&view), vec!["Newest"]);
    }

    #[test]
    fn test_toggle_selection() {
        let mut view = ListView::new();
        let ticket = view.begin_fetch();
        view.replace(ticket, rows());

        assert_eq!(view.toggle(2).map(|row| row.name), Some("Bautista"));
        assert!(view.toggle(2).is_none());
        assert!(view.toggle(42).is_none());

        view.toggle(1);
        let ticket = view.begin_fetch();
        view.replace(ticket, vec![Row { id: 5, name: "Other", grade: "9" }]);
        assert!(view.selected().is_none());
    }
}
