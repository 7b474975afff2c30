//! Drag-and-drop sequencing of ordered steps.
//!
//! The list only computes the new order. Persisting it is up to the caller,
//! e.g. [`crate::client::KycClient::save_detail_sequence`].

use tracing::debug;

/// An item that can be reordered: it has a unique key and, optionally, a
/// 1-based sequence number that follows its position.
pub trait Sequenced {
    fn key(&self) -> &str;

    fn sequence_mut(&mut self) -> Option<&mut u32> {
        None
    }
}

/// Attributes the embedding view puts on its drag-handle element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandleAttributes {
    pub item_id: String,
    pub role: &'static str,
    pub tab_index: i32,
    pub aria_label: String,
    pub aria_pressed: bool,
}

/// Interface a view wires to its own handle element.
pub trait DragHandle {
    type Item;

    fn on_drag_start(&mut self, id: &str);

    /// Finish the drag over `over` (`None` when released outside any drop
    /// target). Returns the reordered items if anything moved.
    fn on_drag_end(&mut self, over: Option<&str>) -> Option<&[Self::Item]>;

    fn attributes(&self, id: &str) -> HandleAttributes;
}

/// Move the item at `from` to `to` (remove, then insert). Out-of-range
/// indices leave the slice untouched and return `false`.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from == to || from >= items.len() || to >= items.len() {
        return false;
    }
    let item = items.remove(from);
    items.insert(to, item);
    true
}

/// Reassign every item's sequence to its 1-based position.
pub fn renumber<T: Sequenced>(items: &mut [T]) {
    for (pos, item) in items.iter_mut().enumerate() {
        if let Some(seq) = item.sequence_mut() {
            *seq = pos as u32 + 1;
        }
    }
}

/// Move the item keyed `active` to the position of the item keyed `over`
/// and renumber. Returns `false` (no change) if either key is unknown or
/// both name the same item.
pub fn reorder<T: Sequenced>(items: &mut Vec<T>, active: &str, over: &str) -> bool {
    if active == over {
        return false;
    }
    let from = items.iter().position(|i| i.key() == active);
    let to = items.iter().position(|i| i.key() == over);
    let (Some(from), Some(to)) = (from, to) else {
        return false;
    };
    move_item(items, from, to);
    renumber(items);
    true
}

/// An ordered list with drag state.
#[derive(Debug, Clone)]
pub struct ReorderableList<T> {
    items: Vec<T>,
    dragging: Option<String>,
}

impl<T: Sequenced> ReorderableList<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            dragging: None,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn dragging(&self) -> Option<&str> {
        self.dragging.as_deref()
    }

    /// Keyboard-driven move used by the console and the `reorder` command.
    pub fn move_by_index(&mut self, from: usize, to: usize) -> Option<&[T]> {
        if !move_item(&mut self.items, from, to) {
            return None;
        }
        renumber(&mut self.items);
        Some(&self.items)
    }
}

impl<T: Sequenced> DragHandle for ReorderableList<T> {
    type Item = T;

    fn on_drag_start(&mut self, id: &str) {
        if self.items.iter().any(|i| i.key() == id) {
            self.dragging = Some(id.to_string());
        }
    }

    fn on_drag_end(&mut self, over: Option<&str>) -> Option<&[T]> {
        let active = self.dragging.take()?;
        let over = over?;
        if !reorder(&mut self.items, &active, over) {
            return None;
        }
        debug!(active = %active, over = %over, "reordered");
        Some(&self.items)
    }

    fn attributes(&self, id: &str) -> HandleAttributes {
        HandleAttributes {
            item_id: id.to_string(),
            role: "button",
            tab_index: 0,
            aria_label: format!("Drag to reorder {id}"),
            aria_pressed: self.dragging.as_deref() == Some(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Step {
        id: String,
        sequence: Option<u32>,
    }

    impl Sequenced for Step {
        fn key(&self) -> &str {
            &self.id
        }

        fn sequence_mut(&mut self) -> Option<&mut u32> {
            self.sequence.as_mut()
        }
    }

    fn steps() -> Vec<Step> {
        (1..=4)
            .map(|i| Step {
                id: format!("s{i}"),
                sequence: Some(i),
            })
            .collect()
    }

    fn ids(items: &[Step]) -> Vec<&str> {
        items.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn test_move_last_to_first_renumbers() {
        let mut list = ReorderableList::new(steps());
        list.on_drag_start("s4");
        let result = list.on_drag_end(Some("s1")).unwrap();
        assert_eq!(ids(result), ["s4", "s1", "s2", "s3"]);
        let seqs: Vec<u32> = result.iter().filter_map(|s| s.sequence).collect();
        assert_eq!(seqs, [1, 2, 3, 4]);
    }

    #[test]
    fn test_drop_outside_target_is_noop() {
        let mut list = ReorderableList::new(steps());
        list.on_drag_start("s2");
        assert!(list.on_drag_end(None).is_none());
        assert_eq!(list.items(), steps().as_slice());
        assert!(list.dragging().is_none());
    }

    #[test]
    fn test_drop_on_self_is_noop() {
        let mut list = ReorderableList::new(steps());
        list.on_drag_start("s2");
        assert!(list.on_drag_end(Some("s2")).is_none());
        assert_eq!(list.items(), steps().as_slice());
    }

    #[test]
    fn test_items_without_sequence_keep_none() {
        let mut items = steps();
        items[1].sequence = None;
        assert!(reorder(&mut items, "s1", "s3"));
        assert_eq!(ids(&items), ["s2", "s3", "s1", "s4"]);
        assert_eq!(items[0].sequence, None);
        assert_eq!(items[1].sequence, Some(2));
        assert_eq!(items[2].sequence, Some(3));
    }

    #[test]
    fn test_unknown_key_is_noop() {
        let mut items = steps();
        assert!(!reorder(&mut items, "s1", "missing"));
        assert_eq!(items, steps());
    }

    #[test]
    fn test_move_by_index_forward() {
        let mut list = ReorderableList::new(steps());
        let result = list.move_by_index(0, 2).unwrap();
        assert_eq!(ids(result), ["s2", "s3", "s1", "s4"]);
        assert!(list.move_by_index(1, 9).is_none());
    }

    #[test]
    fn test_attributes_reflect_drag_state() {
        let mut list = ReorderableList::new(steps());
        assert!(!list.attributes("s1").aria_pressed);
        list.on_drag_start("s1");
        assert!(list.attributes("s1").aria_pressed);
        assert_eq!(list.attributes("s1").role, "button");
    }
}
