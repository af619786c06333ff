//! Board cells
//!
//! A cell holds one tile value (0 = empty) at a fixed coordinate. Observers
//! such as a renderer learn about changes either by subscribing a callback or
//! by polling the dirty flag once per frame; both only see real changes.

use std::fmt;

use crate::error::{CoreError, Result};
use crate::hex::HexCoord;
use crate::value::{format_value, is_valid_tile_value, tile_level};

/// Handle returned by [`Cell::subscribe`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Payload delivered to subscribers
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueChange {
    pub coord: HexCoord,
    pub old: f64,
    pub new: f64,
}

type Subscriber = Box<dyn FnMut(&ValueChange)>;

pub struct Cell {
    coord: HexCoord,
    value: f64,
    has_crown: bool,
    dirty: bool,
    next_subscription: u64,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
}

impl Cell {
    /// Empty cell at `coord`
    pub fn new(coord: HexCoord) -> Self {
        Self {
            coord,
            value: 0.0,
            has_crown: false,
            dirty: false,
            next_subscription: 0,
            subscribers: Vec::new(),
        }
    }

    pub fn coord(&self) -> HexCoord {
        self.coord
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value == 0.0
    }

    pub fn has_crown(&self) -> bool {
        self.has_crown
    }

    pub fn set_crown(&mut self, crowned: bool) {
        self.has_crown = crowned;
    }

    /// Progression level of the held value (0 when empty)
    pub fn level(&self) -> u32 {
        tile_level(self.value)
    }

    /// Replace the value. Returns whether anything changed.
    ///
    /// `0` clears the cell; any other value must be a valid tile value.
    pub fn set_value(&mut self, value: f64) -> Result<bool> {
        // store -0.0 as 0.0
        let value = if value == 0.0 { 0.0 } else { value };
        if value != 0.0 && !is_valid_tile_value(value) {
            return Err(CoreError::InvalidTileValue(value));
        }
        if value == self.value {
            return Ok(false);
        }

        let change = ValueChange {
            coord: self.coord,
            old: self.value,
            new: value,
        };
        self.value = value;
        self.dirty = true;

        tracing::trace!(coord = %self.coord, old = change.old, new = change.new, "cell value changed");

        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(&change);
        }
        Ok(true)
    }

    /// Empty the cell. Returns whether it held a value.
    pub fn clear(&mut self) -> bool {
        matches!(self.set_value(0.0), Ok(true))
    }

    /// Label shown on the tile; empty for an empty cell
    pub fn display_text(&self) -> String {
        if self.is_empty() {
            String::new()
        } else {
            format_value(self.value)
        }
    }

    /// Register a callback fired synchronously on every real value change
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&ValueChange) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Remove a callback. Returns false if `id` was not registered here.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Whether the value changed since the last call; resets the flag
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cell")
            .field("coord", &self.coord)
            .field("value", &self.value)
            .field("has_crown", &self.has_crown)
            .field("dirty", &self.dirty)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder(cell: &mut Cell) -> (SubscriptionId, Rc<RefCell<Vec<ValueChange>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let id = cell.subscribe(move |change| sink.borrow_mut().push(*change));
        (id, log)
    }

    #[test]
    fn test_new_cell_is_empty() {
        let cell = Cell::new(HexCoord::new(1, -1));
        assert!(cell.is_empty());
        assert_eq!(cell.display_text(), "");
        assert!(!cell.has_crown());
        assert_eq!(cell.level(), 0);
    }

    #[test]
    fn test_notifies_only_on_change() {
        let mut cell = Cell::new(HexCoord::ORIGIN);
        let (_, log) = recorder(&mut cell);

        assert_eq!(cell.set_value(4.0), Ok(true));
        assert_eq!(cell.set_value(4.0), Ok(false));
        assert_eq!(cell.set_value(8.0), Ok(true));
        assert!(cell.clear());
        assert!(!cell.clear());

        let log = log.borrow();
        assert_eq!(log.len(), 3);
        assert_eq!(log[0], ValueChange { coord: HexCoord::ORIGIN, old: 0.0, new: 4.0 });
        assert_eq!(log[1].old, 4.0);
        assert_eq!(log[1].new, 8.0);
        assert_eq!(log[2].new, 0.0);
    }

    #[test]
    fn test_unsubscribe() {
        let mut cell = Cell::new(HexCoord::ORIGIN);
        let (id, log) = recorder(&mut cell);
        let (_, other) = recorder(&mut cell);
        assert_eq!(cell.subscriber_count(), 2);

        assert!(cell.unsubscribe(id));
        assert!(!cell.unsubscribe(id));
        cell.set_value(2.0).unwrap();

        assert!(log.borrow().is_empty());
        assert_eq!(other.borrow().len(), 1);
    }

    #[test]
    fn test_rejects_invalid_values() {
        let mut cell = Cell::new(HexCoord::ORIGIN);
        let (_, log) = recorder(&mut cell);

        assert_eq!(cell.set_value(6.0), Err(CoreError::InvalidTileValue(6.0)));
        assert!(cell.set_value(-2.0).is_err());
        assert!(cell.set_value(f64::INFINITY).is_err());
        assert!(cell.is_empty());
        assert!(log.borrow().is_empty());
        assert_eq!(cell.set_value(0.0), Ok(false));
    }

    #[test]
    fn test_dirty_flag() {
        let mut cell = Cell::new(HexCoord::ORIGIN);
        assert!(!cell.take_dirty());
        cell.set_value(2.0).unwrap();
        cell.set_value(2.0).unwrap();
        assert!(cell.take_dirty());
        assert!(!cell.take_dirty());
        cell.clear();
        assert!(cell.take_dirty());
    }

    #[test]
    fn test_display_text() {
        let mut cell = Cell::new(HexCoord::ORIGIN);
        cell.set_value(2048.0).unwrap();
        assert_eq!(cell.display_text(), "2k");
        assert_eq!(cell.level(), 10);
        cell.set_value(2.0).unwrap();
        assert_eq!(cell.display_text(), "2");
    }
}
