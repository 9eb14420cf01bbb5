//! Party inventory as seen by the encounter.
//!
//! The save layer owns the real inventory; the encounter only needs item
//! quantities so consumable cards can spend their linked item.

use super::ItemId;

/// One inventory line: an item and how many of it the party holds.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventoryLine {
    pub item: ItemId,
    pub quantity: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    lines: Vec<InventoryLine>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `quantity` of `item`, merging into an existing line.
    pub fn add(&mut self, item: ItemId, quantity: u32) {
        if quantity == 0 {
            return;
        }
        match self.lines.iter_mut().find(|line| line.item == item) {
            Some(line) => line.quantity += quantity,
            None => self.lines.push(InventoryLine { item, quantity }),
        }
    }

    /// Builder form of [`Inventory::add`].
    pub fn with_item(mut self, item: ItemId, quantity: u32) -> Self {
        self.add(item, quantity);
        self
    }

    pub fn quantity(&self, item: &ItemId) -> u32 {
        self.lines
            .iter()
            .find(|line| &line.item == item)
            .map_or(0, |line| line.quantity)
    }

    /// Spends one unit of `item`, dropping the line when it runs out.
    ///
    /// Returns the remaining quantity, or `None` if the item was not held.
    pub fn consume_one(&mut self, item: &ItemId) -> Option<u32> {
        let index = self.lines.iter().position(|line| &line.item == item)?;
        let line = &mut self.lines[index];
        line.quantity = line.quantity.saturating_sub(1);
        let remaining = line.quantity;
        if remaining == 0 {
            self.lines.remove(index);
        }
        Some(remaining)
    }

    pub fn lines(&self) -> &[InventoryLine] {
        &self.lines
    }
}
