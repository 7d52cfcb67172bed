//! Player inventory and equipment slots.

use std::collections::BTreeMap;

use dungeon_crawler_core::{EquipSlot, Item, ItemId, ItemKind};

/// Default number of items the player can carry.
pub(crate) const DEFAULT_CAPACITY: usize = 10;

/// Items carried by the player.
///
/// Equipped slots refer to items by identifier; the items themselves stay in
/// the carried list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Inventory {
    capacity: usize,
    items: Vec<Item>,
    equipped: BTreeMap<EquipSlot, ItemId>,
}

impl Inventory {
    /// Creates an empty inventory with the provided capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            items: Vec::new(),
            equipped: BTreeMap::new(),
        }
    }

    /// Maximum number of carried items.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Carried items in pickup order.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Reports whether another item can be carried.
    #[must_use]
    pub fn has_room(&self) -> bool {
        self.items.len() < self.capacity
    }

    /// Looks up a carried item.
    #[must_use]
    pub fn get(&self, item: ItemId) -> Option<&Item> {
        self.items.iter().find(|candidate| candidate.id() == item)
    }

    /// Identifier of the item occupying the slot, if any.
    #[must_use]
    pub fn equipped(&self, slot: EquipSlot) -> Option<ItemId> {
        self.equipped.get(&slot).copied()
    }

    /// Attack bonus of the equipped weapon.
    #[must_use]
    pub fn weapon_bonus(&self) -> u32 {
        self.slot_bonus(EquipSlot::Weapon)
    }

    /// Defense bonus of the equipped armor.
    #[must_use]
    pub fn armor_bonus(&self) -> u32 {
        self.slot_bonus(EquipSlot::Armor)
    }

    fn slot_bonus(&self, slot: EquipSlot) -> u32 {
        self.equipped(slot)
            .and_then(|item| self.get(item))
            .map_or(0, |item| item.kind().magnitude())
    }

    /// Adds an item, handing it back when the inventory is full.
    pub(crate) fn insert(&mut self, item: Item) -> Result<(), Item> {
        if !self.has_room() {
            return Err(item);
        }
        self.items.push(item);
        Ok(())
    }

    /// Equips a carried weapon or armor, returning the slot it now occupies.
    pub(crate) fn equip(&mut self, item: ItemId) -> Option<EquipSlot> {
        let slot = self.get(item)?.kind().slot()?;

        if let Some(previous) = self.equipped.insert(slot, item) {
            if let Some(entry) = self.item_mut(previous) {
                entry.set_equipped(false);
            }
        }
        if let Some(entry) = self.item_mut(item) {
            entry.set_equipped(true);
        }

        Some(slot)
    }

    /// Removes a carried potion, returning its heal amount.
    pub(crate) fn consume_potion(&mut self, item: ItemId) -> Option<u32> {
        let index = self
            .items
            .iter()
            .position(|candidate| candidate.id() == item)?;
        let ItemKind::Potion { heal } = self.items.get(index)?.kind() else {
            return None;
        };

        let _ = self.items.remove(index);
        Some(heal)
    }

    fn item_mut(&mut self, item: ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|candidate| candidate.id() == item)
    }
}

impl Default for Inventory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}
