//! In-memory content tables.

use std::collections::{BTreeMap, HashMap};

use combat_core::state::{EquipmentSlot, InventoryLine, UnitRole};
use combat_core::{
    Ability, AbilityId, AbilityOracle, ActionCard, Archetype, CardId, CardOracle, Inventory,
    ItemId, Unit, UnitId, UnitStats,
};
use tracing::warn;

/// Cards keyed by id.
#[derive(Clone, Debug, Default)]
pub struct CardTable {
    cards: HashMap<CardId, ActionCard>,
}

impl CardTable {
    /// Builds the table; later duplicates replace earlier ones.
    pub fn new(cards: impl IntoIterator<Item = ActionCard>) -> Self {
        let mut table = HashMap::new();
        for card in cards {
            if card.validate().is_err() {
                warn!(target: "combat::content", card = %card.id, "card without effect facets");
            }
            if let Some(previous) = table.insert(card.id.clone(), card) {
                warn!(target: "combat::content", card = %previous.id, "duplicate card id");
            }
        }
        Self { cards: table }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, id: &CardId) -> Option<&ActionCard> {
        self.cards.get(id)
    }
}

impl CardOracle for CardTable {
    fn card(&self, id: &CardId) -> Option<ActionCard> {
        self.cards.get(id).cloned()
    }
}

/// Enemy abilities keyed by id.
#[derive(Clone, Debug, Default)]
pub struct AbilityTable {
    abilities: HashMap<AbilityId, Ability>,
}

impl AbilityTable {
    pub fn new(abilities: impl IntoIterator<Item = Ability>) -> Self {
        Self {
            abilities: abilities
                .into_iter()
                .map(|ability| (ability.id.clone(), ability))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.abilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.abilities.is_empty()
    }
}

impl AbilityOracle for AbilityTable {
    fn ability(&self, id: &AbilityId) -> Option<Ability> {
        self.abilities.get(id).cloned()
    }
}

/// Blueprint for an enemy unit.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyTemplate {
    pub id: String,
    pub name: String,
    pub stats: UnitStats,
    pub archetype: Archetype,
    #[cfg_attr(feature = "serde", serde(default))]
    pub abilities: Vec<AbilityId>,
}

impl EnemyTemplate {
    pub fn instantiate(&self, id: UnitId) -> Unit {
        Unit::enemy(
            id,
            self.name.clone(),
            self.stats.clone(),
            self.archetype,
            self.abilities.clone(),
        )
    }
}

#[derive(Clone, Debug, Default)]
pub struct EnemyTemplates {
    templates: HashMap<String, EnemyTemplate>,
}

impl EnemyTemplates {
    pub fn new(templates: impl IntoIterator<Item = EnemyTemplate>) -> Self {
        Self {
            templates: templates
                .into_iter()
                .map(|template| (template.id.clone(), template))
                .collect(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&EnemyTemplate> {
        self.templates.get(id)
    }

    /// Instantiates each listed template with consecutive ids from `first_id`.
    /// Unknown template ids are skipped.
    pub fn spawn<'a>(&self, ids: impl IntoIterator<Item = &'a str>, first_id: u32) -> Vec<Unit> {
        let mut next = first_id;
        let mut units = Vec::new();
        for template_id in ids {
            match self.get(template_id) {
                Some(template) => {
                    units.push(template.instantiate(UnitId(next)));
                    next += 1;
                }
                None => warn!(
                    target: "combat::content",
                    template = template_id,
                    "unknown enemy template"
                ),
            }
        }
        units
    }
}

/// One hero as stored by the save layer.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeroSpec {
    pub name: String,
    pub stats: UnitStats,
    /// Current hp; full when absent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub hp: Option<u32>,
    pub deck: Vec<CardId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub equipment: BTreeMap<EquipmentSlot, ItemId>,
}

/// The party: heroes plus shared inventory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartySpec {
    pub heroes: Vec<HeroSpec>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub inventory: Vec<InventoryLine>,
}

impl PartySpec {
    /// Instantiates heroes with consecutive ids from `first_id`.
    pub fn heroes(&self, first_id: u32) -> Vec<Unit> {
        self.heroes
            .iter()
            .zip(first_id..)
            .map(|(hero, id)| {
                let mut unit = Unit::hero(
                    UnitId(id),
                    hero.name.clone(),
                    hero.stats.clone(),
                    hero.deck.clone(),
                );
                if let Some(hp) = hero.hp {
                    unit = unit.with_hp(hp);
                }
                if let UnitRole::Hero(profile) = &mut unit.role {
                    profile.equipment = hero.equipment.clone();
                }
                unit
            })
            .collect()
    }

    pub fn inventory(&self) -> Inventory {
        self.inventory
            .iter()
            .fold(Inventory::new(), |inventory, line| {
                inventory.with_item(line.item.clone(), line.quantity)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_assigns_fresh_ids_and_skips_unknown() {
        let templates = EnemyTemplates::new([EnemyTemplate {
            id: "goblin".into(),
            name: "Goblin".into(),
            stats: UnitStats::new(30, 10, 5),
            archetype: Archetype::Aggressive,
            abilities: Vec::new(),
        }]);

        let units = templates.spawn(["goblin", "dragon", "goblin"], 100);
        let ids: Vec<_> = units.iter().map(|unit| unit.id).collect();
        assert_eq!(ids, vec![UnitId(100), UnitId(101)]);
    }

    #[test]
    fn party_keeps_saved_hp_and_inventory() {
        let party = PartySpec {
            heroes: vec![HeroSpec {
                name: "Knight".into(),
                stats: UnitStats::new(40, 25, 2),
                hp: Some(12),
                deck: vec![CardId::from("slash")],
                equipment: BTreeMap::new(),
            }],
            inventory: vec![InventoryLine {
                item: ItemId::from("flask"),
                quantity: 2,
            }],
        };

        let heroes = party.heroes(1);
        assert_eq!(heroes[0].hp, 12);
        assert_eq!(heroes[0].max_hp, 40);
        assert_eq!(party.inventory().quantity(&ItemId::from("flask")), 2);
    }
}
