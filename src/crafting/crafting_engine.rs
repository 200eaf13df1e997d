use crate::crafting::{Ingredient, Recipe, RecipeRegistry};
use crate::inventory::allocator::{capacity_for, deposit};
use crate::inventory::{InventoryResult, Slot, SlotStore};
use crate::item::{ItemCatalog, ItemId};
use serde::{Deserialize, Serialize};

/// What to do when crafted output does not fit in storage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CraftPolicy {
    /// Consume and produce anyway; output that does not fit is destroyed
    #[default]
    DestroyOverflow,
    /// Refuse the craft unless the whole output fits after consumption
    RejectIfNoRoom,
}

/// Result of a crafting attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CraftOutcome {
    /// Ingredients consumed; `produced` items placed, `destroyed` lost to a full store
    Crafted {
        item_id: ItemId,
        produced: u32,
        destroyed: u32,
    },
    /// The store lacks materials; nothing was touched
    InsufficientMaterials { missing: Vec<Ingredient> },
    /// Output would not fit under `RejectIfNoRoom`; nothing was touched
    NoRoom { item_id: ItemId, count: u32 },
}

impl CraftOutcome {
    pub fn is_crafted(&self) -> bool {
        matches!(self, CraftOutcome::Crafted { .. })
    }

    /// Output item id of a successful craft
    pub fn crafted_item(&self) -> Option<&ItemId> {
        match self {
            CraftOutcome::Crafted { item_id, .. } => Some(item_id),
            _ => None,
        }
    }
}

/// Checks and performs recipe crafts against a slot store.
///
/// Holds no state besides the overflow policy; recipes are borrowed per call.
#[derive(Debug, Clone, Copy, Default)]
pub struct CraftingEngine {
    policy: CraftPolicy,
}

impl CraftingEngine {
    pub fn new(policy: CraftPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> CraftPolicy {
        self.policy
    }

    /// Whether the store holds, in aggregate, every ingredient the recipe needs
    pub fn can_craft(&self, store: &SlotStore, recipe: &Recipe) -> bool {
        recipe
            .ingredients()
            .iter()
            .all(|ingredient| store.sum(&ingredient.item_id) >= u64::from(ingredient.count))
    }

    /// Per-ingredient shortfall, empty when the recipe can be crafted
    pub fn missing(&self, store: &SlotStore, recipe: &Recipe) -> Vec<Ingredient> {
        recipe
            .ingredients()
            .iter()
            .filter_map(|ingredient| {
                let have = store.sum(&ingredient.item_id);
                let needed = u64::from(ingredient.count);
                // have < needed, so the shortfall fits the ingredient's own count
                (have < needed).then(|| {
                    Ingredient::new(ingredient.item_id.clone(), (needed - have) as u32)
                })
            })
            .collect()
    }

    /// Recipes from `recipes` that can be crafted right now, in catalog order
    pub fn craftable<'r>(&self, store: &SlotStore, recipes: &'r RecipeRegistry) -> Vec<&'r Recipe> {
        recipes
            .iter()
            .filter(|recipe| self.can_craft(store, recipe))
            .collect()
    }

    /// Consume the recipe's ingredients and deposit its output.
    ///
    /// The whole transaction is staged on a copy of the store and committed at the end,
    /// so a craft that reports anything other than `Crafted` leaves `store` untouched.
    pub fn craft<C: ItemCatalog + ?Sized>(
        &self,
        store: &mut SlotStore,
        catalog: &C,
        recipe: &Recipe,
    ) -> InventoryResult<CraftOutcome> {
        if !self.can_craft(store, recipe) {
            let missing = self.missing(store, recipe);
            log::info!("Cannot craft '{}': not enough materials", recipe.id());
            return Ok(CraftOutcome::InsufficientMaterials { missing });
        }

        let mut staged = store.clone();
        for ingredient in recipe.ingredients() {
            consume(&mut staged, catalog, ingredient)?;
        }

        let output = recipe.output();
        if self.policy == CraftPolicy::RejectIfNoRoom
            && capacity_for(&staged, catalog, &output.item_id) < u64::from(output.count)
        {
            log::info!("Cannot craft '{}': no room for {} x{}", recipe.id(), output.item_id, output.count);
            return Ok(CraftOutcome::NoRoom {
                item_id: output.item_id.clone(),
                count: output.count,
            });
        }

        let destroyed = deposit(&mut staged, catalog, &output.item_id, output.count)?;
        if destroyed > 0 {
            log::warn!(
                "Inventory full, {} x{} from '{}' destroyed",
                output.item_id,
                destroyed,
                recipe.id()
            );
        }

        *store = staged;
        log::info!("Crafted {} x{}", output.item_id, output.count - destroyed);
        Ok(CraftOutcome::Crafted {
            item_id: output.item_id.clone(),
            produced: output.count - destroyed,
            destroyed,
        })
    }
}

/// Remove one ingredient's count, walking slots in ascending index order
fn consume<C: ItemCatalog + ?Sized>(
    store: &mut SlotStore,
    catalog: &C,
    ingredient: &Ingredient,
) -> InventoryResult<()> {
    let mut need = ingredient.count;
    for index in 0..store.len() {
        if need == 0 {
            break;
        }
        let count = match store.get(index) {
            Some(slot) if slot.holds(&ingredient.item_id) => slot.count(),
            _ => continue,
        };
        let take = count.min(need);
        store.set(index, Slot::of(ingredient.item_id.clone(), count - take), catalog)?;
        need -= take;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{InventoryLayout, ItemStack};
    use crate::item::ItemRegistry;

    fn setup() -> (SlotStore, ItemRegistry) {
        (
            SlotStore::new(InventoryLayout::new(4, 2)),
            ItemRegistry::default(),
        )
    }

    fn axe_recipe() -> Recipe {
        Recipe::new(
            "axe",
            vec![Ingredient::new("stone", 2), Ingredient::new("fish", 1)],
            ItemStack::single("stoneAxe"),
        )
        .expect("valid recipe")
    }

    #[test]
    fn test_can_craft_uses_aggregate() {
        let (mut store, catalog) = setup();
        let engine = CraftingEngine::default();
        store.set(0, Slot::of("stone", 1), &catalog).expect("write");
        store.set(3, Slot::of("fish", 1), &catalog).expect("write");
        assert!(!engine.can_craft(&store, &axe_recipe()));

        store.set(2, Slot::of("stone", 1), &catalog).expect("write");
        assert!(engine.can_craft(&store, &axe_recipe()));
        assert!(engine.missing(&store, &axe_recipe()).is_empty());
    }

    #[test]
    fn test_aggregate_past_u32_range() {
        let (mut store, mut catalog) = setup();
        catalog
            .register(crate::item::ItemDefinition::new("gold", "Gold", 3_000_000_000))
            .expect("register");
        assert_eq!(deposit(&mut store, &catalog, &ItemId::new("gold"), 3_000_000_000), Ok(0));
        assert_eq!(deposit(&mut store, &catalog, &ItemId::new("gold"), 3_000_000_000), Ok(0));
        let engine = CraftingEngine::default();

        let hoard = Recipe::new(
            "hoard",
            vec![Ingredient::new("gold", u32::MAX)],
            ItemStack::single("stone"),
        )
        .expect("valid recipe");
        assert!(engine.can_craft(&store, &hoard));
        assert!(engine.missing(&store, &hoard).is_empty());

        let outcome = engine.craft(&mut store, &catalog, &hoard).expect("craft");
        assert!(outcome.is_crafted());
        assert_eq!(store.sum(&ItemId::new("gold")), 6_000_000_000 - u64::from(u32::MAX));

        let short = Recipe::new(
            "ransom",
            vec![Ingredient::new("gold", u32::MAX), Ingredient::new("fish", 2)],
            ItemStack::single("stone"),
        )
        .expect("valid recipe");
        assert_eq!(
            engine.missing(&store, &short),
            vec![
                Ingredient::new("gold", u32::MAX - 1_705_032_705),
                Ingredient::new("fish", 2),
            ]
        );
    }

    #[test]
    fn test_craft_consumes_split_stacks() {
        let (mut store, catalog) = setup();
        let engine = CraftingEngine::default();
        store.set(0, Slot::of("stone", 1), &catalog).expect("write");
        store.set(2, Slot::of("stone", 1), &catalog).expect("write");
        store.set(3, Slot::of("fish", 1), &catalog).expect("write");

        let outcome = engine.craft(&mut store, &catalog, &axe_recipe()).expect("craft");
        assert_eq!(
            outcome,
            CraftOutcome::Crafted {
                item_id: ItemId::new("stoneAxe"),
                produced: 1,
                destroyed: 0,
            }
        );
        assert!(store.get(0).map_or(false, Slot::is_empty));
        assert!(store.get(2).map_or(false, Slot::is_empty));
        assert!(store.get(3).map_or(false, Slot::is_empty));
        assert_eq!(store.get(4), Some(&Slot::of("stoneAxe", 1)));
    }

    #[test]
    fn test_consumption_walks_ascending_index() {
        let (mut store, catalog) = setup();
        let engine = CraftingEngine::default();
        store.set(1, Slot::of("stone", 4), &catalog).expect("write");
        store.set(5, Slot::of("stone", 4), &catalog).expect("write");
        store.set(0, Slot::of("fish", 3), &catalog).expect("write");

        engine.craft(&mut store, &catalog, &axe_recipe()).expect("craft");
        assert_eq!(store.get(1), Some(&Slot::of("stone", 2)));
        assert_eq!(store.get(5), Some(&Slot::of("stone", 4)));
        assert_eq!(store.get(0), Some(&Slot::of("fish", 2)));
    }

    #[test]
    fn test_insufficient_materials_leaves_store_untouched() {
        let (mut store, catalog) = setup();
        let engine = CraftingEngine::default();
        store.set(0, Slot::of("stone", 5), &catalog).expect("write");
        let before = store.clone();

        let outcome = engine.craft(&mut store, &catalog, &axe_recipe()).expect("craft");
        assert_eq!(
            outcome,
            CraftOutcome::InsufficientMaterials {
                missing: vec![Ingredient::new("fish", 1)],
            }
        );
        assert_eq!(store, before);
        assert!(outcome.crafted_item().is_none());
    }

    #[test]
    fn test_full_store_destroys_output() {
        let catalog = ItemRegistry::default();
        let mut store = SlotStore::new(InventoryLayout::new(1, 1));
        store.set(0, Slot::of("stone", 2), &catalog).expect("write");
        store.set(1, Slot::of("fish", 5), &catalog).expect("write");
        let engine = CraftingEngine::default();

        let outcome = engine.craft(&mut store, &catalog, &axe_recipe()).expect("craft");
        assert!(outcome.is_crafted());
        // The stone slot empties, so the axe lands there.
        assert_eq!(store.get(0), Some(&Slot::of("stoneAxe", 1)));

        let fence = Recipe::new("fence", vec![Ingredient::new("fish", 1)], ItemStack::new("fence", 4))
            .expect("valid recipe");
        let outcome = engine.craft(&mut store, &catalog, &fence).expect("craft");
        assert_eq!(
            outcome,
            CraftOutcome::Crafted {
                item_id: ItemId::new("fence"),
                produced: 0,
                destroyed: 4,
            }
        );
        assert_eq!(store.sum(&ItemId::new("fence")), 0);
        assert_eq!(store.get(1), Some(&Slot::of("fish", 3)));
    }

    #[test]
    fn test_reject_policy_keeps_store() {
        let catalog = ItemRegistry::default();
        let mut store = SlotStore::new(InventoryLayout::new(1, 1));
        store.set(0, Slot::of("stoneAxe", 1), &catalog).expect("write");
        store.set(1, Slot::of("fish", 5), &catalog).expect("write");
        let before = store.clone();
        let engine = CraftingEngine::new(CraftPolicy::RejectIfNoRoom);

        let fence = Recipe::new("fence", vec![Ingredient::new("fish", 1)], ItemStack::new("fence", 4))
            .expect("valid recipe");
        assert_eq!(
            engine.craft(&mut store, &catalog, &fence).expect("craft"),
            CraftOutcome::NoRoom {
                item_id: ItemId::new("fence"),
                count: 4,
            }
        );
        assert_eq!(store, before);
    }

    #[test]
    fn test_reject_policy_counts_freed_slots() {
        let catalog = ItemRegistry::default();
        let mut store = SlotStore::new(InventoryLayout::new(1, 1));
        store.set(0, Slot::of("fish", 1), &catalog).expect("write");
        store.set(1, Slot::of("stoneAxe", 1), &catalog).expect("write");
        let engine = CraftingEngine::new(CraftPolicy::RejectIfNoRoom);

        let fence = Recipe::new("fence", vec![Ingredient::new("fish", 1)], ItemStack::new("fence", 4))
            .expect("valid recipe");
        assert!(engine.craft(&mut store, &catalog, &fence).expect("craft").is_crafted());
        assert_eq!(store.get(0), Some(&Slot::of("fence", 4)));
    }

    #[test]
    fn test_craftable_lists_in_catalog_order() {
        let (mut store, catalog) = setup();
        let recipes = RecipeRegistry::with_defaults();
        let engine = CraftingEngine::default();
        store.set(0, Slot::of("stone", 3), &catalog).expect("write");

        let ids: Vec<&str> = engine.craftable(&store, &recipes).into_iter().map(Recipe::id).collect();
        assert_eq!(ids, ["stoneAxe", "fence"]);
    }
}
