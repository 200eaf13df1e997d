use crate::config::ConfigFormat;
use crate::inventory::ItemStack;
use crate::item::ItemId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Result type for recipe construction and loading
pub type RecipeResult<T> = Result<T, RecipeError>;

#[derive(Debug, thiserror::Error)]
pub enum RecipeError {
    #[error("recipe '{0}' has no ingredients")]
    EmptyIngredients(String),

    #[error("recipe '{recipe}' requires 0 of '{item}'")]
    ZeroIngredientCount { recipe: String, item: ItemId },

    #[error("recipe '{recipe}' lists '{item}' more than once")]
    DuplicateIngredient { recipe: String, item: ItemId },

    #[error("recipe '{0}' produces 0 items")]
    ZeroOutputCount(String),

    #[error("recipe '{0}' is registered twice")]
    DuplicateRecipe(String),

    #[error("failed to read recipe catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse recipe catalog: {0}")]
    Parse(String),
}

/// One required input of a recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(alias = "id", alias = "item")]
    pub item_id: ItemId,
    pub count: u32,
}

impl Ingredient {
    pub fn new(item_id: impl Into<ItemId>, count: u32) -> Self {
        Self {
            item_id: item_id.into(),
            count,
        }
    }
}

/// A crafting recipe: ordered ingredients, one output stack
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recipe {
    id: String,
    name: String,
    ingredients: Vec<Ingredient>,
    output: ItemStack,
}

impl Recipe {
    /// Build a recipe, checking counts are positive and ingredients distinct
    pub fn new(
        id: impl Into<String>,
        ingredients: Vec<Ingredient>,
        output: ItemStack,
    ) -> RecipeResult<Self> {
        let id = id.into();
        if ingredients.is_empty() {
            return Err(RecipeError::EmptyIngredients(id));
        }
        for (position, ingredient) in ingredients.iter().enumerate() {
            if ingredient.count == 0 {
                return Err(RecipeError::ZeroIngredientCount {
                    recipe: id,
                    item: ingredient.item_id.clone(),
                });
            }
            if ingredients[..position]
                .iter()
                .any(|earlier| earlier.item_id == ingredient.item_id)
            {
                return Err(RecipeError::DuplicateIngredient {
                    recipe: id,
                    item: ingredient.item_id.clone(),
                });
            }
        }
        if output.count == 0 {
            return Err(RecipeError::ZeroOutputCount(id));
        }

        Ok(Self {
            name: id.clone(),
            id,
            ingredients,
            output,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ingredients in declaration order
    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn output(&self) -> &ItemStack {
        &self.output
    }
}

/// Serialized form of a recipe, checked through `Recipe::new`
#[derive(Debug, Deserialize)]
struct RecipeEntry {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(alias = "requires")]
    ingredients: Vec<Ingredient>,
    output: Ingredient,
}

impl TryFrom<RecipeEntry> for Recipe {
    type Error = RecipeError;

    fn try_from(entry: RecipeEntry) -> RecipeResult<Self> {
        let recipe = Recipe::new(
            entry.id,
            entry.ingredients,
            ItemStack::new(entry.output.item_id, entry.output.count),
        )?;
        Ok(match entry.name {
            Some(name) => recipe.with_name(name),
            None => recipe,
        })
    }
}

#[derive(Debug, Deserialize)]
struct RecipeCatalogFile {
    #[serde(default)]
    recipes: Vec<RecipeEntry>,
}

/// Ordered recipe catalog; never mutated by crafting
#[derive(Debug, Clone, Default)]
pub struct RecipeRegistry {
    recipes: Vec<Recipe>,
    by_id: HashMap<String, usize>,
}

impl RecipeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new recipe at the end of the catalog
    pub fn register(&mut self, recipe: Recipe) -> RecipeResult<()> {
        if self.by_id.contains_key(recipe.id()) {
            return Err(RecipeError::DuplicateRecipe(recipe.id().to_string()));
        }
        self.by_id.insert(recipe.id().to_string(), self.recipes.len());
        self.recipes.push(recipe);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.by_id.get(id).and_then(|&index| self.recipes.get(index))
    }

    /// Recipe by catalog position, as listed in a crafting menu
    pub fn get_index(&self, index: usize) -> Option<&Recipe> {
        self.recipes.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Initialize with the default recipe set
    pub fn init_default_recipes(&mut self) -> RecipeResult<()> {
        self.register(
            Recipe::new(
                "stoneAxe",
                vec![Ingredient::new("stone", 3)],
                ItemStack::single("stoneAxe"),
            )?
            .with_name("Stone Axe"),
        )?;
        self.register(
            Recipe::new(
                "campfire",
                vec![Ingredient::new("stone", 5), Ingredient::new("fish", 1)],
                ItemStack::single("campfire"),
            )?
            .with_name("Campfire"),
        )?;
        self.register(
            Recipe::new(
                "fence",
                vec![Ingredient::new("stone", 2)],
                ItemStack::new("fence", 4),
            )?
            .with_name("Wood Fence"),
        )?;
        Ok(())
    }

    pub fn from_toml_str(text: &str) -> RecipeResult<Self> {
        let file: RecipeCatalogFile =
            toml::from_str(text).map_err(|e| RecipeError::Parse(e.to_string()))?;
        Self::from_entries(file.recipes)
    }

    pub fn from_json_str(text: &str) -> RecipeResult<Self> {
        let file: RecipeCatalogFile =
            serde_json::from_str(text).map_err(|e| RecipeError::Parse(e.to_string()))?;
        Self::from_entries(file.recipes)
    }

    /// Load a catalog file, picking the format from its extension
    pub fn load<P: AsRef<Path>>(path: P) -> RecipeResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let registry = match ConfigFormat::from_path(path) {
            Some(ConfigFormat::Json) => Self::from_json_str(&text)?,
            Some(ConfigFormat::Toml) => Self::from_toml_str(&text)?,
            None => {
                return Err(RecipeError::Parse(format!(
                    "unsupported catalog extension: {}",
                    path.display()
                )))
            }
        };
        log::info!("Loaded {} recipes from {}", registry.len(), path.display());
        Ok(registry)
    }

    fn from_entries(entries: Vec<RecipeEntry>) -> RecipeResult<Self> {
        let mut registry = Self::new();
        for entry in entries {
            registry.register(Recipe::try_from(entry)?)?;
        }
        Ok(registry)
    }

    /// Registry with the default recipes
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        if let Err(e) = registry.init_default_recipes() {
            log::error!("Failed to register built-in recipes: {}", e);
            debug_assert!(false, "built-in recipes must register: {e}");
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_validation() {
        assert!(matches!(
            Recipe::new("nothing", vec![], ItemStack::single("stone")),
            Err(RecipeError::EmptyIngredients(_))
        ));
        assert!(matches!(
            Recipe::new("free", vec![Ingredient::new("stone", 0)], ItemStack::single("fish")),
            Err(RecipeError::ZeroIngredientCount { .. })
        ));
        assert!(matches!(
            Recipe::new("void", vec![Ingredient::new("stone", 1)], ItemStack::new("fish", 0)),
            Err(RecipeError::ZeroOutputCount(_))
        ));
        assert!(matches!(
            Recipe::new(
                "twice",
                vec![Ingredient::new("stone", 1), Ingredient::new("stone", 1)],
                ItemStack::single("fish"),
            ),
            Err(RecipeError::DuplicateIngredient { .. })
        ));
    }

    #[test]
    fn test_default_recipes_keep_declaration_order() {
        let registry = RecipeRegistry::with_defaults();
        let ids: Vec<&str> = registry.iter().map(Recipe::id).collect();
        assert_eq!(ids, ["stoneAxe", "campfire", "fence"]);

        let campfire = registry.get("campfire").expect("campfire recipe");
        assert_eq!(campfire.name(), "Campfire");
        assert_eq!(
            campfire.ingredients(),
            &[Ingredient::new("stone", 5), Ingredient::new("fish", 1)]
        );
        assert_eq!(registry.get_index(2).map(Recipe::id), Some("fence"));
    }

    #[test]
    fn test_default_recipes_register_cleanly() {
        let mut registry = RecipeRegistry::new();
        assert!(registry.init_default_recipes().is_ok());
        assert!(matches!(
            registry.init_default_recipes(),
            Err(RecipeError::DuplicateRecipe(_))
        ));
    }

    #[test]
    fn test_duplicate_recipe_rejected() {
        let mut registry = RecipeRegistry::with_defaults();
        let again = Recipe::new("fence", vec![Ingredient::new("fish", 1)], ItemStack::single("fence"))
            .expect("valid recipe");
        assert!(matches!(registry.register(again), Err(RecipeError::DuplicateRecipe(_))));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_from_toml() {
        let text = r#"
            [[recipes]]
            id = "bait"
            name = "Bait"
            ingredients = [{ item = "carrot", count = 2 }]
            output = { item = "fish", count = 1 }
        "#;
        let registry = RecipeRegistry::from_toml_str(text).expect("catalog should parse");
        let bait = registry.get("bait").expect("bait recipe");
        assert_eq!(bait.ingredients(), &[Ingredient::new("carrot", 2)]);
        assert_eq!(bait.output(), &ItemStack::single("fish"));
    }

    #[test]
    fn test_from_json_rejects_invalid_entry() {
        let text = r#"{ "recipes": [
            { "id": "bad", "requires": [{ "id": "stone", "count": 0 }], "output": { "id": "fish", "count": 1 } }
        ] }"#;
        assert!(matches!(
            RecipeRegistry::from_json_str(text),
            Err(RecipeError::ZeroIngredientCount { .. })
        ));
    }
}
