pub mod crafting_engine;
pub mod recipe;

pub use crafting_engine::{CraftOutcome, CraftPolicy, CraftingEngine};
pub use recipe::{Ingredient, Recipe, RecipeError, RecipeRegistry, RecipeResult};
