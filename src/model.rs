use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Dietary preference offered to the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DietaryPreference {
    #[default]
    None,
    Vegan,
    Vegetarian,
    Keto,
    GlutenFree,
    Pescatarian,
}

impl DietaryPreference {
    pub const ALL: [DietaryPreference; 6] = [
        DietaryPreference::None,
        DietaryPreference::Vegan,
        DietaryPreference::Vegetarian,
        DietaryPreference::Keto,
        DietaryPreference::GlutenFree,
        DietaryPreference::Pescatarian,
    ];

    /// Wire value, as sent by the form
    pub fn as_str(&self) -> &'static str {
        match self {
            DietaryPreference::None => "none",
            DietaryPreference::Vegan => "vegan",
            DietaryPreference::Vegetarian => "vegetarian",
            DietaryPreference::Keto => "keto",
            DietaryPreference::GlutenFree => "gluten-free",
            DietaryPreference::Pescatarian => "pescatarian",
        }
    }

    /// Wording used inside the prompt
    pub fn prompt_text(&self) -> &'static str {
        match self {
            DietaryPreference::None => "no dietary restrictions",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for DietaryPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DietaryPreference {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        Self::ALL
            .into_iter()
            .find(|pref| pref.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| ValidationError::UnknownDietaryPreference(value.to_string()))
    }
}

/// Ordered, duplicate-free list of trimmed, non-empty ingredient names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IngredientList(Vec<String>);

impl IngredientList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an ingredient at the end of the list.
    ///
    /// The input is trimmed first; duplicates are detected by exact,
    /// case-sensitive comparison of the trimmed value.
    pub fn insert(&mut self, raw: &str) -> Result<(), ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyIngredient);
        }
        if self.contains(trimmed) {
            return Err(ValidationError::DuplicateIngredient(trimmed.to_string()));
        }
        self.0.push(trimmed.to_string());
        Ok(())
    }

    /// Remove an ingredient. Removing something that is not present is a no-op.
    pub fn remove(&mut self, name: &str) {
        let name = name.trim();
        self.0.retain(|existing| existing != name);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|existing| existing == name)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

/// Immutable, validated input of one generation.
///
/// Only obtainable through [`crate::builder::RecipeRequestBuilder::submit`],
/// so the ingredient list is never empty and servings are at least 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    ingredients: IngredientList,
    dietary: DietaryPreference,
    servings: u32,
}

impl GenerationRequest {
    pub(crate) fn new(ingredients: IngredientList, dietary: DietaryPreference, servings: u32) -> Self {
        debug_assert!(!ingredients.is_empty());
        GenerationRequest {
            ingredients,
            dietary,
            servings: servings.max(1),
        }
    }

    pub fn ingredients(&self) -> &IngredientList {
        &self.ingredients
    }

    pub fn dietary(&self) -> DietaryPreference {
        self.dietary
    }

    pub fn servings(&self) -> u32 {
        self.servings
    }
}

/// Per-serving nutrition facts, values carry their units ("320 kcal", "12g").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: String,
    pub protein: String,
    pub fat: String,
    pub carbs: String,
}

/// A generated recipe.
///
/// `ingredients` and `steps` are never empty for a recipe produced by
/// [`crate::parse::parse_recipe`]. Optional sections are `None` when they do
/// not apply, never an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub title: String,
    pub cooking_time: String,
    pub servings: u32,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tips: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition: Option<Nutrition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pairing: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dietary_from_str() {
        assert_eq!("vegan".parse::<DietaryPreference>(), Ok(DietaryPreference::Vegan));
        assert_eq!(" Gluten-Free ".parse::<DietaryPreference>(), Ok(DietaryPreference::GlutenFree));
        assert_eq!("none".parse::<DietaryPreference>(), Ok(DietaryPreference::None));
        assert_eq!(
            "carnivore".parse::<DietaryPreference>(),
            Err(ValidationError::UnknownDietaryPreference("carnivore".to_string()))
        );
    }

    #[test]
    fn test_dietary_prompt_text() {
        assert_eq!(DietaryPreference::None.prompt_text(), "no dietary restrictions");
        assert_eq!(DietaryPreference::Keto.prompt_text(), "keto");
    }

    #[test]
    fn test_dietary_serde_uses_wire_values() {
        let json = serde_json::to_string(&DietaryPreference::GlutenFree).unwrap();
        assert_eq!(json, "\"gluten-free\"");
    }

    #[test]
    fn test_ingredient_list_trims_and_dedups() {
        let mut list = IngredientList::new();
        list.insert("  chicken  ").unwrap();
        assert_eq!(
            list.insert("chicken"),
            Err(ValidationError::DuplicateIngredient("chicken".to_string()))
        );
        // case-sensitive
        list.insert("Chicken").unwrap();
        assert_eq!(list.as_slice(), &["chicken".to_string(), "Chicken".to_string()]);
    }

    #[test]
    fn test_ingredient_list_rejects_blank() {
        let mut list = IngredientList::new();
        assert_eq!(list.insert("   "), Err(ValidationError::EmptyIngredient));
        assert!(list.is_empty());
    }

    #[test]
    fn test_ingredient_list_remove_is_idempotent() {
        let mut list = IngredientList::new();
        list.insert("garlic").unwrap();
        list.insert("lemon").unwrap();
        list.remove("garlic");
        list.remove("garlic");
        list.remove("basil");
        assert_eq!(list.iter().collect::<Vec<_>>(), vec!["lemon"]);
    }

    #[test]
    fn test_recipe_serializes_camel_case_without_absent_sections() {
        let recipe = Recipe {
            title: "X".to_string(),
            cooking_time: "10 min".to_string(),
            servings: 2,
            ingredients: vec!["1 egg".to_string()],
            steps: vec!["Boil egg".to_string()],
            tips: None,
            nutrition: None,
            pairing: None,
        };
        let value = serde_json::to_value(&recipe).unwrap();
        assert_eq!(value["cookingTime"], "10 min");
        assert!(value.get("tips").is_none());
        assert!(value.get("nutrition").is_none());
        assert!(value.get("pairing").is_none());
    }
}
