use crate::error::ValidationError;
use crate::model::{DietaryPreference, GenerationRequest, IngredientList};

const DEFAULT_SERVINGS: u32 = 2;

/// Collects ingredients and preferences before a generation is submitted.
///
/// # Example
/// ```
/// use recipe_gateway::{DietaryPreference, RecipeRequestBuilder};
///
/// let mut builder = RecipeRequestBuilder::new();
/// builder.add_ingredient("chicken").unwrap();
/// builder.add_ingredient(" lemon ").unwrap();
/// builder.set_dietary("keto").unwrap();
/// builder.set_servings(4);
///
/// let request = builder.submit().unwrap();
/// assert_eq!(request.servings(), 4);
/// assert_eq!(request.dietary(), DietaryPreference::Keto);
/// ```
#[derive(Debug, Clone)]
pub struct RecipeRequestBuilder {
    ingredients: IngredientList,
    dietary: DietaryPreference,
    servings: u32,
}

impl Default for RecipeRequestBuilder {
    fn default() -> Self {
        Self {
            ingredients: IngredientList::new(),
            dietary: DietaryPreference::None,
            servings: DEFAULT_SERVINGS,
        }
    }
}

impl RecipeRequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an ingredient.
    ///
    /// # Errors
    /// - `EmptyIngredient` for empty or whitespace-only input
    /// - `DuplicateIngredient` if the trimmed value is already present
    pub fn add_ingredient(&mut self, raw: &str) -> Result<(), ValidationError> {
        self.ingredients.insert(raw)
    }

    /// Remove an ingredient; unknown names are ignored.
    pub fn remove_ingredient(&mut self, name: &str) {
        self.ingredients.remove(name);
    }

    pub fn ingredients(&self) -> &IngredientList {
        &self.ingredients
    }

    /// Set the serving count, clamped to a minimum of 1.
    pub fn set_servings(&mut self, servings: i64) {
        self.servings = u32::try_from(servings.max(1)).unwrap_or(u32::MAX);
    }

    /// Set the serving count from free-form text.
    ///
    /// The leading integer is used ("3 people" gives 3); anything
    /// non-numeric is coerced to 1.
    pub fn set_servings_input(&mut self, raw: &str) {
        self.set_servings(parse_leading_int(raw).unwrap_or(1));
    }

    pub fn increment_servings(&mut self) {
        self.servings = self.servings.saturating_add(1);
    }

    pub fn decrement_servings(&mut self) {
        self.servings = self.servings.saturating_sub(1).max(1);
    }

    pub fn servings(&self) -> u32 {
        self.servings
    }

    /// Set the dietary preference from its wire value.
    ///
    /// Unrecognised values are rejected and leave the current preference
    /// untouched.
    pub fn set_dietary(&mut self, value: &str) -> Result<(), ValidationError> {
        self.dietary = value.parse()?;
        Ok(())
    }

    pub fn set_dietary_preference(&mut self, dietary: DietaryPreference) {
        self.dietary = dietary;
    }

    pub fn dietary(&self) -> DietaryPreference {
        self.dietary
    }

    /// Produce an immutable request for the gateway.
    ///
    /// # Errors
    /// Returns `EmptyIngredientList` if no ingredient was added.
    pub fn submit(&self) -> Result<GenerationRequest, ValidationError> {
        if self.ingredients.is_empty() {
            return Err(ValidationError::EmptyIngredientList);
        }
        Ok(GenerationRequest::new(
            self.ingredients.clone(),
            self.dietary,
            self.servings,
        ))
    }

    /// Back to an empty form with default preferences.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Parse an optional sign followed by digits at the start of `raw`.
fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    // Overflowing input saturates instead of falling back to 1
    let value = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let builder = RecipeRequestBuilder::new();
        assert!(builder.ingredients().is_empty());
        assert_eq!(builder.dietary(), DietaryPreference::None);
        assert_eq!(builder.servings(), 2);
    }

    #[test]
    fn test_submit_requires_ingredients() {
        let builder = RecipeRequestBuilder::new();
        assert_eq!(builder.submit(), Err(ValidationError::EmptyIngredientList));
    }

    #[test]
    fn test_duplicate_after_trim() {
        let mut builder = RecipeRequestBuilder::new();
        builder.add_ingredient("  chicken  ").unwrap();
        let result = builder.add_ingredient("chicken");
        assert_eq!(
            result,
            Err(ValidationError::DuplicateIngredient("chicken".to_string()))
        );
        assert_eq!(builder.ingredients().len(), 1);
    }

    #[test]
    fn test_servings_clamp() {
        let mut builder = RecipeRequestBuilder::new();
        builder.set_servings(0);
        assert_eq!(builder.servings(), 1);
        builder.set_servings(-7);
        assert_eq!(builder.servings(), 1);
        builder.set_servings(6);
        assert_eq!(builder.servings(), 6);
    }

    #[test]
    fn test_servings_input_coercion() {
        let mut builder = RecipeRequestBuilder::new();
        builder.set_servings_input("abc");
        assert_eq!(builder.servings(), 1);
        builder.set_servings_input("3 people");
        assert_eq!(builder.servings(), 3);
        builder.set_servings_input("2.5");
        assert_eq!(builder.servings(), 2);
        builder.set_servings_input("");
        assert_eq!(builder.servings(), 1);
        builder.set_servings_input("-4");
        assert_eq!(builder.servings(), 1);
    }

    #[test]
    fn test_servings_stepper_floor() {
        let mut builder = RecipeRequestBuilder::new();
        builder.decrement_servings();
        builder.decrement_servings();
        builder.decrement_servings();
        assert_eq!(builder.servings(), 1);
        builder.increment_servings();
        assert_eq!(builder.servings(), 2);
    }

    #[test]
    fn test_unknown_dietary_is_rejected_and_kept() {
        let mut builder = RecipeRequestBuilder::new();
        builder.set_dietary("vegan").unwrap();
        let result = builder.set_dietary("paleo");
        assert_eq!(
            result,
            Err(ValidationError::UnknownDietaryPreference("paleo".to_string()))
        );
        assert_eq!(builder.dietary(), DietaryPreference::Vegan);
    }

    #[test]
    fn test_submit_snapshot_is_independent() {
        let mut builder = RecipeRequestBuilder::new();
        builder.add_ingredient("rice").unwrap();
        let request = builder.submit().unwrap();
        builder.add_ingredient("beans").unwrap();
        assert_eq!(request.ingredients().len(), 1);
    }

    #[test]
    fn test_reset() {
        let mut builder = RecipeRequestBuilder::new();
        builder.add_ingredient("rice").unwrap();
        builder.set_servings(8);
        builder.reset();
        assert!(builder.ingredients().is_empty());
        assert_eq!(builder.servings(), 2);
    }
}
