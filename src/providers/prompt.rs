use crate::model::GenerationRequest;

/// The system prompt fixing the output contract: a bare JSON recipe object.
///
/// Loaded from `system_prompt.txt` at compile time so it can be edited
/// without dealing with Rust string syntax.
pub const RECIPE_SYSTEM_PROMPT: &str = include_str!("system_prompt.txt");

/// System + user message pair sent to the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipePrompt {
    pub system: String,
    pub user: String,
}

impl RecipePrompt {
    pub fn for_request(request: &GenerationRequest) -> Self {
        RecipePrompt {
            system: RECIPE_SYSTEM_PROMPT.to_string(),
            user: build_user_prompt(request),
        }
    }
}

/// Build the user instruction for a request. Deterministic for equal requests.
pub fn build_user_prompt(request: &GenerationRequest) -> String {
    let ingredients = request.ingredients().as_slice().join(", ");
    let dietary = request.dietary().prompt_text();

    format!(
        "Create a recipe for {servings} servings using these ingredients: {ingredients}.
Dietary preference: {dietary}.

Requirements:
- Use the provided ingredients creatively
- Adjust the recipe to match the {dietary} dietary preference
- Provide realistic cooking times
- Include specific quantities for all ingredients
- Make sure nutritional info matches the dietary preference
- Return ONLY the JSON object, no additional text",
        servings = request.servings(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::RecipeRequestBuilder;

    fn request(dietary: &str) -> GenerationRequest {
        let mut builder = RecipeRequestBuilder::new();
        builder.add_ingredient("chicken").unwrap();
        builder.add_ingredient("garlic").unwrap();
        builder.add_ingredient("lemon").unwrap();
        builder.set_dietary(dietary).unwrap();
        builder.set_servings(3);
        builder.submit().unwrap()
    }

    #[test]
    fn test_system_prompt_is_embedded() {
        assert!(!RECIPE_SYSTEM_PROMPT.is_empty());
        assert!(RECIPE_SYSTEM_PROMPT.contains("ONLY valid JSON"));
        for field in ["\"title\"", "\"cookingTime\"", "\"ingredients\"", "\"steps\"", "\"nutrition\""] {
            assert!(RECIPE_SYSTEM_PROMPT.contains(field), "missing {field}");
        }
    }

    #[test]
    fn test_user_prompt_restates_request() {
        let prompt = build_user_prompt(&request("vegan"));
        assert!(prompt.contains("for 3 servings"));
        assert!(prompt.contains("chicken, garlic, lemon"));
        assert!(prompt.contains("Dietary preference: vegan."));
        assert!(prompt.contains("specific quantities for all ingredients"));
        assert!(prompt.contains("nutritional info matches"));
    }

    #[test]
    fn test_no_restriction_wording() {
        let prompt = build_user_prompt(&request("none"));
        assert!(prompt.contains("Dietary preference: no dietary restrictions."));
        assert!(!prompt.contains("preference: none"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        assert_eq!(
            RecipePrompt::for_request(&request("keto")),
            RecipePrompt::for_request(&request("keto"))
        );
    }
}
