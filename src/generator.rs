use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::config::GatewayConfig;
use crate::error::{GenerationError, SetupError};
use crate::gateway::RecipeGateway;
use crate::model::{DietaryPreference, GenerationRequest, Nutrition, Recipe};
use crate::providers::ProviderFactory;

/// Anything that turns a validated request into a recipe.
///
/// Implemented by [`RecipeGateway`] for real providers and by
/// [`DemoRecipeGenerator`] for offline use and tests.
#[async_trait]
pub trait RecipeGenerator: Send + Sync {
    /// Short name for logs (e.g. "openai", "demo")
    fn name(&self) -> &str;

    async fn generate(&self, request: GenerationRequest) -> Result<Recipe, GenerationError>;
}

/// Deterministic generator that never leaves the process.
pub struct DemoRecipeGenerator;

#[async_trait]
impl RecipeGenerator for DemoRecipeGenerator {
    fn name(&self) -> &str {
        "demo"
    }

    async fn generate(&self, request: GenerationRequest) -> Result<Recipe, GenerationError> {
        Ok(demo_recipe(&request))
    }
}

fn demo_recipe(request: &GenerationRequest) -> Recipe {
    let ingredients = request
        .ingredients()
        .iter()
        .enumerate()
        .map(|(i, name)| format!("{} {}", i % 3 + 1, name))
        .collect();

    let carbs = match request.dietary() {
        DietaryPreference::Keto => "3g",
        _ => "15g",
    };

    Recipe {
        title: "Mediterranean Herb Chicken".to_string(),
        cooking_time: "25 minutes".to_string(),
        servings: request.servings(),
        ingredients,
        steps: vec![
            "Preheat your oven to 375°F (190°C).".to_string(),
            "Season the main protein with herbs and spices.".to_string(),
            "Heat oil in a pan over medium-high heat.".to_string(),
            "Sear the protein for 3-4 minutes on each side until golden.".to_string(),
            "Transfer to the oven and bake for 15 minutes.".to_string(),
            "Let rest for 5 minutes before serving.".to_string(),
        ],
        tips: Some(
            "For extra flavor, marinate the ingredients for 30 minutes before cooking. \
             Serve with fresh herbs and a squeeze of lemon."
                .to_string(),
        ),
        nutrition: Some(Nutrition {
            calories: "320 kcal".to_string(),
            protein: "38g".to_string(),
            fat: "12g".to_string(),
            carbs: carbs.to_string(),
        }),
        pairing: Some("A crisp Sauvignon Blanc or light Pinot Grigio".to_string()),
    }
}

/// Build the generator selected by `config.kind`
pub fn generator_from_config(config: &GatewayConfig) -> Result<Arc<dyn RecipeGenerator>, SetupError> {
    let generator: Arc<dyn RecipeGenerator> = match config.kind.as_str() {
        "demo" => Arc::new(DemoRecipeGenerator),
        kind => {
            let provider = ProviderFactory::create(kind, &config.provider)?;
            Arc::new(
                RecipeGateway::new(provider)
                    .with_timeout(config.timeout())
                    .with_retry(config.retry.clone()),
            )
        }
    };
    info!("Using '{}' recipe generator", generator.name());
    Ok(generator)
}
