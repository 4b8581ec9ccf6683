pub mod builder;
pub mod config;
pub mod error;
pub mod gateway;
pub mod generator;
pub mod model;
pub mod parse;
pub mod presenter;
pub mod providers;
pub mod server;
pub mod session;

pub use builder::RecipeRequestBuilder;
pub use config::GatewayConfig;
pub use error::{GenerationError, SessionError, SetupError, ValidationError};
pub use gateway::RecipeGateway;
pub use generator::{generator_from_config, DemoRecipeGenerator, RecipeGenerator};
pub use model::{DietaryPreference, GenerationRequest, IngredientList, Nutrition, Recipe};
pub use presenter::{export_file_name, to_clipboard_summary, to_plain_text_document, TextExport};
pub use session::{Session, SessionState};

/// Generate a recipe using configuration from `config.toml` / environment.
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
/// let recipe = recipe_gateway::generate_recipe(&["chicken", "lemon"], "none", 2).await?;
/// println!("{}", recipe_gateway::to_plain_text_document(&recipe));
/// # Ok(())
/// # }
/// ```
pub async fn generate_recipe(
    ingredients: &[&str],
    dietary: &str,
    servings: i64,
) -> Result<Recipe, Box<dyn std::error::Error + Send + Sync>> {
    let mut form = RecipeRequestBuilder::new();
    for ingredient in ingredients {
        form.add_ingredient(ingredient)?;
    }
    form.set_dietary(dietary)?;
    form.set_servings(servings);
    let request = form.submit()?;

    let config = GatewayConfig::load(None)?;
    let generator = generator_from_config(&config)?;
    Ok(generator.generate(request).await?)
}
