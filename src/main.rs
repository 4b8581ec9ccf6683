use clap::{Parser, Subcommand, ValueEnum};
use log::error;
use std::path::PathBuf;
use std::sync::Arc;

use recipe_gateway::{
    generator_from_config, presenter, server, DemoRecipeGenerator, GatewayConfig,
    RecipeGenerator, RecipeRequestBuilder, Session, TextExport,
};

#[derive(Parser, Debug)]
#[command(name = "recipe-gateway", version, about = "Turn ingredients into a recipe")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    /// Use the built-in demo generator instead of a provider
    #[arg(long, global = true)]
    demo: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP gateway
    Serve {
        /// Address to bind to, overrides configuration
        #[arg(long)]
        address: Option<String>,
    },
    /// Generate a single recipe and print it
    Generate {
        /// Ingredient to use (repeatable)
        #[arg(short, long = "ingredient", required = true)]
        ingredients: Vec<String>,

        /// Dietary preference: none, vegan, vegetarian, keto, gluten-free, pescatarian
        #[arg(short, long, default_value = "none")]
        dietary: String,

        /// Number of servings
        #[arg(short, long, default_value = "2")]
        servings: String,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Document)]
        format: OutputFormat,

        /// Also write the plain-text document into this directory
        #[arg(long)]
        save: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    Document,
    Clipboard,
    Json,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = GatewayConfig::load(cli.config.as_deref())?;
    let generator: Arc<dyn RecipeGenerator> = if cli.demo {
        Arc::new(DemoRecipeGenerator)
    } else {
        generator_from_config(&config)?
    };

    match cli.command {
        Command::Serve { address } => {
            let address = address.unwrap_or_else(|| config.server.address.clone());
            server::serve(generator, &address).await?;
        }
        Command::Generate {
            ingredients,
            dietary,
            servings,
            format,
            save,
        } => {
            let mut form = RecipeRequestBuilder::new();
            for ingredient in &ingredients {
                if let Err(e) = form.add_ingredient(ingredient) {
                    error!("{}", e);
                }
            }
            form.set_dietary(&dietary)?;
            form.set_servings_input(&servings);

            let mut session = Session::new();
            let recipe = session.run(&mut form, generator.as_ref()).await?;

            let output = match format {
                OutputFormat::Document => presenter::to_plain_text_document(recipe),
                OutputFormat::Clipboard => presenter::to_clipboard_summary(recipe),
                OutputFormat::Json => serde_json::to_string_pretty(recipe)?,
            };
            println!("{}", output);

            if let Some(dir) = save {
                let path = TextExport::from_recipe(recipe).write_to(&dir)?;
                eprintln!("Saved {}", path.display());
            }
        }
    }

    Ok(())
}
