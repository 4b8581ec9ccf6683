//! Text exports of a recipe. All functions are pure.

use std::fmt::Write as _;
use std::io;
use std::path::{Path, PathBuf};

use crate::model::Recipe;

pub const EXPORT_EXTENSION: &str = "txt";
pub const EXPORT_MIME_TYPE: &str = "text/plain";

/// Downloadable plain-text export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextExport {
    pub file_name: String,
    pub mime_type: &'static str,
    pub content: String,
}

impl TextExport {
    pub fn from_recipe(recipe: &Recipe) -> Self {
        TextExport {
            file_name: export_file_name(&recipe.title),
            mime_type: EXPORT_MIME_TYPE,
            content: to_plain_text_document(recipe),
        }
    }

    /// Write the export into `dir`, returning the full path
    pub fn write_to(&self, dir: &Path) -> io::Result<PathBuf> {
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.content)?;
        Ok(path)
    }
}

/// Full document with numbered sections.
///
/// Optional sections (tips, pairing, nutrition) only appear when the recipe
/// has them.
pub fn to_plain_text_document(recipe: &Recipe) -> String {
    let mut sections = vec![
        format!(
            "{}\n{}",
            recipe.title,
            "=".repeat(recipe.title.chars().count())
        ),
        format!(
            "Cooking Time: {}\nServings: {}",
            recipe.cooking_time, recipe.servings
        ),
        format!("INGREDIENTS:\n{}", numbered(&recipe.ingredients)),
        format!("STEPS:\n{}", numbered(&recipe.steps)),
    ];

    if let Some(tips) = &recipe.tips {
        sections.push(format!("CHEF'S TIPS:\n{tips}"));
    }
    if let Some(pairing) = &recipe.pairing {
        sections.push(format!("WINE PAIRING:\n{pairing}"));
    }
    if let Some(nutrition) = &recipe.nutrition {
        sections.push(format!(
            "NUTRITION (per serving):\nCalories: {}\nProtein: {}\nFat: {}\nCarbs: {}",
            nutrition.calories, nutrition.protein, nutrition.fat, nutrition.carbs
        ));
    }

    sections.join("\n\n")
}

/// Dense summary for the clipboard, entries emitted verbatim
pub fn to_clipboard_summary(recipe: &Recipe) -> String {
    format!(
        "{}\n\nCooking Time: {}\nServings: {}\n\nIngredients:\n{}\n\nSteps:\n{}",
        recipe.title,
        recipe.cooking_time,
        recipe.servings,
        recipe.ingredients.join("\n"),
        recipe.steps.join("\n")
    )
}

/// Lower-case file name where everything outside `[a-z0-9]` becomes `_`.
///
/// ```
/// use recipe_gateway::presenter::export_file_name;
///
/// assert_eq!(
///     export_file_name("Mediterranean Herb Chicken!"),
///     "mediterranean_herb_chicken_.txt"
/// );
/// ```
pub fn export_file_name(title: &str) -> String {
    let slug: String = title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("{slug}.{EXPORT_EXTENSION}")
}

fn numbered(items: &[String]) -> String {
    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = write!(out, "{}. {}", i + 1, item);
    }
    out
}
