//! Strict decoding of provider text into a [`Recipe`].
//!
//! The provider's output is untyped JSON, sometimes wrapped in a markdown
//! code fence. Decoding is all-or-nothing: either every required field is
//! present and well-formed, or an error is returned and no recipe exists.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::model::{Nutrition, Recipe};

/// Used when the provider leaves `cookingTime` out
pub const UNSPECIFIED_COOKING_TIME: &str = "Not specified";

#[derive(Error, Debug)]
pub enum RecipeParseError {
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("expected a JSON object at the top level")]
    NotAnObject,

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("invalid field `{field}`: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

/// Remove leading and trailing markdown code-fence markers.
///
/// Handles "```json" / "```" openers on their own line and a closing "```".
pub fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix("```") {
        // Drop the language tag, if any, up to the end of the opener line
        text = match rest.find('\n') {
            Some(newline) => &rest[newline + 1..],
            None => rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric()),
        };
    }
    if let Some(rest) = text.trim_end().strip_suffix("```") {
        text = rest;
    }

    text.trim()
}

/// Parse provider text into a recipe.
///
/// `servings_hint` is used when the provider omits `servings` or returns
/// something that is not a positive integer.
pub fn parse_recipe(raw: &str, servings_hint: u32) -> Result<Recipe, RecipeParseError> {
    let value: Value = serde_json::from_str(strip_code_fences(raw))?;
    let object = value.as_object().ok_or(RecipeParseError::NotAnObject)?;

    let title = required_text(object, "title")?;
    let ingredients = required_list(object, "ingredients")?;
    let steps = required_list(object, "steps")?;

    let cooking_time = optional_text(object, "cookingTime")?
        .unwrap_or_else(|| UNSPECIFIED_COOKING_TIME.to_string());
    let servings = object
        .get("servings")
        .and_then(positive_integer)
        .unwrap_or(servings_hint.max(1));

    Ok(Recipe {
        title,
        cooking_time,
        servings,
        ingredients,
        steps,
        tips: optional_text(object, "tips")?,
        nutrition: nutrition(object)?,
        pairing: optional_text(object, "pairing")?,
    })
}

/// Strings are taken as-is, numbers are rendered ("calories": 320)
fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn required_text(object: &Map<String, Value>, field: &'static str) -> Result<String, RecipeParseError> {
    match optional_text(object, field)? {
        Some(text) => Ok(text),
        None => Err(RecipeParseError::MissingField(field)),
    }
}

/// Absent, null and blank values all count as "not applicable"
fn optional_text(
    object: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<String>, RecipeParseError> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => {
            let text = as_text(value).ok_or_else(|| RecipeParseError::InvalidField {
                field,
                reason: "expected a string".to_string(),
            })?;
            Ok(Some(text).filter(|t| !t.is_empty()))
        }
    }
}

fn required_list(
    object: &Map<String, Value>,
    field: &'static str,
) -> Result<Vec<String>, RecipeParseError> {
    let items = match object.get(field) {
        None | Some(Value::Null) => return Err(RecipeParseError::MissingField(field)),
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(RecipeParseError::InvalidField {
                field,
                reason: "expected an array of strings".to_string(),
            })
        }
    };

    let mut list = Vec::with_capacity(items.len());
    for item in items {
        let text = as_text(item).ok_or_else(|| RecipeParseError::InvalidField {
            field,
            reason: format!("unexpected entry {item}"),
        })?;
        if !text.is_empty() {
            list.push(text);
        }
    }

    if list.is_empty() {
        return Err(RecipeParseError::InvalidField {
            field,
            reason: "must not be empty".to_string(),
        });
    }
    Ok(list)
}

fn positive_integer(value: &Value) -> Option<u32> {
    let n = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }?;
    u32::try_from(n).ok().filter(|n| *n >= 1)
}

fn nutrition(object: &Map<String, Value>) -> Result<Option<Nutrition>, RecipeParseError> {
    let facts = match object.get("nutrition") {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Object(facts)) => facts,
        Some(_) => {
            return Err(RecipeParseError::InvalidField {
                field: "nutrition",
                reason: "expected an object".to_string(),
            })
        }
    };

    let fact = |name: &'static str| {
        facts
            .get(name)
            .and_then(as_text)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| RecipeParseError::InvalidField {
                field: "nutrition",
                reason: format!("missing `{name}`"),
            })
    };

    Ok(Some(Nutrition {
        calories: fact("calories")?,
        protein: fact("protein")?,
        fat: fact("fat")?,
        carbs: fact("carbs")?,
    }))
}
