//! Input normalization and validation for catalog writes
//!
//! All strings are trimmed before checking. Every required field that ends up
//! empty is reported at once, in declaration order.

use super::models::{CollectionFields, ItemFields};
use serde::Deserialize;
use serde_json::Value;
use vmuseum_common::{Error, Result};

/// Item as submitted by the admin panel
///
/// Everything is optional here so that missing fields can be reported together.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ItemInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub collection: Option<String>,
    pub photo: Option<String>,
    /// Number or numeric string
    pub year: Option<Value>,
    pub cultural_context: Option<String>,
    pub historical_period: Option<String>,
    pub material: Option<String>,
    pub dimensions: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CollectionInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
}

fn trimmed(value: &Option<String>) -> String {
    value.as_deref().unwrap_or_default().trim().to_string()
}

fn year_text(value: &Option<Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn missing_fields_error(missing: &[&str]) -> Error {
    Error::InvalidInput(format!(
        "Missing required fields: {}.",
        missing.join(", ")
    ))
}

/// Parse a year in `0..=current_year`
pub fn parse_year(text: &str, current_year: i32) -> Result<i32> {
    let invalid = || {
        Error::InvalidInput(format!(
            "Year must be a whole number between 0 and {}.",
            current_year
        ))
    };

    let year = match text.parse::<i64>() {
        Ok(year) => year,
        // Accept integral floats such as "1889.0"
        Err(_) => match text.parse::<f64>() {
            Ok(f) if f.fract() == 0.0 && f.is_finite() => f as i64,
            _ => return Err(invalid()),
        },
    };

    if (0..=i64::from(current_year)).contains(&year) {
        Ok(year as i32)
    } else {
        Err(invalid())
    }
}

pub fn validate_item(input: &ItemInput, current_year: i32) -> Result<ItemFields> {
    let title = trimmed(&input.title);
    let description = trimmed(&input.description);
    let category = trimmed(&input.category);
    let collection = trimmed(&input.collection);
    let photo = trimmed(&input.photo);
    let year = year_text(&input.year);
    let cultural_context = trimmed(&input.cultural_context);
    let historical_period = trimmed(&input.historical_period);
    let material = trimmed(&input.material);
    let dimensions = trimmed(&input.dimensions);

    let missing: Vec<&str> = [
        ("title", &title),
        ("description", &description),
        ("category", &category),
        ("collection", &collection),
        ("photo", &photo),
        ("year", &year),
        ("cultural_context", &cultural_context),
        ("historical_period", &historical_period),
        ("material", &material),
        ("dimensions", &dimensions),
    ]
    .into_iter()
    .filter(|(_, value)| value.is_empty())
    .map(|(name, _)| name)
    .collect();

    if !missing.is_empty() {
        return Err(missing_fields_error(&missing));
    }

    Ok(ItemFields {
        year: parse_year(&year, current_year)?,
        title,
        description,
        category,
        collection,
        photo,
        cultural_context,
        historical_period,
        material,
        dimensions,
    })
}

/// `#RRGGBB`, hex digits in either case
pub fn is_hex_color(color: &str) -> bool {
    color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit())
}

pub fn validate_collection(input: &CollectionInput) -> Result<CollectionFields> {
    let name = trimmed(&input.name);
    let description = trimmed(&input.description);
    let color = trimmed(&input.color);

    let missing: Vec<&str> = [
        ("name", &name),
        ("description", &description),
        ("color", &color),
    ]
    .into_iter()
    .filter(|(_, value)| value.is_empty())
    .map(|(field, _)| field)
    .collect();

    if !missing.is_empty() {
        return Err(missing_fields_error(&missing));
    }

    if !is_hex_color(&color) {
        return Err(Error::InvalidInput(
            "Color must be a hexadecimal value such as #FF0000.".to_string(),
        ));
    }

    Ok(CollectionFields {
        name,
        description,
        color,
    })
}
