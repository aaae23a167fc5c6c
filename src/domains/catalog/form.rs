//! Add-tool form validation.
//!
//! The form layer is stricter than storage: it requires every descriptive
//! field, a known category, a positive price and at least one tag.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domains::tools::{CATEGORIES, NewTool, model::MAX_RATING};

/// A numeric form field, submitted either as a JSON number or as the raw text
/// of the input element.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FormNumber {
    Number(f64),
    Text(String),
}

impl FormNumber {
    fn parse(&self) -> Option<f64> {
        let value = match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse::<f64>().ok(),
        };
        value.filter(|n| n.is_finite())
    }

    fn is_blank(&self) -> bool {
        matches!(self, Self::Text(s) if s.trim().is_empty())
    }
}

impl Default for FormNumber {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

fn default_rating() -> FormNumber {
    FormNumber::Number(0.0)
}

/// Values submitted by the add-tool form.
#[derive(Debug, Clone, Deserialize)]
pub struct AddToolForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub price: FormNumber,
    #[serde(default)]
    pub image: String,
    #[serde(default = "default_rating")]
    pub rating: FormNumber,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
}

impl Default for AddToolForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            category: String::new(),
            price: FormNumber::default(),
            image: String::new(),
            rating: default_rating(),
            tags: Vec::new(),
            features: Vec::new(),
        }
    }
}

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

/// Every rule the submission broke.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("form has {} invalid field(s)", .0.len())]
pub struct FormError(pub Vec<FieldError>);

impl FormError {
    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }
}

/// Trim labels, drop blanks and keep the first occurrence of each label.
pub fn normalize_labels(labels: Vec<String>) -> Vec<String> {
    let mut kept: Vec<String> = Vec::with_capacity(labels.len());
    for label in labels {
        let label = label.trim();
        if !label.is_empty() && !kept.iter().any(|k| k == label) {
            kept.push(label.to_string());
        }
    }
    kept
}

impl AddToolForm {
    /// Check every rule and build the create payload.
    pub fn validate(self) -> Result<NewTool, FormError> {
        let mut errors = Vec::new();
        let mut reject =
            |field: &'static str, message: &'static str| errors.push(FieldError { field, message });

        let title = self.title.trim().to_string();
        if title.is_empty() {
            reject("title", "Title is required");
        }

        let description = self.description.trim().to_string();
        if description.is_empty() {
            reject("description", "Description is required");
        }

        let category = self.category.trim().to_string();
        if category.is_empty() {
            reject("category", "Category is required");
        } else if !CATEGORIES.contains(&category.as_str()) {
            reject("category", "Category must be one of the listed categories");
        }

        let price = if self.price.is_blank() {
            reject("price", "Price is required");
            0.0
        } else {
            match self.price.parse() {
                Some(p) if p > 0.0 => p,
                _ => {
                    reject("price", "Price must be greater than zero");
                    0.0
                }
            }
        };

        let image = self.image.trim().to_string();
        if !image.is_empty() && !image.starts_with("http") {
            reject("image", "Must be a valid URL starting with http");
        }

        let rating = match self.rating.parse() {
            Some(r) if (0.0..=MAX_RATING).contains(&r) => r,
            Some(_) => {
                reject("rating", "Rating must be 0-5");
                0.0
            }
            None => {
                reject("rating", "Must be a number");
                0.0
            }
        };

        let tags = normalize_labels(self.tags);
        if tags.is_empty() {
            reject("tags", "At least one tag is required");
        }

        let features = normalize_labels(self.features);

        if !errors.is_empty() {
            return Err(FormError(errors));
        }

        Ok(NewTool {
            title,
            description,
            category,
            price,
            image: (!image.is_empty()).then_some(image),
            rating,
            tags,
            features: (!features.is_empty()).then_some(features),
        })
    }
}
