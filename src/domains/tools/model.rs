//! Tool record schema.
//!
//! `Tool` is the only persisted entity. `NewTool` is the create payload and
//! `ToolPatch` the update payload; both deserialize from client JSON and
//! silently drop keys that are not part of the schema.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use bson::oid::ObjectId;
use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::persistence::{StorageError, StorageResult};

/// Category labels offered by the add-tool form.
pub const CATEGORIES: [&str; 7] = [
    "Developer Tools",
    "Design Tools",
    "Productivity",
    "Security",
    "Testing",
    "Analytics",
    "Other",
];

/// Highest rating a Tool may carry.
pub const MAX_RATING: f64 = 5.0;

// ============================================================================
// Identifier
// ============================================================================

/// Storage key of a Tool: a 12-byte ObjectId rendered as 24 hex characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToolId(ObjectId);

impl ToolId {
    /// Generate a fresh identifier. Identifiers generated later sort higher.
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    /// Parse a path segment. Only checks the format, never existence.
    pub fn parse(raw: &str) -> Option<Self> {
        ObjectId::parse_str(raw).ok().map(Self)
    }

    /// The underlying ObjectId.
    pub fn object_id(&self) -> ObjectId {
        self.0
    }
}

impl From<ObjectId> for ToolId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl FromStr for ToolId {
    type Err = StorageError;

    fn from_str(s: &str) -> StorageResult<Self> {
        Self::parse(s).ok_or_else(|| StorageError::validation(format!("malformed id: {s}")))
    }
}

impl Display for ToolId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

impl Serialize for ToolId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_hex())
    }
}

impl<'de> Deserialize<'de> for ToolId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Timestamps
// ============================================================================

/// Current time at the millisecond precision the document store keeps.
pub fn timestamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Timestamp for an update that is strictly later than `previous`.
pub fn next_update_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = timestamp_now();
    if now > previous {
        now
    } else {
        previous + Duration::milliseconds(1)
    }
}

// ============================================================================
// Records
// ============================================================================

/// A marketplace listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    #[serde(rename = "_id")]
    pub id: ToolId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub rating: f64,
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tool {
    /// Build the stored record for a create payload.
    pub fn from_new(id: ToolId, input: NewTool, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: input.title,
            description: input.description,
            category: input.category,
            price: input.price,
            image: input.image,
            rating: input.rating,
            tags: input.tags,
            features: input.features,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Create payload. Only `title` is mandatory at this layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTool {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub features: Option<Vec<String>>,
}

impl NewTool {
    /// Storage schema check applied before insert.
    pub fn validate(&self) -> StorageResult<()> {
        check_title(&self.title)?;
        check_price(self.price)?;
        check_rating(self.rating)
    }
}

/// Update payload. Every present field replaces the stored one.
///
/// Identifier and timestamps are owned by storage and cannot be patched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// `Some(None)` clears the stored image.
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// `Some(None)` clears the stored features.
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub features: Option<Option<Vec<String>>>,
}

/// Tells a key sent as `null` (`Some(None)`) apart from an absent key (`None`,
/// via `#[serde(default)]`).
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl ToolPatch {
    /// Storage schema check for the submitted fields.
    pub fn validate(&self) -> StorageResult<()> {
        if let Some(title) = &self.title {
            check_title(title)?;
        }
        if let Some(price) = self.price {
            check_price(price)?;
        }
        if let Some(rating) = self.rating {
            check_rating(rating)?;
        }
        Ok(())
    }

    /// Overwrite the submitted fields on `tool`, leaving the rest untouched.
    pub fn apply_to(self, tool: &mut Tool) {
        if let Some(title) = self.title {
            tool.title = title;
        }
        if let Some(description) = self.description {
            tool.description = description;
        }
        if let Some(category) = self.category {
            tool.category = category;
        }
        if let Some(price) = self.price {
            tool.price = price;
        }
        if let Some(image) = self.image {
            tool.image = image;
        }
        if let Some(rating) = self.rating {
            tool.rating = rating;
        }
        if let Some(tags) = self.tags {
            tool.tags = tags;
        }
        if let Some(features) = self.features {
            tool.features = features;
        }
    }
}

fn check_title(title: &str) -> StorageResult<()> {
    if title.trim().is_empty() {
        return Err(StorageError::validation("title is required"));
    }
    Ok(())
}

fn check_price(price: f64) -> StorageResult<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(StorageError::validation(format!(
            "price must be a non-negative number, got {price}"
        )));
    }
    Ok(())
}

fn check_rating(rating: f64) -> StorageResult<()> {
    if !rating.is_finite() || !(0.0..=MAX_RATING).contains(&rating) {
        return Err(StorageError::validation(format!(
            "rating must be between 0 and {MAX_RATING}, got {rating}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_id_format() {
        assert!(ToolId::parse("65a1f0c2e4b0a1b2c3d4e5f6").is_some());
        assert!(ToolId::parse("65A1F0C2E4B0A1B2C3D4E5F6").is_some());
        assert!(ToolId::parse("not-an-id").is_none());
        assert!(ToolId::parse("65a1f0c2e4b0a1b2c3d4e5f").is_none());
        assert!(ToolId::parse("65a1f0c2e4b0a1b2c3d4e5fz").is_none());
        assert!(ToolId::parse("").is_none());
    }

    #[test]
    fn test_generated_ids_increase() {
        let first = ToolId::generate();
        let second = ToolId::generate();
        assert!(second > first);
    }

    #[test]
    fn test_tool_json_layout() {
        let now = timestamp_now();
        let id = ToolId::generate();
        let input: NewTool = serde_json::from_value(json!({
            "title": "X",
            "description": "d",
            "category": "Other",
            "price": 9.99,
            "tags": ["a"]
        }))
        .unwrap();
        let tool = Tool::from_new(id, input, now);

        let value = serde_json::to_value(&tool).unwrap();
        assert_eq!(value["_id"], id.to_string());
        assert_eq!(value["title"], "X");
        assert_eq!(value["price"], 9.99);
        assert_eq!(value["rating"], 0.0);
        assert_eq!(value["tags"], json!(["a"]));
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert!(value.get("image").is_none());
        assert!(value.get("features").is_none());
    }

    #[test]
    fn test_new_tool_requires_title_key() {
        let result = serde_json::from_value::<NewTool>(json!({ "price": 1.0 }));
        assert!(result.is_err());
    }

    #[test]
    fn test_new_tool_schema_checks() {
        let mut input = NewTool {
            title: "Linter".to_string(),
            ..Default::default()
        };
        assert!(input.validate().is_ok());

        input.price = -1.0;
        assert!(matches!(input.validate(), Err(StorageError::Validation(_))));

        input.price = 1.0;
        input.rating = 5.5;
        assert!(input.validate().is_err());

        input.rating = 5.0;
        input.title = "   ".to_string();
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_patch_ignores_storage_owned_keys() {
        let patch: ToolPatch = serde_json::from_value(json!({
            "_id": "65a1f0c2e4b0a1b2c3d4e5f6",
            "createdAt": "2020-01-01T00:00:00Z",
            "price": 12.5,
            "unknown": true
        }))
        .unwrap();

        assert_eq!(
            patch,
            ToolPatch {
                price: Some(12.5),
                ..Default::default()
            }
        );
        assert_eq!(serde_json::to_value(&patch).unwrap(), json!({ "price": 12.5 }));
    }

    #[test]
    fn test_patch_applies_only_submitted_fields() {
        let now = timestamp_now();
        let mut tool = Tool::from_new(
            ToolId::generate(),
            NewTool {
                title: "Before".to_string(),
                description: "keep me".to_string(),
                tags: vec!["a".to_string()],
                ..Default::default()
            },
            now,
        );

        ToolPatch {
            title: Some("After".to_string()),
            tags: Some(vec!["b".to_string(), "c".to_string()]),
            ..Default::default()
        }
        .apply_to(&mut tool);

        assert_eq!(tool.title, "After");
        assert_eq!(tool.description, "keep me");
        assert_eq!(tool.tags, vec!["b", "c"]);
    }

    #[test]
    fn test_patch_null_clears_optional_fields() {
        let mut tool = Tool::from_new(
            ToolId::generate(),
            NewTool {
                title: "Shot".to_string(),
                image: Some("https://a/b.png".to_string()),
                features: Some(vec!["f".to_string()]),
                ..Default::default()
            },
            timestamp_now(),
        );

        let absent: ToolPatch = serde_json::from_value(json!({ "title": "Shot 2" })).unwrap();
        assert_eq!(absent.image, None);
        absent.apply_to(&mut tool);
        assert_eq!(tool.image.as_deref(), Some("https://a/b.png"));

        let cleared: ToolPatch =
            serde_json::from_value(json!({ "image": null, "features": null })).unwrap();
        assert_eq!(cleared.image, Some(None));
        assert_eq!(cleared.features, Some(None));
        cleared.apply_to(&mut tool);
        assert_eq!(tool.image, None);
        assert_eq!(tool.features, None);
        assert_eq!(tool.title, "Shot 2");
    }

    #[test]
    fn test_update_timestamp_always_advances() {
        let future = timestamp_now() + Duration::seconds(10);
        assert!(next_update_timestamp(future) > future);

        let past = timestamp_now() - Duration::seconds(10);
        assert!(next_update_timestamp(past) > past);
    }
}
