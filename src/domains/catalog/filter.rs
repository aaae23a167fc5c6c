//! In-memory derivations over the Tool list.
//!
//! These never touch storage: the views fetch the full list once and filter it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domains::tools::{Tool, ToolId};

/// Category label meaning "no category filter".
pub const ALL_CATEGORIES: &str = "All";

/// Query string of the discover view.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiscoverQuery {
    /// Case-insensitive substring of the title.
    #[serde(default)]
    pub search: String,

    /// Exact category, or `All`.
    #[serde(default)]
    pub category: Option<String>,
}

/// Query string of the management view.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManageQuery {
    #[serde(default)]
    pub search: String,
}

/// Case-insensitive title substring match. An empty needle matches everything.
pub fn title_matches(tool: &Tool, search: &str) -> bool {
    tool.title
        .to_lowercase()
        .contains(&search.trim().to_lowercase())
}

fn category_matches(tool: &Tool, category: Option<&str>) -> bool {
    match category {
        None | Some(ALL_CATEGORIES) | Some("") => true,
        Some(category) => tool.category == category,
    }
}

/// Tools passing both the search and the category filter, in list order.
pub fn discover<'a>(tools: &'a [Tool], query: &DiscoverQuery) -> Vec<&'a Tool> {
    tools
        .iter()
        .filter(|tool| {
            title_matches(tool, &query.search)
                && category_matches(tool, query.category.as_deref())
        })
        .collect()
}

/// `All` followed by each distinct category in first-seen order.
pub fn categories(tools: &[Tool]) -> Vec<String> {
    let mut labels = vec![ALL_CATEGORIES.to_string()];
    for tool in tools {
        if !labels.iter().skip(1).any(|label| *label == tool.category) {
            labels.push(tool.category.clone());
        }
    }
    labels
}

/// One row of the management table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManageRow {
    #[serde(rename = "_id")]
    pub id: ToolId,
    pub title: String,
    pub category: String,
    pub price: f64,
    pub rating: f64,
    pub tags: Vec<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Tool> for ManageRow {
    fn from(tool: &Tool) -> Self {
        Self {
            id: tool.id,
            title: tool.title.clone(),
            category: tool.category.clone(),
            price: tool.price,
            rating: tool.rating,
            tags: tool.tags.clone(),
            updated_at: tool.updated_at,
        }
    }
}

/// Management rows whose title matches `search`.
pub fn manage_rows(tools: &[Tool], search: &str) -> Vec<ManageRow> {
    tools
        .iter()
        .filter(|tool| title_matches(tool, search))
        .map(ManageRow::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::NewTool;
    use crate::domains::tools::model::timestamp_now;

    fn tool(title: &str, category: &str) -> Tool {
        Tool::from_new(
            ToolId::generate(),
            NewTool {
                title: title.to_string(),
                category: category.to_string(),
                tags: vec!["t".to_string()],
                ..Default::default()
            },
            timestamp_now(),
        )
    }

    fn catalog() -> Vec<Tool> {
        vec![
            tool("API Tester Mini", "Testing"),
            tool("Color Picker", "Design Tools"),
            tool("api docs builder", "Developer Tools"),
            tool("Load Tester", "Testing"),
        ]
    }

    fn titles(tools: &[&Tool]) -> Vec<String> {
        tools.iter().map(|t| t.title.clone()).collect()
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let tools = catalog();
        let query = DiscoverQuery {
            search: "API".to_string(),
            category: None,
        };
        assert_eq!(
            titles(&discover(&tools, &query)),
            vec!["API Tester Mini", "api docs builder"]
        );
    }

    #[test]
    fn test_category_filter_is_exact() {
        let tools = catalog();
        let query = DiscoverQuery {
            search: String::new(),
            category: Some("Testing".to_string()),
        };
        assert_eq!(
            titles(&discover(&tools, &query)),
            vec!["API Tester Mini", "Load Tester"]
        );

        let query = DiscoverQuery {
            search: String::new(),
            category: Some("testing".to_string()),
        };
        assert!(discover(&tools, &query).is_empty());
    }

    #[test]
    fn test_all_category_and_empty_search_match_everything() {
        let tools = catalog();
        let query = DiscoverQuery {
            search: String::new(),
            category: Some(ALL_CATEGORIES.to_string()),
        };
        assert_eq!(discover(&tools, &query).len(), tools.len());
    }

    #[test]
    fn test_search_and_category_combine() {
        let tools = catalog();
        let query = DiscoverQuery {
            search: "tester".to_string(),
            category: Some("Testing".to_string()),
        };
        assert_eq!(
            titles(&discover(&tools, &query)),
            vec!["API Tester Mini", "Load Tester"]
        );
    }

    #[test]
    fn test_categories_first_seen_order() {
        assert_eq!(
            categories(&catalog()),
            vec!["All", "Testing", "Design Tools", "Developer Tools"]
        );
        assert_eq!(categories(&[]), vec!["All"]);
    }

    #[test]
    fn test_manage_rows_filter_by_title() {
        let tools = catalog();
        let rows = manage_rows(&tools, "picker");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, tools[1].id);

        let value = serde_json::to_value(&rows[0]).unwrap();
        assert!(value.get("_id").is_some());
        assert!(value.get("updatedAt").is_some());
        assert!(value.get("description").is_none());
    }
}
