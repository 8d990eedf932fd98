//! Search Model

use serde::{Deserialize, Serialize};

/// How the shopper reached the search destination
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SearchAction {
    /// Free-text query submitted with enter
    SearchTerm,
    /// A suggestion from the flyout was clicked
    Suggestion,
    /// Search term resolved to a direct navigation
    Redirect,
}

/// What a search query resolved to
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SearchEntity {
    Term,
    Product {
        product_id: i64,
        #[serde(default)]
        name: Option<String>,
    },
    Category {
        category_id: i64,
        #[serde(default)]
        name: Option<String>,
    },
    Navigation {
        url: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Search {
    pub term: String,
    pub action: SearchAction,
    pub entity: SearchEntity,
    /// Destination URL after the search resolved
    #[serde(default)]
    pub destination: Option<String>,
}
