//! Search mapping

use serde::Serialize;
use shared::models::{Search, SearchAction, SearchEntity};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchData {
    pub search_term: String,
    pub search_action: SearchAction,
    pub search_destination: String,
    pub search_entity_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_entity_id: Option<String>,
}

pub fn map_search(search: &Search) -> SearchData {
    let (entity_type, entity_id, fallback_destination) = match &search.entity {
        SearchEntity::Term => ("term", None, None),
        SearchEntity::Product { product_id, .. } => ("product", Some(product_id.to_string()), None),
        SearchEntity::Category { category_id, .. } => {
            ("category", Some(category_id.to_string()), None)
        }
        SearchEntity::Navigation { url } => ("navigation", None, Some(url.clone())),
    };

    SearchData {
        search_term: search.term.trim().to_string(),
        search_action: search.action,
        search_destination: search
            .destination
            .clone()
            .or(fallback_destination)
            .unwrap_or_default(),
        search_entity_type: entity_type,
        search_entity_id: entity_id,
    }
}
