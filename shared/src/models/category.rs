//! Category Model

use serde::{Deserialize, Serialize};

/// One node of a product's category path
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductCategory {
    pub category_id: i64,
    pub category_name: String,
    #[serde(default)]
    pub category_url: Option<String>,
    #[serde(default)]
    pub category_hidden: bool,
}

/// Deepest category across a list of category paths
///
/// Each path runs from the root to a leaf. The longest path wins, the first
/// one on ties; its last node is returned.
pub fn deepest_category(paths: &[Vec<ProductCategory>]) -> Option<&ProductCategory> {
    let mut deepest: Option<&Vec<ProductCategory>> = None;
    for path in paths {
        if deepest.is_none_or(|d| path.len() > d.len()) {
            deepest = Some(path);
        }
    }
    deepest.and_then(|path| path.last())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat(id: i64, name: &str) -> ProductCategory {
        ProductCategory {
            category_id: id,
            category_name: name.to_string(),
            category_url: None,
            category_hidden: false,
        }
    }

    #[test]
    fn test_deepest_category() {
        let paths = vec![
            vec![cat(1, "Women"), cat(2, "Shoes")],
            vec![cat(1, "Women"), cat(3, "Shoes"), cat(4, "Sneakers")],
            vec![cat(5, "Sale"), cat(6, "Shoes"), cat(7, "Boots")],
        ];
        let deepest = deepest_category(&paths).unwrap();
        assert_eq!(deepest.category_id, 4);
    }

    #[test]
    fn test_deepest_category_empty() {
        assert!(deepest_category(&[]).is_none());
        assert!(deepest_category(&[vec![]]).is_none());
    }
}
