//! Customer Model

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AuthenticationType {
    Password,
    Guest,
    Idp,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i64,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub authentication: Option<AuthenticationType>,
    /// Number of orders placed before the current session
    #[serde(default)]
    pub order_count: Option<u32>,
}

impl Customer {
    pub fn is_guest(&self) -> bool {
        self.authentication == Some(AuthenticationType::Guest)
    }
}
