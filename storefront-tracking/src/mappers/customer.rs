//! Customer data mapping

use serde::Serialize;
use shared::models::Customer;
use shared::util::hash_email;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerData {
    pub customer_id: String,
    pub login_status: &'static str,
    pub customer_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_hash: Option<String>,
}

/// Customer fields for the `customer_data` event; `None` is a logged-out visitor
pub fn map_customer(customer: Option<&Customer>) -> CustomerData {
    let Some(customer) = customer else {
        return CustomerData {
            customer_id: String::new(),
            login_status: "logged_out",
            customer_type: "visitor",
            email_hash: None,
        };
    };

    let customer_type = if customer.is_guest() {
        "guest"
    } else if customer.order_count.unwrap_or(0) > 0 {
        "existing"
    } else {
        "new"
    };

    CustomerData {
        customer_id: customer.id.to_string(),
        login_status: "logged_in",
        customer_type,
        email_hash: customer.email.as_deref().map(hash_email),
    }
}
