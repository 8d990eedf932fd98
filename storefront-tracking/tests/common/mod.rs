#![allow(dead_code)]

use std::sync::Arc;

use shared::models::*;
use storefront_tracking::{MemorySink, Tracker, TrackingConfig, TrackingEvents, TrackingSession};

pub fn config() -> TrackingConfig {
    TrackingConfig::with_event_order([
        "customer_data",
        "content_view",
        "cart",
        "view_cart",
        "view_item",
        "add_to_cart",
        "purchase",
    ])
}

pub struct Harness {
    pub tracker: Arc<Tracker>,
    pub events: TrackingEvents,
    pub sink: Arc<MemorySink>,
}

pub fn harness() -> Harness {
    let config = config();
    let sink = Arc::new(MemorySink::new());
    let session = Arc::new(TrackingSession::with_sink(&config, sink.clone()));
    let tracker = Arc::new(Tracker::start(session, &config));
    Harness {
        events: TrackingEvents::new(tracker.clone()),
        tracker,
        sink,
    }
}

pub fn price(with_tax: CentAmount) -> Price {
    Price {
        currency_code: "EUR".into(),
        with_tax,
        without_tax: with_tax,
        ..Default::default()
    }
}

pub fn product(id: i64, variant_id: i64, with_tax: CentAmount) -> Product {
    Product {
        id,
        name: Some(format!("Product {id}")),
        is_sold_out: false,
        brand: None,
        categories: vec![],
        images: vec![],
        variants: vec![Variant {
            id: variant_id,
            price: price(with_tax),
            stock: None,
            attributes: Default::default(),
        }],
        attributes: Default::default(),
    }
}

pub fn basket_item(key: &str, product_id: i64, variant_id: i64, unit: CentAmount, quantity: i64) -> BasketItem {
    let product = product(product_id, variant_id, unit);
    BasketItem {
        key: key.into(),
        quantity,
        variant: product.variants[0].clone(),
        product,
        price: BasketItemPrice {
            total: price(unit * quantity),
            unit: price(unit),
        },
        promotion_id: None,
    }
}

pub fn basket(items: Vec<BasketItem>) -> Basket {
    let total = items.iter().map(|i| i.price.total.with_tax).sum();
    Basket {
        key: "basket-1".into(),
        currency_code: "EUR".into(),
        items,
        cost: BasketCost {
            with_tax: total,
            without_tax: total,
        },
    }
}
