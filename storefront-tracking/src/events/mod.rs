//! Per-domain tracking events
//!
//! [`TrackingEvents`] is what UI code calls. Each method maps a storefront
//! snapshot through [`crate::mappers`] and pushes the result on the
//! [`Tracker`]. Tracking never fails the caller: a payload that cannot be
//! built is logged and skipped. Every `track_*` returns whether the event
//! was actually queued.

pub mod names;
mod watchers;

pub use watchers::{BasketWatcher, WishlistWatcher};

use std::sync::Arc;

use serde::Serialize;
use shared::models::{
    Basket, BasketItem, Customer, Order, Product, Promotion, Search, Variant, Wishlist,
    WishlistItem,
};
use shared::{DataLayerObject, PayloadResult};

use crate::core::page::PageContext;
use crate::mappers::{self, ItemList, ItemsEcommerce};
use crate::worker::Tracker;

#[derive(Clone)]
pub struct TrackingEvents {
    tracker: Arc<Tracker>,
}

impl TrackingEvents {
    pub fn new(tracker: Arc<Tracker>) -> Self {
        Self { tracker }
    }

    pub fn tracker(&self) -> &Arc<Tracker> {
        &self.tracker
    }

    fn push_built(&self, event: &'static str, built: PayloadResult<DataLayerObject>) -> bool {
        match built {
            Ok(payload) => self.tracker.push(payload),
            Err(e) => {
                tracing::error!(event, "Failed to build tracking payload: {e}");
                false
            }
        }
    }

    fn push_ecommerce<T: Serialize>(&self, event: &'static str, ecommerce: &T) -> bool {
        self.push_built(event, DataLayerObject::event(event).with_ecommerce_of(ecommerce))
    }

    /// Order confirmation. Absent order: nothing is pushed.
    pub fn track_purchase(&self, order: Option<&Order>) -> bool {
        match mappers::map_purchase(order) {
            Some(purchase) => self.push_ecommerce(names::PURCHASE, &purchase),
            None => {
                tracing::debug!("No order data, purchase not tracked");
                false
            }
        }
    }

    /// Current basket state (fires on basket changes)
    pub fn track_basket(&self, basket: Option<&Basket>) -> bool {
        self.push_ecommerce(names::CART, &mappers::map_basket(basket))
    }

    pub fn track_view_cart(&self, basket: Option<&Basket>) -> bool {
        self.push_ecommerce(names::VIEW_CART, &mappers::map_basket(basket))
    }

    pub fn track_add_to_cart(&self, item: &BasketItem, quantity: i64) -> bool {
        self.push_ecommerce(names::ADD_TO_CART, &mappers::map_basket_change(item, quantity))
    }

    pub fn track_remove_from_cart(&self, item: &BasketItem, quantity: i64) -> bool {
        self.push_ecommerce(
            names::REMOVE_FROM_CART,
            &mappers::map_basket_change(item, quantity),
        )
    }

    /// Current wishlist state (fires on wishlist changes)
    pub fn track_wishlist(&self, wishlist: Option<&Wishlist>) -> bool {
        self.push_ecommerce(names::WISHLIST, &mappers::map_wishlist(wishlist))
    }

    pub fn track_add_to_wishlist(&self, item: &WishlistItem) -> bool {
        self.track_wishlist_item(names::ADD_TO_WISHLIST, item)
    }

    pub fn track_remove_from_wishlist(&self, item: &WishlistItem) -> bool {
        self.track_wishlist_item(names::REMOVE_FROM_WISHLIST, item)
    }

    fn track_wishlist_item(&self, event: &'static str, item: &WishlistItem) -> bool {
        let items = mappers::map_wishlist_item(item).into_iter().collect();
        self.push_ecommerce(event, &ItemsEcommerce::new(items))
    }

    pub fn track_view_item(&self, product: &Product, variant: Option<&Variant>) -> bool {
        self.push_ecommerce(names::VIEW_ITEM, &mappers::map_view_item(product, variant))
    }

    pub fn track_view_item_list(&self, products: &[Product], list: &ItemList, offset: usize) -> bool {
        if products.is_empty() {
            return false;
        }
        self.push_ecommerce(
            names::VIEW_ITEM_LIST,
            &mappers::map_item_list(products, list, offset),
        )
    }

    pub fn track_select_item(&self, product: &Product, list: &ItemList, index: usize) -> bool {
        self.push_ecommerce(
            names::SELECT_ITEM,
            &mappers::map_select_item(product, list, index),
        )
    }

    pub fn track_view_promotion(
        &self,
        promotion: &Promotion,
        product: Option<&Product>,
        creative_slot: &str,
    ) -> bool {
        self.push_ecommerce(
            names::VIEW_PROMOTION,
            &mappers::map_promotion(promotion, product, creative_slot),
        )
    }

    pub fn track_select_promotion(
        &self,
        promotion: &Promotion,
        product: Option<&Product>,
        creative_slot: &str,
    ) -> bool {
        self.push_ecommerce(
            names::SELECT_PROMOTION,
            &mappers::map_promotion(promotion, product, creative_slot),
        )
    }

    /// Promotion badge on a product tile or detail page, if any applies
    pub fn track_product_promotion(
        &self,
        product: &Product,
        promotions: &[Promotion],
        creative_slot: &str,
    ) -> bool {
        match mappers::resolve_promotion_for_product(Some(product), promotions, mappers::by_priority) {
            Some(promotion) => self.track_view_promotion(promotion, Some(product), creative_slot),
            None => false,
        }
    }

    pub fn track_search(&self, search: &Search) -> bool {
        self.push_built(
            names::SEARCH,
            DataLayerObject::event(names::SEARCH).with_fields_of(&mappers::map_search(search)),
        )
    }

    /// Customer details, at most once per flush window
    ///
    /// Several call sites (session start, late user fetch) may report the
    /// customer; a `customer_data` event already queued wins.
    pub fn track_customer_data(&self, customer: Option<&Customer>) -> bool {
        if self.tracker.has_event_in_queue(names::CUSTOMER_DATA) {
            tracing::debug!("customer_data already queued, skipping");
            return false;
        }
        self.push_built(
            names::CUSTOMER_DATA,
            DataLayerObject::event(names::CUSTOMER_DATA)
                .with_fields_of(&mappers::map_customer(customer)),
        )
    }

    /// Page view. Updates the page context first so that every event flushed
    /// afterwards is stamped with the new page.
    pub fn track_content_view(&self, content_name: Option<&str>, page: PageContext) -> bool {
        let mut payload = DataLayerObject::event(names::CONTENT_VIEW)
            .with_page(page.page_type.clone(), page.page_type_id.clone());
        if let Some(name) = content_name {
            payload = payload.with_content_name(name);
        }
        self.tracker.session().set_page_context(page);
        self.tracker.push(payload)
    }
}
