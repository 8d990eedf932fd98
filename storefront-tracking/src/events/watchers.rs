//! Re-track basket / wishlist on state change
//!
//! The storefront refreshes basket and wishlist state often, mostly without
//! any content change. A watcher keeps the last snapshot it tracked and only
//! pushes when [`did_data_change`] reports a difference. A snapshot that
//! could not be queued (no sink yet) is not remembered, so the next
//! observation retries it.

use shared::models::{Basket, Wishlist};

use super::TrackingEvents;
use crate::mappers::did_data_change;

#[derive(Debug, Default)]
pub struct BasketWatcher {
    last: Option<Basket>,
}

impl BasketWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the latest basket state; returns true if a `cart` event was pushed
    pub fn observe(&mut self, events: &TrackingEvents, basket: Option<&Basket>) -> bool {
        if !did_data_change(self.last.as_ref(), basket) {
            return false;
        }
        let pushed = events.track_basket(basket);
        if pushed {
            self.last = basket.cloned();
        }
        pushed
    }
}

#[derive(Debug, Default)]
pub struct WishlistWatcher {
    last: Option<Wishlist>,
}

impl WishlistWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the latest wishlist state; returns true if a `wishlist` event was pushed
    pub fn observe(&mut self, events: &TrackingEvents, wishlist: Option<&Wishlist>) -> bool {
        if !did_data_change(self.last.as_ref(), wishlist) {
            return false;
        }
        let pushed = events.track_wishlist(wishlist);
        if pushed {
            self.last = wishlist.cloned();
        }
        pushed
    }
}
