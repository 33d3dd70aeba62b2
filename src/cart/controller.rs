//! Cart Controller
//!
//! Mediates between the event bus and the cart store: bus events mutate
//! the store, and every mutation pushes a full refresh (visible lines,
//! coupon list, total) to the view collaborator. Stateless beyond the
//! references it holds and the coupon submission counter.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::debug;

use super::events::{self, CartEvent};
use super::gateway::RemoteGateway;
use super::models::{CartLine, Coupon};
use super::store::CartStore;
use crate::bus::EventBus;

/// Narrow rendering contract consumed by the controller. The real
/// storefront renders tables; tests record what they were asked to draw.
pub trait CartView {
    fn render_lines(&mut self, lines: &[CartLine]);
    fn render_coupons(&mut self, coupons: &[Coupon]);
    fn render_total(&mut self, total: f64);
}

/// Result of a coupon submission.
///
/// Default UX stays silent on `NotFound`; the value exists so a caller
/// *may* surface feedback without changing that default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CouponOutcome {
    Applied,
    Duplicate,
    NotFound,
    /// A newer submission raced ahead; this stale result was discarded.
    Superseded,
}

pub struct CartController<G> {
    store: Rc<RefCell<CartStore>>,
    view: Rc<RefCell<dyn CartView>>,
    gateway: G,
    bus: Rc<EventBus<CartEvent>>,
    /// Monotonic counter guarding against stale coupon lookups.
    coupon_seq: Cell<u64>,
}

impl<G: RemoteGateway + 'static> CartController<G> {
    pub fn new(
        bus: Rc<EventBus<CartEvent>>,
        store: Rc<RefCell<CartStore>>,
        view: Rc<RefCell<dyn CartView>>,
        gateway: G,
    ) -> Rc<Self> {
        Rc::new(Self {
            store,
            view,
            gateway,
            bus,
            coupon_seq: Cell::new(0),
        })
    }

    /// Subscribes the controller to the three cart mutation topics.
    pub fn attach(self: &Rc<Self>) {
        let ctrl = Rc::clone(self);
        self.bus.subscribe(events::ADD_ITEM_TO_CART, move |event| {
            if let Some(item) = event.item() {
                ctrl.store.borrow_mut().add_item(item);
                ctrl.refresh();
            }
        });

        let ctrl = Rc::clone(self);
        self.bus
            .subscribe(events::REMOVE_ITEM_FROM_CART, move |event| {
                if let Some(item) = event.item() {
                    ctrl.store.borrow_mut().remove_item(item);
                    ctrl.refresh();
                }
            });

        let ctrl = Rc::clone(self);
        self.bus
            .subscribe(events::SET_ITEM_AMOUNT_IN_CART, move |event| {
                if let CartEvent::ItemAmount { item, amount } = event {
                    ctrl.store.borrow_mut().set_item_amount(item, *amount);
                    ctrl.refresh();
                }
            });
    }

    /// Empties the cart, notifying every previously held line's widget
    /// through its `resetItemAmount:<id>` topic.
    pub fn reset(&self) {
        let cleared = self.store.borrow_mut().reset();
        for id in cleared {
            self.bus
                .publish(&events::reset_item_amount(id), &CartEvent::Empty);
        }
        self.refresh();
    }

    /// Looks up a submitted coupon code and merges the result into the
    /// cart. Unknown codes are silent; duplicates short-circuit before the
    /// lookup. If another submission starts while this one is in flight,
    /// the stale result is discarded.
    pub async fn submit_coupon(&self, coupon_code: &str) -> CouponOutcome {
        if self.store.borrow().has_coupon(coupon_code) {
            return CouponOutcome::Duplicate;
        }

        let seq = self.coupon_seq.get() + 1;
        self.coupon_seq.set(seq);

        let found = self.gateway.coupon_by_id(coupon_code).await;

        if self.coupon_seq.get() != seq {
            debug!(code = coupon_code, "stale coupon lookup discarded");
            return CouponOutcome::Superseded;
        }

        let outcome = match found {
            Some(coupon) => {
                if self.store.borrow_mut().apply_coupon(coupon) {
                    CouponOutcome::Applied
                } else {
                    CouponOutcome::Duplicate
                }
            }
            None => {
                debug!(code = coupon_code, "coupon not found");
                CouponOutcome::NotFound
            }
        };
        self.refresh();
        outcome
    }

    /// Pushes the full cart snapshot to the view: visible lines, coupon
    /// list and total, all three every time.
    fn refresh(&self) {
        let (lines, coupons, total) = {
            let store = self.store.borrow();
            let lines: Vec<CartLine> =
                store.visible_lines().into_iter().cloned().collect();
            (lines, store.coupons().to_vec(), store.total_bill())
        };
        let mut view = self.view.borrow_mut();
        view.render_lines(&lines);
        view.render_coupons(&coupons);
        view.render_total(total);
    }
}
