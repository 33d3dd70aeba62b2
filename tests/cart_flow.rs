//! End-to-end tests for the cart engine
//!
//! Wires the real bus, store and controller against a recording view and
//! gateways of varying temperament, and drives them the way the storefront
//! widgets do: by publishing events.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use tokio::sync::oneshot;

use storefront_cart::bus::EventBus;
use storefront_cart::cart::events::{self, CartEvent};
use storefront_cart::cart::gateway::{CatalogGateway, RemoteGateway};
use storefront_cart::cart::{
    CartController, CartLine, CartStore, CartView, Coupon, CouponOutcome, Item,
};
use storefront_cart::catalog::{Catalog, CatalogError, OrderLine, Receipt};

/// View double that records the last snapshot it was asked to draw.
#[derive(Default)]
struct RecordingView {
    lines: Vec<CartLine>,
    coupons: Vec<Coupon>,
    total: f64,
    renders: usize,
}

impl CartView for RecordingView {
    fn render_lines(&mut self, lines: &[CartLine]) {
        self.lines = lines.to_vec();
    }

    fn render_coupons(&mut self, coupons: &[Coupon]) {
        self.coupons = coupons.to_vec();
    }

    fn render_total(&mut self, total: f64) {
        self.total = total;
        self.renders += 1;
    }
}

/// Gateway double whose lookups stay pending until the test resolves them.
#[derive(Clone, Default)]
struct PendingGateway {
    pending: Rc<RefCell<HashMap<String, oneshot::Sender<Option<Coupon>>>>>,
}

impl PendingGateway {
    fn resolve(&self, code: &str, result: Option<Coupon>) {
        let sender = self
            .pending
            .borrow_mut()
            .remove(code)
            .expect("no pending lookup for code");
        let _ = sender.send(result);
    }
}

impl RemoteGateway for PendingGateway {
    fn coupon_by_id(&self, coupon_id: &str) -> BoxFuture<'static, Option<Coupon>> {
        let (tx, rx) = oneshot::channel();
        self.pending.borrow_mut().insert(coupon_id.to_string(), tx);
        Box::pin(async move { rx.await.unwrap_or(None) })
    }

    fn items(&self, _: Option<usize>, _: Option<usize>) -> BoxFuture<'static, Vec<Item>> {
        Box::pin(async { Vec::new() })
    }

    fn transact(
        &self,
        _: Vec<OrderLine>,
        _: Vec<String>,
    ) -> BoxFuture<'static, Result<Receipt, CatalogError>> {
        unimplemented!("not exercised by the cart engine")
    }
}

fn item(id: u64, price: f64, discount: u8, quantity: u32) -> Item {
    Item {
        id,
        name: format!("item-{id}"),
        price,
        discount,
        quantity,
        description: None,
        image: None,
    }
}

struct Fixture<G> {
    bus: Rc<EventBus<CartEvent>>,
    store: Rc<RefCell<CartStore>>,
    view: Rc<RefCell<RecordingView>>,
    controller: Rc<CartController<G>>,
}

fn fixture<G: RemoteGateway + 'static>(gateway: G) -> Fixture<G> {
    let bus = Rc::new(EventBus::new());
    let store = Rc::new(RefCell::new(CartStore::new()));
    let view = Rc::new(RefCell::new(RecordingView::default()));
    let dyn_view: Rc<RefCell<dyn CartView>> = view.clone();
    let controller = CartController::new(bus.clone(), store.clone(), dyn_view, gateway);
    controller.attach();
    Fixture {
        bus,
        store,
        view,
        controller,
    }
}

#[tokio::test]
async fn quantity_events_drive_the_cart() {
    let fx = fixture(PendingGateway::default());
    let apple = item(1, 10.0, 0, 5);

    for _ in 0..3 {
        fx.bus.publish(
            events::ADD_ITEM_TO_CART,
            &CartEvent::Item { item: apple.clone() },
        );
    }
    fx.bus.publish(
        events::REMOVE_ITEM_FROM_CART,
        &CartEvent::Item { item: apple.clone() },
    );

    let view = fx.view.borrow();
    assert_eq!(view.lines.len(), 1);
    assert_eq!(view.lines[0].amount, 2);
    assert_eq!(view.total, 20.0);
    // Each of the four events triggered a full refresh.
    assert_eq!(view.renders, 4);
}

#[tokio::test]
async fn set_amount_event_replaces_quantity() {
    let fx = fixture(PendingGateway::default());
    let apple = item(1, 10.0, 0, 5);

    fx.bus.publish(
        events::SET_ITEM_AMOUNT_IN_CART,
        &CartEvent::ItemAmount {
            item: apple.clone(),
            amount: 4,
        },
    );
    assert_eq!(fx.view.borrow().total, 40.0);

    fx.bus.publish(
        events::SET_ITEM_AMOUNT_IN_CART,
        &CartEvent::ItemAmount { item: apple, amount: 0 },
    );
    let view = fx.view.borrow();
    assert!(view.lines.is_empty());
    assert_eq!(view.total, 0.0);
}

#[tokio::test]
async fn coupon_lookup_applies_and_repriced_total_renders() {
    let catalog = Catalog::new();
    catalog.upsert_coupon(Coupon::percent("C1", 10));
    let fx = fixture(CatalogGateway::new(Arc::new(catalog)));
    let apple = item(1, 10.0, 0, 5);

    for _ in 0..3 {
        fx.bus.publish(
            events::ADD_ITEM_TO_CART,
            &CartEvent::Item { item: apple.clone() },
        );
    }

    assert_eq!(fx.controller.submit_coupon("C1").await, CouponOutcome::Applied);
    {
        let view = fx.view.borrow();
        assert_eq!(view.total, 27.0);
        assert_eq!(view.coupons.len(), 1);
    }

    // Submitting the same code again is a silent no-op.
    assert_eq!(
        fx.controller.submit_coupon("C1").await,
        CouponOutcome::Duplicate
    );
    assert_eq!(fx.view.borrow().total, 27.0);
    assert_eq!(fx.store.borrow().coupons().len(), 1);
}

#[tokio::test]
async fn unknown_coupon_stays_silent_but_reports() {
    let fx = fixture(CatalogGateway::new(Arc::new(Catalog::new())));
    let apple = item(1, 10.0, 0, 5);
    fx.bus.publish(
        events::ADD_ITEM_TO_CART,
        &CartEvent::Item { item: apple },
    );

    assert_eq!(
        fx.controller.submit_coupon("NOPE").await,
        CouponOutcome::NotFound
    );
    // The cart refreshes but nothing changed.
    let view = fx.view.borrow();
    assert_eq!(view.total, 10.0);
    assert!(view.coupons.is_empty());
}

#[tokio::test]
async fn stale_coupon_lookup_is_discarded() {
    let gateway = PendingGateway::default();
    let fx = fixture(gateway.clone());

    let first = fx.controller.submit_coupon("FIRST");
    let second = fx.controller.submit_coupon("SECOND");

    let driver = async {
        // Both submissions are in flight; resolve them out of order so the
        // older result arrives after the newer submission took over.
        gateway.resolve("FIRST", Some(Coupon::percent("FIRST", 50)));
        gateway.resolve("SECOND", Some(Coupon::percent("SECOND", 10)));
    };

    let (first, second, ()) = futures_util::future::join3(first, second, driver).await;
    assert_eq!(first, CouponOutcome::Superseded);
    assert_eq!(second, CouponOutcome::Applied);

    let store = fx.store.borrow();
    assert_eq!(store.coupons().len(), 1);
    assert_eq!(store.coupons()[0].coupon_id, "SECOND");
    assert_eq!(store.coupon_discount(), 10);
}

#[tokio::test]
async fn reset_notifies_each_line_once() {
    let fx = fixture(PendingGateway::default());
    let apple = item(1, 10.0, 0, 5);
    let pear = item(2, 3.0, 0, 5);

    // Stand-in for the per-item amount widgets.
    let notified = Rc::new(RefCell::new(Vec::new()));
    for id in [1u64, 2] {
        let notified = notified.clone();
        fx.bus
            .subscribe(events::reset_item_amount(id), move |_: &CartEvent| {
                notified.borrow_mut().push(id);
            });
    }

    fx.bus.publish(
        events::ADD_ITEM_TO_CART,
        &CartEvent::Item { item: apple },
    );
    fx.bus.publish(
        events::ADD_ITEM_TO_CART,
        &CartEvent::Item { item: pear },
    );

    fx.controller.reset();

    let mut seen = notified.borrow().clone();
    seen.sort_unstable();
    assert_eq!(seen, vec![1, 2]);

    let view = fx.view.borrow();
    assert!(view.lines.is_empty());
    assert!(view.coupons.is_empty());
    assert_eq!(view.total, 0.0);
    drop(view);

    // A second reset has nothing left to notify.
    notified.borrow_mut().clear();
    fx.controller.reset();
    assert!(notified.borrow().is_empty());
}
