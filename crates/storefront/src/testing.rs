//! In-memory backend and notification recorder for controller tests.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use pantry_core::{CartEntryId, OrderId, Price, ProductId, Quantity};
use rust_decimal::Decimal;
use tokio::sync::oneshot;

use crate::api::{
    ApiError, CartEntry, CartSnapshot, OrderReceipt, OrderRequest, Product, StoreApi,
};
use crate::notify::{Notification, Notifier};

/// Which backend call a test is talking about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Products,
    Cart,
    AddToCart,
    UpdateCartEntry,
    RemoveCartEntry,
    ClearCart,
    SubmitOrder,
}

#[derive(Debug, Clone)]
enum Failure {
    Rejected(String),
    NoAnswer,
}

/// The fake's half of a [`Hold`].
#[derive(Debug)]
struct Gate {
    reached: oneshot::Sender<()>,
    release: oneshot::Receiver<()>,
}

/// A call parked inside the backend until released.
#[derive(Debug)]
pub struct Hold {
    reached: oneshot::Receiver<()>,
    release: oneshot::Sender<()>,
}

impl Hold {
    /// Wait for the held call to arrive, run `inspect` while it is parked,
    /// then let it continue.
    pub async fn inspect<R>(self, inspect: impl FnOnce() -> R) -> R {
        let _ = self.reached.await;
        let seen = inspect();
        let _ = self.release.send(());
        seen
    }
}

#[derive(Debug, Default)]
struct FakeState {
    products: Vec<Product>,
    entries: Vec<CartEntry>,
    next_entry: u32,
    calls: Vec<Endpoint>,
    failures: HashMap<Endpoint, Failure>,
    gates: HashMap<Endpoint, Gate>,
    orders: Vec<OrderRequest>,
}

/// Behaves like the real backend: adds for the same product accumulate and
/// totals are computed server-side.
#[derive(Debug, Default)]
pub struct FakeStore {
    state: Mutex<FakeState>,
}

impl FakeStore {
    pub fn with_products(products: Vec<Product>) -> Self {
        let store = Self::default();
        store.lock().products = products;
        store
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make the next call to `endpoint` fail with a server message.
    pub fn reject_next(&self, endpoint: Endpoint, message: &str) {
        self.lock()
            .failures
            .insert(endpoint, Failure::Rejected(message.to_string()));
    }

    /// Make the next call to `endpoint` fail without a server answer.
    pub fn drop_next(&self, endpoint: Endpoint) {
        self.lock().failures.insert(endpoint, Failure::NoAnswer);
    }

    /// Park the next call to `endpoint` until the returned hold lets go.
    pub fn hold(&self, endpoint: Endpoint) -> Hold {
        let (reached_tx, reached_rx) = oneshot::channel();
        let (release_tx, release_rx) = oneshot::channel();
        self.lock().gates.insert(
            endpoint,
            Gate {
                reached: reached_tx,
                release: release_rx,
            },
        );
        Hold {
            reached: reached_rx,
            release: release_tx,
        }
    }

    pub fn calls(&self) -> Vec<Endpoint> {
        self.lock().calls.clone()
    }

    pub fn count(&self, endpoint: Endpoint) -> usize {
        self.lock().calls.iter().filter(|c| **c == endpoint).count()
    }

    pub fn orders(&self) -> Vec<OrderRequest> {
        self.lock().orders.clone()
    }

    async fn pause(&self, endpoint: Endpoint) {
        let gate = self.lock().gates.remove(&endpoint);
        if let Some(gate) = gate {
            let _ = gate.reached.send(());
            let _ = gate.release.await;
        }
    }

    /// Record the call and apply any injected failure.
    fn enter(&self, endpoint: Endpoint) -> Result<std::sync::MutexGuard<'_, FakeState>, ApiError> {
        let mut state = self.lock();
        state.calls.push(endpoint);
        match state.failures.remove(&endpoint) {
            None => Ok(state),
            Some(Failure::Rejected(message)) => Err(ApiError::Rejected {
                status: 400,
                message,
            }),
            Some(Failure::NoAnswer) => Err(no_answer()),
        }
    }
}

fn no_answer() -> ApiError {
    match serde_json::from_str::<serde_json::Value>("") {
        Err(e) => ApiError::Parse(e),
        Ok(_) => unreachable!("empty input never parses"),
    }
}

fn rejected(message: &str) -> ApiError {
    ApiError::Rejected {
        status: 400,
        message: message.to_string(),
    }
}

fn line_total(product: &Product, qty: u32) -> Price {
    Price::twd(product.price.amount * Decimal::from(qty))
}

fn snapshot(entries: &[CartEntry]) -> CartSnapshot {
    let total = entries
        .iter()
        .fold(Decimal::ZERO, |sum, entry| sum + entry.total.amount);
    CartSnapshot {
        entries: entries.to_vec(),
        total: Price::twd(total),
        final_total: Price::twd(total),
    }
}

impl StoreApi for FakeStore {
    async fn products(&self) -> Result<Vec<Product>, ApiError> {
        self.pause(Endpoint::Products).await;
        Ok(self.enter(Endpoint::Products)?.products.clone())
    }

    async fn cart(&self) -> Result<CartSnapshot, ApiError> {
        self.pause(Endpoint::Cart).await;
        Ok(snapshot(&self.enter(Endpoint::Cart)?.entries))
    }

    async fn add_to_cart(&self, product_id: &ProductId, qty: Quantity) -> Result<String, ApiError> {
        self.pause(Endpoint::AddToCart).await;
        let mut state = self.enter(Endpoint::AddToCart)?;
        let product = state
            .products
            .iter()
            .find(|p| &p.id == product_id)
            .cloned()
            .ok_or_else(|| rejected("找不到產品"))?;

        if let Some(entry) = state
            .entries
            .iter_mut()
            .find(|e| &e.product_id == product_id)
        {
            entry.qty += u32::from(qty);
            entry.total = line_total(&product, entry.qty);
            entry.final_total = entry.total;
        } else {
            state.next_entry += 1;
            let id = CartEntryId::new(format!("cart-{}", state.next_entry));
            let qty = u32::from(qty);
            state.entries.push(CartEntry {
                id,
                product_id: product_id.clone(),
                qty,
                total: line_total(&product, qty),
                final_total: line_total(&product, qty),
                product,
            });
        }
        Ok("已加入購物車".to_string())
    }

    async fn update_cart_entry(
        &self,
        entry_id: &CartEntryId,
        _product_id: &ProductId,
        qty: Quantity,
    ) -> Result<String, ApiError> {
        self.pause(Endpoint::UpdateCartEntry).await;
        let mut state = self.enter(Endpoint::UpdateCartEntry)?;
        let entry = state
            .entries
            .iter_mut()
            .find(|e| &e.id == entry_id)
            .ok_or_else(|| rejected("找不到購物車"))?;
        entry.qty = u32::from(qty);
        entry.total = line_total(&entry.product, entry.qty);
        entry.final_total = entry.total;
        Ok("已更新購物車".to_string())
    }

    async fn remove_cart_entry(&self, entry_id: &CartEntryId) -> Result<String, ApiError> {
        self.pause(Endpoint::RemoveCartEntry).await;
        let mut state = self.enter(Endpoint::RemoveCartEntry)?;
        let before = state.entries.len();
        state.entries.retain(|e| &e.id != entry_id);
        if state.entries.len() == before {
            return Err(rejected("找不到該筆購物車資料"));
        }
        Ok("已刪除".to_string())
    }

    async fn clear_cart(&self) -> Result<String, ApiError> {
        self.pause(Endpoint::ClearCart).await;
        self.enter(Endpoint::ClearCart)?.entries.clear();
        Ok("已全部刪除".to_string())
    }

    async fn submit_order(&self, order: &OrderRequest) -> Result<OrderReceipt, ApiError> {
        self.pause(Endpoint::SubmitOrder).await;
        let mut state = self.enter(Endpoint::SubmitOrder)?;
        if state.entries.is_empty() {
            return Err(rejected("購物車無資料"));
        }
        let total = snapshot(&state.entries).final_total;
        state.entries.clear();
        state.orders.push(order.clone());
        Ok(OrderReceipt {
            message: "已建立訂單".to_string(),
            order_id: Some(OrderId::new(format!("order-{}", state.orders.len()))),
            total: Some(total),
        })
    }
}

/// Keeps every notification for assertions.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn all(&self) -> Vec<Notification> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.all().into_iter().map(|n| n.message).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}

/// A catalog product with sensible defaults.
pub fn product(id: &str, price: i64) -> Product {
    Product {
        id: ProductId::new(id),
        title: format!("商品 {id}"),
        category: "茶葉".to_string(),
        price: Price::from(price),
        origin_price: None,
        unit: Some("罐".to_string()),
        content: "150公克".to_string(),
        description: String::new(),
        image_url: format!("https://img.example/{id}.jpg"),
        images_url: vec![format!("https://img.example/{id}-2.jpg")],
        is_enabled: true,
    }
}
