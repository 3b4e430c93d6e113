//! The cart synchronization controller and the view state it owns.
//!
//! [`Storefront`] is the single owner of everything a front end renders: the
//! catalog, the cart snapshot, the open product view and the two loading
//! flags. Operations live next to their concern (`catalog`, `cart`,
//! `checkout`); this module holds the shared plumbing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use crate::api::{CartSnapshot, Product};
use crate::catalog::ProductDetail;
use crate::error::StoreError;
use crate::notify::{Notification, NotificationPosition, Notifier};

/// Storefront controller shared across front-end callbacks.
///
/// This struct is cheaply cloneable via `Arc`. Operations take `&self`, so
/// independent user actions may overlap; nothing serializes them and the
/// last cart re-fetch to land decides what is displayed.
pub struct Storefront<A, N> {
    inner: Arc<StorefrontInner<A, N>>,
}

struct StorefrontInner<A, N> {
    api: A,
    notifier: N,
    view: RwLock<ViewState>,
    /// In-flight page-level operations (catalog, delete, clear, checkout).
    fullscreen: AtomicUsize,
    /// In-flight button-level operations (add, quantity change).
    button: AtomicUsize,
}

/// Everything the front end renders. Snapshots are swapped, never edited.
#[derive(Debug, Default)]
pub(crate) struct ViewState {
    pub(crate) products: Arc<Vec<Product>>,
    pub(crate) cart: Arc<CartSnapshot>,
    pub(crate) detail: Option<ProductDetail>,
}

/// Which loading indicators should be showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadingState {
    /// Page-wide overlay.
    pub fullscreen: bool,
    /// Spinner on the triggering button.
    pub button: bool,
}

impl<A, N> Clone for Storefront<A, N> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A, N> Storefront<A, N> {
    /// Create a controller with an empty catalog and an empty cart.
    pub fn new(api: A, notifier: N) -> Self {
        Self {
            inner: Arc::new(StorefrontInner {
                api,
                notifier,
                view: RwLock::new(ViewState::default()),
                fullscreen: AtomicUsize::new(0),
                button: AtomicUsize::new(0),
            }),
        }
    }

    /// Get a reference to the API backend.
    #[must_use]
    pub fn api(&self) -> &A {
        &self.inner.api
    }

    /// Get a reference to the notification sink.
    #[must_use]
    pub fn notifier(&self) -> &N {
        &self.inner.notifier
    }

    /// The loaded catalog.
    #[must_use]
    pub fn products(&self) -> Arc<Vec<Product>> {
        self.read(|view| Arc::clone(&view.products))
    }

    /// The latest cart snapshot.
    #[must_use]
    pub fn cart(&self) -> Arc<CartSnapshot> {
        self.read(|view| Arc::clone(&view.cart))
    }

    #[must_use]
    pub fn loading(&self) -> LoadingState {
        LoadingState {
            fullscreen: self.is_fullscreen_loading(),
            button: self.is_button_loading(),
        }
    }

    #[must_use]
    pub fn is_fullscreen_loading(&self) -> bool {
        self.inner.fullscreen.load(Ordering::SeqCst) > 0
    }

    #[must_use]
    pub fn is_button_loading(&self) -> bool {
        self.inner.button.load(Ordering::SeqCst) > 0
    }

    // =========================================================================
    // Crate-internal plumbing
    // =========================================================================

    /// Read the view state. The lock is never held across an `.await`.
    pub(crate) fn read<R>(&self, f: impl FnOnce(&ViewState) -> R) -> R {
        let view = self
            .inner
            .view
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        f(&view)
    }

    /// Mutate the view state. The lock is never held across an `.await`.
    pub(crate) fn write<R>(&self, f: impl FnOnce(&mut ViewState) -> R) -> R {
        let mut view = self
            .inner
            .view
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        f(&mut view)
    }

    pub(crate) fn fullscreen_loading(&self) -> LoadingGuard<'_> {
        LoadingGuard::acquire(&self.inner.fullscreen)
    }

    pub(crate) fn button_loading(&self) -> LoadingGuard<'_> {
        LoadingGuard::acquire(&self.inner.button)
    }
}

impl<A, N: Notifier> Storefront<A, N> {
    pub(crate) fn notify_success(&self, message: impl Into<String>, position: NotificationPosition) {
        self.inner
            .notifier
            .notify(Notification::success(message, position));
    }

    /// Raise the error's notification and hand the error back.
    pub(crate) fn fail(&self, err: StoreError) -> StoreError {
        self.inner
            .notifier
            .notify(Notification::error(err.notification_text()));
        err
    }
}

/// Holds one loading flag raised until dropped.
///
/// Flags count in-flight calls, so an overlapping call finishing first does
/// not hide another call's spinner.
#[must_use = "the flag drops as soon as the guard does"]
pub(crate) struct LoadingGuard<'a> {
    counter: &'a AtomicUsize,
}

impl<'a> LoadingGuard<'a> {
    fn acquire(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self { counter }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::TracingNotifier;

    #[test]
    fn test_new_controller_is_idle_and_empty() {
        let store = Storefront::new((), TracingNotifier);
        assert!(store.products().is_empty());
        assert!(store.cart().is_empty());
        assert_eq!(store.loading(), LoadingState::default());
    }

    #[test]
    fn test_loading_guards_count_overlapping_calls() {
        let store = Storefront::new((), TracingNotifier);

        let first = store.button_loading();
        let second = store.button_loading();
        assert!(store.is_button_loading());
        assert!(!store.is_fullscreen_loading());

        drop(first);
        assert!(store.is_button_loading());
        drop(second);
        assert!(!store.is_button_loading());
    }

    #[test]
    fn test_clones_share_state() {
        let store = Storefront::new((), TracingNotifier);
        let other = store.clone();
        let _loading = other.fullscreen_loading();
        assert!(store.is_fullscreen_loading());
    }
}
