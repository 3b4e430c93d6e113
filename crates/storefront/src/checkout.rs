//! Order form validation and submission.

use std::fmt;

use pantry_core::{Email, EmailError, Phone, PhoneError};
use tracing::{info, instrument, warn};

use crate::api::{OrderReceipt, OrderRequest, Recipient, StoreApi};
use crate::error::{Result, StoreError};
use crate::notify::{NotificationPosition, Notifier};
use crate::state::Storefront;

/// Raw recipient input as typed by the shopper.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderForm {
    pub email: String,
    pub name: String,
    pub tel: String,
    pub address: String,
    /// Optional note to the shop.
    pub message: String,
}

/// A validated form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Email,
    Name,
    Tel,
    Address,
}

impl FormField {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Name => "name",
            Self::Tel => "tel",
            Self::Address => "address",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a field was rejected. Displays the message shown under the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Required,
    InvalidEmail,
    InvalidTel,
}

impl FieldError {
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Required => "此欄位必填",
            Self::InvalidEmail => "Email格式錯誤",
            Self::InvalidTel => "資料格式有誤",
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl From<EmailError> for FieldError {
    fn from(err: EmailError) -> Self {
        match err {
            EmailError::Empty => Self::Required,
            EmailError::InvalidFormat => Self::InvalidEmail,
        }
    }
}

impl From<PhoneError> for FieldError {
    fn from(err: PhoneError) -> Self {
        match err {
            PhoneError::Empty => Self::Required,
            PhoneError::InvalidFormat => Self::InvalidTel,
        }
    }
}

/// Every failing field of one validation pass, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(Vec<(FormField, FieldError)>);

impl FormErrors {
    fn push(&mut self, field: FormField, error: FieldError) {
        self.0.push((field, error));
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// The error for one field, if it failed.
    #[must_use]
    pub fn get(&self, field: FormField) -> Option<FieldError> {
        self.0
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, error)| *error)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, FieldError)> + '_ {
        self.0.iter().copied()
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, error)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{field}: {error}")?;
        }
        Ok(())
    }
}

fn required(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl OrderForm {
    /// Check every field and build the order.
    ///
    /// # Errors
    ///
    /// Returns all failing fields at once.
    pub fn validate(&self) -> std::result::Result<OrderRequest, FormErrors> {
        let mut errors = FormErrors::default();

        let email = Email::parse(self.email.trim())
            .map_err(|e| errors.push(FormField::Email, e.into()))
            .ok();
        let name = required(&self.name);
        if name.is_none() {
            errors.push(FormField::Name, FieldError::Required);
        }
        let tel = Phone::parse(self.tel.trim())
            .map_err(|e| errors.push(FormField::Tel, e.into()))
            .ok();
        let address = required(&self.address);
        if address.is_none() {
            errors.push(FormField::Address, FieldError::Required);
        }

        match (email, name, tel, address) {
            (Some(email), Some(name), Some(tel), Some(address)) => Ok(OrderRequest {
                user: Recipient {
                    email,
                    name,
                    tel,
                    address,
                },
                message: self.message.clone(),
            }),
            _ => Err(errors),
        }
    }

    /// Clear every field.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl<A, N> Storefront<A, N> {
    /// The order form is only offered while the cart has entries.
    #[must_use]
    pub fn checkout_available(&self) -> bool {
        !self.cart().is_empty()
    }
}

impl<A: StoreApi, N: Notifier> Storefront<A, N> {
    /// Validate `form` and place the order for the current server cart.
    ///
    /// On success shows the server message, clears the form and re-fetches
    /// the (now empty) cart.
    ///
    /// # Errors
    ///
    /// - [`StoreError::CheckoutUnavailable`] when the cart is empty
    /// - [`StoreError::InvalidForm`] when a field fails validation
    /// - [`StoreError::ServerValidation`] with the server's message
    ///
    /// The first two send no request and raise no notification.
    #[instrument(skip_all)]
    pub async fn submit_order(&self, form: &mut OrderForm) -> Result<OrderReceipt> {
        if !self.checkout_available() {
            return Err(StoreError::CheckoutUnavailable);
        }
        let order = form.validate().map_err(StoreError::InvalidForm)?;

        let _loading = self.fullscreen_loading();

        match self.api().submit_order(&order).await {
            Ok(receipt) => {
                info!(order_id = ?receipt.order_id, "Order placed");
                self.notify_success(receipt.message.clone(), NotificationPosition::Center);
                form.reset();
                self.fetch_cart().await?;
                Ok(receipt)
            }
            Err(e) => {
                warn!(error = %e, "Order submission failed");
                Err(self.fail(StoreError::from_mutation(&e)))
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use pantry_core::{ProductId, Quantity};

    use super::*;
    use crate::testing::{Endpoint, FakeStore, RecordingNotifier, product};

    fn valid_form() -> OrderForm {
        OrderForm {
            email: "shopper@example.com".to_string(),
            name: "王小明".to_string(),
            tel: "0912345678".to_string(),
            address: "臺北市信義區市府路1號".to_string(),
            message: "請下午送達".to_string(),
        }
    }

    async fn storefront_with_cart() -> Storefront<FakeStore, Arc<RecordingNotifier>> {
        let store = Storefront::new(
            FakeStore::with_products(vec![product("p1", 480)]),
            Arc::new(RecordingNotifier::default()),
        );
        store.initialize().await.unwrap();
        store
            .add_item(&ProductId::new("p1"), Quantity::new(2).unwrap())
            .await
            .unwrap();
        store
    }

    #[test]
    fn test_valid_form_builds_order() {
        let order = valid_form().validate().unwrap();
        assert_eq!(order.user.email.as_str(), "shopper@example.com");
        assert_eq!(order.user.tel.as_str(), "0912345678");
        assert_eq!(order.message, "請下午送達");
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        let errors = OrderForm::default().validate().unwrap_err();
        assert_eq!(errors.len(), 4);
        for field in [FormField::Email, FormField::Name, FormField::Tel, FormField::Address] {
            assert_eq!(errors.get(field), Some(FieldError::Required));
        }
    }

    #[test]
    fn test_blank_name_is_required() {
        let form = OrderForm {
            name: "   ".to_string(),
            ..valid_form()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get(FormField::Name), Some(FieldError::Required));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_format_errors_use_field_messages() {
        let form = OrderForm {
            email: "not-an-email".to_string(),
            tel: "12345".to_string(),
            ..valid_form()
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get(FormField::Email), Some(FieldError::InvalidEmail));
        assert_eq!(errors.get(FormField::Tel), Some(FieldError::InvalidTel));
        assert_eq!(errors.to_string(), "email: Email格式錯誤, tel: 資料格式有誤");
    }

    #[test]
    fn test_landline_is_accepted() {
        let form = OrderForm {
            tel: "022345678".to_string(),
            ..valid_form()
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_reset_clears_fields() {
        let mut form = valid_form();
        form.reset();
        assert_eq!(form, OrderForm::default());
    }

    #[tokio::test]
    async fn test_checkout_unavailable_with_empty_cart() {
        let store = Storefront::new(
            FakeStore::with_products(vec![product("p1", 480)]),
            Arc::new(RecordingNotifier::default()),
        );
        store.fetch_cart().await.unwrap();
        assert!(!store.checkout_available());

        let mut form = valid_form();
        let err = store.submit_order(&mut form).await.unwrap_err();

        assert!(matches!(err, StoreError::CheckoutUnavailable));
        assert_eq!(store.api().count(Endpoint::SubmitOrder), 0);
        assert_eq!(form, valid_form());
    }

    #[tokio::test]
    async fn test_invalid_email_sends_nothing() {
        let store = storefront_with_cart().await;
        let mut form = OrderForm {
            email: "not-an-email".to_string(),
            ..valid_form()
        };

        let err = store.submit_order(&mut form).await.unwrap_err();

        let StoreError::InvalidForm(errors) = err else {
            panic!("expected a form error, got {err:?}");
        };
        assert_eq!(errors.get(FormField::Email), Some(FieldError::InvalidEmail));
        assert_eq!(store.api().count(Endpoint::SubmitOrder), 0);
        assert_eq!(store.notifier().all().len(), 1);
    }

    #[tokio::test]
    async fn test_successful_order_clears_form_and_cart() {
        let store = storefront_with_cart().await;
        let mut form = valid_form();

        let receipt = store.submit_order(&mut form).await.unwrap();

        assert_eq!(receipt.message, "已建立訂單");
        assert_eq!(receipt.order_id.unwrap().as_str(), "order-1");
        assert_eq!(form, OrderForm::default());
        assert!(store.cart().is_empty());
        assert!(!store.checkout_available());
        assert!(!store.is_fullscreen_loading());

        let last = store.notifier().all().pop().unwrap();
        assert_eq!(last.position, NotificationPosition::Center);
        assert_eq!(store.api().orders()[0].user.name, "王小明");
    }

    #[tokio::test]
    async fn test_rejected_order_keeps_form() {
        let store = storefront_with_cart().await;
        store.api().reject_next(Endpoint::SubmitOrder, "訂單建立失敗");
        let mut form = valid_form();

        let err = store.submit_order(&mut form).await.unwrap_err();

        assert!(matches!(err, StoreError::ServerValidation(ref m) if m == "訂單建立失敗"));
        assert_eq!(form, valid_form());
        assert_eq!(store.cart().entries.len(), 1);
        assert_eq!(store.notifier().messages().last().unwrap(), "訂單建立失敗");
    }

    #[tokio::test]
    async fn test_order_raises_fullscreen_flag() {
        let store = storefront_with_cart().await;
        let mut form = valid_form();

        let hold = store.api().hold(Endpoint::SubmitOrder);
        let (placed, during) =
            tokio::join!(store.submit_order(&mut form), hold.inspect(|| store.loading()));
        placed.unwrap();

        assert!(during.fullscreen);
        assert!(!during.button);
        assert!(!store.is_fullscreen_loading());
    }
}
