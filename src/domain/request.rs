use serde::Serialize;

use crate::domain::email::Email;
use crate::domain::event::Event;
use crate::domain::value::{
    Account, Billing, CreditCard, Device, Order, Payment, Shipping, ShoppingCartItem,
};

#[derive(Debug, thiserror::Error)]
#[error("failed to encode request as JSON: {0}")]
pub struct SerializationError(#[from] serde_json::Error);

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// A complete scoring request.
///
/// Every part is optional. Unset parts and an empty shopping cart are left out of the
/// JSON document entirely.
pub struct Request {
    #[serde(skip_serializing_if = "Option::is_none")]
    account: Option<Account>,
    #[serde(skip_serializing_if = "Option::is_none")]
    billing: Option<Billing>,
    #[serde(skip_serializing_if = "Option::is_none")]
    credit_card: Option<CreditCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    device: Option<Device>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<Email>,
    #[serde(skip_serializing_if = "Option::is_none")]
    event: Option<Event>,
    #[serde(skip_serializing_if = "Option::is_none")]
    order: Option<Order>,
    #[serde(skip_serializing_if = "Option::is_none")]
    payment: Option<Payment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    shipping: Option<Shipping>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    shopping_cart: Vec<ShoppingCartItem>,
}

impl Request {
    pub fn builder() -> RequestBuilder {
        RequestBuilder::default()
    }

    /// Encode the request as the JSON document the scoring service expects.
    pub fn to_json(&self) -> Result<String, SerializationError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn account(&self) -> Option<&Account> {
        self.account.as_ref()
    }

    pub fn billing(&self) -> Option<&Billing> {
        self.billing.as_ref()
    }

    pub fn credit_card(&self) -> Option<&CreditCard> {
        self.credit_card.as_ref()
    }

    pub fn device(&self) -> Option<&Device> {
        self.device.as_ref()
    }

    pub fn email(&self) -> Option<&Email> {
        self.email.as_ref()
    }

    pub fn event(&self) -> Option<&Event> {
        self.event.as_ref()
    }

    pub fn order(&self) -> Option<&Order> {
        self.order.as_ref()
    }

    pub fn payment(&self) -> Option<&Payment> {
        self.payment.as_ref()
    }

    pub fn shipping(&self) -> Option<&Shipping> {
        self.shipping.as_ref()
    }

    /// Cart items in the order they were added.
    pub fn shopping_cart(&self) -> &[ShoppingCartItem] {
        &self.shopping_cart
    }
}

#[derive(Debug, Clone, Default)]
/// Builder for [`Request`]. Sub-objects are moved in.
pub struct RequestBuilder {
    inner: Request,
}

impl RequestBuilder {
    pub fn account(mut self, account: Account) -> Self {
        self.inner.account = Some(account);
        self
    }

    pub fn billing(mut self, billing: Billing) -> Self {
        self.inner.billing = Some(billing);
        self
    }

    pub fn credit_card(mut self, credit_card: CreditCard) -> Self {
        self.inner.credit_card = Some(credit_card);
        self
    }

    pub fn device(mut self, device: Device) -> Self {
        self.inner.device = Some(device);
        self
    }

    pub fn email(mut self, email: Email) -> Self {
        self.inner.email = Some(email);
        self
    }

    pub fn event(mut self, event: Event) -> Self {
        self.inner.event = Some(event);
        self
    }

    pub fn order(mut self, order: Order) -> Self {
        self.inner.order = Some(order);
        self
    }

    pub fn payment(mut self, payment: Payment) -> Self {
        self.inner.payment = Some(payment);
        self
    }

    pub fn shipping(mut self, shipping: Shipping) -> Self {
        self.inner.shipping = Some(shipping);
        self
    }

    /// Append one item to the end of the shopping cart.
    pub fn add_shopping_cart_item(mut self, item: ShoppingCartItem) -> Self {
        self.inner.shopping_cart.push(item);
        self
    }

    pub fn build(self) -> Request {
        self.inner
    }
}
