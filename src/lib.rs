//! Typed request payloads for the minFraud risk-scoring web services.
//!
//! Each part of a request (account, email, event, ...) is put together with a builder
//! that validates sensitive fields as they are set, then frozen into an immutable value.
//! A [`Request`] composes those parts and encodes them into the canonical JSON document:
//! unset fields and empty lists are omitted and enumerations use their lowercase names.
//!
//! ```rust
//! use minfraud::{Email, Event, EventType, Request};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let email = Email::builder().address("test@test.org")?.hash_address().build();
//!     let event = Event::builder().event_type(EventType::Purchase).build();
//!     let request = Request::builder().email(email).event(event).build();
//!     assert_eq!(
//!         request.to_json()?,
//!         r#"{"email":{"address":"476869598e748d958e819c180af31982","domain":"test.org"},"event":{"type":"purchase"}}"#
//!     );
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;

pub use client::{Auth, MinFraudClient, MinFraudClientBuilder, MinFraudError, Service};
pub use domain::{
    Account, Billing, CreditCard, DeliverySpeed, Device, Email, EmailBuilder, Event, EventType,
    Location, Order, Payment, PaymentProcessor, Request, RequestBuilder, SerializationError,
    Shipping, ShoppingCartItem, TimeParseError, Validation, ValidationError,
};
