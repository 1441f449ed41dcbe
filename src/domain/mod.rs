//! Domain layer: request sub-objects with construction-time validation (no I/O).

#[macro_use]
mod macros;

mod digest;
mod email;
mod event;
mod request;
mod validation;
mod value;

pub use digest::md5_hex;
pub use email::{Email, EmailBuilder, Validation};
pub use event::{Event, EventBuilder, EventType, TimeParseError};
pub use request::{Request, RequestBuilder, SerializationError};
pub use validation::{ValidationError, is_valid_address, is_valid_domain_name};
pub use value::{
    Account, AccountBuilder, Billing, BillingBuilder, CreditCard, CreditCardBuilder,
    DeliverySpeed, Device, DeviceBuilder, Location, Order, OrderBuilder, Payment,
    PaymentBuilder, PaymentProcessor, Shipping, ShippingBuilder, ShoppingCartItem,
    ShoppingCartItemBuilder,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_addresses_round_trip_and_infer_domain() {
        for address in [
            "test@test.org",
            "a.b+c@mail.example.co.uk",
            "\"test@test\"@test.org",
            "x@[10.0.0.1]",
        ] {
            let email = Email::builder().address(address).unwrap().build();
            assert_eq!(email.address(), Some(address));
            let expected = address.rsplit_once('@').map(|(_, domain)| domain);
            assert_eq!(email.domain(), expected);
        }
    }

    #[test]
    fn mixed_case_addresses_hash_identically() {
        let upper = Email::builder()
            .address("TEST@X.org")
            .unwrap()
            .hash_address()
            .build();
        let lower = Email::builder()
            .address("test@x.org")
            .unwrap()
            .hash_address()
            .build();
        assert_eq!(upper.address(), lower.address());
        assert_eq!(upper.address_md5(), Some(md5_hex("test@x.org").as_str()));
    }

    #[test]
    fn unvalidated_builder_never_fails() {
        for input in ["", " ", "@", "a@b@c", "\"", "bad domain @!", "ünïcödé"] {
            let email = EmailBuilder::new(Validation::Skip)
                .address(input)
                .unwrap()
                .domain(input)
                .unwrap()
                .build();
            assert_eq!(email.address(), Some(input));
            assert_eq!(email.domain(), Some(input));
        }
    }

    #[test]
    fn validators_agree_with_builder() {
        assert!(is_valid_address("test@test.org"));
        assert!(!is_valid_address("a@test@test.org"));
        assert!(is_valid_domain_name("test.org"));
        assert!(!is_valid_domain_name(" test.org"));
    }

    #[test]
    fn request_json_nests_email_with_hashed_address() {
        let request = Request::builder()
            .email(
                Email::builder()
                    .address("test@test.org")
                    .unwrap()
                    .hash_address()
                    .build(),
            )
            .build();
        assert_eq!(
            request.to_json().unwrap(),
            r#"{"email":{"address":"476869598e748d958e819c180af31982","domain":"test.org"}}"#
        );
    }
}
