use std::net::IpAddr;

use rust_decimal::Decimal;
use serde::Serialize;
use url::Url;

use crate::domain::digest::md5_hex;

/// Empty strings are left off the wire just like unset ones.
pub(crate) fn is_none_or_empty(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(str::is_empty)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Account data for a scoring request.
pub struct Account {
    #[serde(skip_serializing_if = "is_none_or_empty")]
    user_id: Option<String>,
    #[serde(skip_serializing_if = "is_none_or_empty")]
    username_md5: Option<String>,
}

impl Account {
    pub fn builder() -> AccountBuilder {
        AccountBuilder::default()
    }

    string_getters!(user_id, username_md5);
}

#[derive(Debug, Clone, Default)]
pub struct AccountBuilder {
    inner: Account,
}

impl AccountBuilder {
    string_setters!(inner =>
        /// Your stable internal id for the user (not the login name if that can change).
        user_id,
    );

    /// Set the username. Only its MD5 is kept; the raw value is not stored.
    pub fn username(mut self, username: &str) -> Self {
        self.inner.username_md5 = Some(md5_hex(username));
        self
    }

    pub fn build(self) -> Account {
        self.inner
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Postal and phone fields shared by [`Billing`] and [`Shipping`].
pub struct Location {
    #[serde(skip_serializing_if = "is_none_or_empty")]
    first_name: Option<String>,
    #[serde(skip_serializing_if = "is_none_or_empty")]
    last_name: Option<String>,
    #[serde(skip_serializing_if = "is_none_or_empty")]
    company: Option<String>,
    #[serde(skip_serializing_if = "is_none_or_empty")]
    address: Option<String>,
    #[serde(skip_serializing_if = "is_none_or_empty")]
    address_2: Option<String>,
    #[serde(skip_serializing_if = "is_none_or_empty")]
    city: Option<String>,
    #[serde(skip_serializing_if = "is_none_or_empty")]
    region: Option<String>,
    #[serde(skip_serializing_if = "is_none_or_empty")]
    country: Option<String>,
    #[serde(skip_serializing_if = "is_none_or_empty")]
    postal: Option<String>,
    #[serde(skip_serializing_if = "is_none_or_empty")]
    phone_number: Option<String>,
    #[serde(skip_serializing_if = "is_none_or_empty")]
    phone_country_code: Option<String>,
}

impl Location {
    string_getters!(
        first_name,
        last_name,
        company,
        address,
        address_2,
        city,
        region,
        country,
        postal,
        phone_number,
        phone_country_code,
    );

    fn set_phone(&mut self, phone: &phonenumber::PhoneNumber) {
        let code = phone.code().value().to_string();
        let e164 = phonenumber::format(phone)
            .mode(phonenumber::Mode::E164)
            .to_string();
        let national = e164
            .strip_prefix('+')
            .and_then(|digits| digits.strip_prefix(code.as_str()))
            .unwrap_or(&e164)
            .to_owned();
        self.phone_country_code = Some(code);
        self.phone_number = Some(national);
    }
}

macro_rules! location_setters {
    () => {
        string_setters!(inner.location =>
            first_name,
            last_name,
            company,
            /// First line of the street address.
            address,
            /// Second line of the street address.
            address_2,
            city,
            /// ISO 3166-2 subdivision code, without the country prefix.
            region,
            /// ISO 3166-1 alpha-2 country code.
            country,
            postal,
            phone_number,
            phone_country_code,
        );

        /// Fill `phone_country_code` and `phone_number` from a parsed number.
        pub fn phone(mut self, phone: &phonenumber::PhoneNumber) -> Self {
            self.inner.location.set_phone(phone);
            self
        }
    };
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Billing address for a scoring request.
pub struct Billing {
    #[serde(flatten)]
    location: Location,
}

impl Billing {
    pub fn builder() -> BillingBuilder {
        BillingBuilder::default()
    }

    pub fn location(&self) -> &Location {
        &self.location
    }
}

#[derive(Debug, Clone, Default)]
pub struct BillingBuilder {
    inner: Billing,
}

impl BillingBuilder {
    location_setters!();

    pub fn build(self) -> Billing {
        self.inner
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliverySpeed {
    SameDay,
    Overnight,
    Expedited,
    Standard,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Shipping address for a scoring request.
pub struct Shipping {
    #[serde(flatten)]
    location: Location,
    #[serde(skip_serializing_if = "Option::is_none")]
    delivery_speed: Option<DeliverySpeed>,
}

impl Shipping {
    pub fn builder() -> ShippingBuilder {
        ShippingBuilder::default()
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn delivery_speed(&self) -> Option<DeliverySpeed> {
        self.delivery_speed
    }
}

#[derive(Debug, Clone, Default)]
pub struct ShippingBuilder {
    inner: Shipping,
}

impl ShippingBuilder {
    location_setters!();

    pub fn delivery_speed(mut self, speed: DeliverySpeed) -> Self {
        self.inner.delivery_speed = Some(speed);
        self
    }

    pub fn build(self) -> Shipping {
        self.inner
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Card data for a scoring request. Never carries the full card number.
pub struct CreditCard {
    #[serde(skip_serializing_if = "is_none_or_empty")]
    issuer_id_number: Option<String>,
    #[serde(skip_serializing_if = "is_none_or_empty")]
    last_4_digits: Option<String>,
    #[serde(skip_serializing_if = "is_none_or_empty")]
    bank_name: Option<String>,
    #[serde(skip_serializing_if = "is_none_or_empty")]
    bank_phone_country_code: Option<String>,
    #[serde(skip_serializing_if = "is_none_or_empty")]
    bank_phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    avs_result: Option<char>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cvv_result: Option<char>,
}

impl CreditCard {
    pub fn builder() -> CreditCardBuilder {
        CreditCardBuilder::default()
    }

    string_getters!(
        issuer_id_number,
        last_4_digits,
        bank_name,
        bank_phone_country_code,
        bank_phone_number,
    );

    pub fn avs_result(&self) -> Option<char> {
        self.avs_result
    }

    pub fn cvv_result(&self) -> Option<char> {
        self.cvv_result
    }
}

#[derive(Debug, Clone, Default)]
pub struct CreditCardBuilder {
    inner: CreditCard,
}

impl CreditCardBuilder {
    string_setters!(inner =>
        /// First six digits of the card number (IIN/BIN).
        issuer_id_number,
        last_4_digits,
        bank_name,
        bank_phone_country_code,
        bank_phone_number,
    );

    /// Single-character AVS response from the processor.
    pub fn avs_result(mut self, code: char) -> Self {
        self.inner.avs_result = Some(code);
        self
    }

    /// Single-character CVV response from the processor.
    pub fn cvv_result(mut self, code: char) -> Self {
        self.inner.cvv_result = Some(code);
        self
    }

    pub fn build(self) -> CreditCard {
        self.inner
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Device data for a scoring request. The IP address is always present.
pub struct Device {
    ip_address: IpAddr,
    #[serde(skip_serializing_if = "is_none_or_empty")]
    user_agent: Option<String>,
    #[serde(skip_serializing_if = "is_none_or_empty")]
    accept_language: Option<String>,
}

impl Device {
    pub fn builder(ip_address: IpAddr) -> DeviceBuilder {
        DeviceBuilder {
            inner: Self {
                ip_address,
                user_agent: None,
                accept_language: None,
            },
        }
    }

    pub fn ip_address(&self) -> IpAddr {
        self.ip_address
    }

    string_getters!(user_agent, accept_language);
}

#[derive(Debug, Clone)]
pub struct DeviceBuilder {
    inner: Device,
}

impl DeviceBuilder {
    string_setters!(inner =>
        user_agent,
        /// Raw `Accept-Language` header from the customer's browser.
        accept_language,
    );

    pub fn build(self) -> Device {
        self.inner
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Order data for a scoring request.
pub struct Order {
    #[serde(
        with = "rust_decimal::serde::arbitrary_precision_option",
        skip_serializing_if = "Option::is_none"
    )]
    amount: Option<Decimal>,
    #[serde(skip_serializing_if = "is_none_or_empty")]
    currency: Option<String>,
    #[serde(skip_serializing_if = "is_none_or_empty")]
    discount_code: Option<String>,
    #[serde(skip_serializing_if = "is_none_or_empty")]
    affiliate_id: Option<String>,
    #[serde(skip_serializing_if = "is_none_or_empty")]
    subaffiliate_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    referrer_uri: Option<Url>,
}

impl Order {
    pub fn builder() -> OrderBuilder {
        OrderBuilder::default()
    }

    pub fn amount(&self) -> Option<Decimal> {
        self.amount
    }

    string_getters!(currency, discount_code, affiliate_id, subaffiliate_id);

    pub fn referrer_uri(&self) -> Option<&Url> {
        self.referrer_uri.as_ref()
    }
}

#[derive(Debug, Clone, Default)]
pub struct OrderBuilder {
    inner: Order,
}

impl OrderBuilder {
    string_setters!(inner =>
        /// ISO 4217 currency code.
        currency,
        discount_code,
        affiliate_id,
        subaffiliate_id,
    );

    /// Total order amount in `currency`.
    pub fn amount(mut self, amount: Decimal) -> Self {
        self.inner.amount = Some(amount);
        self
    }

    pub fn referrer_uri(mut self, uri: Url) -> Self {
        self.inner.referrer_uri = Some(uri);
        self
    }

    pub fn build(self) -> Order {
        self.inner
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentProcessor {
    Adyen,
    Altapay,
    AmazonPayments,
    Authorizenet,
    Balanced,
    Beanstream,
    Bluepay,
    Braintree,
    ChasePaymentech,
    Cielo,
    Collector,
    Compropago,
    Conekta,
    Cuentadigital,
    Dibs,
    DigitalRiver,
    Elavon,
    Epayeu,
    EprocessingNetwork,
    Eway,
    FirstData,
    GlobalPayments,
    Ingenico,
    Internetsecure,
    IntuitQuickbooksPayments,
    Iugu,
    Mercadopago,
    MerchantEsolutions,
    Mirjeh,
    Mollie,
    MonerisSolutions,
    Nmi,
    Openpaymx,
    OptimalPayments,
    Orangepay,
    Other,
    PacnetServices,
    Payfast,
    Paygate,
    Payone,
    Paypal,
    Payplus,
    Paystation,
    Paytrace,
    Paytrail,
    Payture,
    Payu,
    Payulatam,
    Pinpayments,
    PrincetonPaymentSolutions,
    Psigate,
    Qiwi,
    Quickpay,
    Raberil,
    Rede,
    Redpagos,
    Rewardspay,
    Sagepay,
    SimplifyCommerce,
    Skrill,
    Smartcoin,
    SpsDecidir,
    Stripe,
    Telerecargas,
    Towah,
    UsaEpay,
    Verepay,
    Vindicia,
    VirtualCardServices,
    Vme,
    Worldpay,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Payment data for a scoring request.
pub struct Payment {
    #[serde(skip_serializing_if = "Option::is_none")]
    processor: Option<PaymentProcessor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    was_authorized: Option<bool>,
    #[serde(skip_serializing_if = "is_none_or_empty")]
    decline_code: Option<String>,
}

impl Payment {
    pub fn builder() -> PaymentBuilder {
        PaymentBuilder::default()
    }

    pub fn processor(&self) -> Option<PaymentProcessor> {
        self.processor
    }

    pub fn was_authorized(&self) -> Option<bool> {
        self.was_authorized
    }

    string_getters!(decline_code);
}

#[derive(Debug, Clone, Default)]
pub struct PaymentBuilder {
    inner: Payment,
}

impl PaymentBuilder {
    string_setters!(inner =>
        /// Decline code as returned by the processor.
        decline_code,
    );

    pub fn processor(mut self, processor: PaymentProcessor) -> Self {
        self.inner.processor = Some(processor);
        self
    }

    pub fn was_authorized(mut self, authorized: bool) -> Self {
        self.inner.was_authorized = Some(authorized);
        self
    }

    pub fn build(self) -> Payment {
        self.inner
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// One line of the shopping cart.
pub struct ShoppingCartItem {
    #[serde(skip_serializing_if = "is_none_or_empty")]
    category: Option<String>,
    #[serde(skip_serializing_if = "is_none_or_empty")]
    item_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    quantity: Option<u32>,
    #[serde(
        with = "rust_decimal::serde::arbitrary_precision_option",
        skip_serializing_if = "Option::is_none"
    )]
    price: Option<Decimal>,
}

impl ShoppingCartItem {
    pub fn builder() -> ShoppingCartItemBuilder {
        ShoppingCartItemBuilder::default()
    }

    string_getters!(category, item_id);

    pub fn quantity(&self) -> Option<u32> {
        self.quantity
    }

    pub fn price(&self) -> Option<Decimal> {
        self.price
    }
}

#[derive(Debug, Clone, Default)]
pub struct ShoppingCartItemBuilder {
    inner: ShoppingCartItem,
}

impl ShoppingCartItemBuilder {
    string_setters!(inner => category, item_id);

    pub fn quantity(mut self, quantity: u32) -> Self {
        self.inner.quantity = Some(quantity);
        self
    }

    /// Per-unit price.
    pub fn price(mut self, price: Decimal) -> Self {
        self.inner.price = Some(price);
        self
    }

    pub fn build(self) -> ShoppingCartItem {
        self.inner
    }
}
