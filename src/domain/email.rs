use serde::Serialize;

use crate::domain::digest::md5_hex;
use crate::domain::validation::{ValidationError, is_valid_address, is_valid_domain_name};

/// Whether an [`EmailBuilder`] checks its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Validation {
    /// Reject addresses and domains that fail the grammar checks.
    #[default]
    Enforce,
    /// Accept any string as given.
    Skip,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum DomainSlot {
    #[default]
    Unset,
    Explicit(String),
    Inferred(String),
}

impl DomainSlot {
    fn into_option(self) -> Option<String> {
        match self {
            Self::Unset => None,
            Self::Explicit(domain) | Self::Inferred(domain) => Some(domain),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Email data for a scoring request.
///
/// `address` holds either the raw address or, when hashing was requested, the MD5 of
/// the lowercased address. Only `address` and `domain` go on the wire.
pub struct Email {
    #[serde(skip_serializing_if = "crate::domain::value::is_none_or_empty")]
    address: Option<String>,
    #[serde(skip_serializing_if = "crate::domain::value::is_none_or_empty")]
    domain: Option<String>,
    #[serde(skip)]
    address_md5: Option<String>,
}

impl Email {
    /// Wire name of the address field (`address`).
    pub const ADDRESS_FIELD: &'static str = "address";
    /// Wire name of the domain field (`domain`).
    pub const DOMAIN_FIELD: &'static str = "domain";

    /// Start a validating builder.
    pub fn builder() -> EmailBuilder {
        EmailBuilder::new(Validation::Enforce)
    }

    /// The address as it will be sent: raw, or its digest if hashing was requested.
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// Explicit domain, or the part after the last `@` of the address.
    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    /// Digest of the lowercased address; `None` unless hashing was requested.
    pub fn address_md5(&self) -> Option<&str> {
        self.address_md5.as_deref()
    }

    /// Digest of the lowercased address, computed on demand for an unhashed address.
    pub fn address_digest(&self) -> Option<String> {
        match (&self.address_md5, &self.address) {
            (Some(md5), _) => Some(md5.clone()),
            (None, Some(address)) => Some(md5_hex(&address.to_lowercase())),
            (None, None) => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
/// Builder for [`Email`].
///
/// Setters validate immediately unless the builder was created with
/// [`Validation::Skip`]. Hashing is deferred to [`EmailBuilder::build`], so requesting it
/// repeatedly has no further effect.
pub struct EmailBuilder {
    validation: Validation,
    address: Option<String>,
    domain: DomainSlot,
    hash_address: bool,
}

impl EmailBuilder {
    pub fn new(validation: Validation) -> Self {
        Self {
            validation,
            ..Self::default()
        }
    }

    /// Set the address and, if no domain is known yet, derive it from the text after the
    /// last `@`. A domain already set or derived is kept.
    pub fn address(mut self, raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        match self.validation {
            Validation::Enforce if !is_valid_address(&raw) => {
                tracing::debug!(field = Email::ADDRESS_FIELD, "rejected email address");
                return Err(ValidationError::Invalid {
                    field: Email::ADDRESS_FIELD,
                    input: raw,
                });
            }
            Validation::Enforce => {}
            Validation::Skip => {
                tracing::trace!(field = Email::ADDRESS_FIELD, "accepted without validation");
            }
        }

        if self.domain == DomainSlot::Unset {
            if let Some(domain) = derive_domain(&raw) {
                self.domain = DomainSlot::Inferred(domain.to_owned());
            }
        }
        self.address = Some(raw);
        Ok(self)
    }

    /// Set the domain explicitly. Later addresses no longer override it.
    pub fn domain(mut self, domain: impl Into<String>) -> Result<Self, ValidationError> {
        let domain = domain.into();
        match self.validation {
            Validation::Enforce if !is_valid_domain_name(&domain) => {
                tracing::debug!(field = Email::DOMAIN_FIELD, input = %domain, "rejected domain");
                return Err(ValidationError::Invalid {
                    field: Email::DOMAIN_FIELD,
                    input: domain,
                });
            }
            Validation::Enforce => {}
            Validation::Skip => {
                tracing::trace!(field = Email::DOMAIN_FIELD, "accepted without validation");
            }
        }

        self.domain = DomainSlot::Explicit(domain);
        Ok(self)
    }

    /// Send the MD5 of the lowercased address instead of the address itself.
    pub fn hash_address(mut self) -> Self {
        self.hash_address = true;
        self
    }

    pub fn build(self) -> Email {
        let domain = self.domain.into_option();
        match self.address {
            Some(raw) if self.hash_address => {
                let md5 = md5_hex(&raw.to_lowercase());
                Email {
                    address: Some(md5.clone()),
                    domain,
                    address_md5: Some(md5),
                }
            }
            address => Email {
                address,
                domain,
                address_md5: None,
            },
        }
    }
}

fn derive_domain(address: &str) -> Option<&str> {
    address
        .rsplit_once('@')
        .map(|(_, domain)| domain)
        .filter(|domain| !domain.is_empty())
}
