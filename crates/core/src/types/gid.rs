//! Shopify global identifier type.

use core::fmt;

use serde::{Serialize, Serializer};

/// Prefix shared by every Shopify global identifier.
const GID_PREFIX: &str = "gid://shopify/";

/// Shopify resource kinds the proxy accepts as input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// A product variant (`gid://shopify/ProductVariant/...`).
    ProductVariant,
    /// A product (`gid://shopify/Product/...`).
    Product,
    /// An inventory location (`gid://shopify/Location/...`).
    Location,
}

impl ResourceKind {
    /// Returns the resource name as it appears inside a GID.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ProductVariant => "ProductVariant",
            Self::Product => "Product",
            Self::Location => "Location",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur when parsing a [`ShopifyGid`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GidError {
    /// The input string is empty (or only whitespace).
    #[error("identifier cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("identifier must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The GID names a different resource than the one expected.
    #[error("expected a {expected} identifier, got a {found} identifier")]
    WrongResource {
        /// Resource kind the caller asked for.
        expected: ResourceKind,
        /// Resource name found in the input.
        found: String,
    },
    /// The input is neither a bare numeric id nor a well-formed GID.
    #[error("malformed identifier: {0}")]
    Malformed(String),
}

/// A canonical Shopify global identifier (`gid://shopify/<Resource>/<id>`).
///
/// Callers may supply either the bare numeric id (`5`) or the full GID
/// (`gid://shopify/Location/5`); both parse to the same canonical value, so
/// equality is always computed on the full namespaced form.
///
/// ## Examples
///
/// ```
/// use inventory_proxy_core::{ResourceKind, ShopifyGid};
///
/// let bare = ShopifyGid::parse("5", ResourceKind::Location).unwrap();
/// let full = ShopifyGid::parse("gid://shopify/Location/5", ResourceKind::Location).unwrap();
/// assert_eq!(bare, full);
/// assert_eq!(bare.as_str(), "gid://shopify/Location/5");
///
/// // A GID for another resource is rejected
/// assert!(ShopifyGid::parse("gid://shopify/Product/5", ResourceKind::Location).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShopifyGid {
    kind: ResourceKind,
    value: String,
}

impl ShopifyGid {
    /// Maximum accepted input length.
    pub const MAX_LENGTH: usize = 255;

    /// Parse a caller-supplied identifier of the given resource kind.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty
    /// - Is longer than 255 characters
    /// - Is a GID for a different resource kind
    /// - Is neither all digits nor a `gid://shopify/<Resource>/<id>` string
    pub fn parse(input: &str, kind: ResourceKind) -> Result<Self, GidError> {
        let input = input.trim();

        if input.is_empty() {
            return Err(GidError::Empty);
        }

        if input.len() > Self::MAX_LENGTH {
            return Err(GidError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        let Some(rest) = input.strip_prefix(GID_PREFIX) else {
            if !input.bytes().all(|b| b.is_ascii_digit()) {
                return Err(GidError::Malformed(input.to_owned()));
            }
            return Ok(Self::from_parts(kind, input));
        };

        let (resource, id) = rest
            .split_once('/')
            .ok_or_else(|| GidError::Malformed(input.to_owned()))?;

        if resource != kind.as_str() {
            return Err(GidError::WrongResource {
                expected: kind,
                found: resource.to_owned(),
            });
        }

        if !is_valid_id_segment(id) {
            return Err(GidError::Malformed(input.to_owned()));
        }

        Ok(Self::from_parts(kind, id))
    }

    fn from_parts(kind: ResourceKind, id: &str) -> Self {
        Self {
            kind,
            value: format!("{GID_PREFIX}{}/{id}", kind.as_str()),
        }
    }

    /// Returns the resource kind of this identifier.
    #[must_use]
    pub const fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Returns the full GID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Returns the trailing id segment (e.g. `5` for `gid://shopify/Location/5`).
    #[must_use]
    pub fn id(&self) -> &str {
        self.value.rsplit('/').next().unwrap_or_default()
    }

    /// Consumes the `ShopifyGid` and returns the full GID string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.value
    }
}

/// Ids are opaque but never contain separators, query strings or whitespace.
fn is_valid_id_segment(id: &str) -> bool {
    !id.is_empty()
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

impl fmt::Display for ShopifyGid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl Serialize for ShopifyGid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}

impl AsRef<str> for ShopifyGid {
    fn as_ref(&self) -> &str {
        &self.value
    }
}
