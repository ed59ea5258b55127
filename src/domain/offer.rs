use crate::error::PurchaseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const CURRENCY_PREFIX: &str = "KES ";

/// A display price in Kenyan shillings, always of the form `KES <amount>`.
///
/// Only whole, non-negative amounts are representable, so every `Price`
/// round-trips through its display string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Price(u32);

impl Price {
    pub const fn kes(amount: u32) -> Self {
        Self(amount)
    }

    pub fn amount(&self) -> u32 {
        self.0
    }
}

impl FromStr for Price {
    type Err = PurchaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix(CURRENCY_PREFIX)
            .and_then(|amount| amount.parse::<u32>().ok())
            .map(Self)
            .ok_or_else(|| PurchaseError::InvalidPrice(s.to_string()))
    }
}

impl TryFrom<String> for Price {
    type Error = PurchaseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Price> for String {
    fn from(price: Price) -> Self {
        price.to_string()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{CURRENCY_PREFIX}{}", self.0)
    }
}

/// A purchasable catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    pub id: String,
    pub title: String,
    pub price: Price,
    /// Provider trigger code template, sent as `offer_ussd`.
    #[serde(rename = "offer_ussd")]
    pub activation_code: String,
}

impl Offer {
    pub fn new(id: &str, title: &str, price: Price, activation_code: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            price,
            activation_code: activation_code.to_string(),
        }
    }

    pub fn amount(&self) -> u32 {
        self.price.amount()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Category {
    Bundles,
    Minutes,
    Sms,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Bundles, Category::Minutes, Category::Sms];

    pub fn title(&self) -> &'static str {
        match self {
            Category::Bundles => "Bundles",
            Category::Minutes => "Minutes",
            Category::Sms => "SMS",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Category {
    type Err = PurchaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bundles" => Ok(Category::Bundles),
            "minutes" => Ok(Category::Minutes),
            "sms" => Ok(Category::Sms),
            other => Err(PurchaseError::ValidationError(format!(
                "Unknown category '{other}'"
            ))),
        }
    }
}
