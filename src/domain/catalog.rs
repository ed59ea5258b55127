use super::offer::{Category, Offer, Price};
use crate::error::{PurchaseError, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::io::Read;

/// Read-only store of purchasable offers, grouped by category.
///
/// Loaded once by the composition root and only ever lent out as shared
/// borrows; there is no way to add, change or remove an offer afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    bundles: Vec<Offer>,
    #[serde(default)]
    minutes: Vec<Offer>,
    #[serde(default)]
    sms: Vec<Offer>,
}

impl Catalog {
    /// The offers shipped with the application.
    pub fn builtin() -> Self {
        Self {
            bundles: vec![
                Offer::new("b1", "1GB for 1hr @19", Price::kes(19), "*180*5*2*pppp*5*1#"),
                Offer::new("b2", "250mb for 24hrs @20", Price::kes(20), "*180*5*2*pppp*5*2#"),
                Offer::new("b3", "1GB for 1hr @22", Price::kes(22), "*180*5*2*pppp*5*3#"),
                Offer::new(
                    "b4",
                    "1.25gb till midnight @55",
                    Price::kes(55),
                    "*180*5*2*pppp*5*4#",
                ),
            ],
            minutes: vec![Offer::new(
                "m1",
                "50minutes till midnight @51",
                Price::kes(51),
                "*180*5*2*pppp*5*5#",
            )],
            sms: vec![
                Offer::new("s1", "20 SMS @5", Price::kes(5), "*180*5*2*pppp*5*6#"),
                Offer::new("s2", "200 sms @10", Price::kes(10), "*180*5*2*pppp*5*7#"),
                Offer::new("s3", "1000sms weekly @30", Price::kes(30), "*180*5*2*pppp*5*8#"),
            ],
        }
    }

    /// Loads a catalog from a JSON document with `bundles`, `minutes` and `sms` lists.
    ///
    /// Prices must use the `KES <amount>` display form and ids must be unique
    /// within each list.
    pub fn from_json<R: Read>(source: R) -> Result<Self> {
        let catalog: Catalog = serde_json::from_reader(source)?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<()> {
        for category in Category::ALL {
            let mut seen = HashSet::new();
            for offer in self.offers(category) {
                if !seen.insert(offer.id.as_str()) {
                    return Err(PurchaseError::DuplicateOffer {
                        category: category.to_string(),
                        id: offer.id.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn offers(&self, category: Category) -> &[Offer] {
        match category {
            Category::Bundles => &self.bundles,
            Category::Minutes => &self.minutes,
            Category::Sms => &self.sms,
        }
    }

    pub fn find(&self, category: Category, id: &str) -> Option<&Offer> {
        self.offers(category).iter().find(|offer| offer.id == id)
    }

    /// Like [`Catalog::find`], but reports a missing offer as an error.
    pub fn get(&self, category: Category, id: &str) -> Result<&Offer> {
        self.find(category, id)
            .ok_or_else(|| PurchaseError::UnknownOffer {
                category: category.to_string(),
                id: id.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_prices_round_trip() {
        let catalog = Catalog::builtin();
        for category in Category::ALL {
            for offer in catalog.offers(category) {
                let display = offer.price.to_string();
                let amount: u32 = display
                    .strip_prefix("KES ")
                    .expect("display price carries the currency prefix")
                    .parse()
                    .expect("display price amount is an integer");
                assert_eq!(amount, offer.amount(), "{}", offer.id);
            }
        }
    }

    #[test]
    fn test_builtin_ids_unique_per_category() {
        assert!(Catalog::builtin().validate().is_ok());
    }

    #[test]
    fn test_builtin_contents() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.offers(Category::Bundles).len(), 4);
        assert_eq!(catalog.offers(Category::Minutes).len(), 1);
        assert_eq!(catalog.offers(Category::Sms).len(), 3);

        let b1 = catalog.find(Category::Bundles, "b1").unwrap();
        assert_eq!(b1.title, "1GB for 1hr @19");
        assert_eq!(b1.price.to_string(), "KES 19");
        assert_eq!(b1.activation_code, "*180*5*2*pppp*5*1#");
    }

    #[test]
    fn test_find_is_scoped_to_category() {
        let catalog = Catalog::builtin();
        assert!(catalog.find(Category::Sms, "b1").is_none());
        assert!(matches!(
            catalog.get(Category::Minutes, "s1"),
            Err(PurchaseError::UnknownOffer { .. })
        ));
    }

    #[test]
    fn test_from_json_loads_catalog() {
        let json = r#"{
            "bundles": [
                {"id": "x1", "title": "2GB @50", "price": "KES 50", "offer_ussd": "*1*1#"}
            ],
            "sms": [
                {"id": "x1", "title": "10 SMS @2", "price": "KES 2", "offer_ussd": "*1*2#"}
            ]
        }"#;
        let catalog = Catalog::from_json(json.as_bytes()).unwrap();
        assert_eq!(catalog.offers(Category::Bundles)[0].amount(), 50);
        assert!(catalog.offers(Category::Minutes).is_empty());
        assert_eq!(catalog.find(Category::Sms, "x1").unwrap().title, "10 SMS @2");
    }

    #[test]
    fn test_from_json_rejects_duplicates() {
        let json = r#"{"bundles": [
            {"id": "b1", "title": "a", "price": "KES 1", "offer_ussd": "*1#"},
            {"id": "b1", "title": "b", "price": "KES 2", "offer_ussd": "*2#"}
        ]}"#;
        assert!(matches!(
            Catalog::from_json(json.as_bytes()),
            Err(PurchaseError::DuplicateOffer { .. })
        ));
    }

    #[test]
    fn test_from_json_rejects_bad_price() {
        let json = r#"{"minutes": [
            {"id": "m1", "title": "a", "price": "19 bob", "offer_ussd": "*1#"}
        ]}"#;
        assert!(Catalog::from_json(json.as_bytes()).is_err());
    }
}
