//! Product catalog.
//!
//! The catalog is loaded once per session and never changes afterwards.
//! Parsing lives here so every loader (file, HTTP, tests) applies the same
//! validation.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Money, ProductId};

/// Errors produced while parsing a catalog document.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The document is not a JSON list of products.
    #[error("malformed catalog: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Two products share the same id.
    #[error("duplicate product id {0} in catalog")]
    DuplicateId(ProductId),
}

/// A purchasable product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(alias = "nombre")]
    pub name: String,
    #[serde(alias = "precio")]
    pub price: Money,
}

impl Product {
    #[must_use]
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
        }
    }
}

/// The list of products offered in this session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from products, rejecting duplicate ids.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateId`] if two products share an id.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
        }
        Ok(Self { products })
    }

    /// Parse a catalog from a JSON array of `{id, name, price}` records.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Malformed`] for invalid JSON, missing fields or
    /// negative prices, and [`CatalogError::DuplicateId`] for repeated ids.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Self::new(products)
    }

    /// Look up a product by id.
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG_JSON: &str = r#"[
        {"id": 1, "name": "Widget", "price": 100},
        {"id": 2, "name": "Gadget", "price": 2499.99}
    ]"#;

    #[test]
    fn test_from_json_parses_products_in_order() {
        let catalog = Catalog::from_json(CATALOG_JSON).unwrap();
        assert_eq!(catalog.len(), 2);
        let names: Vec<&str> = catalog.products().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Widget", "Gadget"]);
        assert_eq!(
            catalog.find(ProductId::new(2)).unwrap().price,
            Money::from_cents(249_999)
        );
    }

    #[test]
    fn test_from_json_accepts_spanish_field_names() {
        let catalog =
            Catalog::from_json(r#"[{"id": 7, "nombre": "Mate", "precio": 3500}]"#).unwrap();
        let mate = catalog.find(ProductId::new(7)).unwrap();
        assert_eq!(mate.name, "Mate");
        assert_eq!(mate.price, Money::whole(3500));
    }

    #[test]
    fn test_find_missing_returns_none() {
        let catalog = Catalog::from_json(CATALOG_JSON).unwrap();
        assert!(catalog.find(ProductId::new(99)).is_none());
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let err = Catalog::from_json(
            r#"[{"id": 1, "name": "A", "price": 1}, {"id": 1, "name": "B", "price": 2}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(id) if id == ProductId::new(1)));
    }

    #[test]
    fn test_rejects_malformed_documents() {
        assert!(matches!(
            Catalog::from_json("{not json"),
            Err(CatalogError::Malformed(_))
        ));
        assert!(matches!(
            Catalog::from_json(r#"[{"id": 1, "name": "A"}]"#),
            Err(CatalogError::Malformed(_))
        ));
        assert!(matches!(
            Catalog::from_json(r#"[{"id": 1, "name": "A", "price": -3}]"#),
            Err(CatalogError::Malformed(_))
        ));
    }

    #[test]
    fn test_empty_catalog_is_valid() {
        let catalog = Catalog::from_json("[]").unwrap();
        assert!(catalog.is_empty());
    }
}
