//! # Admin Forms
//!
//! The back-office "add product" and "add coupon" forms arrive as raw text.
//! Everything is validated before the store is touched, so a bad field
//! never leaves half a product behind.
//!
//! ```text
//!  NewProduct { name, price, category, image }
//!       │  validate name, parse price (> 0)
//!       │  blank category → "Sticks", blank image → default image
//!       ▼
//!  Product { id: time-derived, rating: 0, in_stock: true }  ──► Store::add_product
//!
//!  NewCoupon { code, value, kind }
//!       │  normalise code, parse value (≥ 0, percent ≤ 100)
//!       ▼
//!  Coupon  ──► Store::add_coupon (duplicate codes rejected)
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use scoop_core::catalog::DEFAULT_PRODUCT_IMAGE;
use scoop_core::validation::{
    parse_coupon_code, parse_coupon_value, parse_price, validate_product_name, ValidationResult,
};
use scoop_core::{Coupon, DiscountKind, Product, ProductId};

use crate::error::StoreResult;
use crate::storage::KeyValueStore;
use crate::store::Store;

/// Category preselected in the add-product form.
pub const DEFAULT_NEW_CATEGORY: &str = "Sticks";

/// The add-product form, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    /// Rupees, e.g. `"45"` or `"12.50"`.
    pub price: String,
    pub category: String,
    pub image: String,
}

impl NewProduct {
    /// Turns the form into a product with the given id.
    pub fn validate(&self, id: ProductId) -> ValidationResult<Product> {
        let name = validate_product_name(&self.name)?;
        let price = parse_price(&self.price)?;

        let category = match self.category.trim() {
            "" => DEFAULT_NEW_CATEGORY,
            other => other,
        };
        let image = match self.image.trim() {
            "" => DEFAULT_PRODUCT_IMAGE,
            other => other,
        };

        Ok(Product {
            id,
            name: name.to_string(),
            price,
            category: category.to_string(),
            image: image.to_string(),
            in_stock: true,
            rating: 0.0,
        })
    }
}

/// The add-coupon form, as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCoupon {
    pub code: String,
    /// Percentage points or rupees, depending on `kind`.
    pub value: String,
    pub kind: DiscountKind,
}

impl NewCoupon {
    pub fn validate(&self) -> ValidationResult<Coupon> {
        let code = parse_coupon_code(&self.code)?;
        let discount = parse_coupon_value(self.kind, &self.value)?;
        Ok(Coupon::new(code, discount))
    }
}

impl<S: KeyValueStore> Store<S> {
    /// Adds a product from the admin form. The id is derived from
    /// `now_millis` and bumped past every id already on the menu.
    pub fn add_product_from_form(&mut self, form: &NewProduct, now_millis: i64) -> StoreResult<Product> {
        let id = ProductId::next(now_millis, self.state().products.iter().map(|p| &p.id));
        let product = form.validate(id)?;
        debug!(product_id = %id, "Admin product form validated");

        self.add_product(product.clone())?;
        Ok(product)
    }

    /// Adds a coupon from the admin form.
    pub fn add_coupon_from_form(&mut self, form: &NewCoupon) -> StoreResult<Coupon> {
        let coupon = form.validate()?;
        debug!(code = %coupon.code, "Admin coupon form validated");

        self.add_coupon(coupon.clone())?;
        Ok(coupon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use scoop_core::{CoreError, Discount, Money, Percentage, ValidationError};

    fn ready_store() -> Store<MemoryStorage> {
        let mut store = Store::new(MemoryStorage::new());
        store.initialize();
        store
    }

    fn kulfi() -> NewProduct {
        NewProduct {
            name: " Kulfi Stick ".to_string(),
            price: "25".to_string(),
            category: String::new(),
            image: String::new(),
        }
    }

    #[test]
    fn test_new_product_defaults() {
        let product = kulfi().validate(ProductId(7)).unwrap();
        assert_eq!(product.name, "Kulfi Stick");
        assert_eq!(product.price, Money::from_rupees(25));
        assert_eq!(product.category, DEFAULT_NEW_CATEGORY);
        assert_eq!(product.image, DEFAULT_PRODUCT_IMAGE);
        assert!(product.in_stock);
        assert_eq!(product.rating, 0.0);
    }

    #[test]
    fn test_new_product_requires_name_and_price() {
        let mut form = kulfi();
        form.name = "  ".to_string();
        assert_eq!(form.validate(ProductId(7)), Err(ValidationError::required("name")));

        let mut form = kulfi();
        form.price = String::new();
        assert_eq!(form.validate(ProductId(7)), Err(ValidationError::required("price")));
    }

    #[test]
    fn test_add_product_from_form_assigns_unique_id() {
        let mut store = ready_store();
        let first = store.add_product_from_form(&kulfi(), 3).unwrap();
        // clock behind the existing ids: bumped past the largest
        assert_eq!(first.id, ProductId(6));

        let second = store.add_product_from_form(&kulfi(), 3).unwrap();
        assert_eq!(second.id, ProductId(7));
        assert_eq!(store.state().products.len(), 7);
    }

    #[test]
    fn test_invalid_product_form_changes_nothing() {
        let mut store = ready_store();
        let mut form = kulfi();
        form.price = "abc".to_string();

        let err = store.add_product_from_form(&form, 1_000).unwrap_err();
        assert!(matches!(err.as_core(), Some(CoreError::Validation(_))));
        assert_eq!(store.state().products.len(), 5);
    }

    #[test]
    fn test_oversized_price_is_rejected() {
        let mut store = ready_store();
        let mut form = kulfi();
        form.price = "90000000000000000".to_string();

        let err = store.add_product_from_form(&form, 1_000).unwrap_err();
        assert!(matches!(
            err.as_core(),
            Some(CoreError::Validation(ValidationError::OutOfRange { .. }))
        ));
        assert_eq!(store.state().products.len(), 5);

        let form = NewCoupon {
            code: "HUGE".to_string(),
            value: "90000000000000000".to_string(),
            kind: DiscountKind::Flat,
        };
        assert!(store.add_coupon_from_form(&form).is_err());
        assert_eq!(store.state().coupons.len(), 2);
    }

    #[test]
    fn test_add_coupon_from_form() {
        let mut store = ready_store();
        let form = NewCoupon {
            code: "summer20".to_string(),
            value: "20".to_string(),
            kind: DiscountKind::Percent,
        };

        let coupon = store.add_coupon_from_form(&form).unwrap();
        assert_eq!(coupon.code.as_str(), "SUMMER20");
        assert_eq!(coupon.discount, Discount::Percent(Percentage::from_points(20)));

        let err = store.add_coupon_from_form(&form).unwrap_err();
        assert_eq!(
            err.as_core(),
            Some(&CoreError::DuplicateCoupon("SUMMER20".to_string()))
        );
    }

    #[test]
    fn test_coupon_form_rejects_bad_values() {
        let form = NewCoupon {
            code: "BIG".to_string(),
            value: "120".to_string(),
            kind: DiscountKind::Percent,
        };
        assert!(form.validate().is_err());

        let form = NewCoupon {
            code: String::new(),
            value: "10".to_string(),
            kind: DiscountKind::Flat,
        };
        assert_eq!(form.validate(), Err(ValidationError::required("code")));
    }
}
