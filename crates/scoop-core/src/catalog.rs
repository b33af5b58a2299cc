//! # Built-in Catalogue
//!
//! The menu and coupons a fresh install starts with. The state store falls
//! back to these whenever the persisted snapshot has no usable product or
//! coupon list.

use crate::coupon::{Coupon, CouponCode, Discount};
use crate::money::Money;
use crate::types::{Percentage, Product, ProductId};

/// Image used when the admin adds a product without one.
pub const DEFAULT_PRODUCT_IMAGE: &str =
    "https://images.unsplash.com/photo-1563805042-7684c019e1cb?w=400";

fn product(
    id: i64,
    name: &str,
    rupees: i64,
    category: &str,
    image: &str,
    in_stock: bool,
    rating: f32,
) -> Product {
    Product {
        id: ProductId(id),
        name: name.to_string(),
        price: Money::from_rupees(rupees),
        category: category.to_string(),
        image: image.to_string(),
        in_stock,
        rating,
    }
}

pub fn default_products() -> Vec<Product> {
    vec![
        product(1, "Chocolate Stick", 30, "Sticks", DEFAULT_PRODUCT_IMAGE, true, 4.8),
        product(
            2,
            "Vanilla Cone",
            40,
            "Cones",
            "https://images.unsplash.com/photo-1497034825429-c343d7c6a68f?w=400",
            true,
            4.5,
        ),
        product(
            3,
            "Strawberry Stick",
            35,
            "Sticks",
            "https://images.unsplash.com/photo-1501443762994-82bd5dace89a?w=400",
            true,
            4.7,
        ),
        product(
            4,
            "Family Pack",
            250,
            "Family",
            "https://images.unsplash.com/photo-1488477181946-6428a0291777?w=400",
            true,
            4.6,
        ),
        product(
            5,
            "Mango Cone",
            45,
            "Cones",
            "https://images.unsplash.com/photo-1578985545062-69928b1d9587?w=400",
            false,
            4.4,
        ),
    ]
}

pub fn default_coupons() -> Vec<Coupon> {
    vec![
        Coupon::new(
            CouponCode::from_static("SWEET10"),
            Discount::Percent(Percentage::from_points(10)),
        ),
        Coupon::new(
            CouponCode::from_static("FAMILY50"),
            Discount::Flat(Money::from_rupees(50)),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_products_have_unique_ids() {
        let products = default_products();
        let ids: HashSet<_> = products.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), products.len());
    }

    #[test]
    fn test_mango_cone_starts_out_of_stock() {
        let products = default_products();
        let mango = products.iter().find(|p| p.name == "Mango Cone").unwrap();
        assert!(!mango.in_stock);
    }

    #[test]
    fn test_default_coupons() {
        let coupons = default_coupons();
        assert_eq!(coupons.len(), 2);
        assert_eq!(coupons[0].code.as_str(), "SWEET10");
        assert_eq!(coupons[1].discount, Discount::Flat(Money::from_rupees(50)));
    }
}
