//! # Catalogue Commands
//!
//! The menu grid, the category chips and the theme switch.

use serde::Serialize;
use tracing::debug;

use scoop_core::{Product, ProductId, Theme, ALL_CATEGORIES, KNOWN_CATEGORIES};
use scoop_store::KeyValueStore;

use crate::error::ApiError;
use crate::Storefront;

/// What the "Add to Cart" button on a card says and whether it works.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Availability {
    Available,
    OutOfStock,
    ShopClosed,
}

impl Availability {
    pub fn of(product: &Product, shop_open: bool) -> Self {
        if !shop_open {
            Availability::ShopClosed
        } else if !product.in_stock {
            Availability::OutOfStock
        } else {
            Availability::Available
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Availability::Available => "Add to Cart",
            Availability::OutOfStock => "Out of Stock",
            Availability::ShopClosed => "Shop Closed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    #[serde(flatten)]
    pub product: Product,
    pub availability: Availability,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuResponse {
    pub shop_name: String,
    pub shop_open: bool,
    pub theme: Theme,
    pub categories: Vec<String>,
    pub active_category: String,
    pub products: Vec<MenuItem>,
}

/// Lists the menu for the active category, filtered by `search`.
pub fn list_products<S: KeyValueStore>(app: &Storefront<S>, search: &str) -> MenuResponse {
    debug!(search, "list_products command");

    let state = app.store.state();
    let products = app
        .store
        .filtered_products(search)
        .into_iter()
        .map(|p| MenuItem {
            product: p.clone(),
            availability: Availability::of(p, state.shop_open),
        })
        .collect();

    let categories = std::iter::once(ALL_CATEGORIES)
        .chain(KNOWN_CATEGORIES)
        .map(str::to_string)
        .collect();

    MenuResponse {
        shop_name: app.config.shop_name.clone(),
        shop_open: state.shop_open,
        theme: state.theme,
        categories,
        active_category: state.active_category.clone(),
        products,
    }
}

/// Gets one product (the product detail modal).
pub fn get_product<S: KeyValueStore>(app: &Storefront<S>, id: ProductId) -> Result<Product, ApiError> {
    debug!(product_id = %id, "get_product command");
    app.store
        .state()
        .product(id)
        .cloned()
        .ok_or_else(|| ApiError::not_found("Product", &id.to_string()))
}

/// Selects a category chip.
pub fn set_category<S: KeyValueStore>(app: &mut Storefront<S>, category: &str) -> MenuResponse {
    debug!(category, "set_category command");
    app.store.set_active_category(category);
    list_products(app, "")
}

pub fn toggle_theme<S: KeyValueStore>(app: &mut Storefront<S>) -> Theme {
    debug!("toggle_theme command");
    app.store.toggle_theme()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::storefront;

    #[test]
    fn test_menu_lists_everything_by_default() {
        let app = storefront();
        let menu = list_products(&app, "");

        assert_eq!(menu.shop_name, "Murlidhar Icecream");
        assert_eq!(menu.categories, ["All", "Sticks", "Cones", "Family"]);
        assert_eq!(menu.products.len(), 5);
        let mango = menu.products.iter().find(|m| m.product.id == ProductId(5)).unwrap();
        assert_eq!(mango.availability.label(), "Out of Stock");
    }

    #[test]
    fn test_category_and_search() {
        let mut app = storefront();
        let menu = set_category(&mut app, "Sticks");
        assert_eq!(menu.active_category, "Sticks");
        assert_eq!(menu.products.len(), 2);

        let menu = list_products(&app, "straw");
        assert_eq!(menu.products.len(), 1);
        assert_eq!(menu.products[0].product.name, "Strawberry Stick");
    }

    #[test]
    fn test_closed_shop_labels_every_card() {
        let mut app = storefront();
        app.store.toggle_shop_open();
        let menu = list_products(&app, "");
        assert!(menu
            .products
            .iter()
            .all(|m| m.availability == Availability::ShopClosed));
    }

    #[test]
    fn test_get_product_and_theme() {
        let mut app = storefront();
        assert_eq!(get_product(&app, ProductId(4)).unwrap().name, "Family Pack");
        assert!(get_product(&app, ProductId(40)).is_err());

        assert_eq!(toggle_theme(&mut app), Theme::Light);
        assert_eq!(toggle_theme(&mut app), Theme::Dark);
    }
}
