//! The in-memory shopping cart and its derived totals.
//!
//! The cart is an ordered list of lines, one per distinct menu item, in
//! first-added order. Monetary totals are always recomputed from the line
//! set; they are never stored.

use serde::{Deserialize, Serialize};

use food_express_core::{MenuItemId, Money};
use rust_decimal::Decimal;

use crate::catalog::{Catalog, MenuItem};

/// Sales tax applied to the cart subtotal (8%).
const TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

/// One item-and-quantity pairing in the cart.
///
/// Name, price and image are denormalized copies taken from the catalog at
/// add-time, so a later catalog change cannot silently reprice a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: MenuItemId,
    pub name: String,
    pub price: Money,
    pub image: String,
    /// Always at least 1; a line at quantity 0 is removed instead.
    pub quantity: u32,
}

impl From<&MenuItem> for CartLine {
    fn from(item: &MenuItem) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            price: item.price,
            image: item.image.clone(),
            quantity: 1,
        }
    }
}

impl CartLine {
    /// Price times quantity for this line.
    #[must_use]
    pub fn line_total(&self) -> Money {
        self.price * self.quantity
    }
}

/// Monetary totals derived from the cart lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
}

/// The active shopping cart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Rebuild a cart from previously serialized lines (the backup file).
    #[must_use]
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }

    /// The lines, in first-added order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total number of units across all lines (the cart badge count).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Add one unit of a catalog item.
    ///
    /// Unknown ids are silently ignored. If a line for the item already
    /// exists its quantity is incremented, keeping at most one line per
    /// distinct item id; otherwise a new line is appended at the end.
    pub fn add(&mut self, catalog: &Catalog, id: MenuItemId) {
        let Some(item) = catalog.get(id) else {
            return;
        };

        match self.lines.iter_mut().find(|line| line.id == id) {
            Some(line) => line.quantity += 1,
            None => self.lines.push(CartLine::from(item)),
        }
    }

    /// Remove the line for an item, if present.
    pub fn remove(&mut self, id: MenuItemId) {
        self.lines.retain(|line| line.id != id);
    }

    /// Set a line's quantity exactly.
    ///
    /// A quantity of zero behaves exactly like [`Cart::remove`]. Unknown ids
    /// are ignored.
    pub fn set_quantity(&mut self, id: MenuItemId, quantity: u32) {
        if quantity == 0 {
            self.remove(id);
            return;
        }

        if let Some(line) = self.lines.iter_mut().find(|line| line.id == id) {
            line.quantity = quantity;
        }
    }

    /// Empty the cart. Called once after a successful checkout.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Compute subtotal, tax (8% of subtotal) and total.
    ///
    /// Pure function of the current line set; no side effects.
    #[must_use]
    pub fn totals(&self) -> Totals {
        let subtotal: Money = self.lines.iter().map(CartLine::line_total).sum();
        let tax = Money::new(subtotal.amount() * TAX_RATE).round2();
        let total = subtotal + tax;

        Totals {
            subtotal,
            tax,
            total,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        let items = vec![
            MenuItem {
                id: MenuItemId::new(1),
                name: "Cake Pop".to_owned(),
                description: "A form of cake styled as a lollipop".to_owned(),
                price: Money::from_units(20),
                category: "Dessert".to_owned(),
                image: "/static/img/cake-pop.jpg".to_owned(),
            },
            MenuItem {
                id: MenuItemId::new(2),
                name: "Iced Latte".to_owned(),
                description: "Espresso over ice".to_owned(),
                price: Money::new(Decimal::new(550, 2)),
                category: "Drinks".to_owned(),
                image: "/static/img/iced-latte.jpg".to_owned(),
            },
        ];
        Catalog::from_items(items).unwrap()
    }

    #[test]
    fn test_add_unknown_id_is_noop() {
        let mut cart = Cart::new();
        cart.add(&catalog(), MenuItemId::new(999));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_twice_merges_into_one_line() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add(&catalog, MenuItemId::new(1));
        cart.add(&catalog, MenuItemId::new(1));

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines().first().unwrap().quantity, 2);

        let totals = cart.totals();
        assert_eq!(totals.subtotal.fixed2(), "40.00");
        assert_eq!(totals.tax.fixed2(), "3.20");
        assert_eq!(totals.total.fixed2(), "43.20");
    }

    #[test]
    fn test_insertion_order_is_first_added_order() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add(&catalog, MenuItemId::new(2));
        cart.add(&catalog, MenuItemId::new(1));
        cart.add(&catalog, MenuItemId::new(2));

        let ids: Vec<i64> = cart.lines().iter().map(|l| l.id.as_i64()).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_set_quantity_zero_equals_remove() {
        let catalog = catalog();

        let mut via_set = Cart::new();
        via_set.add(&catalog, MenuItemId::new(1));
        via_set.add(&catalog, MenuItemId::new(2));
        via_set.set_quantity(MenuItemId::new(1), 0);

        let mut via_remove = Cart::new();
        via_remove.add(&catalog, MenuItemId::new(1));
        via_remove.add(&catalog, MenuItemId::new(2));
        via_remove.remove(MenuItemId::new(1));

        assert_eq!(via_set, via_remove);
    }

    #[test]
    fn test_set_quantity_sets_exactly() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add(&catalog, MenuItemId::new(1));
        cart.set_quantity(MenuItemId::new(1), 5);

        assert_eq!(cart.lines().first().unwrap().quantity, 5);
        assert_eq!(cart.totals().subtotal.fixed2(), "100.00");
    }

    #[test]
    fn test_set_quantity_unknown_id_is_noop() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add(&catalog, MenuItemId::new(1));
        cart.set_quantity(MenuItemId::new(42), 3);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines().first().unwrap().quantity, 1);
    }

    #[test]
    fn test_remove_and_clear() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add(&catalog, MenuItemId::new(1));
        cart.add(&catalog, MenuItemId::new(2));

        cart.remove(MenuItemId::new(1));
        assert_eq!(cart.lines().len(), 1);

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.totals().subtotal, Money::ZERO);
    }

    #[test]
    fn test_item_count_sums_quantities() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add(&catalog, MenuItemId::new(1));
        cart.add(&catalog, MenuItemId::new(1));
        cart.add(&catalog, MenuItemId::new(2));

        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_totals_round_tax_to_two_places() {
        let catalog = catalog();
        let mut cart = Cart::new();
        // 5.50 * 3 = 16.50 subtotal; 8% = 1.32 exactly
        cart.add(&catalog, MenuItemId::new(2));
        cart.set_quantity(MenuItemId::new(2), 3);

        let totals = cart.totals();
        assert_eq!(totals.subtotal.fixed2(), "16.50");
        assert_eq!(totals.tax.fixed2(), "1.32");
        assert_eq!(totals.total.fixed2(), "17.82");
    }

    #[test]
    fn test_backup_roundtrip_reproduces_lines() {
        let catalog = catalog();
        let mut cart = Cart::new();
        cart.add(&catalog, MenuItemId::new(1));
        cart.add(&catalog, MenuItemId::new(2));
        cart.set_quantity(MenuItemId::new(2), 4);

        let json = serde_json::to_string(cart.lines()).unwrap();
        let restored = Cart::from_lines(serde_json::from_str(&json).unwrap());

        assert_eq!(restored, cart);
    }
}
