//! Session cart with add/increment semantics.
//!
//! The cart lives only for the page session. Lines are kept in insertion
//! order and there is at most one line per product id.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};

/// Maximum quantity allowed per line.
pub const MAX_QUANTITY_PER_LINE: u32 = 9999;

/// One product's accumulated quantity in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    pub product_id: ProductId,
    /// Title captured when the line was created.
    pub title: String,
    /// Unit price captured when the line was created.
    pub price: Money,
    /// Always at least 1.
    pub quantity: u32,
    pub image_url: String,
}

impl CartLine {
    fn from_product(product: &Product) -> Self {
        Self {
            product_id: product.id.clone(),
            title: product.title.clone(),
            price: product.price,
            quantity: 1,
            image_url: product.image_url.clone(),
        }
    }

    /// Price times quantity.
    pub fn line_total(&self) -> Result<Money, CommerceError> {
        self.price
            .try_multiply(self.quantity)
            .ok_or(CommerceError::Overflow)
    }
}

/// Insertion-ordered cart.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of a product.
    ///
    /// If a line for the product already exists its quantity is incremented
    /// and the captured title and price are left as they were. Otherwise a
    /// new line with quantity 1 is appended.
    pub fn add(&mut self, product: &Product) -> Result<&CartLine, CommerceError> {
        match self.lines.iter().position(|l| l.product_id == product.id) {
            Some(index) => {
                let line = &mut self.lines[index];
                let quantity = line
                    .quantity
                    .checked_add(1)
                    .ok_or(CommerceError::Overflow)?;
                if quantity > MAX_QUANTITY_PER_LINE {
                    return Err(CommerceError::QuantityExceedsLimit(
                        quantity,
                        MAX_QUANTITY_PER_LINE,
                    ));
                }
                line.quantity = quantity;
                Ok(&self.lines[index])
            }
            None => {
                self.lines.push(CartLine::from_product(product));
                let last = self.lines.len() - 1;
                Ok(&self.lines[last])
            }
        }
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Look up the line for a product.
    pub fn line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.product_id == product_id)
    }

    /// Total quantity across all lines.
    pub fn count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of line totals.
    pub fn subtotal(&self) -> Result<Money, CommerceError> {
        let currency = self
            .lines
            .first()
            .map(|l| l.price.currency)
            .unwrap_or(Currency::INR);

        self.lines.iter().try_fold(Money::zero(currency), |acc, line| {
            acc.try_add(&line.line_total()?).ok_or(CommerceError::Overflow)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, title: &str, price_minor: i64) -> Product {
        Product {
            id: ProductId::new(id),
            sku: None,
            title: title.to_string(),
            description: None,
            price: Money::new(price_minor, Currency::INR),
            image_url: format!("/img/{}.jpg", id),
            category: Some("Chicken".to_string()),
        }
    }

    #[test]
    fn test_cart_creation() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.count(), 0);
    }

    #[test]
    fn test_repeat_add_increments_single_line() {
        let mut cart = Cart::new();
        let p = product("p1", "Curry Cut", 24900);

        for calls in 1..=5u32 {
            cart.add(&p).unwrap();
            assert_eq!(cart.lines().len(), 1);
            assert_eq!(cart.line(&p.id).unwrap().quantity, calls);
            assert_eq!(cart.count(), u64::from(calls));
        }
    }

    #[test]
    fn test_distinct_products_keep_call_order() {
        let mut cart = Cart::new();
        cart.add(&product("p2", "Mutton Keema", 59900)).unwrap();
        cart.add(&product("p1", "Curry Cut", 24900)).unwrap();

        let ids: Vec<&str> = cart.lines().iter().map(|l| l.product_id.as_str()).collect();
        assert_eq!(ids, vec!["p2", "p1"]);
        assert!(cart.lines().iter().all(|l| l.quantity == 1));
        assert_eq!(cart.count(), 2);
    }

    #[test]
    fn test_count_is_sum_of_quantities() {
        let mut cart = Cart::new();
        let a = product("a", "A", 100);
        let b = product("b", "B", 200);
        for p in [&a, &b, &a, &a, &b] {
            cart.add(p).unwrap();
        }
        let sum: u64 = cart.lines().iter().map(|l| u64::from(l.quantity)).sum();
        assert_eq!(cart.count(), sum);
        assert_eq!(cart.count(), 5);
    }

    #[test]
    fn test_price_captured_at_first_add() {
        let mut cart = Cart::new();
        let mut p = product("p1", "Curry Cut", 24900);
        cart.add(&p).unwrap();

        p.price = Money::new(19900, Currency::INR);
        p.title = "Curry Cut (Sale)".to_string();
        cart.add(&p).unwrap();

        let line = cart.line(&p.id).unwrap();
        assert_eq!(line.quantity, 2);
        assert_eq!(line.price.amount_minor, 24900);
        assert_eq!(line.title, "Curry Cut");
    }

    #[test]
    fn test_subtotal() {
        let mut cart = Cart::new();
        let a = product("a", "A", 24950);
        let b = product("b", "B", 8900);
        cart.add(&a).unwrap();
        cart.add(&a).unwrap();
        cart.add(&b).unwrap();

        assert_eq!(cart.subtotal().unwrap().amount_minor, 2 * 24950 + 8900);
        assert_eq!(Cart::new().subtotal().unwrap().amount_minor, 0);
    }

    #[test]
    fn test_quantity_limit() {
        let mut cart = Cart::new();
        let p = product("p1", "Curry Cut", 100);
        cart.add(&p).unwrap();
        cart.lines[0].quantity = MAX_QUANTITY_PER_LINE;

        let err = cart.add(&p).unwrap_err();
        assert_eq!(
            err,
            CommerceError::QuantityExceedsLimit(MAX_QUANTITY_PER_LINE + 1, MAX_QUANTITY_PER_LINE)
        );
        assert_eq!(cart.count(), u64::from(MAX_QUANTITY_PER_LINE));
    }
}
