//! Per-producer inventory ledger
//!
//! Tracks how many units of each product a producer currently has on offer.
//! The ledger itself is unbounded; the marketplace owns the configured
//! capacity and enforces it before crediting units.

use crate::market::types::Product;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub(crate) struct ProducerInventory {
    stock: HashMap<Product, u32>,
}

impl ProducerInventory {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Total units on offer across all products
    pub(crate) fn total(&self) -> u32 {
        self.stock.values().sum()
    }

    /// Units of a single product on offer
    pub(crate) fn available(&self, product: &Product) -> u32 {
        self.stock.get(product).copied().unwrap_or(0)
    }

    /// Add one unit of `product` to the offer
    pub(crate) fn credit(&mut self, product: Product) {
        *self.stock.entry(product).or_insert(0) += 1;
    }

    /// Take one unit of `product` off the offer
    ///
    /// Returns false when no unit is available. Entries that hit zero are
    /// dropped so the map only holds products actually on offer.
    pub(crate) fn debit(&mut self, product: &Product) -> bool {
        match self.stock.get_mut(product) {
            Some(count) if *count > 1 => {
                *count -= 1;
                true
            }
            Some(_) => {
                self.stock.remove(product);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_inventory() {
        let inventory = ProducerInventory::new();

        assert_eq!(inventory.total(), 0);
        assert_eq!(inventory.available(&Product::from("bread")), 0);
    }

    #[test]
    fn test_credit_accumulates_per_product() {
        let mut inventory = ProducerInventory::new();

        inventory.credit(Product::from("bread"));
        inventory.credit(Product::from("bread"));
        inventory.credit(Product::from("butter"));

        assert_eq!(inventory.total(), 3);
        assert_eq!(inventory.available(&Product::from("bread")), 2);
        assert_eq!(inventory.available(&Product::from("butter")), 1);
    }

    #[test]
    fn test_debit_removes_single_units() {
        let mut inventory = ProducerInventory::new();
        inventory.credit(Product::from("bread"));
        inventory.credit(Product::from("bread"));

        assert!(inventory.debit(&Product::from("bread")));
        assert_eq!(inventory.available(&Product::from("bread")), 1);

        assert!(inventory.debit(&Product::from("bread")));
        assert_eq!(inventory.available(&Product::from("bread")), 0);
        assert_eq!(inventory.total(), 0);
    }

    #[test]
    fn test_debit_missing_product_fails() {
        let mut inventory = ProducerInventory::new();
        inventory.credit(Product::from("bread"));

        assert!(!inventory.debit(&Product::from("butter")));
        assert_eq!(inventory.total(), 1, "Failed debit must not change stock");
    }

    #[test]
    fn test_debit_then_credit_restores_unit() {
        let mut inventory = ProducerInventory::new();
        inventory.credit(Product::from("jam"));

        assert!(inventory.debit(&Product::from("jam")));
        inventory.credit(Product::from("jam"));

        assert_eq!(inventory.available(&Product::from("jam")), 1);
    }
}
