//! Cart contents and lifecycle tracking

use crate::market::types::{Product, ProducerId};

/// One reserved unit and the producer inventory it was taken from
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Reservation {
    pub(crate) product: Product,
    pub(crate) source: ProducerId,
}

/// Lifecycle state of a cart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartState {
    /// Accepting adds and removes
    Open,
    /// Ordered; contents are frozen
    Placed,
}

/// Ordered list of reservations owned by one consumer
///
/// Reservations keep insertion order so orders come out exactly as the
/// consumer built them.
#[derive(Debug)]
pub(crate) struct Cart {
    items: Vec<Reservation>,
    state: CartState,
}

impl Cart {
    pub(crate) fn new() -> Self {
        Self {
            items: Vec::new(),
            state: CartState::Open,
        }
    }

    pub(crate) fn state(&self) -> CartState {
        self.state
    }

    pub(crate) fn is_open(&self) -> bool {
        self.state == CartState::Open
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    /// Append a reservation at the end of the cart
    pub(crate) fn push(&mut self, reservation: Reservation) {
        self.items.push(reservation);
    }

    /// Remove the oldest reservation of `product`, if any
    pub(crate) fn remove_first(&mut self, product: &Product) -> Option<Reservation> {
        let index = self.items.iter().position(|r| &r.product == product)?;
        Some(self.items.remove(index))
    }

    /// Freeze the cart and return its products in insertion order
    ///
    /// Placing an already placed cart returns the same contents again.
    pub(crate) fn place(&mut self) -> Vec<Product> {
        self.state = CartState::Placed;
        self.items.iter().map(|r| r.product.clone()).collect()
    }
}
