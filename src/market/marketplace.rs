//! Shared marketplace state and operations
//!
//! This module provides the core marketplace with:
//! - Capacity-capped publishing per producer
//! - Atomic reservation of units from inventories into carts
//! - Cart lifecycle tracking (open until placed, frozen afterwards)
//! - Notification hooks so waiting workers avoid polling

use crate::market::cart::{Cart, CartState, Reservation};
use crate::market::error::{MarketError, MarketResult};
use crate::market::inventory::ProducerInventory;
use crate::market::types::{CartId, MarketStats, Product, ProducerId};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::Notify;

/// Marketplace mediating between producers that publish capacity-capped
/// inventory and consumers that reserve units into carts
///
/// # Thread Safety
///
/// The Marketplace is fully thread-safe and is shared across tasks as
/// `Arc<Marketplace>`. Every operation takes `&self` and locks internally
/// for exactly one operation, so callers never hold or coordinate locks
/// themselves.
///
/// # Example
///
/// ```rust,no_run
/// use marketsim::market::api::{Marketplace, Product};
///
/// # fn example() -> Result<(), marketsim::market::api::MarketError> {
/// let market = Marketplace::new(4);
///
/// let producer = market.register_producer()?;
/// market.publish(producer, Product::from("apple"))?;
///
/// let cart = market.new_cart()?;
/// market.add_to_cart(cart, Product::from("apple"))?;
/// let order = market.place_order(cart)?;
/// assert_eq!(order, vec![Product::from("apple")]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Marketplace {
    /// Maximum units a single producer may have on offer at once
    capacity: u32,

    /// Monotonic id counters; ids are never reused
    next_producer_id: AtomicU64,
    next_cart_id: AtomicU64,

    /// Producer inventories keyed by id. The ordered map makes reservation
    /// scans deterministic: the earliest-registered producer with stock wins.
    ///
    /// Lock order: `carts` is always taken before `producers` when an
    /// operation needs both.
    producers: RwLock<BTreeMap<ProducerId, ProducerInventory>>,

    /// All carts ever created, open and placed
    carts: RwLock<HashMap<CartId, Cart>>,

    /// Signalled after every publish or release, for consumers waiting on stock
    restock: Notify,

    /// Signalled after every reservation, for producers waiting on capacity
    headroom: Notify,
}

impl Marketplace {
    /// Create a marketplace where each producer may have at most
    /// `capacity_per_producer` units on offer at any moment
    pub fn new(capacity_per_producer: u32) -> Self {
        Self {
            capacity: capacity_per_producer,
            next_producer_id: AtomicU64::new(0),
            next_cart_id: AtomicU64::new(0),
            producers: RwLock::new(BTreeMap::new()),
            carts: RwLock::new(HashMap::new()),
            restock: Notify::new(),
            headroom: Notify::new(),
        }
    }

    /// The configured per-producer capacity
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Register a new producer and create its empty inventory
    ///
    /// Ids are sequential in allocation order. The capacity cap applies
    /// from the very first unit the producer publishes. Fails only if a
    /// lock was poisoned.
    pub fn register_producer(&self) -> MarketResult<ProducerId> {
        let id = ProducerId(self.next_producer_id.fetch_add(1, Ordering::SeqCst));
        let mut producers = write_lock(&self.producers)?;
        producers.insert(id, ProducerInventory::new());
        Ok(id)
    }

    /// Put one unit of `product` on offer for `producer`
    ///
    /// Fails with `CapacityExceeded` when the producer already has the
    /// configured maximum on offer; the inventory is left unchanged and
    /// the caller may retry after capacity frees up.
    pub fn publish(&self, producer: ProducerId, product: Product) -> MarketResult<()> {
        {
            let mut producers = write_lock(&self.producers)?;
            let inventory = producers
                .get_mut(&producer)
                .ok_or(MarketError::InvalidProducer { producer })?;

            if inventory.total() >= self.capacity {
                return Err(MarketError::CapacityExceeded {
                    capacity: self.capacity,
                });
            }
            inventory.credit(product);
        }

        self.restock.notify_waiters();
        Ok(())
    }

    /// Create a new empty cart
    ///
    /// Cart ids count up independently of producer ids. Fails only if a
    /// lock was poisoned.
    pub fn new_cart(&self) -> MarketResult<CartId> {
        let id = CartId(self.next_cart_id.fetch_add(1, Ordering::SeqCst));
        let mut carts = write_lock(&self.carts)?;
        carts.insert(id, Cart::new());
        Ok(id)
    }

    /// Reserve one unit of `product` into `cart`
    ///
    /// The unit comes from the earliest-registered producer with stock and
    /// moves into the cart in a single atomic step; no interleaving can
    /// observe the unit in both places or in neither. Fails with
    /// `ProductUnavailable` when no producer has a unit on offer.
    pub fn add_to_cart(&self, cart: CartId, product: Product) -> MarketResult<()> {
        {
            let mut carts = write_lock(&self.carts)?;
            let entry = carts
                .get_mut(&cart)
                .ok_or(MarketError::InvalidCart { cart })?;
            if !entry.is_open() {
                return Err(MarketError::CartAlreadyPlaced { cart });
            }

            let mut producers = write_lock(&self.producers)?;
            let mut source = None;
            for (id, inventory) in producers.iter_mut() {
                if inventory.debit(&product) {
                    source = Some(*id);
                    break;
                }
            }
            let Some(source) = source else {
                return Err(MarketError::ProductUnavailable { product });
            };

            entry.push(Reservation { product, source });
        }

        self.headroom.notify_waiters();
        Ok(())
    }

    /// Release one unit of `product` from `cart` back to the producer it
    /// was reserved from
    ///
    /// The oldest matching reservation is the one released. The returned
    /// unit is credited without a capacity check; publishing is the only
    /// admission gate, so a release never fails against a full inventory.
    pub fn remove_from_cart(&self, cart: CartId, product: &Product) -> MarketResult<()> {
        {
            let mut carts = write_lock(&self.carts)?;
            let entry = carts
                .get_mut(&cart)
                .ok_or(MarketError::InvalidCart { cart })?;
            if !entry.is_open() {
                return Err(MarketError::CartAlreadyPlaced { cart });
            }

            let reservation =
                entry
                    .remove_first(product)
                    .ok_or_else(|| MarketError::ProductNotInCart {
                        cart,
                        product: product.clone(),
                    })?;

            let mut producers = write_lock(&self.producers)?;
            match producers.get_mut(&reservation.source) {
                Some(inventory) => inventory.credit(reservation.product),
                None => {
                    return Err(MarketError::Internal {
                        message: format!(
                            "reservation source {} has no inventory entry",
                            reservation.source
                        ),
                    });
                }
            }
        }

        self.restock.notify_waiters();
        Ok(())
    }

    /// Freeze `cart` and return its products in insertion order
    ///
    /// Placing is idempotent: placing an already placed cart returns the
    /// same product list again and is not an error. Reserved units never
    /// return to producer inventories once the cart is placed.
    pub fn place_order(&self, cart: CartId) -> MarketResult<Vec<Product>> {
        let mut carts = write_lock(&self.carts)?;
        let entry = carts
            .get_mut(&cart)
            .ok_or(MarketError::InvalidCart { cart })?;
        Ok(entry.place())
    }

    /// Current lifecycle state of `cart`
    pub fn cart_state(&self, cart: CartId) -> MarketResult<CartState> {
        let carts = read_lock(&self.carts)?;
        let entry = carts.get(&cart).ok_or(MarketError::InvalidCart { cart })?;
        Ok(entry.state())
    }

    /// Total units `producer` currently has on offer
    pub fn inventory_total(&self, producer: ProducerId) -> MarketResult<u32> {
        let producers = read_lock(&self.producers)?;
        let inventory = producers
            .get(&producer)
            .ok_or(MarketError::InvalidProducer { producer })?;
        Ok(inventory.total())
    }

    /// Units of `product` currently on offer across all producers
    pub fn available_units(&self, product: &Product) -> u32 {
        let producers = read_recover(&self.producers);
        producers
            .values()
            .map(|inventory| inventory.available(product))
            .sum()
    }

    /// Point-in-time counters across the whole marketplace
    pub fn stats(&self) -> MarketStats {
        // Same lock order as the mutating paths: carts, then producers.
        let carts = read_recover(&self.carts);
        let producers = read_recover(&self.producers);

        let placed_carts = carts.values().filter(|cart| !cart.is_open()).count();
        let reserved_units: u64 = carts
            .values()
            .filter(|cart| cart.is_open())
            .map(|cart| cart.len() as u64)
            .sum();
        let available_units: u64 = producers
            .values()
            .map(|inventory| u64::from(inventory.total()))
            .sum();

        MarketStats {
            producers: producers.len(),
            carts: carts.len(),
            placed_carts,
            available_units,
            reserved_units,
        }
    }

    /// Wait until some producer publishes or a reservation is released
    ///
    /// Wakeups are edge-triggered and not buffered: a publish that lands
    /// between a failed reservation and this call is missed, so callers
    /// pair the wait with a timeout instead of relying on it alone.
    pub async fn restocked(&self) {
        self.restock.notified().await;
    }

    /// Wait until a reservation frees capacity at some producer
    ///
    /// Same edge-triggered caveat as [`Marketplace::restocked`].
    pub async fn capacity_freed(&self) {
        self.headroom.notified().await;
    }
}

/// Acquire a write guard, surfacing poisoning as an internal error
fn write_lock<T>(lock: &RwLock<T>) -> MarketResult<RwLockWriteGuard<'_, T>> {
    lock.write().map_err(|err| MarketError::Internal {
        message: format!("marketplace lock poisoned: {err}"),
    })
}

/// Acquire a read guard, surfacing poisoning as an internal error
fn read_lock<T>(lock: &RwLock<T>) -> MarketResult<RwLockReadGuard<'_, T>> {
    lock.read().map_err(|err| MarketError::Internal {
        message: format!("marketplace lock poisoned: {err}"),
    })
}

/// Acquire a read guard for observers, reading through poisoning
///
/// Counters and stats stay usable even after a writer panicked; the
/// snapshot may then reflect a half-applied operation.
fn read_recover<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}
