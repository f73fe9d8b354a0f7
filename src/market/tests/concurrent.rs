//! Tests for concurrent marketplace access

#[cfg(test)]
mod tests {
    use crate::market::api::{MarketError, Marketplace, Product};
    use std::collections::HashSet;
    use std::sync::{Arc, Barrier};
    use std::thread;
    use std::time::Duration;
    use tokio::task::JoinSet;
    use tokio::time::timeout;

    #[test]
    fn test_concurrent_registration_yields_unique_sequential_ids() {
        let market = Arc::new(Marketplace::new(1));
        let threads = 8;
        let per_thread = 16;

        let mut handles = Vec::new();
        for _ in 0..threads {
            let market = Arc::clone(&market);
            handles.push(thread::spawn(move || {
                (0..per_thread)
                    .map(|_| market.register_producer().unwrap())
                    .collect::<Vec<_>>()
            }));
        }

        let mut ids = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(ids.insert(id), "Duplicate producer id handed out: {}", id);
            }
        }

        let expected = threads * per_thread;
        assert_eq!(ids.len(), expected);
        // Sequential allocation leaves no gaps
        let max = ids.iter().map(|id| id.0).max().unwrap();
        assert_eq!(max as usize, expected - 1);
    }

    #[test]
    fn test_single_unit_has_single_winner() {
        let market = Arc::new(Marketplace::new(4));
        let producer = market.register_producer().unwrap();
        market.publish(producer, Product::from("bread")).unwrap();

        let racers = 8;
        let barrier = Arc::new(Barrier::new(racers));

        let mut handles = Vec::new();
        for _ in 0..racers {
            let market = Arc::clone(&market);
            let barrier = Arc::clone(&barrier);
            handles.push(thread::spawn(move || {
                let cart = market.new_cart().unwrap();
                barrier.wait();
                market.add_to_cart(cart, Product::from("bread"))
            }));
        }

        let mut wins = 0;
        let mut misses = 0;
        for handle in handles {
            match handle.join().unwrap() {
                Ok(()) => wins += 1,
                Err(MarketError::ProductUnavailable { .. }) => misses += 1,
                Err(other) => panic!("Unexpected error during race: {:?}", other),
            }
        }

        assert_eq!(wins, 1, "Exactly one racer may take the single unit");
        assert_eq!(misses, racers - 1);
        assert_eq!(market.available_units(&Product::from("bread")), 0);
    }

    #[test]
    fn test_concurrent_publishing_never_exceeds_capacity() {
        let market = Arc::new(Marketplace::new(5));
        let producer = market.register_producer().unwrap();

        let threads = 4;
        let barrier = Arc::new(Barrier::new(threads));

        let mut handles = Vec::new();
        for _ in 0..threads {
            let market = Arc::clone(&market);
            let barrier = Arc::clone(&barrier);
            handles.push(thread::spawn(move || {
                barrier.wait();
                let mut accepted = 0;
                for _ in 0..5 {
                    if market.publish(producer, Product::from("bread")).is_ok() {
                        accepted += 1;
                    }
                }
                accepted
            }));
        }

        let accepted_total: u32 = handles.into_iter().map(|h| h.join().unwrap()).sum();

        assert_eq!(
            accepted_total, 5,
            "With nothing consumed, accepted publishes must equal the capacity"
        );
        assert_eq!(market.inventory_total(producer).unwrap(), 5);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_producers_and_consumer_drain_through_one_cart() {
        let market = Arc::new(Marketplace::new(2));
        let producer_count = 3;
        let units_each = 10u32;
        let total_units = producer_count * units_each;

        let mut producers = JoinSet::new();
        for _ in 0..producer_count {
            let market = Arc::clone(&market);
            producers.spawn(async move {
                let producer = market.register_producer().unwrap();
                let mut sent = 0;
                while sent < units_each {
                    match market.publish(producer, Product::from("bread")) {
                        Ok(()) => sent += 1,
                        Err(MarketError::CapacityExceeded { .. }) => {
                            tokio::time::sleep(Duration::from_millis(1)).await;
                        }
                        Err(other) => panic!("Unexpected publish failure: {}", other),
                    }
                }
            });
        }

        let consumer_market = Arc::clone(&market);
        let consumer = tokio::spawn(async move {
            let cart = consumer_market.new_cart().unwrap();
            let mut got = 0;
            while got < total_units {
                match consumer_market.add_to_cart(cart, Product::from("bread")) {
                    Ok(()) => got += 1,
                    Err(MarketError::ProductUnavailable { .. }) => {
                        tokio::time::sleep(Duration::from_millis(1)).await;
                    }
                    Err(other) => panic!("Unexpected reservation failure: {}", other),
                }
            }
            consumer_market.place_order(cart).unwrap()
        });

        while let Some(result) = producers.join_next().await {
            result.unwrap();
        }
        let order = timeout(Duration::from_secs(10), consumer)
            .await
            .expect("Consumer should drain all published units")
            .unwrap();

        assert_eq!(order.len(), total_units as usize);
        let stats = market.stats();
        assert_eq!(stats.available_units, 0, "Everything published was sold");
        assert_eq!(stats.reserved_units, 0);
        println!(
            "✓ {} producers drained through one cart ({} units)",
            producer_count, total_units
        );
    }

    #[tokio::test]
    async fn test_restock_notification_wakes_waiting_consumer() {
        let market = Arc::new(Marketplace::new(2));
        let producer = market.register_producer().unwrap();

        let waiter_market = Arc::clone(&market);
        let waiter = tokio::spawn(async move {
            waiter_market.restocked().await;
        });

        // Let the waiter register interest before the publish lands
        tokio::time::sleep(Duration::from_millis(20)).await;
        market.publish(producer, Product::from("bread")).unwrap();

        timeout(Duration::from_secs(1), waiter)
            .await
            .expect("Waiter should wake after a publish")
            .unwrap();
    }

    #[tokio::test]
    async fn test_headroom_notification_wakes_waiting_producer() {
        let market = Arc::new(Marketplace::new(1));
        let producer = market.register_producer().unwrap();
        market.publish(producer, Product::from("bread")).unwrap();

        let waiter_market = Arc::clone(&market);
        let waiter = tokio::spawn(async move {
            waiter_market.capacity_freed().await;
        });

        tokio::time::sleep(Duration::from_millis(20)).await;
        let cart = market.new_cart().unwrap();
        market.add_to_cart(cart, Product::from("bread")).unwrap();

        timeout(Duration::from_secs(1), waiter)
            .await
            .expect("Waiter should wake after a reservation frees capacity")
            .unwrap();
    }
}
