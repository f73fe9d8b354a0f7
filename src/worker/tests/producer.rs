//! Tests for the producer worker loop

#[cfg(test)]
mod tests {
    use crate::core::shutdown::ShutdownCoordinator;
    use crate::market::api::{Marketplace, Product};
    use crate::worker::api::{ProducerWorker, SupplyItem};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::{sleep, timeout};

    fn supply(product: &str, quantity: u32) -> Vec<SupplyItem> {
        vec![SupplyItem {
            product: Product::from(product),
            quantity,
            cooldown: Duration::from_millis(1),
        }]
    }

    #[tokio::test]
    async fn test_producer_publishes_plan_and_reports() {
        let market = Arc::new(Marketplace::new(100));
        let (coordinator, _rx) = ShutdownCoordinator::new();

        let worker = ProducerWorker::new(
            "bakery",
            supply("bread", 3),
            Duration::from_millis(5),
            Arc::clone(&market),
            coordinator.subscribe(),
        );
        let handle = tokio::spawn(worker.run());

        sleep(Duration::from_millis(50)).await;
        coordinator.trigger_shutdown();

        let report = timeout(Duration::from_secs(2), handle)
            .await
            .expect("Producer must stop promptly after shutdown")
            .unwrap()
            .unwrap();

        assert!(
            report.published >= 3,
            "Expected at least one full plan, got {} published",
            report.published
        );
        assert_eq!(report.rejected, 0, "Nothing fills a capacity of 100 here");

        // With no consumers, every published unit is still on offer
        let total = market.inventory_total(report.producer).unwrap();
        assert_eq!(u64::from(total), report.published);
    }

    #[tokio::test]
    async fn test_producer_cycles_supply_plan() {
        let market = Arc::new(Marketplace::new(100));
        let (coordinator, _rx) = ShutdownCoordinator::new();

        // A single-unit plan only reaches 2+ published by starting over
        let worker = ProducerWorker::new(
            "bakery",
            supply("bread", 1),
            Duration::from_millis(5),
            Arc::clone(&market),
            coordinator.subscribe(),
        );
        let handle = tokio::spawn(worker.run());

        sleep(Duration::from_millis(50)).await;
        coordinator.trigger_shutdown();

        let report = timeout(Duration::from_secs(2), handle)
            .await
            .expect("Producer must stop promptly after shutdown")
            .unwrap()
            .unwrap();

        assert!(
            report.published >= 2,
            "Plan should repeat until shutdown, got {} published",
            report.published
        );
    }

    #[tokio::test]
    async fn test_producer_backs_off_when_inventory_is_full() {
        let market = Arc::new(Marketplace::new(1));
        let (coordinator, _rx) = ShutdownCoordinator::new();

        let worker = ProducerWorker::new(
            "bakery",
            supply("bread", 5),
            Duration::from_millis(5),
            Arc::clone(&market),
            coordinator.subscribe(),
        );
        let handle = tokio::spawn(worker.run());

        sleep(Duration::from_millis(50)).await;
        coordinator.trigger_shutdown();

        let report = timeout(Duration::from_secs(2), handle)
            .await
            .expect("Producer must stop promptly after shutdown")
            .unwrap()
            .unwrap();

        assert_eq!(
            report.published, 1,
            "Capacity 1 admits exactly one unit with no consumers"
        );
        assert!(
            report.rejected >= 1,
            "Remaining attempts must be rejected, got {}",
            report.rejected
        );
        assert_eq!(market.inventory_total(report.producer).unwrap(), 1);
    }

    #[tokio::test]
    async fn test_producer_resumes_when_capacity_frees() {
        let market = Arc::new(Marketplace::new(1));
        let (coordinator, _rx) = ShutdownCoordinator::new();

        // Republish wait far beyond the test window: only the wakeup
        // from the freed slot lets the second unit through in time.
        let worker = ProducerWorker::new(
            "bakery",
            supply("bread", 2),
            Duration::from_secs(5),
            Arc::clone(&market),
            coordinator.subscribe(),
        );
        let handle = tokio::spawn(worker.run());

        sleep(Duration::from_millis(20)).await;
        let cart = market.new_cart().unwrap();
        market.add_to_cart(cart, Product::from("bread")).unwrap();

        sleep(Duration::from_millis(50)).await;
        coordinator.trigger_shutdown();

        let report = timeout(Duration::from_secs(2), handle)
            .await
            .expect("Producer must stop promptly after shutdown")
            .unwrap()
            .unwrap();

        assert_eq!(
            report.published, 2,
            "Freed capacity should wake the producer for the second unit"
        );
        println!("✓ Producer resumed after a reservation freed its slot");
    }

    #[tokio::test]
    async fn test_producer_with_empty_plan_parks_until_shutdown() {
        let market = Arc::new(Marketplace::new(4));
        let (coordinator, _rx) = ShutdownCoordinator::new();

        let worker = ProducerWorker::new(
            "idle",
            Vec::new(),
            Duration::from_millis(5),
            Arc::clone(&market),
            coordinator.subscribe(),
        );
        let handle = tokio::spawn(worker.run());

        sleep(Duration::from_millis(20)).await;
        coordinator.trigger_shutdown();

        let report = timeout(Duration::from_secs(2), handle)
            .await
            .expect("Idle producer must still honor shutdown")
            .unwrap()
            .unwrap();

        assert_eq!(report.published, 0);
        assert_eq!(report.rejected, 0);
        // Registration happened even though nothing was published
        assert_eq!(market.stats().producers, 1);
    }
}
