//! Cross-service scenarios over both store backends.
//!
//! Verifies:
//! - Every mutation is visible to a fresh service opened on the same store
//! - Orders carry the identity of the logged-in employee
//! - A failing store never rolls back in-memory state

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use musicshop_analytics::SalesAnalytics;
use musicshop_auth::{PasswordHasher, Role, Session, UserDirectory};
use musicshop_core::{Collection, Money};
use musicshop_inventory::{AddOutcome, CatalogItem, InventoryLedger, ItemType};
use musicshop_sales::{Customer, OrderProcessor, OrderStatus};
use musicshop_workforce::WorkLogTracker;

use crate::{InMemoryDocumentStore, JsonFileStore, StoreConfig};

struct PlainHasher;

impl PasswordHasher for PlainHasher {
    fn hash(&self, password: &str) -> String {
        format!("plain${password}")
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        hash.strip_prefix("plain$") == Some(password)
    }
}

/// Temporary data directory removed on drop.
struct TempDataDir(PathBuf);

impl TempDataDir {
    fn new() -> Self {
        Self(std::env::temp_dir().join(format!("musicshop-it-{}", Uuid::now_v7())))
    }

    fn store(&self) -> JsonFileStore {
        let config = StoreConfig {
            data_dir: self.0.clone(),
            pretty: true,
        };
        JsonFileStore::open(&config).unwrap()
    }
}

impl Drop for TempDataDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, day, hour, 0, 0).unwrap()
}

fn thriller() -> CatalogItem {
    CatalogItem::album("Thriller", Money::from_cents(1500), "Michael Jackson", 1982)
}

#[test]
fn repeated_adds_merge_and_survive_a_restart() {
    musicshop_observability::init_with(musicshop_observability::LogFormat::Compact);
    let dir = TempDataDir::new();

    {
        let mut ledger = InventoryLedger::open(dir.store());
        let first = ledger.add(thriller()).unwrap();
        assert!(matches!(first.outcome, AddOutcome::Inserted { .. }));
        ledger.add(thriller()).unwrap().into_outcome();
        let third = ledger.add(thriller()).unwrap();
        assert!(third.is_durable());
        assert!(matches!(third.outcome, AddOutcome::Merged { quantity: 3, .. }));
    }

    let reopened = InventoryLedger::open(dir.store());
    assert_eq!(reopened.len(), 1);
    assert_eq!(reopened.find_by_name("thriller").unwrap().quantity(), 3);
    assert!(dir.store().path_for(Collection::Inventory).exists());
}

#[test]
fn logged_in_employee_processes_an_order() {
    let dir = TempDataDir::new();
    let mut directory = UserDirectory::open(dir.store(), PlainHasher);
    let clerk_id = directory.create_user("E1", "pw", Role::ShopEmployee).unwrap().outcome;

    let mut session = Session::new();
    session.login(&mut directory, "E1", "pw").unwrap().into_outcome();
    let employee = session.require_employee().unwrap();

    let mut processor = OrderProcessor::open(dir.store());
    let mut order = processor.create_cart_at(Customer::new("C001", "Ada"), at(3, 10));
    processor
        .add_to_cart(&mut order, CatalogItem::instrument("Strings", Money::from_cents(1000)))
        .unwrap();
    let total = processor
        .add_to_cart(&mut order, CatalogItem::instrument("Tuner", Money::from_cents(2550)))
        .unwrap();
    assert_eq!(total.to_string(), "$35.50");

    let committed = processor.process(order, &employee).unwrap();
    assert!(committed.is_durable());
    let order_id = committed.outcome.order_id().clone();

    let reopened = OrderProcessor::open(dir.store());
    let stored = reopened.find_by_id(&order_id).unwrap();
    assert_eq!(stored.status(), OrderStatus::Processed);
    assert_eq!(stored.total_amount(), Money::from_cents(3550));
    assert_eq!(stored.processed_by(), Some("E1"));
    assert_eq!(stored.processed_by_id(), Some(clerk_id));
    assert_eq!(reopened.find_by_customer_id("C001").map(|o| o.order_id()), Some(&order_id));

    let users = UserDirectory::open(dir.store(), PlainHasher);
    assert!(users.find_by_username("E1").unwrap().last_login.is_some());
}

#[test]
fn report_over_empty_range_is_all_zero() {
    let store = Arc::new(InMemoryDocumentStore::new());
    let mut directory = UserDirectory::open(Arc::clone(&store), PlainHasher);
    let mut session = Session::new();
    session.login(&mut directory, "admin", "admin123").unwrap().into_outcome();
    let employee = session.require_employee().unwrap();

    let mut processor = OrderProcessor::open(Arc::clone(&store));
    let mut order = processor.create_cart_at(Customer::new("C002", "Grace"), at(5, 12));
    processor.add_to_cart(&mut order, thriller()).unwrap();
    processor.process(order, &employee).unwrap().into_outcome();

    let ledger = InventoryLedger::open(Arc::clone(&store));
    let analytics = SalesAnalytics::over(&processor, &ledger);

    let empty = analytics.sales_report(at(10, 0), at(20, 0)).unwrap();
    assert_eq!(empty.total_orders, 0);
    assert_eq!(empty.total_revenue, Money::ZERO);
    assert!(empty.top_selling_items.is_empty());
    assert!(empty.revenue_by_category.is_empty());

    let june = analytics.sales_report(at(1, 0), at(30, 0)).unwrap();
    assert_eq!(june.total_orders, 1);
    assert_eq!(june.units_sold("Thriller"), Some(1));
    assert_eq!(june.revenue_by_category[&ItemType::Album], Money::from_cents(1500));
}

#[test]
fn eight_hour_shift_is_recorded_and_reloaded() {
    let dir = TempDataDir::new();
    let directory = UserDirectory::open(dir.store(), PlainHasher);
    let admin = directory.find_by_username("admin").unwrap().id;

    {
        let mut tracker = WorkLogTracker::open(dir.store());
        tracker.check_in_at(admin, at(7, 9)).unwrap();
        let closed = tracker.check_out_at(admin, at(7, 17)).unwrap();
        assert!(closed.is_durable());
        assert_eq!(closed.outcome.duration(), Duration::hours(8));
    }

    let tracker = WorkLogTracker::open(dir.store());
    assert!(!tracker.is_checked_in(admin));
    assert_eq!(tracker.total_work_time(admin), Duration::hours(8));
    assert_eq!(tracker.all_work_logs().get(&admin), Some(&Duration::hours(8)));
}

#[test]
fn failing_store_keeps_the_session_usable() {
    let store = Arc::new(InMemoryDocumentStore::new());
    let mut ledger = InventoryLedger::open(Arc::clone(&store));
    let mut processor = OrderProcessor::open(Arc::clone(&store));
    let mut directory = UserDirectory::open(Arc::clone(&store), PlainHasher);
    store.set_fail_saves(true);

    let added = ledger.add(thriller()).unwrap();
    assert!(!added.is_durable());
    assert_eq!(ledger.len(), 1);

    let mut session = Session::new();
    session.login(&mut directory, "admin", "admin123").unwrap().into_outcome();
    let employee = session.require_employee().unwrap();

    let mut order = processor.create_cart_at(Customer::new("C003", "Linus"), at(8, 9));
    processor.add_to_cart(&mut order, thriller()).unwrap();
    let processed = processor.process(order, &employee).unwrap();
    assert!(!processed.is_durable());
    assert!(processed.durability.error().is_some());
    assert_eq!(processor.orders().len(), 1);

    store.set_fail_saves(false);
    assert!(processor.flush().is_saved());
    let reopened = OrderProcessor::open(Arc::clone(&store));
    assert_eq!(reopened.orders().len(), 1);
}
