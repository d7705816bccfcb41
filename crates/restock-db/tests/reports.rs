//! Integration tests for the reporting queries, against in-memory SQLite.
//!
//! Each test seeds its own isolated database through the CRUD repositories,
//! then asserts on the reports repository's aggregates.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

use restock_core::{
    Category, DateRange, OrderStatus, Product, PurchaseOrder, Sale, Supplier,
};
use restock_db::repository::generate_id;
use restock_db::{Database, DbConfig};

// =============================================================================
// Seed Helpers
// =============================================================================

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn at_noon(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
}

async fn test_db() -> Database {
    Database::new(DbConfig::in_memory()).await.unwrap()
}

async fn seed_category(db: &Database, name: &str) -> String {
    let now = Utc::now();
    let category = Category {
        id: generate_id(),
        name: name.to_string(),
        description: None,
        created_at: now,
        updated_at: now,
    };
    db.categories().insert(&category).await.unwrap();
    category.id
}

async fn seed_supplier(db: &Database, name: &str) -> String {
    let now = Utc::now();
    let supplier = Supplier {
        id: generate_id(),
        name: name.to_string(),
        email: None,
        phone: None,
        address: None,
        takes_back_returns: true,
        created_at: now,
        updated_at: now,
    };
    db.suppliers().insert(&supplier).await.unwrap();
    supplier.id
}

async fn seed_product(
    db: &Database,
    name: &str,
    category_id: &str,
    quantity: i64,
    threshold: i64,
) -> String {
    let now = Utc::now();
    let product = Product {
        id: generate_id(),
        name: name.to_string(),
        category_id: category_id.to_string(),
        supplier_id: None,
        store_id: None,
        buying_price_cents: 60_00,
        selling_price_cents: Some(100_00),
        quantity,
        threshold,
        expiry_date: None,
        created_at: now,
        updated_at: now,
    };
    db.products().insert(&product).await.unwrap();
    product.id
}

async fn seed_sale(
    db: &Database,
    product_id: &str,
    quantity: i64,
    selling_price_cents: i64,
    buying_price_cents: i64,
    sale_date: NaiveDate,
) {
    let now = Utc::now();
    let sale = Sale {
        id: generate_id(),
        product_id: product_id.to_string(),
        store_id: None,
        quantity,
        selling_price_cents,
        buying_price_cents,
        total_value_cents: selling_price_cents * quantity,
        sale_date,
        created_at: now,
        updated_at: now,
    };
    db.sales().insert(&sale).await.unwrap();
}

async fn seed_order(
    db: &Database,
    product_id: &str,
    supplier_id: &str,
    quantity: i64,
    order_value_cents: i64,
    order_date: DateTime<Utc>,
    expected_date: Option<NaiveDate>,
    status: OrderStatus,
) {
    let now = Utc::now();
    let order = PurchaseOrder {
        id: generate_id(),
        product_id: product_id.to_string(),
        supplier_id: supplier_id.to_string(),
        quantity,
        order_value_cents,
        order_date,
        expected_date,
        status,
        received: status == OrderStatus::Delivered,
        received_date: (status == OrderStatus::Delivered).then_some(order_date),
        created_at: now,
        updated_at: now,
    };
    db.purchase_orders().insert(&order).await.unwrap();
}

// =============================================================================
// Sales Aggregates
// =============================================================================

#[tokio::test]
async fn sales_aggregate_sums_revenue_cost_profit() {
    let db = test_db().await;
    let category = seed_category(&db, "Beverages").await;
    let product = seed_product(&db, "Cola", &category, 40, 10).await;

    // Two sales in August: quantities 3 and 5 at 100.00 / 60.00.
    seed_sale(&db, &product, 3, 100_00, 60_00, date(2026, 8, 5)).await;
    seed_sale(&db, &product, 5, 100_00, 60_00, date(2026, 8, 10)).await;

    let august = DateRange::bounded(date(2026, 8, 1), date(2026, 8, 31));
    let totals = db.reports().sales_totals(&august).await.unwrap();

    assert_eq!(totals.revenue_cents, 800_00);
    assert_eq!(totals.cost_cents, 480_00);
    assert_eq!(totals.profit_cents, 320_00);
}

#[tokio::test]
async fn sales_aggregate_returns_zeros_when_no_rows_match() {
    let db = test_db().await;
    let category = seed_category(&db, "Beverages").await;
    let product = seed_product(&db, "Cola", &category, 40, 10).await;
    seed_sale(&db, &product, 3, 100_00, 60_00, date(2026, 8, 5)).await;

    // A month with no data at all.
    let empty = DateRange::bounded(date(2026, 2, 1), date(2026, 2, 28));
    let totals = db.reports().sales_totals(&empty).await.unwrap();

    assert_eq!(totals.revenue_cents, 0);
    assert_eq!(totals.cost_cents, 0);
    assert_eq!(totals.profit_cents, 0);
}

#[tokio::test]
async fn unbounded_range_includes_ancient_sales() {
    let db = test_db().await;
    let category = seed_category(&db, "Beverages").await;
    let product = seed_product(&db, "Cola", &category, 40, 10).await;

    // One sale a decade old, one current.
    seed_sale(&db, &product, 2, 20_00, 10_00, date(2016, 8, 5)).await;
    seed_sale(&db, &product, 1, 20_00, 10_00, date(2026, 8, 5)).await;

    let totals = db
        .reports()
        .sales_totals(&DateRange::unbounded())
        .await
        .unwrap();

    assert_eq!(totals.revenue_cents, 60_00);

    // And a half-open range only cuts one side.
    let since_2020 = DateRange {
        start: Some(date(2020, 1, 1)),
        end: None,
    };
    let totals = db.reports().sales_totals(&since_2020).await.unwrap();
    assert_eq!(totals.revenue_cents, 20_00);
}

#[tokio::test]
async fn range_bounds_are_inclusive() {
    let db = test_db().await;
    let category = seed_category(&db, "Beverages").await;
    let product = seed_product(&db, "Cola", &category, 40, 10).await;

    seed_sale(&db, &product, 1, 10_00, 5_00, date(2026, 8, 1)).await;
    seed_sale(&db, &product, 1, 10_00, 5_00, date(2026, 8, 31)).await;
    seed_sale(&db, &product, 1, 10_00, 5_00, date(2026, 7, 31)).await;
    seed_sale(&db, &product, 1, 10_00, 5_00, date(2026, 9, 1)).await;

    let august = DateRange::bounded(date(2026, 8, 1), date(2026, 8, 31));
    let totals = db.reports().sales_totals(&august).await.unwrap();

    // Both boundary days count, the neighbors don't.
    assert_eq!(totals.revenue_cents, 20_00);
}

// =============================================================================
// Purchase Aggregates
// =============================================================================

#[tokio::test]
async fn purchases_value_filters_by_status_and_range() {
    let db = test_db().await;
    let category = seed_category(&db, "Beverages").await;
    let supplier = seed_supplier(&db, "Acme").await;
    let product = seed_product(&db, "Cola", &category, 40, 10).await;

    seed_order(
        &db,
        &product,
        &supplier,
        10,
        500_00,
        at_noon(2026, 8, 3),
        None,
        OrderStatus::Delivered,
    )
    .await;
    seed_order(
        &db,
        &product,
        &supplier,
        5,
        200_00,
        at_noon(2026, 8, 4),
        None,
        OrderStatus::Confirmed,
    )
    .await;
    seed_order(
        &db,
        &product,
        &supplier,
        5,
        300_00,
        at_noon(2026, 5, 1),
        None,
        OrderStatus::Delivered,
    )
    .await;

    let august = DateRange::bounded(date(2026, 8, 1), date(2026, 8, 31));
    let reports = db.reports();

    // Only the Delivered order inside August.
    let delivered_in_august = reports
        .purchases_value(&august, OrderStatus::Delivered)
        .await
        .unwrap();
    assert_eq!(delivered_in_august, 500_00);

    // Unbounded picks up the May delivery too.
    let delivered_all = reports
        .purchases_value(&DateRange::unbounded(), OrderStatus::Delivered)
        .await
        .unwrap();
    assert_eq!(delivered_all, 800_00);

    // No Returned orders anywhere.
    let returned = reports
        .purchases_value(&DateRange::unbounded(), OrderStatus::Returned)
        .await
        .unwrap();
    assert_eq!(returned, 0);
}

// =============================================================================
// Rankings
// =============================================================================

#[tokio::test]
async fn product_ranking_orders_by_turnover_and_respects_limit() {
    let db = test_db().await;
    let category = seed_category(&db, "Beverages").await;
    let cola = seed_product(&db, "Cola", &category, 40, 10).await;
    let water = seed_product(&db, "Water", &category, 80, 10).await;
    let juice = seed_product(&db, "Juice", &category, 15, 10).await;

    // Turnovers: Cola 800.00, Juice 300.00, Water 100.00.
    seed_sale(&db, &cola, 8, 100_00, 60_00, date(2026, 8, 5)).await;
    seed_sale(&db, &juice, 10, 30_00, 20_00, date(2026, 8, 6)).await;
    seed_sale(&db, &water, 10, 10_00, 5_00, date(2026, 8, 7)).await;

    let august = DateRange::bounded(date(2026, 8, 1), date(2026, 8, 31));
    let rows = db
        .reports()
        .top_products_by_turnover(&august, 2)
        .await
        .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].product_name, "Cola");
    assert_eq!(rows[0].turnover_cents, 800_00);
    assert_eq!(rows[0].sold_quantity, 8);
    assert_eq!(rows[0].remaining_quantity, 40);
    assert_eq!(rows[0].category_name.as_deref(), Some("Beverages"));
    assert_eq!(rows[1].product_name, "Juice");
    assert!(rows[0].turnover_cents > rows[1].turnover_cents);
}

#[tokio::test]
async fn product_ranking_returns_fewer_rows_than_limit_when_few_groups() {
    let db = test_db().await;
    let category = seed_category(&db, "Beverages").await;
    let cola = seed_product(&db, "Cola", &category, 40, 10).await;
    seed_sale(&db, &cola, 1, 100_00, 60_00, date(2026, 8, 5)).await;

    let august = DateRange::bounded(date(2026, 8, 1), date(2026, 8, 31));
    let rows = db
        .reports()
        .top_products_by_turnover(&august, 5)
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn category_ranking_joins_through_products() {
    let db = test_db().await;
    let beverages = seed_category(&db, "Beverages").await;
    let snacks = seed_category(&db, "Snacks").await;
    let cola = seed_product(&db, "Cola", &beverages, 40, 10).await;
    let chips = seed_product(&db, "Chips", &snacks, 25, 5).await;

    seed_sale(&db, &cola, 8, 100_00, 60_00, date(2026, 8, 5)).await;
    seed_sale(&db, &chips, 10, 30_00, 15_00, date(2026, 8, 6)).await;

    let august = DateRange::bounded(date(2026, 8, 1), date(2026, 8, 31));
    let rows = db
        .reports()
        .top_categories_by_turnover(&august, 3)
        .await
        .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].category_name, "Beverages");
    assert_eq!(rows[0].turnover_cents, 800_00);
    assert_eq!(rows[1].category_name, "Snacks");
    assert_eq!(rows[1].turnover_cents, 300_00);
}

#[tokio::test]
async fn previous_period_turnover_supports_percent_change() {
    let db = test_db().await;
    let category = seed_category(&db, "Beverages").await;
    let cola = seed_product(&db, "Cola", &category, 40, 10).await;

    // Current period turnover 500.00, previous period 250.00.
    seed_sale(&db, &cola, 5, 100_00, 60_00, date(2026, 8, 5)).await;
    seed_sale(&db, &cola, 5, 50_00, 30_00, date(2026, 7, 10)).await;

    let august = DateRange::bounded(date(2026, 8, 1), date(2026, 8, 31));
    let july = DateRange::bounded(date(2026, 7, 1), date(2026, 7, 31));
    let reports = db.reports();

    let current = reports.top_products_by_turnover(&august, 1).await.unwrap();
    let previous = reports.product_turnovers(&july).await.unwrap();

    assert_eq!(current[0].turnover_cents, 500_00);
    let baseline = previous
        .iter()
        .find(|row| row.id == cola)
        .map(|row| row.turnover_cents)
        .unwrap_or(0);
    assert_eq!(baseline, 250_00);

    assert_eq!(
        restock_core::percent_change(current[0].turnover_cents, baseline),
        Some(100.0)
    );
}

// =============================================================================
// Monthly Series
// =============================================================================

#[tokio::test]
async fn monthly_sales_totals_bucket_by_calendar_month() {
    let db = test_db().await;
    let category = seed_category(&db, "Beverages").await;
    let cola = seed_product(&db, "Cola", &category, 40, 10).await;

    seed_sale(&db, &cola, 2, 100_00, 60_00, date(2026, 3, 5)).await;
    seed_sale(&db, &cola, 1, 100_00, 60_00, date(2026, 3, 20)).await;
    seed_sale(&db, &cola, 4, 100_00, 60_00, date(2026, 11, 1)).await;
    // A different year must not leak in.
    seed_sale(&db, &cola, 9, 100_00, 60_00, date(2025, 3, 5)).await;

    let rows = db.reports().monthly_sales_totals(2026).await.unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].month, 3);
    assert_eq!(rows[0].revenue_cents, 300_00);
    assert_eq!(rows[0].cost_cents, 180_00);
    assert_eq!(rows[1].month, 11);
    assert_eq!(rows[1].revenue_cents, 400_00);
}

#[tokio::test]
async fn delivered_series_buckets_by_expected_date_not_order_date() {
    let db = test_db().await;
    let category = seed_category(&db, "Beverages").await;
    let supplier = seed_supplier(&db, "Acme").await;
    let cola = seed_product(&db, "Cola", &category, 40, 10).await;

    // Ordered in February, expected (and counted as delivered) in March.
    seed_order(
        &db,
        &cola,
        &supplier,
        10,
        500_00,
        at_noon(2026, 2, 20),
        Some(date(2026, 3, 2)),
        OrderStatus::Delivered,
    )
    .await;
    // Outstanding order: never counted as delivered.
    seed_order(
        &db,
        &cola,
        &supplier,
        5,
        200_00,
        at_noon(2026, 2, 25),
        Some(date(2026, 3, 9)),
        OrderStatus::Confirmed,
    )
    .await;

    let reports = db.reports();

    let ordered = reports.monthly_ordered_counts(2026).await.unwrap();
    assert_eq!(ordered.len(), 1);
    assert_eq!(ordered[0].month, 2);
    assert_eq!(ordered[0].count, 2);

    let delivered = reports.monthly_delivered_counts(2026).await.unwrap();
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].month, 3);
    assert_eq!(delivered[0].count, 1);
}

// =============================================================================
// Dashboard Counters
// =============================================================================

#[tokio::test]
async fn stock_counters_ignore_any_window() {
    let db = test_db().await;
    let category = seed_category(&db, "Beverages").await;

    // quantity <= threshold counts as low stock; zero counts as out of stock.
    seed_product(&db, "Cola", &category, 40, 10).await;
    seed_product(&db, "Chips", &category, 5, 5).await;
    seed_product(&db, "Water", &category, 0, 2).await;

    let reports = db.reports();

    assert_eq!(reports.low_stock_count().await.unwrap(), 2);
    assert_eq!(reports.out_of_stock_count().await.unwrap(), 1);
    assert_eq!(reports.quantity_in_hand().await.unwrap(), 45);

    let low = reports.low_stock_products(10).await.unwrap();
    assert_eq!(low.len(), 2);
    // Most depleted first.
    assert_eq!(low[0].name, "Water");
    assert_eq!(low[1].name, "Chips");
}

#[tokio::test]
async fn outstanding_and_delayed_orders() {
    let db = test_db().await;
    let category = seed_category(&db, "Beverages").await;
    let supplier = seed_supplier(&db, "Acme").await;
    let cola = seed_product(&db, "Cola", &category, 40, 10).await;

    let today = date(2026, 8, 6);

    // Past expected date, not delivered → outstanding AND delayed.
    seed_order(
        &db,
        &cola,
        &supplier,
        7,
        300_00,
        at_noon(2026, 7, 20),
        Some(date(2026, 8, 1)),
        OrderStatus::Confirmed,
    )
    .await;
    // Past expected date but delivered → neither.
    seed_order(
        &db,
        &cola,
        &supplier,
        10,
        400_00,
        at_noon(2026, 7, 21),
        Some(date(2026, 8, 2)),
        OrderStatus::Delivered,
    )
    .await;
    // Future expected date → outstanding, not delayed.
    seed_order(
        &db,
        &cola,
        &supplier,
        3,
        100_00,
        at_noon(2026, 8, 4),
        Some(date(2026, 9, 1)),
        OrderStatus::OutForDelivery,
    )
    .await;

    let reports = db.reports();

    assert_eq!(reports.outstanding_order_quantity().await.unwrap(), 10);
    assert_eq!(reports.delayed_orders_count(today).await.unwrap(), 1);
    assert_eq!(
        reports.status_count(OrderStatus::OutForDelivery).await.unwrap(),
        1
    );
}

#[tokio::test]
async fn created_since_counters_respect_the_window() {
    let db = test_db().await;

    seed_category(&db, "Beverages").await;
    seed_supplier(&db, "Acme").await;

    let reports = db.reports();
    let now = Utc::now();

    // Everything was just created: inside the window.
    let window_start = now - Duration::days(7);
    assert_eq!(reports.categories_created_since(window_start).await.unwrap(), 1);
    assert_eq!(reports.suppliers_created_since(window_start).await.unwrap(), 1);

    // A window starting in the future sees nothing.
    let future = now + Duration::days(1);
    assert_eq!(reports.categories_created_since(future).await.unwrap(), 0);
}

#[tokio::test]
async fn top_sellers_by_units_over_trailing_window() {
    let db = test_db().await;
    let category = seed_category(&db, "Beverages").await;
    let cola = seed_product(&db, "Cola", &category, 40, 10).await;
    let water = seed_product(&db, "Water", &category, 80, 10).await;

    let today = date(2026, 8, 6);
    let window_start = today - Duration::days(7);

    // Water moves more units than Cola in the window; an old Cola sale
    // outside the window must not count.
    seed_sale(&db, &cola, 3, 100_00, 60_00, date(2026, 8, 5)).await;
    seed_sale(&db, &water, 12, 10_00, 5_00, date(2026, 8, 4)).await;
    seed_sale(&db, &cola, 50, 100_00, 60_00, date(2026, 6, 1)).await;

    let rows = db
        .reports()
        .top_products_by_units(window_start, 5)
        .await
        .unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].product_name, "Water");
    assert_eq!(rows[0].sold_quantity, 12);
    assert_eq!(rows[1].product_name, "Cola");
    assert_eq!(rows[1].sold_quantity, 3);
}
