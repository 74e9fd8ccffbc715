use ecomdash::config::DashboardConfig;
use ecomdash::data::DataContext;
use ecomdash::engines::metrics::{
    CountMetrics, DeliveryMetrics, MetricsEngine, ReviewMetrics, SalesMetrics, ViewReport,
};
use ecomdash::types::{CategorySales, Entity, MetricValue, View};
use ecomdash::DashboardError;
use polars::df;
use polars::prelude::*;

#[test]
fn test_distinct_count_independent_of_duplicate_rows() {
    // 5 rows, 3 distinct ids, one repeated 3 times
    let customers = df! {
        "customer_unique_id" => &["a", "b", "a", "c", "a"],
    }
    .unwrap();

    let count = CountMetrics::distinct_count(Entity::Customer, &customers, "customer_unique_id").unwrap();
    assert_eq!(count, 3);
}

#[test]
fn test_average_review_ignores_non_numeric() {
    let reviews = df! {
        "review_score" => &["5", "4", "bad", "3"],
    }
    .unwrap();

    assert_eq!(ReviewMetrics::average_review_score(&reviews).unwrap(), Some(4.0));
}

#[test]
fn test_average_review_all_non_numeric_is_absent() {
    let reviews = df! {
        "review_score" => &["bad", "worse"],
    }
    .unwrap();

    assert_eq!(ReviewMetrics::average_review_score(&reviews).unwrap(), None);
}

#[test]
fn test_average_delivery_excludes_missing_delivered_date() {
    let orders = df! {
        "order_purchase_timestamp" => &[Some("2018-03-01 09:30:00"), Some("2018-03-05 12:00:00")],
        "order_delivered_customer_date" => &[Some("2018-03-03 09:30:00"), None],
    }
    .unwrap();

    assert_eq!(DeliveryMetrics::average_delivery_days(&orders).unwrap(), Some(2.0));

    let distribution = DeliveryMetrics::delivery_days_distribution(&orders).unwrap();
    assert_eq!(distribution.entries, vec![(2, 1)]);
}

#[test]
fn test_top_categories_by_sales() {
    let items = df! {
        "product_id" => &["p1", "p2", "p3"],
        "price" => &[10.0, 5.0, 20.0],
    }
    .unwrap();
    let products = df! {
        "product_id" => &["p1", "p2", "p3"],
        "product_category_name" => &["A", "B", "A"],
    }
    .unwrap();

    let top = SalesMetrics::top_categories_by_sales(&items, &products, 2).unwrap();
    assert_eq!(
        top,
        vec![
            CategorySales { category: "A".to_string(), total_price: 30.0 },
            CategorySales { category: "B".to_string(), total_price: 5.0 },
        ]
    );
}

#[test]
fn test_state_counts_differ_from_distinct_count() {
    let customers = df! {
        "customer_unique_id" => &["u1", "u1", "u2"],
        "customer_state" => &["SP", "SP", "RJ"],
    }
    .unwrap();

    let by_state = CountMetrics::customer_count_by_state(&customers).unwrap();
    assert_eq!(by_state.count_of(&"SP".to_string()), 2);
    assert_eq!(by_state.total(), 3);

    let distinct = CountMetrics::distinct_count(Entity::Customer, &customers, "customer_unique_id").unwrap();
    assert_eq!(distinct, 2);
}

#[test]
fn test_metrics_are_idempotent() {
    let items = df! {
        "product_id" => &["p1", "p1", "p2"],
        "price" => &[1.0, 2.0, 3.0],
    }
    .unwrap();
    let products = df! {
        "product_id" => &["p1", "p2"],
        "product_category_name" => &["x", "y"],
    }
    .unwrap();
    let before = items.clone();

    let first = SalesMetrics::top_categories_by_sales(&items, &products, 5).unwrap();
    let second = SalesMetrics::top_categories_by_sales(&items, &products, 5).unwrap();
    assert_eq!(first, second);
    assert!(items.equals(&before));

    let top_first: Vec<_> = SalesMetrics::top_sold_products(&items, &products, 5)
        .unwrap()
        .into_iter()
        .map(|r| r.unwrap())
        .collect();
    let top_second: Vec<_> = SalesMetrics::top_sold_products(&items, &products, 5)
        .unwrap()
        .into_iter()
        .map(|r| r.unwrap())
        .collect();
    assert_eq!(top_first, top_second);
}

#[test]
fn test_unavailable_metric_does_not_affect_others() {
    // reviews table without a review_score column
    let ctx = DataContext::from_tables([
        (
            Entity::Customer,
            df! { "customer_unique_id" => &["u1", "u2"] }.unwrap(),
        ),
        (
            Entity::OrderReview,
            df! { "review_id" => &["r1"] }.unwrap(),
        ),
    ]);

    let engine = MetricsEngine::new(&DashboardConfig::default());
    let ViewReport::Overview(report) = engine.report(View::Overview, &ctx) else {
        panic!("expected overview report");
    };

    assert_eq!(report.total_customers, MetricValue::Available(2));
    assert!(matches!(report.average_review_score, MetricValue::Unavailable(_)));
    assert!(matches!(report.review_distribution, MetricValue::Unavailable(_)));
    assert!(matches!(report.total_orders, MetricValue::Unavailable(_)));
}

#[test]
fn test_empty_aggregate_is_no_data() {
    let ctx = DataContext::from_tables([(
        Entity::Order,
        df! {
            "order_id" => &["o1"],
            "order_purchase_timestamp" => &[Some("2018-01-01 00:00:00")],
            "order_delivered_customer_date" => &[None::<&str>],
        }
        .unwrap(),
    )]);

    let engine = MetricsEngine::new(&DashboardConfig::default());
    let report = engine.order_analysis(&ctx);
    assert_eq!(report.average_delivery_days, MetricValue::NoData);
    assert_eq!(report.delivery_distribution, MetricValue::NoData);
}

#[test]
fn test_top_sold_products_reports_lookup_miss() {
    let items = df! {
        "product_id" => &["known", "unknown", "unknown"],
    }
    .unwrap();
    let products = df! {
        "product_id" => &["known"],
        "product_category_name" => &["moveis_decoracao"],
    }
    .unwrap();

    let rows = SalesMetrics::top_sold_products(&items, &products, 10).unwrap();
    assert!(matches!(
        &rows[0],
        Err(DashboardError::LookupMiss { key, .. }) if key == "unknown"
    ));
    assert_eq!(rows[1].as_ref().unwrap().label(), "moveis_decoracao");
}
