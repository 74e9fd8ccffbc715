// src/engines/metrics/engine.rs
use crate::config::DashboardConfig;
use crate::data::{CsvConnector, DataContext, TablePreview};
use crate::engines::metrics::{
    CountMetrics, CustomerReport, DeliveryMetrics, OrderReport, OverviewReport, ProductReport,
    ReviewMetrics, SalesMetrics, ViewReport,
};
use crate::error::{DashboardError, Result};
use crate::types::{Entity, Frequency, MetricValue, SoldProduct, View};
use polars::prelude::DataFrame;

/// Request/response surface between the loaded data and the presentation layer.
///
/// Each metric in a report is computed independently; a failing metric is
/// reported as unavailable without affecting the others.
pub struct MetricsEngine {
    top_categories: usize,
    top_products: usize,
    preview_rows: usize,
}

impl MetricsEngine {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            top_categories: config.top_categories,
            top_products: config.top_products,
            preview_rows: config.preview_rows,
        }
    }

    pub fn report(&self, view: View, ctx: &DataContext) -> ViewReport {
        log::debug!("Computing {} report", view.title());
        match view {
            View::Overview => ViewReport::Overview(self.overview(ctx)),
            View::CustomerAnalysis => ViewReport::Customers(self.customer_analysis(ctx)),
            View::OrderAnalysis => ViewReport::Orders(self.order_analysis(ctx)),
            View::ProductAnalysis => ViewReport::Products(self.product_analysis(ctx)),
        }
    }

    pub fn overview(&self, ctx: &DataContext) -> OverviewReport {
        OverviewReport {
            total_customers: count(CountMetrics::distinct_count(
                Entity::Customer,
                ctx.customers(),
                "customer_unique_id",
            )),
            total_orders: count(CountMetrics::distinct_count(Entity::Order, ctx.orders(), "order_id")),
            total_products: count(CountMetrics::distinct_count(
                Entity::Product,
                ctx.products(),
                "product_id",
            )),
            average_review_score: MetricValue::from_optional(ReviewMetrics::average_review_score(
                ctx.order_reviews(),
            )),
            category_sales: ranking(SalesMetrics::top_categories_by_sales(
                ctx.order_items(),
                ctx.products(),
                self.top_categories,
            )),
            review_distribution: frequency(ReviewMetrics::review_score_distribution(
                ctx.order_reviews(),
            )),
            sample_orders: self.preview(ctx.orders()),
        }
    }

    pub fn customer_analysis(&self, ctx: &DataContext) -> CustomerReport {
        CustomerReport {
            customers_by_state: frequency(CountMetrics::customer_count_by_state(ctx.customers())),
            sample_customers: self.preview(ctx.customers()),
        }
    }

    pub fn order_analysis(&self, ctx: &DataContext) -> OrderReport {
        let days = ctx.delivery_days();
        OrderReport {
            average_delivery_days: MetricValue::from_optional(
                days.as_ref()
                    .map_err(clone_error)
                    .and_then(DeliveryMetrics::mean_delivery_days),
            ),
            delivery_distribution: frequency(
                days.as_ref()
                    .map_err(clone_error)
                    .and_then(DeliveryMetrics::delivery_frequency),
            ),
        }
    }

    pub fn product_analysis(&self, ctx: &DataContext) -> ProductReport {
        let mut skipped_products = Vec::new();
        let ranked = SalesMetrics::top_sold_products(ctx.order_items(), ctx.products(), self.top_products)
            .map(|rows| skip_lookup_misses(rows, &mut skipped_products));

        ProductReport {
            top_sold_products: ranking(ranked),
            skipped_products,
            sample_products: self.preview(ctx.products()),
        }
    }

    fn preview(&self, df: &DataFrame) -> MetricValue<TablePreview> {
        MetricValue::from_optional(
            CsvConnector::create_preview(df, self.preview_rows)
                .map(|preview| (!preview.is_empty()).then_some(preview)),
        )
    }
}

/// Keep resolved rows; log and record lookup misses
fn skip_lookup_misses(rows: Vec<Result<SoldProduct>>, skipped: &mut Vec<String>) -> Vec<SoldProduct> {
    rows.into_iter()
        .filter_map(|row| match row {
            Ok(product) => Some(product),
            Err(DashboardError::LookupMiss { key, .. }) => {
                log::warn!("Skipping top product '{}': not found in products", key);
                skipped.push(key);
                None
            }
            Err(other) => {
                log::warn!("Skipping top product: {}", other);
                None
            }
        })
        .collect()
}

fn count(result: Result<usize>) -> MetricValue<usize> {
    MetricValue::from_optional(result.map(Some))
}

fn ranking<T>(result: Result<Vec<T>>) -> MetricValue<Vec<T>> {
    MetricValue::from_optional(result.map(|rows| (!rows.is_empty()).then_some(rows)))
}

fn frequency<K>(result: Result<Frequency<K>>) -> MetricValue<Frequency<K>> {
    MetricValue::from_optional(result.map(|f| (!f.is_empty()).then_some(f)))
}

// DashboardError is not Clone; the derived column's error feeds two metrics.
fn clone_error(e: &DashboardError) -> DashboardError {
    match e {
        DashboardError::InvalidColumn { table, column } => DashboardError::invalid_column(table, column),
        other => DashboardError::Computation(other.to_string()),
    }
}
