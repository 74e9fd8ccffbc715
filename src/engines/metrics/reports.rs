// src/engines/metrics/reports.rs
use crate::data::TablePreview;
use crate::types::{CategorySales, Frequency, MetricValue, SoldProduct, View};

#[derive(Debug, Clone)]
pub struct OverviewReport {
    pub total_customers: MetricValue<usize>,
    pub total_orders: MetricValue<usize>,
    pub total_products: MetricValue<usize>,
    pub average_review_score: MetricValue<f64>,
    pub category_sales: MetricValue<Vec<CategorySales>>,
    pub review_distribution: MetricValue<Frequency<f64>>,
    pub sample_orders: MetricValue<TablePreview>,
}

#[derive(Debug, Clone)]
pub struct CustomerReport {
    pub customers_by_state: MetricValue<Frequency<String>>,
    pub sample_customers: MetricValue<TablePreview>,
}

#[derive(Debug, Clone)]
pub struct OrderReport {
    pub average_delivery_days: MetricValue<f64>,
    pub delivery_distribution: MetricValue<Frequency<i64>>,
}

#[derive(Debug, Clone)]
pub struct ProductReport {
    pub top_sold_products: MetricValue<Vec<SoldProduct>>,
    /// Top-ranked product ids that had no product row
    pub skipped_products: Vec<String>,
    pub sample_products: MetricValue<TablePreview>,
}

/// Everything one navigation view displays
#[derive(Debug, Clone)]
pub enum ViewReport {
    Overview(OverviewReport),
    Customers(CustomerReport),
    Orders(OrderReport),
    Products(ProductReport),
}

impl ViewReport {
    pub fn view(&self) -> View {
        match self {
            Self::Overview(_) => View::Overview,
            Self::Customers(_) => View::CustomerAnalysis,
            Self::Orders(_) => View::OrderAnalysis,
            Self::Products(_) => View::ProductAnalysis,
        }
    }
}
