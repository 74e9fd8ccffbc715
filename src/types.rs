use serde::{Deserialize, Serialize};
use std::fmt;

/// The nine source tables of the dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Entity {
    Customer,
    Geolocation,
    OrderItem,
    OrderPayment,
    OrderReview,
    Order,
    ProductCategoryTranslation,
    Product,
    Seller,
}

impl Entity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "customers",
            Self::Geolocation => "geolocation",
            Self::OrderItem => "order_items",
            Self::OrderPayment => "order_payments",
            Self::OrderReview => "order_reviews",
            Self::Order => "orders",
            Self::ProductCategoryTranslation => "product_category_translation",
            Self::Product => "products",
            Self::Seller => "sellers",
        }
    }

    pub fn all() -> Vec<Self> {
        vec![
            Self::Customer,
            Self::Geolocation,
            Self::OrderItem,
            Self::OrderPayment,
            Self::OrderReview,
            Self::Order,
            Self::ProductCategoryTranslation,
            Self::Product,
            Self::Seller,
        ]
    }

    /// File name used when the configuration does not override it
    pub fn default_file_name(&self) -> &'static str {
        match self {
            Self::Customer => "customers_dataset.csv",
            Self::Geolocation => "geolocation_dataset.csv",
            Self::OrderItem => "order_items_dataset.csv",
            Self::OrderPayment => "order_payments_dataset.csv",
            Self::OrderReview => "order_reviews_dataset.csv",
            Self::Order => "orders_dataset.csv",
            Self::ProductCategoryTranslation => "product_category_name_translation.csv",
            Self::Product => "products_dataset.csv",
            Self::Seller => "sellers_dataset.csv",
        }
    }

    /// Columns read as text and coerced at metric time, so one malformed
    /// value past the inference window cannot fail the whole read
    pub fn text_columns(&self) -> &'static [&'static str] {
        match self {
            Self::OrderItem => &["price"],
            Self::OrderReview => &["review_score"],
            Self::Order => &["order_purchase_timestamp", "order_delivered_customer_date"],
            _ => &[],
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Navigation selection owned by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum View {
    #[default]
    Overview,
    CustomerAnalysis,
    OrderAnalysis,
    ProductAnalysis,
}

impl View {
    pub fn all() -> [Self; 4] {
        [
            Self::Overview,
            Self::CustomerAnalysis,
            Self::OrderAnalysis,
            Self::ProductAnalysis,
        ]
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::CustomerAnalysis => "Customer Analysis",
            Self::OrderAnalysis => "Order Analysis",
            Self::ProductAnalysis => "Product Analysis",
        }
    }
}

/// Outcome of a single metric as handed to the presentation layer.
///
/// `NoData` is an empty aggregate and must never be rendered as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MetricValue<T> {
    Available(T),
    NoData,
    Unavailable(String),
}

impl<T> MetricValue<T> {
    pub fn from_optional(result: crate::error::Result<Option<T>>) -> Self {
        match result {
            Ok(Some(value)) => Self::Available(value),
            Ok(None) => Self::NoData,
            Err(e) => Self::Unavailable(e.to_string()),
        }
    }

    pub fn as_available(&self) -> Option<&T> {
        match self {
            Self::Available(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_ref(&self) -> MetricValue<&T> {
        match self {
            Self::Available(value) => MetricValue::Available(value),
            Self::NoData => MetricValue::NoData,
            Self::Unavailable(reason) => MetricValue::Unavailable(reason.clone()),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> MetricValue<U> {
        match self {
            Self::Available(value) => MetricValue::Available(f(value)),
            Self::NoData => MetricValue::NoData,
            Self::Unavailable(reason) => MetricValue::Unavailable(reason),
        }
    }
}

/// Total sales of one product category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySales {
    pub category: String,
    pub total_price: f64,
}

/// Number of order item rows for one product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoldProduct {
    pub product_id: String,
    pub category: Option<String>,
    pub sold_count: usize,
}

impl SoldProduct {
    pub fn label(&self) -> &str {
        self.category.as_deref().unwrap_or("(uncategorized)")
    }
}

/// Ordered value-frequency table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frequency<K> {
    pub entries: Vec<(K, usize)>,
}

impl<K> Frequency<K> {
    pub fn new(entries: Vec<(K, usize)>) -> Self {
        Self { entries }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(K, usize)> {
        self.entries.iter()
    }
}

impl<K: PartialEq> Frequency<K> {
    pub fn count_of(&self, key: &K) -> usize {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }
}
