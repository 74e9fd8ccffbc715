// src/engines/metrics/sales.rs
use crate::data::DataValidator;
use crate::error::{DashboardError, Result};
use crate::types::{CategorySales, Entity, SoldProduct};
use polars::prelude::*;
use std::collections::HashMap;

pub const PRODUCT_ID: &str = "product_id";
pub const PRODUCT_CATEGORY: &str = "product_category_name";
pub const PRICE: &str = "price";

const TOTAL_PRICE: &str = "total_price";
const SOLD_COUNT: &str = "sold_count";

pub struct SalesMetrics;

impl SalesMetrics {
    /// Highest-grossing categories: items inner-joined to products, price summed per category.
    ///
    /// Ties are broken by category name ascending.
    pub fn top_categories_by_sales(
        order_items: &DataFrame,
        products: &DataFrame,
        n: usize,
    ) -> Result<Vec<CategorySales>> {
        DataValidator::require_columns(order_items, Entity::OrderItem.as_str(), &[PRODUCT_ID, PRICE])?;
        DataValidator::require_columns(products, Entity::Product.as_str(), &[PRODUCT_ID, PRODUCT_CATEGORY])?;

        let items = order_items.clone().lazy().select([
            col(PRODUCT_ID).cast(DataType::String),
            col(PRICE).cast(DataType::Float64),
        ]);
        let categories = products.clone().lazy().select([
            col(PRODUCT_ID).cast(DataType::String),
            col(PRODUCT_CATEGORY).cast(DataType::String),
        ]);

        let summary = items
            .join(
                categories,
                [col(PRODUCT_ID)],
                [col(PRODUCT_ID)],
                JoinArgs::new(JoinType::Inner),
            )
            .filter(col(PRODUCT_CATEGORY).is_not_null())
            .group_by([col(PRODUCT_CATEGORY)])
            .agg([col(PRICE).sum().alias(TOTAL_PRICE)])
            .sort_by_exprs(
                [col(TOTAL_PRICE), col(PRODUCT_CATEGORY)],
                SortMultipleOptions::default().with_order_descending_multi([true, false]),
            )
            .limit(n as IdxSize)
            .collect()?;

        let names = summary.column(PRODUCT_CATEGORY)?.str()?;
        let totals = summary.column(TOTAL_PRICE)?.f64()?;

        Ok(names
            .into_iter()
            .zip(totals.into_iter())
            .filter_map(|(name, total)| {
                Some(CategorySales {
                    category: name?.to_string(),
                    total_price: total.unwrap_or(0.0),
                })
            })
            .collect())
    }

    /// Most frequent products in the order items, labelled by category.
    ///
    /// A product id with no product row yields `LookupMiss` in its slot so the
    /// caller can skip it. Ties are broken by product id ascending.
    pub fn top_sold_products(
        order_items: &DataFrame,
        products: &DataFrame,
        n: usize,
    ) -> Result<Vec<Result<SoldProduct>>> {
        DataValidator::require_columns(order_items, Entity::OrderItem.as_str(), &[PRODUCT_ID])?;

        let ranked = order_items
            .clone()
            .lazy()
            .select([col(PRODUCT_ID).cast(DataType::String)])
            .filter(col(PRODUCT_ID).is_not_null())
            .group_by([col(PRODUCT_ID)])
            .agg([len().alias(SOLD_COUNT)])
            .sort_by_exprs(
                [col(SOLD_COUNT), col(PRODUCT_ID)],
                SortMultipleOptions::default().with_order_descending_multi([true, false]),
            )
            .limit(n as IdxSize)
            .collect()?;

        let lookup = Self::category_lookup(products)?;

        let ids = ranked.column(PRODUCT_ID)?.str()?;
        let counts = ranked.column(SOLD_COUNT)?.cast(&DataType::UInt64)?;
        let counts = counts.u64()?;

        Ok(ids
            .into_iter()
            .zip(counts.into_iter())
            .filter_map(|(id, count)| Some((id?, count? as usize)))
            .map(|(id, sold_count)| match lookup.get(id) {
                Some(category) => Ok(SoldProduct {
                    product_id: id.to_string(),
                    category: category.clone(),
                    sold_count,
                }),
                None => Err(DashboardError::lookup_miss(Entity::Product.as_str(), id)),
            })
            .collect())
    }

    /// product_id -> category name, first row wins on duplicate ids
    fn category_lookup(products: &DataFrame) -> Result<HashMap<String, Option<String>>> {
        let table = Entity::Product.as_str();
        let ids = DataValidator::string_column(products, table, PRODUCT_ID)?;
        let categories = DataValidator::string_column(products, table, PRODUCT_CATEGORY)?;

        let mut lookup = HashMap::with_capacity(ids.len());
        for (id, category) in ids.into_iter().zip(categories.into_iter()) {
            if let Some(id) = id {
                lookup
                    .entry(id.to_string())
                    .or_insert_with(|| category.map(str::to_string));
            }
        }
        Ok(lookup)
    }
}
