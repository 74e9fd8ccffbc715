// src/engines/metrics/counts.rs
use crate::data::DataValidator;
use crate::error::Result;
use crate::types::{Entity, Frequency};
use polars::prelude::*;

pub const CUSTOMER_STATE: &str = "customer_state";

const COUNT: &str = "count";

/// Row order of a value-count table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrequencyOrder {
    /// Largest count first, ties by key ascending
    ByCount,
    /// Key ascending
    ByKey,
}

pub struct CountMetrics;

impl CountMetrics {
    /// Number of distinct non-null values in `id_column`
    pub fn distinct_count(entity: Entity, table: &DataFrame, id_column: &str) -> Result<usize> {
        DataValidator::require_columns(table, entity.as_str(), &[id_column])?;
        let ids = table.column(id_column)?.as_materialized_series().drop_nulls();
        Ok(ids.n_unique()?)
    }

    /// Raw row count per state, largest first. Rows are not deduplicated by customer.
    pub fn customer_count_by_state(customers: &DataFrame) -> Result<Frequency<String>> {
        DataValidator::require_columns(customers, Entity::Customer.as_str(), &[CUSTOMER_STATE])?;

        let states = customers.select([CUSTOMER_STATE])?;
        let counts = Self::value_counts(states, CUSTOMER_STATE, FrequencyOrder::ByCount, DataType::String)?;

        let states = counts.column(CUSTOMER_STATE)?.str()?;
        let entries = states
            .into_iter()
            .zip(Self::count_column(&counts)?)
            .filter_map(|(state, count)| Some((state?.to_string(), count)))
            .collect();

        Ok(Frequency::new(entries))
    }

    /// Rows per distinct non-null `key` of `frame`, as a `key`/`count` frame.
    ///
    /// `key` is cast to `key_type` before grouping.
    pub fn value_counts(
        frame: DataFrame,
        key: &str,
        order: FrequencyOrder,
        key_type: DataType,
    ) -> Result<DataFrame> {
        let grouped = frame
            .lazy()
            .select([col(key).cast(key_type)])
            .filter(col(key).is_not_null())
            .group_by([col(key)])
            .agg([len().alias(COUNT)]);

        let sorted = match order {
            FrequencyOrder::ByCount => grouped.sort_by_exprs(
                [col(COUNT), col(key)],
                SortMultipleOptions::default().with_order_descending_multi([true, false]),
            ),
            FrequencyOrder::ByKey => grouped.sort_by_exprs([col(key)], SortMultipleOptions::default()),
        };

        Ok(sorted.collect()?)
    }

    /// The `count` column of a `value_counts` frame
    pub fn count_column(counts: &DataFrame) -> Result<Vec<usize>> {
        let totals = counts.column(COUNT)?.cast(&DataType::UInt64)?;
        Ok(totals
            .u64()?
            .into_iter()
            .map(|count| count.unwrap_or(0) as usize)
            .collect())
    }
}
