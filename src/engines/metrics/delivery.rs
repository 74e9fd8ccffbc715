// src/engines/metrics/delivery.rs
use super::counts::{CountMetrics, FrequencyOrder};
use crate::data::DataValidator;
use crate::error::{DashboardError, Result};
use crate::types::{Entity, Frequency};
use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;

const MILLIS_PER_DAY: i64 = 86_400_000;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
];

pub struct DeliveryMetrics;

impl DeliveryMetrics {
    pub const PURCHASE_TIMESTAMP: &'static str = "order_purchase_timestamp";
    pub const DELIVERED_DATE: &'static str = "order_delivered_customer_date";
    pub const DELIVERY_DAYS: &'static str = "delivery_days";

    /// Whole days from purchase to delivery per order, null when either timestamp is absent.
    ///
    /// Partial days are floored, so 1 day 23 hours counts as 1.
    pub fn delivery_days(orders: &DataFrame) -> Result<Series> {
        DataValidator::require_columns(
            orders,
            Entity::Order.as_str(),
            &[Self::PURCHASE_TIMESTAMP, Self::DELIVERED_DATE],
        )?;

        let purchased = Self::timestamp_millis(orders, Self::PURCHASE_TIMESTAMP)?;
        let delivered = Self::timestamp_millis(orders, Self::DELIVERED_DATE)?;

        let days: Vec<Option<i64>> = purchased
            .into_iter()
            .zip(delivered)
            .map(|(start, end)| Some((end? - start?).div_euclid(MILLIS_PER_DAY)))
            .collect();

        Ok(Series::new(Self::DELIVERY_DAYS.into(), days))
    }

    pub fn average_delivery_days(orders: &DataFrame) -> Result<Option<f64>> {
        Self::mean_delivery_days(&Self::delivery_days(orders)?)
    }

    pub fn delivery_days_distribution(orders: &DataFrame) -> Result<Frequency<i64>> {
        Self::delivery_frequency(&Self::delivery_days(orders)?)
    }

    /// Mean over an already derived `delivery_days` series
    pub fn mean_delivery_days(days: &Series) -> Result<Option<f64>> {
        Ok(days.i64()?.mean())
    }

    /// Orders per day count over an already derived series, shortest first
    pub fn delivery_frequency(days: &Series) -> Result<Frequency<i64>> {
        let key = days.name().to_string();
        let days = days.i64()?.clone().into_series().into_column();
        let counts = CountMetrics::value_counts(
            DataFrame::new(vec![days])?,
            &key,
            FrequencyOrder::ByKey,
            DataType::Int64,
        )?;

        let entries = counts
            .column(&key)?
            .i64()?
            .into_iter()
            .zip(CountMetrics::count_column(&counts)?)
            .filter_map(|(day, count)| Some((day?, count)))
            .collect();

        Ok(Frequency::new(entries))
    }

    /// Milliseconds since the epoch for each row, accepting string or temporal columns
    fn timestamp_millis(orders: &DataFrame, name: &str) -> Result<Vec<Option<i64>>> {
        let column = orders.column(name)?;
        match column.dtype() {
            DataType::String => Ok(column
                .str()?
                .into_iter()
                .map(|value| value.and_then(Self::parse_timestamp))
                .collect()),
            DataType::Datetime(unit, _) => {
                let per_milli = match unit {
                    TimeUnit::Nanoseconds => 1_000_000,
                    TimeUnit::Microseconds => 1_000,
                    TimeUnit::Milliseconds => 1,
                };
                let physical = column.cast(&DataType::Int64)?;
                Ok(physical
                    .i64()?
                    .into_iter()
                    .map(|v| v.map(|v| v.div_euclid(per_milli)))
                    .collect())
            }
            DataType::Date => {
                let physical = column.cast(&DataType::Int64)?;
                Ok(physical
                    .i64()?
                    .into_iter()
                    .map(|v| v.map(|days| days * MILLIS_PER_DAY))
                    .collect())
            }
            DataType::Null => Ok(vec![None; column.len()]),
            other => Err(DashboardError::Computation(format!(
                "Column '{}' in {} has type {:?}, expected timestamps",
                name,
                Entity::Order,
                other
            ))),
        }
    }

    fn parse_timestamp(raw: &str) -> Option<i64> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        let parsed = DATETIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
            })?;
        Some(parsed.and_utc().timestamp_millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    fn orders() -> DataFrame {
        df! {
            "order_id" => &["o1", "o2", "o3", "o4"],
            "order_purchase_timestamp" => &[
                Some("2017-10-02 10:56:33"),
                Some("2018-07-24 20:41:37"),
                Some("2018-08-08 08:38:49"),
                None,
            ],
            "order_delivered_customer_date" => &[
                Some("2017-10-04 10:56:33"),
                None,
                Some("2018-08-10 08:38:48"),
                Some("2018-08-17 18:06:29"),
            ],
        }
        .unwrap()
    }

    #[test]
    fn test_delivery_days_floor_and_nulls() {
        let days = DeliveryMetrics::delivery_days(&orders()).unwrap();
        let values: Vec<Option<i64>> = days.i64().unwrap().into_iter().collect();
        // o3 is one second short of two days
        assert_eq!(values, vec![Some(2), None, Some(1), None]);
    }

    #[test]
    fn test_average_excludes_undelivered() {
        let orders = df! {
            "order_purchase_timestamp" => &[Some("2018-01-01 00:00:00"), Some("2018-02-01 00:00:00")],
            "order_delivered_customer_date" => &[Some("2018-01-03 00:00:00"), None],
        }
        .unwrap();
        assert_eq!(DeliveryMetrics::average_delivery_days(&orders).unwrap(), Some(2.0));
    }

    #[test]
    fn test_average_absent_without_deliveries() {
        let orders = df! {
            "order_purchase_timestamp" => &[Some("2018-01-01 00:00:00")],
            "order_delivered_customer_date" => &[None::<&str>],
        }
        .unwrap();
        assert_eq!(DeliveryMetrics::average_delivery_days(&orders).unwrap(), None);
        assert!(DeliveryMetrics::delivery_days_distribution(&orders).unwrap().is_empty());
    }

    #[test]
    fn test_distribution_by_day() {
        let orders = df! {
            "order_purchase_timestamp" => &["2018-01-01", "2018-01-01 12:00:00", "2018-01-01", "2018-01-01"],
            "order_delivered_customer_date" => &["2018-01-08", "2018-01-03 13:00:00", "not a date", "2018-01-03"],
        }
        .unwrap();

        let distribution = DeliveryMetrics::delivery_days_distribution(&orders).unwrap();
        assert_eq!(distribution.entries, vec![(2, 2), (7, 1)]);
    }

    #[test]
    fn test_parse_formats() {
        assert!(DeliveryMetrics::parse_timestamp("2018-01-01 10:00").is_some());
        assert!(DeliveryMetrics::parse_timestamp("2018-01-01T10:00:00").is_some());
        assert!(DeliveryMetrics::parse_timestamp("2018-01-01 10:00:00.250").is_some());
        assert!(DeliveryMetrics::parse_timestamp("  ").is_none());
        assert!(DeliveryMetrics::parse_timestamp("01/02/2018").is_none());
    }

    #[test]
    fn test_missing_delivered_column() {
        let orders = df! {
            "order_purchase_timestamp" => &["2018-01-01"],
        }
        .unwrap();
        assert!(matches!(
            DeliveryMetrics::delivery_days(&orders),
            Err(DashboardError::InvalidColumn { .. })
        ));
    }

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2018, 1, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn datetime_column(name: &str, values: &[NaiveDateTime], unit: TimeUnit) -> Column {
        let raw: Vec<i64> = values
            .iter()
            .map(|v| match unit {
                TimeUnit::Nanoseconds => v.and_utc().timestamp_nanos_opt().unwrap(),
                TimeUnit::Microseconds => v.and_utc().timestamp_micros(),
                TimeUnit::Milliseconds => v.and_utc().timestamp_millis(),
            })
            .collect();
        Series::new(name.into(), raw)
            .cast(&DataType::Datetime(unit, None))
            .unwrap()
            .into_column()
    }

    fn days_of(orders: &DataFrame) -> Vec<Option<i64>> {
        DeliveryMetrics::delivery_days(orders)
            .unwrap()
            .i64()
            .unwrap()
            .into_iter()
            .collect()
    }

    #[test]
    fn test_delivered_before_purchase_floors_negative() {
        // 18 hours early floors to -1, not 0
        let orders = df! {
            "order_purchase_timestamp" => &["2018-01-03 12:00:00", "2018-01-01 00:00:00"],
            "order_delivered_customer_date" => &["2018-01-02 18:00:00", "2018-01-04 06:00:00"],
        }
        .unwrap();

        assert_eq!(days_of(&orders), vec![Some(-1), Some(3)]);
    }

    #[test]
    fn test_datetime_columns_match_strings() {
        for unit in [TimeUnit::Microseconds, TimeUnit::Milliseconds, TimeUnit::Nanoseconds] {
            let orders = DataFrame::new(vec![
                datetime_column(DeliveryMetrics::PURCHASE_TIMESTAMP, &[at(3, 12), at(1, 0)], unit),
                datetime_column(DeliveryMetrics::DELIVERED_DATE, &[at(2, 18), at(4, 6)], unit),
            ])
            .unwrap();

            assert_eq!(days_of(&orders), vec![Some(-1), Some(3)], "unit {unit:?}");
        }
    }

    #[test]
    fn test_date_column_against_datetime() {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        let delivered: Vec<i32> = [5u32, 2]
            .iter()
            .map(|&day| (at(day, 0).date() - epoch).num_days() as i32)
            .collect();

        let orders = DataFrame::new(vec![
            datetime_column(
                DeliveryMetrics::PURCHASE_TIMESTAMP,
                &[at(1, 12), at(3, 0)],
                TimeUnit::Microseconds,
            ),
            Series::new(DeliveryMetrics::DELIVERED_DATE.into(), delivered)
                .cast(&DataType::Date)
                .unwrap()
                .into_column(),
        ])
        .unwrap();

        // Jan 5 midnight is 3.5 days after Jan 1 noon
        assert_eq!(days_of(&orders), vec![Some(3), Some(-1)]);
    }

    #[test]
    fn test_all_null_delivered_column() {
        let orders = DataFrame::new(vec![
            Series::new(
                DeliveryMetrics::PURCHASE_TIMESTAMP.into(),
                &["2018-01-01 00:00:00", "2018-01-02 00:00:00"],
            )
            .into_column(),
            Series::new_null(DeliveryMetrics::DELIVERED_DATE.into(), 2).into_column(),
        ])
        .unwrap();

        assert_eq!(days_of(&orders), vec![None, None]);
        assert_eq!(DeliveryMetrics::average_delivery_days(&orders).unwrap(), None);
    }

    #[test]
    fn test_unsupported_timestamp_type() {
        let orders = df! {
            "order_purchase_timestamp" => &[true],
            "order_delivered_customer_date" => &["2018-01-02"],
        }
        .unwrap();

        assert!(matches!(
            DeliveryMetrics::delivery_days(&orders),
            Err(DashboardError::Computation(_))
        ));
    }
}
