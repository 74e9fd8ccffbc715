use crate::error::{DashboardError, Result};
use polars::prelude::*;

pub struct DataValidator;

impl DataValidator {
    /// Fail with `InvalidColumn` on the first of `columns` missing from `df`
    pub fn require_columns(df: &DataFrame, table: &str, columns: &[&str]) -> Result<()> {
        let present = df.get_column_names();
        for &required in columns {
            if !present.iter().any(|col| col.as_str() == required) {
                return Err(DashboardError::invalid_column(table, required));
            }
        }
        Ok(())
    }

    /// Column as an owned string array, casting non-string columns
    pub fn string_column(df: &DataFrame, table: &str, name: &str) -> Result<StringChunked> {
        Self::require_columns(df, table, &[name])?;
        let column = df.column(name)?;
        let strings = match column.dtype() {
            DataType::String => column.str()?.clone(),
            _ => column.cast(&DataType::String)?.str()?.clone(),
        };
        Ok(strings)
    }

    /// Column coerced to Float64, values that do not convert become null
    pub fn numeric_column(df: &DataFrame, table: &str, name: &str) -> Result<Float64Chunked> {
        Self::require_columns(df, table, &[name])?;
        let coerced = df.column(name)?.cast(&DataType::Float64)?;
        Ok(coerced.f64()?.clone())
    }

    /// Null counts per column, only for columns that have any
    pub fn check_nulls(df: &DataFrame) -> Vec<(String, usize)> {
        df.get_columns()
            .iter()
            .filter(|col| col.null_count() > 0)
            .map(|col| (col.name().to_string(), col.null_count()))
            .collect()
    }
}
