use crate::error::{DashboardError, Result};
use crate::types::Entity;
use polars::prelude::*;
use std::path::Path;
use std::sync::Arc;
use super::types::{TableMetadata, TablePreview};

pub struct CsvConnector;

impl CsvConnector {
    /// Load CSV file into DataFrame.
    ///
    /// `text_columns` present in the header are read as strings instead of
    /// inferred, the rest of the schema is inferred from `infer_schema_length` rows.
    pub fn load<P: AsRef<Path>>(
        path: P,
        infer_schema_length: Option<usize>,
        text_columns: &[&str],
    ) -> Result<DataFrame> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(DashboardError::DataLoading(format!(
                "File not found: {}",
                path.display()
            )));
        }

        let overwrite = Self::text_schema(path, text_columns)?;

        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(infer_schema_length)
            .with_schema_overwrite(overwrite)
            .try_into_reader_with_file_path(Some(path.to_path_buf()))?
            .finish()
            .map_err(|e| Self::read_error(path, e))?;

        Ok(df)
    }

    /// String overrides for the `text_columns` the file actually has
    fn text_schema(path: &Path, text_columns: &[&str]) -> Result<Option<SchemaRef>> {
        if text_columns.is_empty() {
            return Ok(None);
        }

        let header = CsvReadOptions::default()
            .with_has_header(true)
            .with_n_rows(Some(1))
            .with_infer_schema_length(Some(1))
            .try_into_reader_with_file_path(Some(path.to_path_buf()))?
            .finish()
            .map_err(|e| Self::read_error(path, e))?;

        let mut schema = Schema::with_capacity(text_columns.len());
        for name in header.get_column_names() {
            if text_columns.contains(&name.as_str()) {
                schema.with_column(name.clone(), DataType::String);
            }
        }

        Ok((!schema.is_empty()).then(|| Arc::new(schema)))
    }

    fn read_error(path: &Path, e: PolarsError) -> DashboardError {
        DashboardError::DataLoading(format!("Failed to read {}: {}", path.display(), e))
    }

    /// Create metadata for a loaded DataFrame
    pub fn create_metadata<P: AsRef<Path>>(
        entity: Entity,
        path: P,
        df: &DataFrame,
    ) -> TableMetadata {
        TableMetadata {
            entity,
            file_path: path.as_ref().to_string_lossy().to_string(),
            num_rows: df.height(),
            num_columns: df.width(),
            columns: df.get_column_names().iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Render the first `rows` rows as strings for UI display
    pub fn create_preview(df: &DataFrame, rows: usize) -> Result<TablePreview> {
        let num_preview_rows = rows.min(df.height());
        let columns: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();

        let mut preview_rows = Vec::with_capacity(num_preview_rows);
        for i in 0..num_preview_rows {
            let mut row = Vec::with_capacity(columns.len());
            for column in df.get_columns() {
                row.push(Self::format_cell(column.get(i)?));
            }
            preview_rows.push(row);
        }

        Ok(TablePreview {
            columns,
            rows: preview_rows,
        })
    }

    fn format_cell(value: AnyValue<'_>) -> String {
        match value {
            AnyValue::Null => "null".to_string(),
            AnyValue::String(s) => s.to_string(),
            AnyValue::StringOwned(s) => s.to_string(),
            AnyValue::Float64(v) => format!("{:.2}", v),
            AnyValue::Float32(v) => format!("{:.2}", v),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;
    use std::io::Write;

    #[test]
    fn test_create_preview() {
        let df = df! {
            "product_id" => &[Some("p1"), Some("p2"), Some("p3")],
            "product_category_name" => &[Some("perfumaria"), None, Some("artes")],
            "product_weight_g" => &[225i64, 1000, 154],
        }
        .unwrap();

        let preview = CsvConnector::create_preview(&df, 2).unwrap();
        assert_eq!(preview.columns, vec!["product_id", "product_category_name", "product_weight_g"]);
        assert_eq!(preview.rows.len(), 2);
        assert_eq!(preview.rows[0], vec!["p1", "perfumaria", "225"]);
        assert_eq!(preview.rows[1][1], "null");
    }

    #[test]
    fn test_preview_shorter_than_requested() {
        let df = df! {
            "order_id" => &["o1"],
        }
        .unwrap();

        let preview = CsvConnector::create_preview(&df, 5).unwrap();
        assert_eq!(preview.rows.len(), 1);
    }

    #[test]
    fn test_load_csv_file() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "order_id,review_score").unwrap();
        writeln!(file, "o1,5").unwrap();
        writeln!(file, "o2,3").unwrap();

        let df = CsvConnector::load(file.path(), Some(100), &[]).unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 2);

        let metadata = CsvConnector::create_metadata(Entity::OrderReview, file.path(), &df);
        assert_eq!(metadata.num_rows, 2);
        assert_eq!(metadata.columns, vec!["order_id", "review_score"]);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = CsvConnector::load(dir.path().join("orders_dataset.csv"), None, &[]).unwrap_err();
        assert!(matches!(err, DashboardError::DataLoading(_)));
        assert!(err.to_string().contains("orders_dataset.csv"));
    }

    #[test]
    fn test_late_malformed_score_reads_as_text() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "review_id,order_id,review_score").unwrap();
        for i in 0..150 {
            writeln!(file, "r{i},o{i},{}", i % 5 + 1).unwrap();
        }
        writeln!(file, "r150,o150,bad").unwrap();

        // Inference only sees integers, the last row would not parse as i64
        let df = CsvConnector::load(file.path(), Some(100), Entity::OrderReview.text_columns()).unwrap();
        assert_eq!(df.height(), 151);
        assert_eq!(df.column("review_score").unwrap().dtype(), &DataType::String);
        assert_eq!(df.column("review_id").unwrap().dtype(), &DataType::String);
    }

    #[test]
    fn test_text_columns_absent_from_header_are_ignored() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "order_id,price").unwrap();
        writeln!(file, "o1,29.99").unwrap();

        let df = CsvConnector::load(file.path(), Some(100), Entity::Order.text_columns()).unwrap();
        assert_eq!(df.column("price").unwrap().dtype(), &DataType::Float64);
    }
}
