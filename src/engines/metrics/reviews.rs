// src/engines/metrics/reviews.rs
use super::counts::{CountMetrics, FrequencyOrder};
use crate::data::DataValidator;
use crate::error::Result;
use crate::types::{Entity, Frequency};
use polars::prelude::*;

pub const REVIEW_SCORE: &str = "review_score";

pub struct ReviewMetrics;

impl ReviewMetrics {
    /// `review_score` as Float64; non-numeric and NaN entries become null
    pub fn coerce_review_scores(reviews: &DataFrame) -> Result<Float64Chunked> {
        let scores = DataValidator::numeric_column(reviews, Entity::OrderReview.as_str(), REVIEW_SCORE)?;
        let cleaned: Float64Chunked = scores
            .into_iter()
            .map(|score| score.filter(|v| !v.is_nan()))
            .collect();
        Ok(cleaned.with_name(REVIEW_SCORE.into()))
    }

    /// Mean of the valid scores, `None` when there are none
    pub fn average_review_score(reviews: &DataFrame) -> Result<Option<f64>> {
        Ok(Self::coerce_review_scores(reviews)?.mean())
    }

    /// Count per distinct score, lowest score first
    pub fn review_score_distribution(reviews: &DataFrame) -> Result<Frequency<f64>> {
        let scores = Self::coerce_review_scores(reviews)?.into_series().into_column();
        let counts = CountMetrics::value_counts(
            DataFrame::new(vec![scores])?,
            REVIEW_SCORE,
            FrequencyOrder::ByKey,
            DataType::Float64,
        )?;

        let entries = counts
            .column(REVIEW_SCORE)?
            .f64()?
            .into_iter()
            .zip(CountMetrics::count_column(&counts)?)
            .filter_map(|(score, count)| Some((score?, count)))
            .collect();

        Ok(Frequency::new(entries))
    }
}
