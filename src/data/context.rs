use super::cache::DerivedCache;
use super::connectors::TableMetadata;
use crate::engines::metrics::DeliveryMetrics;
use crate::error::{DashboardError, Result};
use crate::types::Entity;
use polars::prelude::*;
use std::collections::BTreeMap;

/// Read-only set of loaded tables handed to the metrics engine.
///
/// Tables are never mutated after construction; derived columns live in
/// `derived` and are computed on first use.
pub struct DataContext {
    tables: BTreeMap<Entity, DataFrame>,
    metadata: Vec<TableMetadata>,
    derived: DerivedCache,
}

impl DataContext {
    /// Build a context from loaded tables. Every entity must be present.
    pub fn new(tables: BTreeMap<Entity, DataFrame>, metadata: Vec<TableMetadata>) -> Result<Self> {
        if let Some(missing) = Entity::all().into_iter().find(|e| !tables.contains_key(e)) {
            return Err(DashboardError::DataLoading(format!(
                "Table {} was not loaded",
                missing
            )));
        }
        Ok(Self {
            tables,
            metadata,
            derived: DerivedCache::new(),
        })
    }

    /// Context for tests and embedding: absent entities become empty frames
    pub fn from_tables<I>(tables: I) -> Self
    where
        I: IntoIterator<Item = (Entity, DataFrame)>,
    {
        let mut map: BTreeMap<Entity, DataFrame> = tables.into_iter().collect();
        for entity in Entity::all() {
            map.entry(entity).or_insert_with(DataFrame::empty);
        }
        Self {
            tables: map,
            metadata: Vec::new(),
            derived: DerivedCache::new(),
        }
    }

    pub fn table(&self, entity: Entity) -> &DataFrame {
        // Both constructors guarantee an entry per entity.
        &self.tables[&entity]
    }

    pub fn customers(&self) -> &DataFrame {
        self.table(Entity::Customer)
    }

    pub fn orders(&self) -> &DataFrame {
        self.table(Entity::Order)
    }

    pub fn order_items(&self) -> &DataFrame {
        self.table(Entity::OrderItem)
    }

    pub fn order_reviews(&self) -> &DataFrame {
        self.table(Entity::OrderReview)
    }

    pub fn products(&self) -> &DataFrame {
        self.table(Entity::Product)
    }

    pub fn metadata(&self) -> &[TableMetadata] {
        &self.metadata
    }

    /// Per-order whole-day delivery durations, derived once per context
    pub fn delivery_days(&self) -> Result<Series> {
        self.derived.get_or_try_insert_with(DeliveryMetrics::DELIVERY_DAYS, || {
            DeliveryMetrics::delivery_days(self.orders())
        })
    }

    pub fn derived(&self) -> &DerivedCache {
        &self.derived
    }
}
