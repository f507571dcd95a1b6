//! Filter → group → sum over an in-memory record set.
//!
//! Every call is a full pass. Groups with no surviving records do not
//! appear in the output; rows come back sorted by key.

use crate::{
    error::{DashError, DashResult},
    filter::FilterSet,
    record::{Field, SalesRecord, Sector},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRow {
    pub key: String,
    pub metric: f64,
}

/// Two-way split by sector for headline metrics and the donut.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SectorSplit {
    pub federal_total: f64,
    pub non_federal_total: f64,
    pub total_sales: f64,
    pub record_count: usize,
}

impl SectorSplit {
    pub fn total_for(&self, sector: Sector) -> f64 {
        match sector {
            Sector::Federal    => self.federal_total,
            Sector::NonFederal => self.non_federal_total,
        }
    }
}

pub fn aggregate(
    records: &[SalesRecord],
    group_by: Field,
    metric: Field,
    filters: &FilterSet,
) -> DashResult<Vec<AggregateRow>> {
    if group_by.is_metric() {
        return Err(DashError::schema_mismatch(group_by.name(), "cannot group by a metric field"));
    }
    if !metric.is_metric() {
        return Err(DashError::schema_mismatch(metric.name(), "is not a numeric metric"));
    }
    group_by.require_on(records)?;
    metric.require_on(records)?;

    let mut groups: BTreeMap<String, f64> = BTreeMap::new();
    for record in filters.apply(records)? {
        let key = group_by.require_key(record)?;
        let value = metric.require_metric(record)?;
        *groups.entry(key).or_insert(0.0) += value;
    }

    log::debug!(
        "aggregate {metric} by {group_by}: {} input records, {} groups",
        records.len(),
        groups.len()
    );

    Ok(groups
        .into_iter()
        .map(|(key, metric)| AggregateRow { key, metric })
        .collect())
}

/// Parse field names first; unknown names are schema mismatches.
pub fn aggregate_by_name(
    records: &[SalesRecord],
    group_by: &str,
    metric: &str,
    filters: &FilterSet,
) -> DashResult<Vec<AggregateRow>> {
    aggregate(records, group_by.parse()?, metric.parse()?, filters)
}

pub fn sector_split(
    records: &[SalesRecord],
    metric: Field,
    filters: &FilterSet,
) -> DashResult<SectorSplit> {
    if !metric.is_metric() {
        return Err(DashError::schema_mismatch(metric.name(), "is not a numeric metric"));
    }
    metric.require_on(records)?;

    let mut split = SectorSplit::default();
    for record in filters.apply(records)? {
        let value = metric.require_metric(record)?;
        match record.sector {
            Sector::Federal    => split.federal_total += value,
            Sector::NonFederal => split.non_federal_total += value,
        }
        split.record_count += 1;
    }
    split.total_sales = split.federal_total + split.non_federal_total;
    Ok(split)
}
