//! Reshaping aggregates into the series the charting layer draws.

use crate::{
    aggregate::{aggregate, sector_split, AggregateRow, SectorSplit},
    error::{DashError, DashResult},
    filter::FilterSet,
    record::{Field, SalesRecord, Sector},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Choropleth,
    Bar,
    Line,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub category: String,
    pub metric: f64,
}

impl From<AggregateRow> for ChartPoint {
    fn from(row: AggregateRow) -> Self {
        Self { category: row.key, metric: row.metric }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub kind: ChartKind,
    pub title: String,
    pub category_label: String,
    pub metric_label: String,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    pub fn from_rows(
        kind: ChartKind,
        title: &str,
        category_label: &str,
        rows: Vec<AggregateRow>,
    ) -> Self {
        Self {
            kind,
            title: title.to_string(),
            category_label: category_label.to_string(),
            metric_label: "Total Sales".to_string(),
            points: rows.into_iter().map(ChartPoint::from).collect(),
        }
    }

    pub fn total(&self) -> f64 {
        self.points.iter().map(|p| p.metric).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonutSlice {
    pub label: String,
    pub value: f64,
}

/// Federal slice first, Non-Federal second.
pub fn donut(split: &SectorSplit) -> [DonutSlice; 2] {
    Sector::ALL.map(|s| DonutSlice {
        label: s.label().to_string(),
        value: split.total_for(s),
    })
}

/// Everything one dashboard render needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub headline: SectorSplit,
    pub sales_by_state: ChartSeries,
    pub sales_by_category: ChartSeries,
    pub sales_over_time: ChartSeries,
    pub sector_donut: [DonutSlice; 2],
}

impl DashboardView {
    /// `time_field` is `Month` for dated domains and `Year` otherwise.
    pub fn build(
        records: &[SalesRecord],
        filters: &FilterSet,
        time_field: Field,
    ) -> DashResult<Self> {
        let metric = Field::Price;
        let headline = sector_split(records, metric, filters)?;

        let sales_by_state = ChartSeries::from_rows(
            ChartKind::Choropleth,
            "Sales Distribution Across the USA",
            "State",
            aggregate(records, Field::State, metric, filters)?,
        );
        let sales_by_category = ChartSeries::from_rows(
            ChartKind::Bar,
            "Sales Distribution by Product Category",
            "Product Category",
            aggregate(records, Field::ProductCategory, metric, filters)?,
        );
        let (title, label) = match time_field {
            Field::Month => ("Monthly Sales Trends", "Month"),
            Field::Year  => ("Yearly Sales Trends", "Year"),
            other => {
                return Err(DashError::schema_mismatch(other.name(), "is not a time field"));
            }
        };
        let sales_over_time = ChartSeries::from_rows(
            ChartKind::Line,
            title,
            label,
            aggregate(records, time_field, metric, filters)?,
        );

        Ok(Self {
            sector_donut: donut(&headline),
            headline,
            sales_by_state,
            sales_by_category,
            sales_over_time,
        })
    }
}
