//! The generated sales record and its field vocabulary.

use crate::{
    error::{DashError, DashResult},
    types::{RecordId, StateCode},
};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Sector {
    #[serde(rename = "Federal")]
    Federal,
    #[serde(rename = "Non-Federal")]
    NonFederal,
}

impl Sector {
    pub const ALL: [Sector; 2] = [Sector::Federal, Sector::NonFederal];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Federal    => "Federal",
            Self::NonFederal => "Non-Federal",
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Sector {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "federal" => Ok(Self::Federal),
            "non-federal" | "non_federal" | "nonfederal" => Ok(Self::NonFederal),
            other => Err(DashError::schema_mismatch(
                "sector",
                format!("'{other}' is not Federal or Non-Federal"),
            )),
        }
    }
}

/// When the sale happened. Year-only variants never carry a day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SalePeriod {
    Year(i32),
    Date(NaiveDate),
}

impl SalePeriod {
    pub fn year(&self) -> i32 {
        match self {
            Self::Year(y) => *y,
            Self::Date(d) => d.year(),
        }
    }

    /// `YYYY-MM`, only available for dated records.
    pub fn month(&self) -> Option<String> {
        match self {
            Self::Year(_) => None,
            Self::Date(d) => Some(d.format("%Y-%m").to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomerIdentity {
    pub company: String,
    pub email:   String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Warranty {
    pub start: NaiveDate,
    pub end:   NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SalesRecord {
    pub record_id:        RecordId,
    pub state:            StateCode,
    pub product_category: String,
    pub product_name:     String,
    pub sector:           Sector,
    pub price:            f64,
    pub period:           SalePeriod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity:         Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer:         Option<CustomerIdentity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warranty:         Option<Warranty>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_type:     Option<String>,
}

/// A reference to one column of the record schema.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    State,
    ProductCategory,
    ProductName,
    Sector,
    Year,
    Month,
    ServiceType,
    Price,
    Quantity,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Self::State           => "state",
            Self::ProductCategory => "product_category",
            Self::ProductName     => "product_name",
            Self::Sector          => "sector",
            Self::Year            => "year",
            Self::Month           => "month",
            Self::ServiceType     => "service_type",
            Self::Price           => "price",
            Self::Quantity        => "quantity",
        }
    }

    pub fn is_metric(&self) -> bool {
        matches!(self, Self::Price | Self::Quantity)
    }

    /// The grouping/filter key of a categorical field.
    /// `None` when the record does not carry the field.
    pub fn key_of(&self, record: &SalesRecord) -> Option<String> {
        match self {
            Self::State           => Some(record.state.clone()),
            Self::ProductCategory => Some(record.product_category.clone()),
            Self::ProductName     => Some(record.product_name.clone()),
            Self::Sector          => Some(record.sector.label().to_string()),
            Self::Year            => Some(record.period.year().to_string()),
            Self::Month           => record.period.month(),
            Self::ServiceType     => record.service_type.clone(),
            Self::Price | Self::Quantity => None,
        }
    }

    /// The numeric value of a metric field.
    pub fn metric_of(&self, record: &SalesRecord) -> Option<f64> {
        match self {
            Self::Price    => Some(record.price),
            Self::Quantity => record.quantity.map(f64::from),
            _              => None,
        }
    }

    fn is_carried_by(&self, record: &SalesRecord) -> bool {
        if self.is_metric() {
            self.metric_of(record).is_some()
        } else {
            self.key_of(record).is_some()
        }
    }

    /// Schema check over a whole record set, independent of any filter.
    /// Fails on the first record that lacks the column.
    pub fn require_on(&self, records: &[SalesRecord]) -> DashResult<()> {
        match records.iter().find(|r| !self.is_carried_by(r)) {
            Some(r) => Err(DashError::schema_mismatch(
                self.name(),
                format!("not present on record {}", r.record_id),
            )),
            None => Ok(()),
        }
    }

    /// Key lookup that turns an absent column into a schema error.
    pub fn require_key(&self, record: &SalesRecord) -> DashResult<String> {
        if self.is_metric() {
            return Err(DashError::schema_mismatch(self.name(), "is numeric, not categorical"));
        }
        self.key_of(record).ok_or_else(|| {
            DashError::schema_mismatch(
                self.name(),
                format!("not present on record {}", record.record_id),
            )
        })
    }

    pub fn require_metric(&self, record: &SalesRecord) -> DashResult<f64> {
        if !self.is_metric() {
            return Err(DashError::schema_mismatch(self.name(), "is categorical, not numeric"));
        }
        self.metric_of(record).ok_or_else(|| {
            DashError::schema_mismatch(
                self.name(),
                format!("not present on record {}", record.record_id),
            )
        })
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "state"                                   => Ok(Self::State),
            "product_category" | "category"
            | "line_of_business" | "lob"              => Ok(Self::ProductCategory),
            "product_name" | "product"                => Ok(Self::ProductName),
            "sector"                                  => Ok(Self::Sector),
            "year"                                    => Ok(Self::Year),
            "month" | "purchase_month"                => Ok(Self::Month),
            "service_type"                            => Ok(Self::ServiceType),
            "price" | "sales"                         => Ok(Self::Price),
            "quantity" | "asus"                       => Ok(Self::Quantity),
            _ => Err(DashError::schema_mismatch(s, "unknown field")),
        }
    }
}
