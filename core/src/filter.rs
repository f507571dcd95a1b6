//! Record-level predicates and the dashboard's control state.

use crate::{
    error::{DashError, DashResult},
    record::{Field, SalesRecord, Sector},
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, str::FromStr};

/// `field ∈ allowed`. Equality is the single-value case.
/// An empty `allowed` set passes nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Predicate {
    pub field: Field,
    pub allowed: BTreeSet<String>,
}

impl Predicate {
    pub fn matches(&self, record: &SalesRecord) -> DashResult<bool> {
        let key = self.field.require_key(record)?;
        Ok(self.allowed.contains(&key))
    }
}

/// A conjunction of predicates. Empty passes every record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSet {
    predicates: Vec<Predicate>,
}

impl FilterSet {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_eq(self, field: Field, value: impl Into<String>) -> DashResult<Self> {
        let value: String = value.into();
        self.with_any_of(field, [value])
    }

    pub fn with_any_of<I, S>(mut self, field: Field, values: I) -> DashResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if field.is_metric() {
            return Err(DashError::schema_mismatch(
                field.name(),
                "metric fields cannot be used as filters",
            ));
        }
        self.predicates.push(Predicate {
            field,
            allowed: values.into_iter().map(Into::into).collect(),
        });
        Ok(self)
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn matches(&self, record: &SalesRecord) -> DashResult<bool> {
        for p in &self.predicates {
            if !p.matches(record)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Every predicate field must exist on every record, matched or not.
    pub fn check_schema(&self, records: &[SalesRecord]) -> DashResult<()> {
        for p in &self.predicates {
            p.field.require_on(records)?;
        }
        Ok(())
    }

    /// Records passing every predicate, in input order.
    pub fn apply<'r>(&self, records: &'r [SalesRecord]) -> DashResult<Vec<&'r SalesRecord>> {
        self.check_schema(records)?;
        let mut kept = Vec::with_capacity(records.len());
        for r in records {
            if self.matches(r)? {
                kept.push(r);
            }
        }
        Ok(kept)
    }
}

/// The sector dropdown: one sector, or both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectorChoice {
    #[serde(rename = "Federal")]
    Federal,
    #[serde(rename = "Non-Federal")]
    NonFederal,
    #[default]
    #[serde(rename = "Both")]
    Both,
}

impl SectorChoice {
    pub fn sector(&self) -> Option<Sector> {
        match self {
            Self::Federal    => Some(Sector::Federal),
            Self::NonFederal => Some(Sector::NonFederal),
            Self::Both       => None,
        }
    }
}

impl FromStr for SectorChoice {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("both") {
            return Ok(Self::Both);
        }
        Ok(match s.parse::<Sector>()? {
            Sector::Federal    => Self::Federal,
            Sector::NonFederal => Self::NonFederal,
        })
    }
}

/// Current values of the dashboard controls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSelection {
    #[serde(default)]
    pub sector: SectorChoice,
    #[serde(default)]
    pub year: Option<i32>,
    /// `None` means the multi-select is not shown / not applied.
    #[serde(default)]
    pub lines_of_business: Option<Vec<String>>,
}

impl DashboardSelection {
    pub fn to_filters(&self) -> DashResult<FilterSet> {
        let mut filters = FilterSet::all();
        if let Some(sector) = self.sector.sector() {
            filters = filters.with_eq(Field::Sector, sector.label())?;
        }
        if let Some(year) = self.year {
            filters = filters.with_eq(Field::Year, year.to_string())?;
        }
        if let Some(lobs) = &self.lines_of_business {
            filters = filters.with_any_of(Field::ProductCategory, lobs.iter().cloned())?;
        }
        Ok(filters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_selection_has_no_predicates() {
        let filters = DashboardSelection::default().to_filters().unwrap();
        assert!(filters.is_empty());
    }

    #[test]
    fn selection_builds_one_predicate_per_control() {
        let selection = DashboardSelection {
            sector: SectorChoice::Federal,
            year: Some(2021),
            lines_of_business: Some(vec!["Enterprise".into(), "Client".into()]),
        };
        let filters = selection.to_filters().unwrap();
        let p = filters.predicates();
        assert_eq!(p.len(), 3);
        assert_eq!(p[0].field, Field::Sector);
        assert!(p[0].allowed.contains("Federal"));
        assert_eq!(p[1].field, Field::Year);
        assert!(p[1].allowed.contains("2021"));
        assert_eq!(p[2].allowed.len(), 2);
    }

    #[test]
    fn metric_fields_are_rejected_as_filters() {
        let err = FilterSet::all().with_eq(Field::Price, "100").unwrap_err();
        assert!(matches!(err, DashError::SchemaMismatch { .. }));
    }

    #[test]
    fn sector_choice_parses_dropdown_labels() {
        assert_eq!("Both".parse::<SectorChoice>().unwrap(), SectorChoice::Both);
        assert_eq!("Non-Federal".parse::<SectorChoice>().unwrap(), SectorChoice::NonFederal);
        assert!("State".parse::<SectorChoice>().is_err());
    }
}
