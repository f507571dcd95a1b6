use crate::{
    error::{DashError, DashResult},
    record::{Field, Sector},
};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, path::Path};

/// The 50 US state postal codes used by the built-in presets.
pub const US_STATES: [&str; 50] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ",
    "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT",
    "VA", "WA", "WV", "WI", "WY",
];

/// Largest day count either side of a date window (one century).
pub const MAX_WINDOW_DAYS: i64 = 36_525;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryConfig {
    pub name: String,
    pub products: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuantityRange {
    pub min: u32,
    pub max: u32,
}

/// An inclusive day window relative to "today":
/// [today - days_before, today + days_after].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateWindow {
    pub days_before: i64,
    pub days_after: i64,
}

impl DateWindow {
    pub fn past(days: i64) -> Self {
        Self { days_before: days, days_after: 0 }
    }

    pub fn future(days: i64) -> Self {
        Self { days_before: 0, days_after: days }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimeDomain {
    /// Bare integer years, inclusive.
    Year { first: i32, last: i32 },
    /// Full purchase dates inside a window around today.
    PurchaseDate { window: DateWindow },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct WarrantyWindows {
    pub start: DateWindow,
    pub end: DateWindow,
}

/// Every categorical and numeric domain the generator draws from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DomainConfig {
    pub name: String,
    pub states: Vec<String>,
    /// Ordered so draws are reproducible for a given seed.
    pub categories: Vec<CategoryConfig>,
    pub sectors: Vec<Sector>,
    pub price: PriceRange,
    pub time: TimeDomain,
    #[serde(default)]
    pub quantity: Option<QuantityRange>,
    #[serde(default)]
    pub customer_identity: bool,
    #[serde(default)]
    pub warranty: Option<WarrantyWindows>,
    #[serde(default)]
    pub service_types: Option<Vec<String>>,
}

impl DomainConfig {
    /// Federal vs Non-Federal sales: dated purchases with the full
    /// set of optional columns.
    pub fn federal_sales() -> Self {
        Self {
            name: "federal_sales".into(),
            states: US_STATES.iter().map(|s| s.to_string()).collect(),
            categories: vec![
                category("Infrastructure", &["Server", "Storage", "Network Device", "Cloud Service"]),
                category(
                    "Enterprise",
                    &["Hyperconverged System", "Cloud Platform", "Security Service", "App Modernization Service"],
                ),
                category("Consumer", &["Laptop", "Desktop", "Monitor", "Gaming System"]),
            ],
            sectors: Sector::ALL.to_vec(),
            price: PriceRange { min: 10_000.0, max: 100_000.0 },
            time: TimeDomain::PurchaseDate { window: DateWindow::past(730) },
            quantity: Some(QuantityRange { min: 1, max: 10 }),
            customer_identity: true,
            warranty: Some(WarrantyWindows {
                start: DateWindow::past(365),
                end: DateWindow::future(1_095),
            }),
            service_types: Some(vec!["Standard".into(), "Extended".into()]),
        }
    }

    /// Line-of-business sales: bare years, smaller tickets, no optional columns.
    pub fn line_of_business() -> Self {
        Self {
            name: "line_of_business".into(),
            states: US_STATES.iter().map(|s| s.to_string()).collect(),
            categories: vec![
                category("Enterprise", &["Hyperconverged System", "Cloud Platform", "Security Service"]),
                category("Infrastructure", &["Server", "Storage", "Network Device"]),
                category("Client", &["Laptop", "Desktop", "Workstation", "Monitor"]),
            ],
            sectors: Sector::ALL.to_vec(),
            price: PriceRange { min: 100.0, max: 10_000.0 },
            time: TimeDomain::Year { first: 2010, last: 2022 },
            quantity: None,
            customer_identity: false,
            warranty: None,
            service_types: None,
        }
    }

    /// Load a domain from a JSON file and validate it.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
        let config: DomainConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Products for a category, if the category exists.
    pub fn products_for(&self, category: &str) -> Option<&[String]> {
        self.categories
            .iter()
            .find(|c| c.name == category)
            .map(|c| c.products.as_slice())
    }

    /// The time grouping the line chart can use for this domain.
    pub fn time_field(&self) -> Field {
        match self.time {
            TimeDomain::Year { .. }         => Field::Year,
            TimeDomain::PurchaseDate { .. } => Field::Month,
        }
    }

    pub fn validate(&self) -> DashResult<()> {
        if self.states.is_empty() {
            return Err(DashError::invalid_config("state set is empty"));
        }
        if self.categories.is_empty() {
            return Err(DashError::invalid_config("product taxonomy is empty"));
        }
        let mut seen = HashSet::new();
        for c in &self.categories {
            if !seen.insert(c.name.as_str()) {
                return Err(DashError::invalid_config(format!("duplicate category '{}'", c.name)));
            }
            if c.products.is_empty() {
                return Err(DashError::invalid_config(format!("category '{}' has no products", c.name)));
            }
        }
        if self.sectors.is_empty() {
            return Err(DashError::invalid_config("sector set is empty"));
        }
        if !self.price.min.is_finite() || !self.price.max.is_finite() {
            return Err(DashError::invalid_config("price range must be finite"));
        }
        if self.price.min > self.price.max {
            return Err(DashError::invalid_config(format!(
                "price range inverted: {} > {}",
                self.price.min, self.price.max
            )));
        }
        if let Some(q) = self.quantity {
            if q.min > q.max {
                return Err(DashError::invalid_config(format!(
                    "quantity range inverted: {} > {}",
                    q.min, q.max
                )));
            }
        }
        match self.time {
            TimeDomain::Year { first, last } if first > last => {
                return Err(DashError::invalid_config(format!("year range inverted: {first} > {last}")));
            }
            TimeDomain::PurchaseDate { window } => validate_window("purchase date", window)?,
            TimeDomain::Year { .. } => {}
        }
        if let Some(w) = self.warranty {
            validate_window("warranty start", w.start)?;
            validate_window("warranty end", w.end)?;
        }
        if let Some(types) = &self.service_types {
            if types.is_empty() {
                return Err(DashError::invalid_config("service type list is empty"));
            }
        }
        Ok(())
    }
}

fn category(name: &str, products: &[&str]) -> CategoryConfig {
    CategoryConfig {
        name: name.to_string(),
        products: products.iter().map(|p| p.to_string()).collect(),
    }
}

fn validate_window(label: &str, window: DateWindow) -> DashResult<()> {
    if window.days_before < 0 || window.days_after < 0 {
        return Err(DashError::invalid_config(format!(
            "{label} window bounds must be non-negative day counts"
        )));
    }
    if window.days_before > MAX_WINDOW_DAYS || window.days_after > MAX_WINDOW_DAYS {
        return Err(DashError::invalid_config(format!(
            "{label} window bounds must not exceed {MAX_WINDOW_DAYS} days"
        )));
    }
    Ok(())
}
