//! One dashboard session: generate once, aggregate per selection change.
//!
//! RULES:
//!   - The dataset is generated on first access and held until the
//!     session is dropped. It is never regenerated mid-session.
//!   - All randomness flows through the session's RngBank.
//!   - A selection change recomputes every aggregate from the held records.

use crate::{
    chart::DashboardView,
    config::DomainConfig,
    error::DashResult,
    filter::{DashboardSelection, FilterSet},
    generator::SalesGenerator,
    record::SalesRecord,
    rng::RngBank,
    types::SessionId,
};
use chrono::NaiveDate;

/// Record count used by the original dashboard.
pub const DEFAULT_RECORD_COUNT: usize = 500;

pub struct DashboardSession {
    pub session_id: SessionId,
    pub rng_bank:   RngBank,
    record_count:   usize,
    domains:        DomainConfig,
    today:          NaiveDate,
    selection:      DashboardSelection,
    filters:        FilterSet,
    dataset:        Option<Vec<SalesRecord>>,
}

impl DashboardSession {
    /// Validates the domain and its date windows eagerly; generation
    /// itself is deferred.
    pub fn new(
        session_id: SessionId,
        seed: u64,
        record_count: usize,
        domains: DomainConfig,
        today: NaiveDate,
    ) -> DashResult<Self> {
        SalesGenerator::new(&domains, today)?;
        log::info!(
            "session {session_id} opened: domain={} records={record_count} seed={seed}",
            domains.name
        );
        Ok(Self {
            session_id,
            rng_bank: RngBank::new(seed),
            record_count,
            domains,
            today,
            selection: DashboardSelection::default(),
            filters: FilterSet::all(),
            dataset: None,
        })
    }

    pub fn domains(&self) -> &DomainConfig {
        &self.domains
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn selection(&self) -> &DashboardSelection {
        &self.selection
    }

    pub fn is_generated(&self) -> bool {
        self.dataset.is_some()
    }

    /// The session's records, generating them on first call.
    pub fn records(&mut self) -> DashResult<&[SalesRecord]> {
        if self.dataset.is_none() {
            let generator = SalesGenerator::new(&self.domains, self.today)?;
            let records = generator.generate(self.record_count, &self.rng_bank);
            log::info!("session {}: dataset generated ({} records)", self.session_id, records.len());
            self.dataset = Some(records);
        }
        Ok(self.dataset.as_deref().unwrap_or_default())
    }

    /// Replace the control state. The filter set is rebuilt immediately
    /// so a bad selection fails here rather than at render time.
    pub fn set_selection(&mut self, selection: DashboardSelection) -> DashResult<()> {
        self.filters = selection.to_filters()?;
        log::debug!(
            "session {}: selection changed ({} predicates)",
            self.session_id,
            self.filters.predicates().len()
        );
        self.selection = selection;
        Ok(())
    }

    /// Aggregate the held dataset under the current selection.
    pub fn view(&mut self) -> DashResult<DashboardView> {
        let time_field = self.domains.time_field();
        let filters = self.filters.clone();
        let records = self.records()?;
        DashboardView::build(records, &filters, time_field)
    }
}
