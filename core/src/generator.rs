//! Synthetic sales record generation.
//!
//! Every field is drawn uniformly from its configured domain. The product
//! name is drawn from the already-drawn category (two-stage sampling), so
//! a record's product always belongs to its category.

use crate::{
    config::{DateWindow, DomainConfig, TimeDomain},
    error::{DashError, DashResult},
    name_generator::NameGenerator,
    record::{SalePeriod, SalesRecord, Warranty},
    rng::{RngBank, StreamRng, StreamSlot},
};
use chrono::{Duration, NaiveDate};

/// A date window pinned to a concrete day. Both ends are representable.
#[derive(Debug, Clone, Copy)]
struct DayRange {
    start: NaiveDate,
    end:   NaiveDate,
}

impl DayRange {
    fn resolve(label: &str, window: DateWindow, today: NaiveDate) -> DashResult<Self> {
        let start = today.checked_sub_signed(Duration::days(window.days_before));
        let end = today.checked_add_signed(Duration::days(window.days_after));
        match (start, end) {
            (Some(start), Some(end)) => Ok(Self { start, end }),
            _ => Err(DashError::invalid_config(format!(
                "{label} window does not fit the calendar around {today}"
            ))),
        }
    }

    /// Uniform over the inclusive day range.
    fn draw(&self, rng: &mut StreamRng) -> NaiveDate {
        let span = (self.end - self.start).num_days();
        let offset = rng.int_inclusive(0, span);
        self.start
            .checked_add_signed(Duration::days(offset))
            .unwrap_or(self.end)
    }
}

/// The time domain with its date window already pinned.
#[derive(Debug, Clone, Copy)]
enum PeriodDraw {
    Years { first: i32, last: i32 },
    Dates(DayRange),
}

pub struct SalesGenerator<'a> {
    domains:  &'a DomainConfig,
    period:   PeriodDraw,
    warranty: Option<(DayRange, DayRange)>,
}

impl<'a> SalesGenerator<'a> {
    /// Validates the domain and pins every date window to `today`;
    /// no draw happens on a bad config.
    pub fn new(domains: &'a DomainConfig, today: NaiveDate) -> DashResult<Self> {
        domains.validate()?;
        let period = match domains.time {
            TimeDomain::Year { first, last } => PeriodDraw::Years { first, last },
            TimeDomain::PurchaseDate { window } => {
                PeriodDraw::Dates(DayRange::resolve("purchase date", window, today)?)
            }
        };
        let warranty = match domains.warranty {
            Some(w) => Some((
                DayRange::resolve("warranty start", w.start, today)?,
                DayRange::resolve("warranty end", w.end, today)?,
            )),
            None => None,
        };
        Ok(Self { domains, period, warranty })
    }

    /// Generate `count` records in generation order.
    pub fn generate(&self, count: usize, bank: &RngBank) -> Vec<SalesRecord> {
        let mut core_rng = bank.for_stream(StreamSlot::Records);
        let mut identity_rng = bank.for_stream(StreamSlot::Identity);
        let mut warranty_rng = bank.for_stream(StreamSlot::Warranty);

        let records: Vec<SalesRecord> = (0..count)
            .map(|i| self.draw_record(i, &mut core_rng, &mut identity_rng, &mut warranty_rng))
            .collect();

        log::debug!(
            "generated {} records for domain '{}' (seed={})",
            records.len(),
            self.domains.name,
            bank.master_seed()
        );
        records
    }

    fn draw_record(
        &self,
        index: usize,
        rng: &mut StreamRng,
        identity_rng: &mut StreamRng,
        warranty_rng: &mut StreamRng,
    ) -> SalesRecord {
        let d = self.domains;

        let state = rng.pick(&d.states).clone();
        let category = rng.pick(&d.categories);
        let product_name = rng.pick(&category.products).clone();
        let sector = *rng.pick(&d.sectors);
        let price = rng.uniform(d.price.min, d.price.max);
        let period = match self.period {
            PeriodDraw::Years { first, last } => {
                SalePeriod::Year(rng.int_inclusive(first as i64, last as i64) as i32)
            }
            PeriodDraw::Dates(range) => SalePeriod::Date(range.draw(rng)),
        };
        let quantity = d
            .quantity
            .map(|q| rng.int_inclusive(q.min as i64, q.max as i64) as u32);
        let service_type = d.service_types.as_ref().map(|types| rng.pick(types).clone());

        let customer = d
            .customer_identity
            .then(|| NameGenerator::generate_identity(identity_rng));
        let warranty = self.warranty.map(|(start, end)| Warranty {
            start: start.draw(warranty_rng),
            end:   end.draw(warranty_rng),
        });

        SalesRecord {
            record_id: format!("s-{index:06}"),
            state,
            product_category: category.name.clone(),
            product_name,
            sector,
            price,
            period,
            quantity,
            customer,
            warranty,
            service_type,
        }
    }
}

/// Validate, then generate `count` records with a fresh bank for `seed`.
pub fn generate(
    count: usize,
    domains: &DomainConfig,
    seed: u64,
    today: NaiveDate,
) -> DashResult<Vec<SalesRecord>> {
    let generator = SalesGenerator::new(domains, today)?;
    Ok(generator.generate(count, &RngBank::new(seed)))
}
