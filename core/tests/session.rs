//! Session lifecycle: generate once, recompute per selection.

use chrono::NaiveDate;
use salesdash_core::{
    chart::{ChartKind, DashboardView},
    config::DomainConfig,
    error::DashError,
    filter::{DashboardSelection, FilterSet, SectorChoice},
    record::{Field, Sector},
    session::DashboardSession,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn session(domains: DomainConfig, seed: u64) -> DashboardSession {
    init_logging();
    let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
    DashboardSession::new(format!("test-{seed}"), seed, 500, domains, today).expect("session")
}

#[test]
fn dataset_is_generated_once_and_held() {
    let mut s = session(DomainConfig::federal_sales(), 42);
    assert!(!s.is_generated());

    let first = s.records().unwrap().to_vec();
    assert!(s.is_generated());
    assert_eq!(first.len(), 500);

    s.set_selection(DashboardSelection {
        sector: SectorChoice::Federal,
        ..Default::default()
    })
    .unwrap();
    let _ = s.view().unwrap();

    let second = s.records().unwrap();
    assert_eq!(first.as_slice(), second, "selection changes must not regenerate");
}

#[test]
fn default_view_covers_every_record() {
    let mut s = session(DomainConfig::federal_sales(), 7);
    let view = s.view().unwrap();
    let total: f64 = s.records().unwrap().iter().map(|r| r.price).sum();

    assert_eq!(view.headline.record_count, 500);
    assert!((view.headline.total_sales - total).abs() < 1e-6 * total);
    assert!((view.sales_by_state.total() - total).abs() < 1e-6 * total);
    assert_eq!(view.sales_by_state.kind, ChartKind::Choropleth);
    assert_eq!(view.sales_by_category.kind, ChartKind::Bar);
    assert_eq!(view.sales_over_time.kind, ChartKind::Line);
    assert_eq!(view.sales_over_time.title, "Monthly Sales Trends");
    assert_eq!(view.sales_by_category.points.len(), 3);
}

#[test]
fn donut_has_federal_then_non_federal() {
    let mut s = session(DomainConfig::federal_sales(), 11);
    let view = s.view().unwrap();

    assert_eq!(view.sector_donut[0].label, "Federal");
    assert_eq!(view.sector_donut[1].label, "Non-Federal");
    assert_eq!(view.sector_donut[0].value, view.headline.federal_total);
    assert_eq!(view.sector_donut[1].value, view.headline.non_federal_total);
}

#[test]
fn sector_selection_zeroes_the_other_slice() {
    let mut s = session(DomainConfig::federal_sales(), 13);
    s.set_selection(DashboardSelection {
        sector: SectorChoice::NonFederal,
        ..Default::default()
    })
    .unwrap();
    let view = s.view().unwrap();

    assert_eq!(view.headline.federal_total, 0.0);
    assert!(view.headline.non_federal_total > 0.0);
    assert_eq!(view.headline.total_for(Sector::NonFederal), view.headline.total_sales);
}

#[test]
fn line_of_business_view_uses_years() {
    let mut s = session(DomainConfig::line_of_business(), 17);
    s.set_selection(DashboardSelection {
        sector: SectorChoice::Both,
        year: None,
        lines_of_business: Some(vec!["Enterprise".into(), "Client".into()]),
    })
    .unwrap();
    let view = s.view().unwrap();

    assert_eq!(view.sales_over_time.title, "Yearly Sales Trends");
    let categories: Vec<&str> = view
        .sales_by_category
        .points
        .iter()
        .map(|p| p.category.as_str())
        .collect();
    assert_eq!(categories, ["Client", "Enterprise"]);
    for p in &view.sales_over_time.points {
        let year: i32 = p.category.parse().expect("year key");
        assert!((2010..=2022).contains(&year));
    }
}

#[test]
fn year_selection_outside_the_data_renders_empty_series() {
    let mut s = session(DomainConfig::line_of_business(), 19);
    s.set_selection(DashboardSelection {
        year: Some(1999),
        ..Default::default()
    })
    .unwrap();
    let view = s.view().unwrap();

    assert!(view.sales_by_state.points.is_empty());
    assert!(view.sales_over_time.points.is_empty());
    assert_eq!(view.headline.total_sales, 0.0);
}

#[test]
fn invalid_domain_is_rejected_at_session_open() {
    let mut domains = DomainConfig::federal_sales();
    domains.sectors.clear();
    let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();

    let result = DashboardSession::new("bad".into(), 1, 10, domains, today);
    assert!(matches!(result, Err(DashError::InvalidConfiguration { .. })));
}

#[test]
fn view_serializes_for_the_charting_layer() {
    let mut s = session(DomainConfig::federal_sales(), 23);
    let view = s.view().unwrap();
    let json = serde_json::to_value(&view).unwrap();

    assert!(json["sales_by_state"]["points"].is_array());
    assert_eq!(json["sales_by_state"]["kind"], "choropleth");
    assert_eq!(json["sector_donut"][1]["label"], "Non-Federal");
}

#[test]
fn session_reports_its_date_and_current_selection() {
    let mut s = session(DomainConfig::line_of_business(), 29);
    assert_eq!(s.today(), NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
    assert_eq!(s.selection(), &DashboardSelection::default());

    let chosen = DashboardSelection {
        sector: SectorChoice::NonFederal,
        year: Some(2015),
        lines_of_business: Some(vec!["Client".into()]),
    };
    s.set_selection(chosen.clone()).unwrap();
    assert_eq!(s.selection(), &chosen);
}

#[test]
fn trend_chart_accepts_only_time_fields() {
    let mut s = session(DomainConfig::federal_sales(), 31);
    let records = s.records().unwrap().to_vec();
    let all = FilterSet::all();

    let yearly = DashboardView::build(&records, &all, Field::Year).unwrap();
    assert_eq!(yearly.sales_over_time.title, "Yearly Sales Trends");

    for field in [Field::State, Field::Sector, Field::Price] {
        let result = DashboardView::build(&records, &all, field);
        assert!(
            matches!(result, Err(DashError::SchemaMismatch { .. })),
            "{field} must not label a trend chart"
        );
    }
}

#[test]
fn calendar_overflow_is_rejected_at_session_open() {
    let result = DashboardSession::new("edge".into(), 1, 10, DomainConfig::federal_sales(), NaiveDate::MAX);
    assert!(matches!(result, Err(DashError::InvalidConfiguration { .. })));
}
