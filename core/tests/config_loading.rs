//! Domain files under data/domains must match the built-in presets.

use salesdash_core::{
    config::{DomainConfig, TimeDomain},
    record::Field,
};
use std::path::PathBuf;

fn domain_file(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../data/domains")
        .join(name)
}

#[test]
fn shipped_domain_files_match_presets() {
    let federal = DomainConfig::load(domain_file("federal_sales.json")).unwrap();
    assert_eq!(federal, DomainConfig::federal_sales());

    let lob = DomainConfig::load(domain_file("line_of_business.json")).unwrap();
    assert_eq!(lob, DomainConfig::line_of_business());
}

#[test]
fn time_field_follows_the_time_domain() {
    assert_eq!(DomainConfig::federal_sales().time_field(), Field::Month);
    assert_eq!(DomainConfig::line_of_business().time_field(), Field::Year);
}

#[test]
fn load_rejects_invalid_domains() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    let mut domains = DomainConfig::line_of_business();
    domains.time = TimeDomain::Year { first: 2030, last: 2000 };
    std::fs::write(&path, serde_json::to_string(&domains).unwrap()).unwrap();

    let err = DomainConfig::load(&path).unwrap_err();
    assert!(err.to_string().contains("year range inverted"), "unexpected error: {err}");
}

#[test]
fn load_reports_missing_files() {
    let err = DomainConfig::load(domain_file("does_not_exist.json")).unwrap_err();
    assert!(err.to_string().contains("Cannot read"));
}

#[test]
fn presets_validate() {
    DomainConfig::federal_sales().validate().unwrap();
    DomainConfig::line_of_business().validate().unwrap();
}
