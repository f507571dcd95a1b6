//! Deterministic synthetic customer identities from curated word lists.
//!
//! Identities have no role in aggregation; they only fill the
//! customer columns of exported datasets. Same RNG seed = same names.

use crate::{record::CustomerIdentity, rng::StreamRng};

/// Deterministic company/contact generator.
pub struct NameGenerator;

impl NameGenerator {
    /// Company name plus a contact email at that company's domain.
    pub fn generate_identity(rng: &mut StreamRng) -> CustomerIdentity {
        let company = Self::generate_company_name(rng);
        let email = Self::generate_email(rng, &company);
        CustomerIdentity { company, email }
    }

    /// Format: "Surname Suffix", "Surname and Surname", or "Surname Industry Suffix".
    pub fn generate_company_name(rng: &mut StreamRng) -> String {
        let surname = *rng.pick(Self::surnames());
        match rng.next_u64_below(3) {
            0 => format!("{} {}", surname, rng.pick(Self::company_suffixes())),
            1 => format!("{} and {}", surname, rng.pick(Self::surnames())),
            _ => format!(
                "{} {} {}",
                surname,
                rng.pick(Self::industries()),
                rng.pick(Self::company_suffixes())
            ),
        }
    }

    /// `first.last@company-slug.tld`, lowercase ASCII.
    pub fn generate_email(rng: &mut StreamRng, company: &str) -> String {
        let first = rng.pick(Self::first_names()).to_ascii_lowercase();
        let last = rng.pick(Self::surnames()).to_ascii_lowercase();
        let tld = if rng.chance(0.7) { "com" } else { *rng.pick(&["net", "org", "biz"]) };
        format!("{first}.{last}@{}.{tld}", Self::domain_slug(company))
    }

    fn domain_slug(company: &str) -> String {
        let slug: String = company
            .split_whitespace()
            .filter(|w| !matches!(*w, "and" | "LLC" | "Inc" | "PLC" | "Ltd"))
            .take(2)
            .collect::<Vec<_>>()
            .join("-")
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
            .collect();
        slug.to_ascii_lowercase()
    }

    fn first_names() -> &'static [&'static str] {
        &[
            "James", "Mary", "Robert", "Patricia", "Michael", "Jennifer", "William", "Linda",
            "David", "Elizabeth", "Richard", "Susan", "Joseph", "Jessica", "Thomas", "Sarah",
            "Daniel", "Karen", "Matthew", "Nancy", "Anthony", "Lisa", "Mark", "Betty",
            "Steven", "Sandra", "Andrew", "Ashley", "Joshua", "Emily", "Kevin", "Michelle",
            "Brian", "Amanda", "George", "Melissa", "Ryan", "Rebecca", "Jacob", "Laura",
        ]
    }

    fn surnames() -> &'static [&'static str] {
        &[
            "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis",
            "Rodriguez", "Martinez", "Hernandez", "Lopez", "Wilson", "Anderson", "Thomas",
            "Taylor", "Moore", "Jackson", "Martin", "Lee", "Thompson", "White", "Harris",
            "Clark", "Lewis", "Robinson", "Walker", "Young", "Allen", "King", "Wright",
            "Scott", "Torres", "Nguyen", "Hill", "Flores", "Green", "Adams", "Nelson",
            "Baker", "Hall", "Rivera", "Campbell", "Mitchell", "Carter", "Roberts", "Patel",
        ]
    }

    fn company_suffixes() -> &'static [&'static str] {
        &[
            "LLC", "Inc", "PLC", "Ltd", "Group", "Partners", "Associates",
            "Holdings", "Systems", "Solutions", "Technologies", "Industries",
        ]
    }

    fn industries() -> &'static [&'static str] {
        &[
            "Logistics", "Analytics", "Defense", "Aerospace", "Health", "Energy",
            "Consulting", "Software", "Networks", "Manufacturing", "Research", "Security",
        ]
    }
}
