//! Pure formatting and parsing for candidate identifiers.
//!
//! Registration number: `{center}/{nationality}/{yy}/{intake}/{occ_code}/{category}/{seq}`.
//! Payment code: `IUV{center digits:3}{yy}{candidate id:7}`.
//!
//! Nothing here touches the database; [`crate::registration`] resolves the
//! inputs and persists the results.

use db::models::candidate::{self, Intake};

pub const DEFAULT_CENTER_NUMBER: &str = "UVT000";
pub const DEFAULT_SEQUENCE_WIDTH: usize = 3;
const PAYMENT_CODE_PREFIX: &str = "IUV";

/// `U` for Ugandan candidates, `X` for everyone else.
///
/// The ISO country code wins; the free-text nationality is only consulted for
/// older records that never had a country set.
pub fn nationality_code(country: Option<&str>, nationality: Option<&str>) -> &'static str {
    let ugandan_country = country.is_some_and(|c| c.trim().eq_ignore_ascii_case("UG"));
    let ugandan_text = nationality.is_some_and(|n| n.to_lowercase().contains("uganda"));
    if ugandan_country || ugandan_text {
        "U"
    } else {
        "X"
    }
}

pub fn two_digit_year(entry_year: i32) -> String {
    format!("{:02}", entry_year.rem_euclid(100))
}

/// Static parts of a registration number, everything except the sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationComponents {
    pub center_number: String,
    pub nationality_code: &'static str,
    pub year: String,
    pub intake: Intake,
    pub occupation_code: String,
    pub category_code: &'static str,
}

impl RegistrationComponents {
    /// Returns `None` unless the candidate has a center, entry year, intake and
    /// occupation. `center_number` and `occupation_code` are the looked-up
    /// values for the candidate's references; a blank center number falls back
    /// to [`DEFAULT_CENTER_NUMBER`].
    pub fn resolve(
        candidate: &candidate::Model,
        center_number: Option<&str>,
        occupation_code: Option<&str>,
    ) -> Option<Self> {
        candidate.assessment_center_id?;
        candidate.occupation_id?;
        let entry_year = candidate.entry_year?;
        let intake = candidate.intake?;
        let occupation_code = occupation_code.map(str::trim).filter(|c| !c.is_empty())?;

        let center_number = center_number
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CENTER_NUMBER);

        Some(Self {
            center_number: center_number.to_owned(),
            nationality_code: nationality_code(
                candidate.candidate_country.as_deref(),
                candidate.nationality.as_deref(),
            ),
            year: two_digit_year(entry_year),
            intake,
            occupation_code: occupation_code.to_owned(),
            category_code: candidate.registration_category.code(),
        })
    }
}

/// Numeric trailing segment of a registration number, if it has one.
pub fn sequence_suffix(registration_number: &str) -> Option<u32> {
    let (_, tail) = registration_number.trim().rsplit_once('/')?;
    if tail.is_empty() || !tail.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    tail.parse().ok()
}

/// Next free sequence given the numbers already issued in a scope.
///
/// Malformed numbers are skipped rather than treated as zero, so one bad
/// legacy row cannot stall numbering for the whole scope.
pub fn next_sequence<I, S>(existing: I) -> u32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    existing
        .into_iter()
        .filter_map(|n| sequence_suffix(n.as_ref()))
        .max()
        .map_or(1, |max| max.saturating_add(1))
}

pub fn format_registration_number(
    components: &RegistrationComponents,
    sequence: u32,
    width: usize,
) -> String {
    format!(
        "{}/{}/{}/{}/{}/{}/{:0width$}",
        components.center_number,
        components.nationality_code,
        components.year,
        components.intake,
        components.occupation_code,
        components.category_code,
        sequence,
        width = width
    )
}

/// Digits of a center number, left-padded to three. Longer runs keep the last
/// three digits.
fn center_digits(center_number: &str) -> String {
    let digits: String = center_number.chars().filter(char::is_ascii_digit).collect();
    if digits.len() > 3 {
        digits[digits.len() - 3..].to_owned()
    } else {
        format!("{digits:0>3}")
    }
}

pub fn format_payment_code(center_number: &str, entry_year: i32, candidate_id: i64) -> String {
    format!(
        "{PAYMENT_CODE_PREFIX}{}{}{:07}",
        center_digits(center_number),
        two_digit_year(entry_year),
        candidate_id
    )
}

/// Payment code for a persisted candidate, or `None` when the center, entry
/// year or primary key is missing.
pub fn payment_code_for(candidate: &candidate::Model, center_number: Option<&str>) -> Option<String> {
    candidate.assessment_center_id?;
    let entry_year = candidate.entry_year?;
    if candidate.id <= 0 {
        return None;
    }
    let center_number = center_number
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(DEFAULT_CENTER_NUMBER);
    Some(format_payment_code(center_number, entry_year, candidate.id))
}
