use db::models::candidate::Gender;
use serde::Serialize;

/// A count split by gender. Candidates whose gender is neither male nor
/// female count toward `total` only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GenderCount {
    pub total: u64,
    pub male: u64,
    pub female: u64,
}

impl GenderCount {
    pub fn record(&mut self, gender: Gender) {
        self.total += 1;
        match gender {
            Gender::Male => self.male += 1,
            Gender::Female => self.female += 1,
            Gender::Other => {}
        }
    }
}

/// Running pass/fail/missing counters for one reporting bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatisticsAggregator {
    pub enrolled: GenderCount,
    pub missing: GenderCount,
    pub sat: GenderCount,
    pub passed: GenderCount,
    pub failed: GenderCount,
}

/// Flattened counts and rates of one bucket, as reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AggregateStats {
    pub total_enrolled: u64,
    pub male_enrolled: u64,
    pub female_enrolled: u64,
    pub total_missing: u64,
    pub male_missing: u64,
    pub female_missing: u64,
    pub total_sat: u64,
    pub male_sat: u64,
    pub female_sat: u64,
    pub total_passed: u64,
    pub male_passed: u64,
    pub female_passed: u64,
    pub total_failed: u64,
    pub male_failed: u64,
    pub female_failed: u64,
    pub missing_rate: f64,
    pub male_missing_rate: f64,
    pub female_missing_rate: f64,
    pub sat_rate: f64,
    pub male_sat_rate: f64,
    pub female_sat_rate: f64,
    pub pass_rate: f64,
    pub male_pass_rate: f64,
    pub female_pass_rate: f64,
    pub fail_rate: f64,
    pub male_fail_rate: f64,
    pub female_fail_rate: f64,
}

/// `count / denominator * 100`, rounded to two places; zero when nothing to
/// divide by.
pub fn rate(count: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    let pct = count as f64 * 100.0 / denominator as f64;
    (pct * 100.0).round() / 100.0
}

impl StatisticsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one candidate. Passed and failed only move when the candidate
    /// sat.
    pub fn update(&mut self, gender: Gender, is_missing: bool, is_sat: bool, is_passed: bool) {
        self.enrolled.record(gender);
        if is_missing {
            self.missing.record(gender);
        }
        if is_sat {
            self.sat.record(gender);
            if is_passed {
                self.passed.record(gender);
            } else {
                self.failed.record(gender);
            }
        }
    }

    /// Missing and sat rates are over enrolled; pass and fail rates are over
    /// those who sat.
    pub fn stats(&self) -> AggregateStats {
        let (e, m, s, p, f) = (
            self.enrolled,
            self.missing,
            self.sat,
            self.passed,
            self.failed,
        );
        AggregateStats {
            total_enrolled: e.total,
            male_enrolled: e.male,
            female_enrolled: e.female,
            total_missing: m.total,
            male_missing: m.male,
            female_missing: m.female,
            total_sat: s.total,
            male_sat: s.male,
            female_sat: s.female,
            total_passed: p.total,
            male_passed: p.male,
            female_passed: p.female,
            total_failed: f.total,
            male_failed: f.male,
            female_failed: f.female,
            missing_rate: rate(m.total, e.total),
            male_missing_rate: rate(m.male, e.male),
            female_missing_rate: rate(m.female, e.female),
            sat_rate: rate(s.total, e.total),
            male_sat_rate: rate(s.male, e.male),
            female_sat_rate: rate(s.female, e.female),
            pass_rate: rate(p.total, s.total),
            male_pass_rate: rate(p.male, s.male),
            female_pass_rate: rate(p.female, s.female),
            fail_rate: rate(f.total, s.total),
            male_fail_rate: rate(f.male, s.male),
            female_fail_rate: rate(f.female, s.female),
        }
    }
}
