pub mod m202601100001_create_assessment_centers;
pub mod m202601100002_create_occupations;
pub mod m202601100003_create_assessment_series;
pub mod m202601100004_create_candidates;
pub mod m202601100005_create_enrollments;
pub mod m202601100006_create_fees;
pub mod m202601100007_create_results;
