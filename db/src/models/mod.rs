pub mod assessment_center;
pub mod assessment_series;
pub mod candidate;
pub mod candidate_enrollment;
pub mod candidate_fee;
pub mod center_branch;
pub mod center_fee;
pub mod enrollment_module;
pub mod enrollment_paper;
pub mod formal_result;
pub mod modular_result;
pub mod occupation;
pub mod occupation_level;
pub mod occupation_module;
pub mod occupation_paper;
pub mod occupation_sector;
pub mod workers_pas_result;
