pub mod app;
pub mod data;

pub use app::{body_json, empty_request, json_request, make_test_app};
pub use data::TestData;
