mod candidates_test;
mod enrollments_test;
mod fees_test;
mod health_test;
mod results_test;
mod series_test;
