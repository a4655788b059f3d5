#[cfg(test)]
mod tests {
    use crate::helpers::{TestData, body_json, empty_request, json_request, make_test_app};
    use axum::{Router, http::StatusCode};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn call(app: &Router, req: axum::http::Request<axum::body::Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        (status, body_json(response).await)
    }

    /// Creates and enrolls a formal candidate, returning its id.
    async fn enrolled_formal(app: &Router, data: &TestData) -> i64 {
        let (_, json) = call(
            app,
            json_request(
                "POST",
                "/api/candidates",
                data.candidate_body("Nakato Sarah", "female", "formal"),
            ),
        )
        .await;
        let id = json["data"]["id"].as_i64().unwrap();
        let (status, _) = call(
            app,
            json_request(
                "POST",
                "/api/enrollments",
                json!({
                    "candidate_id": id,
                    "assessment_series_id": data.series.id,
                    "occupation_level_id": data.level.id
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        id
    }

    #[tokio::test]
    async fn records_mark_with_grade_and_comment() {
        let (app, state) = make_test_app().await;
        let data = TestData::seed(state.db()).await;
        let id = enrolled_formal(&app, &data).await;

        let (status, json) = call(
            &app,
            json_request(
                "POST",
                "/api/results",
                json!({
                    "candidate_id": id,
                    "assessment_series_id": data.series.id,
                    "paper_id": data.paper.id,
                    "assessment_type": "theory",
                    "mark": 72.0
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK, "{json}");
        assert_eq!(json["data"]["grade"], "B");
        assert_eq!(json["data"]["comment"], "Successful");
        assert_eq!(json["data"]["category"], "formal");
    }

    #[tokio::test]
    async fn rerecording_replaces_the_mark() {
        let (app, state) = make_test_app().await;
        let data = TestData::seed(state.db()).await;
        let id = enrolled_formal(&app, &data).await;

        for mark in [json!(40.0), Value::Null] {
            let (status, _) = call(
                &app,
                json_request(
                    "POST",
                    "/api/results",
                    json!({
                        "candidate_id": id,
                        "assessment_series_id": data.series.id,
                        "paper_id": data.paper.id,
                        "assessment_type": "theory",
                        "mark": mark
                    }),
                ),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }

        let (status, json) = call(
            &app,
            empty_request(
                "GET",
                &format!("/api/candidates/{id}/results?series_id={}", data.series.id),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let rows = json["data"].as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["grade"], "Ms");
        assert_eq!(rows[0]["comment"], "Missing");
    }

    #[tokio::test]
    async fn rejects_mark_above_hundred() {
        let (app, state) = make_test_app().await;
        let data = TestData::seed(state.db()).await;
        let id = enrolled_formal(&app, &data).await;

        let (status, json) = call(
            &app,
            json_request(
                "POST",
                "/api/results",
                json!({
                    "candidate_id": id,
                    "assessment_series_id": data.series.id,
                    "paper_id": data.paper.id,
                    "assessment_type": "theory",
                    "mark": 120.0
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn unknown_candidate_is_not_found() {
        let (app, state) = make_test_app().await;
        let data = TestData::seed(state.db()).await;

        let (status, _) = call(
            &app,
            json_request(
                "POST",
                "/api/results",
                json!({
                    "candidate_id": 999,
                    "assessment_series_id": data.series.id,
                    "assessment_type": "practical",
                    "mark": 70.0
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
