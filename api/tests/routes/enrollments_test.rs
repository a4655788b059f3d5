#[cfg(test)]
mod tests {
    use crate::helpers::{TestData, body_json, empty_request, json_request, make_test_app};
    use axum::{Router, http::StatusCode};
    use db::models::{candidate_fee, center_fee};
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use util::state::AppState;

    async fn call(app: &Router, req: axum::http::Request<axum::body::Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        (status, body_json(response).await)
    }

    async fn create(app: &Router, body: Value) -> i64 {
        let (status, json) = call(app, json_request("POST", "/api/candidates", body)).await;
        assert_eq!(status, StatusCode::CREATED, "{json}");
        json["data"]["id"].as_i64().unwrap()
    }

    async fn setup() -> (Router, AppState, TestData) {
        let (app, state) = make_test_app().await;
        let data = TestData::seed(state.db()).await;
        (app, state, data)
    }

    #[tokio::test]
    async fn formal_enrollment_charges_level_fee() {
        let (app, state, data) = setup().await;
        let id = create(&app, data.candidate_body("Nakato Sarah", "female", "formal")).await;

        let (status, json) = call(
            &app,
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

        assert_eq!(status, StatusCode::CREATED, "{json}");
        assert_eq!(json["message"], "Candidate enrolled successfully");
        assert_eq!(json["data"]["total_amount"], 150_000);
        assert_eq!(json["data"]["occupation_level_id"], data.level.id);

        let fee = candidate_fee::Model::find_for(state.db(), id, data.series.id)
            .await
            .unwrap()
            .expect("candidate fee row");
        assert_eq!(fee.total_amount, 150_000);
        assert_eq!(fee.amount_due, 150_000);

        let center = center_fee::Model::find_for(state.db(), data.center.id, data.series.id)
            .await
            .unwrap()
            .expect("center fee row");
        assert_eq!(center.total_candidates, 1);
    }

    #[tokio::test]
    async fn duplicate_enrollment_is_a_conflict() {
        let (app, _, data) = setup().await;
        let id = create(&app, data.candidate_body("Nakato Sarah", "female", "formal")).await;
        let body = json!({
            "candidate_id": id,
            "assessment_series_id": data.series.id,
            "occupation_level_id": data.level.id
        });

        let (status, _) = call(&app, json_request("POST", "/api/enrollments", body.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, json) = call(&app, json_request("POST", "/api/enrollments", body)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn modular_enrollment_with_two_modules() {
        let (app, _, data) = setup().await;
        let id = create(&app, data.candidate_body("Okello James", "male", "modular")).await;

        let (status, json) = call(
            &app,
            json_request(
                "POST",
                "/api/enrollments",
                json!({
                    "candidate_id": id,
                    "assessment_series_id": data.series.id,
                    "occupation_level_id": data.level.id,
                    "module_ids": [data.modules[0].id, data.modules[1].id]
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED, "{json}");
        assert_eq!(json["data"]["total_amount"], 130_000);
        assert_eq!(json["data"]["module_ids"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn formal_enrollment_without_level_is_rejected() {
        let (app, _, data) = setup().await;
        let id = create(&app, data.candidate_body("Nakato Sarah", "female", "formal")).await;

        let (status, _) = call(
            &app,
            json_request(
                "POST",
                "/api/enrollments",
                json!({ "candidate_id": id, "assessment_series_id": data.series.id }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn bulk_enroll_reports_each_item() {
        let (app, _, data) = setup().await;
        let id = create(&app, data.candidate_body("Nakato Sarah", "female", "formal")).await;

        let (status, json) = call(
            &app,
            json_request(
                "POST",
                "/api/enrollments/bulk",
                json!({
                    "enrollments": [
                        { "candidate_id": id, "assessment_series_id": data.series.id, "occupation_level_id": data.level.id },
                        { "candidate_id": 999, "assessment_series_id": data.series.id, "occupation_level_id": data.level.id }
                    ]
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["succeeded"], json!([id]));
        assert_eq!(json["data"]["failed"][0]["id"], 999);
    }

    #[tokio::test]
    async fn deenroll_removes_fee_rows() {
        let (app, state, data) = setup().await;
        let id = create(&app, data.candidate_body("Nakato Sarah", "female", "formal")).await;
        let (status, _) = call(
            &app,
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

        let uri = format!("/api/enrollments/{id}/{}", data.series.id);
        let (status, json) = call(&app, empty_request("DELETE", &uri)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "Candidate de-enrolled successfully");

        assert!(
            candidate_fee::Model::find_for(state.db(), id, data.series.id)
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            center_fee::Model::find_for(state.db(), data.center.id, data.series.id)
                .await
                .unwrap()
                .is_none()
        );

        let (status, _) = call(&app, empty_request("DELETE", &uri)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn bulk_deenroll_reports_each_item() {
        let (app, _, data) = setup().await;
        let id = create(&app, data.candidate_body("Nakato Sarah", "female", "formal")).await;
        call(
            &app,
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

        let (status, json) = call(
            &app,
            json_request(
                "DELETE",
                "/api/enrollments/bulk",
                json!({ "assessment_series_id": data.series.id, "candidate_ids": [id, 999] }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["succeeded"], json!([id]));
        assert_eq!(json["data"]["failed"][0]["id"], 999);
    }
}
