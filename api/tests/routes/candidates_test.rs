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

    async fn create(app: &Router, body: Value) -> i64 {
        let (status, json) = call(app, json_request("POST", "/api/candidates", body)).await;
        assert_eq!(status, StatusCode::CREATED, "{json}");
        json["data"]["id"].as_i64().unwrap()
    }

    async fn submit(app: &Router, id: i64) -> Value {
        let (status, json) = call(
            app,
            empty_request("POST", &format!("/api/candidates/{id}/submit")),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{json}");
        json["data"].clone()
    }

    #[tokio::test]
    async fn create_returns_unnumbered_draft() {
        let (app, state) = make_test_app().await;
        let data = TestData::seed(state.db()).await;

        let (status, json) = call(
            &app,
            json_request(
                "POST",
                "/api/candidates",
                data.candidate_body("Nakato Sarah", "female", "formal"),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Candidate created successfully");
        assert_eq!(json["data"]["full_name"], "Nakato Sarah");
        assert!(json["data"]["registration_number"].is_null());
        assert!(json["data"]["payment_code"].is_null());
        assert_eq!(json["data"]["is_submitted"], false);
        assert_eq!(json["data"]["verification_status"], "pending");
    }

    #[tokio::test]
    async fn create_rejects_blank_name() {
        let (app, state) = make_test_app().await;
        let data = TestData::seed(state.db()).await;

        let (status, json) = call(
            &app,
            json_request(
                "POST",
                "/api/candidates",
                data.candidate_body("", "female", "formal"),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn submit_assigns_sequential_numbers_and_payment_code() {
        let (app, state) = make_test_app().await;
        let data = TestData::seed(state.db()).await;

        let first = create(&app, data.candidate_body("Nakato Sarah", "female", "formal")).await;
        let second = create(&app, data.candidate_body("Okello James", "male", "formal")).await;

        let submitted = submit(&app, first).await;
        assert_eq!(submitted["registration_number"], "UVT002/U/25/M/HD/F/001");
        assert_eq!(
            submitted["payment_code"],
            format!("IUV00225{first:07}").as_str()
        );
        assert_eq!(submitted["is_submitted"], true);

        let submitted = submit(&app, second).await;
        assert_eq!(submitted["registration_number"], "UVT002/U/25/M/HD/F/002");
    }

    #[tokio::test]
    async fn resubmitting_is_a_conflict() {
        let (app, state) = make_test_app().await;
        let data = TestData::seed(state.db()).await;
        let id = create(&app, data.candidate_body("Nakato Sarah", "female", "formal")).await;
        submit(&app, id).await;

        let (status, json) = call(
            &app,
            empty_request("POST", &format!("/api/candidates/{id}/submit")),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn submit_without_intake_is_rejected() {
        let (app, state) = make_test_app().await;
        let data = TestData::seed(state.db()).await;
        let mut body = data.candidate_body("Nakato Sarah", "female", "formal");
        body["intake"] = Value::Null;
        let id = create(&app, body).await;

        let (status, _) = call(
            &app,
            empty_request("POST", &format!("/api/candidates/{id}/submit")),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_candidate_is_not_found() {
        let (app, _) = make_test_app().await;

        let (status, json) = call(&app, empty_request("GET", "/api/candidates/999")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Candidate 999 not found");
    }

    #[tokio::test]
    async fn verify_and_decline_follow_submission() {
        let (app, state) = make_test_app().await;
        let data = TestData::seed(state.db()).await;
        let id = create(&app, data.candidate_body("Nakato Sarah", "female", "formal")).await;

        let (status, _) = call(
            &app,
            empty_request("POST", &format!("/api/candidates/{id}/verify")),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        submit(&app, id).await;

        let (status, _) = call(
            &app,
            json_request(
                "POST",
                &format!("/api/candidates/{id}/decline"),
                json!({ "reason": "" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, json) = call(
            &app,
            json_request(
                "POST",
                &format!("/api/candidates/{id}/decline"),
                json!({ "reason": "Blurred photo" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["verification_status"], "declined");
        assert_eq!(json["data"]["decline_reason"], "Blurred photo");

        let (status, json) = call(
            &app,
            empty_request("POST", &format!("/api/candidates/{id}/verify")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["verification_status"], "verified");
        assert!(json["data"]["decline_reason"].is_null());
    }

    #[tokio::test]
    async fn clear_payment_records_amount() {
        let (app, state) = make_test_app().await;
        let data = TestData::seed(state.db()).await;
        let id = create(&app, data.candidate_body("Nakato Sarah", "female", "formal")).await;

        let (status, json) = call(
            &app,
            json_request(
                "POST",
                &format!("/api/candidates/{id}/clear-payment"),
                json!({ "amount": 50000, "cleared_on": "2025-03-14" }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{json}");
        assert_eq!(json["data"]["payment_cleared"], true);
        assert_eq!(json["data"]["payment_amount_cleared"], 50000);
        assert_eq!(json["data"]["payment_cleared_date"], "2025-03-14");

        let (status, _) = call(
            &app,
            json_request(
                "POST",
                &format!("/api/candidates/{id}/clear-payment"),
                json!({ "amount": -1 }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn bulk_regenerate_isolates_failures() {
        let (app, state) = make_test_app().await;
        let data = TestData::seed(state.db()).await;
        let id = create(&app, data.candidate_body("Nakato Sarah", "female", "formal")).await;
        submit(&app, id).await;

        let (status, json) = call(
            &app,
            json_request(
                "POST",
                "/api/candidates/regenerate-registration-numbers",
                json!({ "candidate_ids": [id, 999] }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["succeeded"], json!([id]));
        assert_eq!(json["data"]["failed"][0]["id"], 999);
        assert_eq!(json["data"]["failed"][0]["error"], "Candidate 999 not found");
        assert_eq!(
            json["message"],
            "Regenerate registration numbers: 1 succeeded, 1 failed"
        );
    }

    #[tokio::test]
    async fn bulk_endpoints_require_candidate_ids() {
        let (app, _) = make_test_app().await;

        let (status, _) = call(
            &app,
            json_request(
                "POST",
                "/api/candidates/regenerate-registration-numbers",
                json!({ "candidate_ids": [] }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn change_center_reissues_identifiers() {
        let (app, state) = make_test_app().await;
        let data = TestData::seed(state.db()).await;
        let id = create(&app, data.candidate_body("Nakato Sarah", "female", "formal")).await;
        submit(&app, id).await;

        let (status, json) = call(
            &app,
            json_request(
                "PUT",
                "/api/candidates/change-center",
                json!({
                    "candidate_ids": [id],
                    "assessment_center_id": data.other_center.id,
                    "assessment_center_branch_id": data.branch.id
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["succeeded"], json!([id]));

        let (_, json) = call(&app, empty_request("GET", &format!("/api/candidates/{id}"))).await;
        assert_eq!(json["data"]["registration_number"], "UVT117/U/25/M/HD/F/001");
        assert_eq!(
            json["data"]["payment_code"],
            format!("IUV11725{id:07}").as_str()
        );
        assert_eq!(json["data"]["assessment_center_branch_id"], data.branch.id);
    }

    #[tokio::test]
    async fn change_center_rejects_foreign_branch() {
        let (app, state) = make_test_app().await;
        let data = TestData::seed(state.db()).await;
        let id = create(&app, data.candidate_body("Nakato Sarah", "female", "formal")).await;

        let (status, json) = call(
            &app,
            json_request(
                "PUT",
                "/api/candidates/change-center",
                json!({
                    "candidate_ids": [id],
                    "assessment_center_id": data.center.id,
                    "assessment_center_branch_id": data.branch.id
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["succeeded"], json!([]));
        assert_eq!(json["data"]["failed"][0]["id"], id);
    }

    #[tokio::test]
    async fn change_category_is_refused_once_enrolled() {
        let (app, state) = make_test_app().await;
        let data = TestData::seed(state.db()).await;
        let enrolled = create(&app, data.candidate_body("Nakato Sarah", "female", "formal")).await;
        let free = create(&app, data.candidate_body("Okello James", "male", "formal")).await;

        let (status, _) = call(
            &app,
            json_request(
                "POST",
                "/api/enrollments",
                json!({
                    "candidate_id": enrolled,
                    "assessment_series_id": data.series.id,
                    "occupation_level_id": data.level.id
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (_, json) = call(
            &app,
            json_request(
                "PUT",
                "/api/candidates/change-category",
                json!({ "candidate_ids": [enrolled, free], "registration_category": "modular" }),
            ),
        )
        .await;
        assert_eq!(json["data"]["succeeded"], json!([free]));
        assert_eq!(json["data"]["failed"][0]["id"], enrolled);

        let (_, json) = call(&app, empty_request("GET", &format!("/api/candidates/{free}"))).await;
        assert_eq!(json["data"]["registration_category"], "modular");
    }

    #[tokio::test]
    async fn change_occupation_moves_candidates() {
        let (app, state) = make_test_app().await;
        let data = TestData::seed(state.db()).await;
        let id = create(&app, data.candidate_body("Nakato Sarah", "female", "formal")).await;

        let (_, json) = call(
            &app,
            json_request(
                "PUT",
                "/api/candidates/change-occupation",
                json!({ "candidate_ids": [id], "occupation_id": 404 }),
            ),
        )
        .await;
        assert_eq!(json["data"]["failed"][0]["id"], id);

        let (_, json) = call(
            &app,
            json_request(
                "PUT",
                "/api/candidates/change-occupation",
                json!({ "candidate_ids": [id], "occupation_id": data.occupation.id }),
            ),
        )
        .await;
        assert_eq!(json["data"]["succeeded"], json!([id]));
    }
}
