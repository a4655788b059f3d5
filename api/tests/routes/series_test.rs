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

    /// Enrolls a formal candidate and optionally records one theory mark.
    async fn sit(app: &Router, data: &TestData, name: &str, gender: &str, mark: Option<f64>) {
        let (_, json) = call(
            app,
            json_request("POST", "/api/candidates", data.candidate_body(name, gender, "formal")),
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

        if let Some(mark) = mark {
            let (status, _) = call(
                app,
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
    }

    #[tokio::test]
    async fn statistics_cover_enrolled_candidates() {
        let (app, state) = make_test_app().await;
        let data = TestData::seed(state.db()).await;
        sit(&app, &data, "Nakato Sarah", "female", Some(72.0)).await;
        sit(&app, &data, "Achieng Grace", "female", Some(30.0)).await;
        sit(&app, &data, "Okello James", "male", None).await;

        let (status, json) = call(
            &app,
            empty_request("GET", &format!("/api/series/{}/statistics", data.series.id)),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{json}");
        assert_eq!(json["message"], "Statistics calculated successfully");

        let overview = &json["data"]["overview"];
        assert_eq!(overview["total_enrolled"], 3);
        assert_eq!(overview["male_enrolled"], 1);
        assert_eq!(overview["female_enrolled"], 2);
        assert_eq!(overview["total_missing"], 1);
        assert_eq!(overview["male_missing"], 1);
        assert_eq!(overview["total_sat"], 2);
        assert_eq!(overview["total_passed"], 1);
        assert_eq!(overview["total_failed"], 1);
        assert_eq!(overview["pass_rate"], 50.0);
        assert_eq!(overview["sat_rate"], 66.67);

        let categories = json["data"]["category_stats"].as_array().unwrap();
        assert_eq!(categories.first().unwrap()["category"], "formal");
        assert_eq!(categories.last().unwrap()["category"], "Total");

        let occupations = json["data"]["occupation_stats"].as_array().unwrap();
        assert_eq!(occupations[0]["kind"], "occupation");
        assert_eq!(occupations[0]["occupation_code"], "HD");
        assert_eq!(occupations[1]["kind"], "sector_total");
        assert_eq!(occupations.last().unwrap()["kind"], "grand_total");
        assert_eq!(occupations.last().unwrap()["total_enrolled"], 3);

        assert_eq!(json["data"]["centers_by_sector_summary"]["total_centers"], 1);
    }

    #[tokio::test]
    async fn center_filter_limits_the_population() {
        let (app, state) = make_test_app().await;
        let data = TestData::seed(state.db()).await;
        sit(&app, &data, "Nakato Sarah", "female", Some(72.0)).await;

        let (status, json) = call(
            &app,
            empty_request(
                "GET",
                &format!(
                    "/api/series/{}/statistics?center_ids={}",
                    data.series.id, data.other_center.id
                ),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["overview"]["total_enrolled"], 0);
        assert_eq!(json["data"]["center_ids"], json!([data.other_center.id]));
    }

    #[tokio::test]
    async fn malformed_center_ids_are_rejected() {
        let (app, state) = make_test_app().await;
        let data = TestData::seed(state.db()).await;

        let (status, json) = call(
            &app,
            empty_request(
                "GET",
                &format!("/api/series/{}/statistics?center_ids=1,abc", data.series.id),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Invalid center id 'abc'");
    }

    #[tokio::test]
    async fn unknown_series_is_not_found() {
        let (app, _) = make_test_app().await;

        let (status, json) = call(&app, empty_request("GET", "/api/series/99/statistics")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], "Assessment series 99 not found");
    }
}
