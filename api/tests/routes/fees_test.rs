#[cfg(test)]
mod tests {
    use crate::helpers::{TestData, body_json, empty_request, json_request, make_test_app};
    use axum::http::StatusCode;
    use db::models::{candidate_fee, center_fee};
    use sea_orm::{EntityTrait, PaginatorTrait};
    use serde_json::json;
    use tower::ServiceExt;

    #[tokio::test]
    async fn populate_rebuilds_fee_ledgers() {
        let (app, state) = make_test_app().await;
        let data = TestData::seed(state.db()).await;

        for name in ["Nakato Sarah", "Achieng Grace"] {
            let response = app
                .clone()
                .oneshot(json_request(
                    "POST",
                    "/api/candidates",
                    data.candidate_body(name, "female", "formal"),
                ))
                .await
                .unwrap();
            let id = body_json(response).await["data"]["id"].as_i64().unwrap();
            let response = app
                .clone()
                .oneshot(json_request(
                    "POST",
                    "/api/enrollments",
                    json!({
                        "candidate_id": id,
                        "assessment_series_id": data.series.id,
                        "occupation_level_id": data.level.id
                    }),
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        // Wipe the ledgers so populate has to rebuild them.
        candidate_fee::Entity::delete_many()
            .exec(state.db())
            .await
            .unwrap();
        center_fee::Entity::delete_many().exec(state.db()).await.unwrap();

        let response = app
            .clone()
            .oneshot(empty_request(
                "POST",
                &format!("/api/fees/populate?series_id={}", data.series.id),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["message"], "Fees populated successfully");
        assert_eq!(json["data"]["candidate_fees"], 2);
        assert_eq!(json["data"]["center_fees"], 1);

        assert_eq!(candidate_fee::Entity::find().count(state.db()).await.unwrap(), 2);
        let center = center_fee::Model::find_for(state.db(), data.center.id, data.series.id)
            .await
            .unwrap()
            .expect("center fee row");
        assert_eq!(center.total_candidates, 2);
        assert_eq!(center.total_amount, 300_000);
        assert_eq!(center.amount_due, 300_000);
    }

    #[tokio::test]
    async fn populate_without_series_covers_everything() {
        let (app, _) = make_test_app().await;

        let response = app
            .oneshot(empty_request("POST", "/api/fees/populate"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["candidate_fees"], 0);
        assert_eq!(json["data"]["center_fees"], 0);
    }
}
