//! Contest submission tests: pair validation, overwrite and public views.

use serde_json::json;
use uuid::Uuid;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_submit_valid_pair() {
    let env = create_test_env().await;
    let app = create_test_app(&env, fallback_client()).await;
    let p = seed_participant(&app, "SAP123").await;

    let (status, body) = post_json(
        &app,
        "/api/contest/submit",
        json!({
            "userId": p.user_id,
            "storefrontDesignId": p.storefront_id(0),
            "interiorDesignId": p.interior_id(0),
        }),
    )
    .await;

    assert_eq!(status, 200, "unexpected body: {}", body);
    assert_eq!(body["message"], "Contest entry submitted successfully");
    let data = &body["data"];
    assert!(data["submissionId"].as_str().unwrap().starts_with("JK-"));
    assert_eq!(data["status"], "submitted");
    assert_eq!(data["storefrontDesign"]["designId"], p.storefront_id(0).as_str());
    assert_eq!(data["interiorDesign"]["designType"], "eco_smart");
    // Contact details come from the stored profile when omitted.
    assert_eq!(data["sapCode"], "SAP123");
    assert_eq!(data["dealershipName"], "Dealer SAP123");
    assert_eq!(data["mobileNumber"], "+91 98765 43210");
}

#[actix_rt::test]
async fn test_submit_rejects_swapped_or_foreign_designs() {
    let env = create_test_env().await;
    let app = create_test_app(&env, fallback_client()).await;
    let owner = seed_participant(&app, "SAP-OWNER").await;
    let other = seed_participant(&app, "SAP-OTHER").await;

    // Storefront and interior swapped.
    let (status, body) = post_json(
        &app,
        "/api/contest/submit",
        json!({
            "userId": owner.user_id,
            "storefrontDesignId": owner.interior_id(0),
            "interiorDesignId": owner.storefront_id(0),
        }),
    )
    .await;
    assert_eq!(status, 403);
    assert_eq!(body["error"], "FORBIDDEN");

    // Two storefront designs.
    let (status, _) = post_json(
        &app,
        "/api/contest/submit",
        json!({
            "userId": owner.user_id,
            "storefrontDesignId": owner.storefront_id(0),
            "interiorDesignId": owner.storefront_id(1),
        }),
    )
    .await;
    assert_eq!(status, 403);

    // Someone else's interior design.
    let (status, _) = post_json(
        &app,
        "/api/contest/submit",
        json!({
            "userId": owner.user_id,
            "storefrontDesignId": owner.storefront_id(0),
            "interiorDesignId": other.interior_id(0),
        }),
    )
    .await;
    assert_eq!(status, 403);

    let owner_id = Uuid::parse_str(&owner.user_id).unwrap();
    assert_eq!(env.pool.count_submissions_for_user(owner_id).await.unwrap(), 0);
}

#[actix_rt::test]
async fn test_submit_requires_ids() {
    let env = create_test_env().await;
    let app = create_test_app(&env, fallback_client()).await;

    let (status, body) = post_json(
        &app,
        "/api/contest/submit",
        json!({ "userId": Uuid::now_v7() }),
    )
    .await;

    assert_eq!(status, 400);
    assert_eq!(body["error"], "INVALID_INPUT");
}

#[actix_rt::test]
async fn test_resubmission_overwrites_previous_entry() {
    let env = create_test_env().await;
    let app = create_test_app(&env, fallback_client()).await;
    let p = seed_participant(&app, "SAP123").await;

    let (_, first) = post_json(
        &app,
        "/api/contest/submit",
        json!({
            "userId": p.user_id,
            "storefrontDesignId": p.storefront_id(0),
            "interiorDesignId": p.interior_id(0),
        }),
    )
    .await;
    let (status, second) = post_json(
        &app,
        "/api/contest/submit",
        json!({
            "userId": p.user_id,
            "storefrontDesignId": p.storefront_id(1),
            "interiorDesignId": p.interior_id(0),
            "dealershipName": "Sharma Cement House",
        }),
    )
    .await;
    assert_eq!(status, 200, "unexpected body: {}", second);

    let first_code = first["data"]["submissionId"].as_str().unwrap();
    let second_code = second["data"]["submissionId"].as_str().unwrap();
    assert_ne!(first_code, second_code);

    let user_id = Uuid::parse_str(&p.user_id).unwrap();
    assert_eq!(env.pool.count_submissions_for_user(user_id).await.unwrap(), 1);

    let (status, body) = get_json(&app, &format!("/api/contest/submissions/{}", p.user_id)).await;
    assert_eq!(status, 200);
    let entries = body["data"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["submissionId"], second_code);
    assert_eq!(entries[0]["storefrontDesign"]["designId"], p.storefront_id(1).as_str());
    assert_eq!(entries[0]["dealershipName"], "Sharma Cement House");

    let (status, _) = get_json(&app, &format!("/api/contest/submission/{}", first_code)).await;
    assert_eq!(status, 404);
}

#[actix_rt::test]
async fn test_check_submission_matches_exact_pair() {
    let env = create_test_env().await;
    let app = create_test_app(&env, fallback_client()).await;
    let p = seed_participant(&app, "SAP123").await;

    let check_uri = |storefront: &str| {
        format!(
            "/api/contest/check-submission?userId={}&storefrontDesignId={}&interiorDesignId={}",
            p.user_id,
            storefront,
            p.interior_id(0)
        )
    };

    let (status, body) = get_json(&app, &check_uri(&p.storefront_id(0))).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["hasSubmission"], false);
    assert!(body["data"]["submission"].is_null());

    post_json(
        &app,
        "/api/contest/submit",
        json!({
            "userId": p.user_id,
            "storefrontDesignId": p.storefront_id(0),
            "interiorDesignId": p.interior_id(0),
        }),
    )
    .await;

    let (_, body) = get_json(&app, &check_uri(&p.storefront_id(0))).await;
    assert_eq!(body["data"]["hasSubmission"], true);
    assert!(body["data"]["submission"]["submissionId"].as_str().unwrap().starts_with("JK-"));

    let (_, body) = get_json(&app, &check_uri(&p.storefront_id(1))).await;
    assert_eq!(body["data"]["hasSubmission"], false);

    let (status, _) = get_json(&app, "/api/contest/check-submission?userId=abc").await;
    assert_eq!(status, 400);
}

#[actix_rt::test]
async fn test_public_submission_view_hides_mobile_number() {
    let env = create_test_env().await;
    let app = create_test_app(&env, fallback_client()).await;
    let p = seed_participant(&app, "SAP123").await;

    let (_, body) = post_json(
        &app,
        "/api/contest/submit",
        json!({
            "userId": p.user_id,
            "storefrontDesignId": p.storefront_id(0),
            "interiorDesignId": p.interior_id(0),
        }),
    )
    .await;
    let code = body["data"]["submissionId"].as_str().unwrap();

    let (status, body) = get_json(&app, &format!("/api/contest/submission/{}", code)).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["submissionId"], code);
    assert_eq!(body["data"]["sapCode"], "SAP123");
    assert!(body["data"]["mobileNumber"].is_null());

    let (status, body) = get_json(&app, "/api/contest/submission/JK-0-DEADBEEF").await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "NOT_FOUND");
}

#[actix_rt::test]
async fn test_leaderboard_lists_latest_first() {
    let env = create_test_env().await;
    let app = create_test_app(&env, fallback_client()).await;

    for sap in ["SAP-1", "SAP-2"] {
        let p = seed_participant(&app, sap).await;
        let (status, _) = post_json(
            &app,
            "/api/contest/submit",
            json!({
                "userId": p.user_id,
                "storefrontDesignId": p.storefront_id(0),
                "interiorDesignId": p.interior_id(0),
            }),
        )
        .await;
        assert_eq!(status, 200);
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let (status, body) = get_json(&app, "/api/contest/leaderboard").await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["totalSubmissions"], 2);
    let entries = body["data"]["submissions"].as_array().unwrap();
    assert_eq!(entries[0]["sapCode"], "SAP-2");
    assert_eq!(entries[1]["sapCode"], "SAP-1");
    assert_eq!(entries[0]["storefrontDesignType"], "modern_premium");
    assert_eq!(entries[0]["interiorDesignType"], "eco_smart");

    let (_, body) = get_json(&app, "/api/contest/leaderboard?limit=1").await;
    assert_eq!(body["data"]["submissions"].as_array().unwrap().len(), 1);

    let (_, body) = get_json(&app, "/api/contest/leaderboard?status=approved").await;
    assert_eq!(body["data"]["totalSubmissions"], 0);
}
