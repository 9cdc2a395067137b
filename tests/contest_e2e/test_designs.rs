//! Design gallery tests: listing, ownership isolation and deletion.

use serde_json::{Value, json};

use super::test_helpers::*;

fn design_count(groups: &Value) -> usize {
    groups
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["designs"].as_array().unwrap().len())
        .sum()
}

#[actix_rt::test]
async fn test_list_groups_designs_by_upload() {
    let env = create_test_env().await;
    let app = create_test_app(&env, fallback_client()).await;
    let p = seed_participant(&app, "SAP123").await;

    let (status, body) = get_json(&app, &format!("/api/designs/{}", p.user_id)).await;

    assert_eq!(status, 200);
    let groups = body["data"].as_array().unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(design_count(&body["data"]), 3);

    let storefront = groups
        .iter()
        .find(|g| g["uploadId"] == p.upload_id.as_str())
        .expect("storefront group");
    assert_eq!(storefront["designs"].as_array().unwrap().len(), 2);
    assert_eq!(storefront["originalImage"]["uploadType"], "storefront");
}

#[actix_rt::test]
async fn test_list_filters() {
    let env = create_test_env().await;
    let app = create_test_app(&env, fallback_client()).await;
    let p = seed_participant(&app, "SAP123").await;

    let (_, body) = get_json(
        &app,
        &format!("/api/designs/{}?isInterior=true", p.user_id),
    )
    .await;
    assert_eq!(design_count(&body["data"]), 1);

    // Legacy alias in the filter resolves to the canonical tag.
    let (status, body) = get_json(
        &app,
        &format!("/api/designs/{}?designType=modern", p.user_id),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(design_count(&body["data"]), 1);
    assert_eq!(body["data"][0]["designs"][0]["designType"], "modern_premium");

    let (_, body) = get_json(
        &app,
        &format!("/api/designs/{}?uploadId={}", p.user_id, p.upload_id),
    )
    .await;
    assert_eq!(design_count(&body["data"]), 2);

    let (status, body) = get_json(
        &app,
        &format!("/api/designs/{}?designType=gothic", p.user_id),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "INVALID_INPUT");
}

#[actix_rt::test]
async fn test_designs_are_isolated_between_users() {
    let env = create_test_env().await;
    let app = create_test_app(&env, fallback_client()).await;
    let owner = seed_participant(&app, "SAP-OWNER").await;
    let other = seed_participant(&app, "SAP-OTHER").await;
    let design_id = owner.storefront_id(0);

    let (_, body) = get_json(&app, &format!("/api/designs/{}", other.user_id)).await;
    let groups = body["data"].as_array().unwrap();
    assert!(groups.iter().all(|g| g["uploadId"] != owner.upload_id.as_str()));

    let (status, _) = get_json(
        &app,
        &format!("/api/designs/detail/{}?userId={}", design_id, other.user_id),
    )
    .await;
    assert_eq!(status, 404);

    let (status, _) = put_json(
        &app,
        &format!("/api/designs/{}/select", design_id),
        json!({ "userId": other.user_id }),
    )
    .await;
    assert_eq!(status, 404);

    let (status, _) = delete(
        &app,
        &format!("/api/designs/{}?userId={}", design_id, other.user_id),
    )
    .await;
    assert_eq!(status, 404);

    // Still there for the owner.
    let (status, body) = get_json(
        &app,
        &format!("/api/designs/detail/{}?userId={}", design_id, owner.user_id),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["design"]["designId"], design_id.as_str());
    assert_eq!(body["data"]["originalImage"]["uploadId"], owner.upload_id.as_str());
}

#[actix_rt::test]
async fn test_select_design() {
    let env = create_test_env().await;
    let app = create_test_app(&env, fallback_client()).await;
    let p = seed_participant(&app, "SAP123").await;

    let (status, body) = put_json(
        &app,
        &format!("/api/designs/{}/select", p.storefront_id(1)),
        json!({ "userId": p.user_id }),
    )
    .await;
    assert_eq!(status, 200, "unexpected body: {}", body);
    assert_eq!(body["message"], "Design selected successfully");
    assert_eq!(body["data"]["selected"], true);
    assert_eq!(body["data"]["isInterior"], false);

    let (status, body) = put_json(
        &app,
        &format!("/api/designs/interior/{}/select", p.interior_id(0)),
        json!({ "userId": p.user_id }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["isInterior"], true);
}

#[actix_rt::test]
async fn test_delete_design_removes_row_and_file() {
    let env = create_test_env().await;
    let app = create_test_app(&env, fallback_client()).await;
    let p = seed_participant(&app, "SAP123").await;
    let design_id = p.storefront_id(1);
    let file_path = p.storefront_designs[1]["filePath"].as_str().unwrap().to_string();
    assert!(env.asset_path(&file_path).exists());

    let (status, body) = delete(
        &app,
        &format!("/api/designs/{}?userId={}", design_id, p.user_id),
    )
    .await;
    assert_eq!(status, 200, "unexpected body: {}", body);
    assert_eq!(body["data"]["deletedDesigns"], 1);
    assert!(!env.asset_path(&file_path).exists());

    let (status, _) = get_json(
        &app,
        &format!("/api/designs/detail/{}?userId={}", design_id, p.user_id),
    )
    .await;
    assert_eq!(status, 404);

    let (status, _) = delete(
        &app,
        &format!("/api/designs/{}?userId={}", design_id, p.user_id),
    )
    .await;
    assert_eq!(status, 404);
}

#[actix_rt::test]
async fn test_delete_storefront_design_removes_interior_work() {
    let env = create_test_env().await;
    let app = create_test_app(&env, fallback_client()).await;
    let p = seed_participant(&app, "SAP123").await;
    let storefront_id = p.storefront_id(0);
    let interior_id = p.interior_id(0);
    let interior_upload = p.interior_designs[0]["uploadId"].as_str().unwrap().to_string();
    let interior_file = p.interior_designs[0]["filePath"].as_str().unwrap().to_string();
    assert!(env.asset_path(&interior_file).exists());

    let (status, body) = delete(
        &app,
        &format!("/api/designs/{}?userId={}", storefront_id, p.user_id),
    )
    .await;
    assert_eq!(status, 200, "unexpected body: {}", body);
    assert_eq!(body["data"]["deletedDesigns"], 2);
    assert!(!env.asset_path(&interior_file).exists());

    let (status, _) = get_json(
        &app,
        &format!("/api/designs/detail/{}?userId={}", interior_id, p.user_id),
    )
    .await;
    assert_eq!(status, 404);

    let (status, _) = post_json(
        &app,
        "/api/generate/interior",
        json!({ "uploadId": interior_upload, "userId": p.user_id }),
    )
    .await;
    assert_eq!(status, 404);

    let (_, body) = get_json(&app, &format!("/api/upload/{}", p.user_id)).await;
    let uploads = body["data"].as_array().unwrap();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0]["uploadId"], p.upload_id.as_str());

    let (_, body) = get_json(&app, &format!("/api/designs/stats/{}", p.user_id)).await;
    assert_eq!(body["data"]["totalDesigns"], 1);
    assert_eq!(body["data"]["interiorDesigns"], 0);
}

#[actix_rt::test]
async fn test_design_stats() {
    let env = create_test_env().await;
    let app = create_test_app(&env, fallback_client()).await;
    let p = seed_participant(&app, "SAP123").await;

    let (status, body) = get_json(&app, &format!("/api/designs/stats/{}", p.user_id)).await;

    assert_eq!(status, 200);
    let stats = &body["data"];
    assert_eq!(stats["totalDesigns"], 3);
    assert_eq!(stats["totalUploads"], 2);
    assert_eq!(stats["storefrontDesigns"], 2);
    assert_eq!(stats["interiorDesigns"], 1);

    let by_type = stats["designsByType"].as_array().unwrap();
    assert_eq!(by_type.len(), 4);
    let count_of = |tag: &str| {
        by_type
            .iter()
            .find(|c| c["designType"] == tag)
            .map(|c| c["count"].as_u64().unwrap())
    };
    assert_eq!(count_of("modern_premium"), Some(1));
    assert_eq!(count_of("festive"), Some(1));
    assert_eq!(count_of("eco_smart"), Some(1));
    assert_eq!(count_of("trust_heritage"), Some(0));
}
