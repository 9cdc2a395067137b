//! Design generation tests: style fan-out, fallback and partial failure.

use std::sync::Arc;

use facade_contest_lib::models::DesignType;
use facade_contest_lib::services::StyleFilterRenderer;
use serde_json::{Value, json};
use uuid::Uuid;

use super::test_helpers::*;

/// Upload a storefront photo for a new user. Returns (user id, upload id).
async fn upload_storefront<S>(app: &S, sap_code: &str, data: &[u8]) -> (String, String)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let info = user_info(sap_code, "Sharma Traders");
    let (status, body) = upload_jpeg(app, &[("userInfo", &info)], data).await;
    assert_eq!(status, 201, "upload failed: {}", body);
    (
        body["data"]["userId"].as_str().unwrap().to_string(),
        body["data"]["uploadId"].as_str().unwrap().to_string(),
    )
}

fn designs(body: &Value) -> &Vec<Value> {
    body["data"]["generatedDesigns"]
        .as_array()
        .expect("generatedDesigns should be an array")
}

#[actix_rt::test]
async fn test_generate_two_styles_for_sap123() {
    let env = create_test_env().await;
    let app = create_test_app(
        &env,
        client_with(Some(Arc::new(TextOnlyGenerator)), Arc::new(StyleFilterRenderer)),
    )
    .await;
    let (user_id, upload_id) = upload_storefront(&app, "SAP123", &jpeg(1024, 768)).await;

    let (status, body) = post_json(
        &app,
        "/api/generate",
        json!({
            "uploadId": upload_id,
            "userId": user_id,
            "designTypes": ["modern_premium", "trust_heritage"],
        }),
    )
    .await;

    assert_eq!(status, 200, "unexpected body: {}", body);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Generated 2 design(s) successfully");
    assert!(body["data"]["originalImage"].as_str().unwrap().starts_with("/uploads/"));

    let generated = designs(&body);
    assert_eq!(generated.len(), 2);
    for design in generated {
        assert_eq!(design["isInterior"], false);
        assert_eq!(design["userId"].as_str().unwrap(), user_id);
        assert!(design["filePath"].as_str().unwrap().starts_with("/generated/"));
        assert_eq!(design["processingStatus"], "completed");
    }

    let modern = generated
        .iter()
        .find(|d| d["designType"] == "modern_premium")
        .expect("modern_premium design");
    assert!(modern["prompt"].as_str().unwrap().contains("premium"));
    assert!(
        generated.iter().any(|d| d["designType"] == "trust_heritage"),
        "trust_heritage design missing"
    );

    let rows = env
        .pool
        .list_designs_for_upload(Uuid::parse_str(&upload_id).unwrap())
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| !r.is_interior));
}

#[actix_rt::test]
async fn test_generate_defaults_to_all_styles() {
    let env = create_test_env().await;
    let app = create_test_app(&env, fallback_client()).await;
    let (user_id, upload_id) = upload_storefront(&app, "SAP1", &jpeg(320, 240)).await;

    let (status, body) = post_json(
        &app,
        "/api/generate",
        json!({ "uploadId": upload_id, "userId": user_id }),
    )
    .await;

    assert_eq!(status, 200, "unexpected body: {}", body);
    let mut types: Vec<&str> = designs(&body)
        .iter()
        .map(|d| d["designType"].as_str().unwrap())
        .collect();
    types.sort_unstable();
    assert_eq!(types, vec!["eco_smart", "festive", "modern_premium", "trust_heritage"]);
}

#[actix_rt::test]
async fn test_legacy_aliases_are_canonicalized_and_deduplicated() {
    let env = create_test_env().await;
    let app = create_test_app(&env, fallback_client()).await;
    let (user_id, upload_id) = upload_storefront(&app, "SAP1", &jpeg(320, 240)).await;

    let (status, body) = post_json(
        &app,
        "/api/generate",
        json!({
            "uploadId": upload_id,
            "userId": user_id,
            "designTypes": ["modern", "modern_premium", "classical"],
        }),
    )
    .await;

    assert_eq!(status, 200, "unexpected body: {}", body);
    let generated = designs(&body);
    assert_eq!(generated.len(), 2);
    assert!(generated.iter().any(|d| d["designType"] == "modern_premium"));
    assert!(generated.iter().any(|d| d["designType"] == "trust_heritage"));
}

#[actix_rt::test]
async fn test_unknown_style_is_rejected() {
    let env = create_test_env().await;
    let app = create_test_app(&env, fallback_client()).await;
    let (user_id, upload_id) = upload_storefront(&app, "SAP1", &jpeg(320, 240)).await;

    let (status, body) = post_json(
        &app,
        "/api/generate",
        json!({ "uploadId": upload_id, "userId": user_id, "designTypes": ["baroque"] }),
    )
    .await;

    assert_eq!(status, 400);
    assert_eq!(body["error"], "INVALID_INPUT");
}

#[actix_rt::test]
async fn test_one_failing_style_does_not_sink_the_others() {
    let env = create_test_env().await;
    let app = create_test_app(
        &env,
        client_with(
            Some(Arc::new(OfflineGenerator)),
            Arc::new(SelectiveFallback(vec![DesignType::Festive])),
        ),
    )
    .await;
    let (user_id, upload_id) = upload_storefront(&app, "SAP1", &jpeg(320, 240)).await;

    let (status, body) = post_json(
        &app,
        "/api/generate",
        json!({ "uploadId": upload_id, "userId": user_id }),
    )
    .await;

    assert_eq!(status, 200, "unexpected body: {}", body);
    let generated = designs(&body);
    assert_eq!(generated.len(), 3);
    assert!(generated.iter().all(|d| d["designType"] != "festive"));

    let rows = env
        .pool
        .list_designs_for_upload(Uuid::parse_str(&upload_id).unwrap())
        .await
        .unwrap();
    assert_eq!(rows.len(), 3);
}

#[actix_rt::test]
async fn test_every_style_failing_returns_error_and_stores_nothing() {
    let env = create_test_env().await;
    let app = create_test_app(
        &env,
        client_with(
            Some(Arc::new(OfflineGenerator)),
            Arc::new(SelectiveFallback(DesignType::ALL.to_vec())),
        ),
    )
    .await;
    let (user_id, upload_id) = upload_storefront(&app, "SAP1", &jpeg(320, 240)).await;

    let (status, body) = post_json(
        &app,
        "/api/generate",
        json!({ "uploadId": upload_id, "userId": user_id }),
    )
    .await;

    assert_eq!(status, 500);
    assert_eq!(body["error"], "GENERATION_FAILED");

    let rows = env
        .pool
        .list_designs_for_upload(Uuid::parse_str(&upload_id).unwrap())
        .await
        .unwrap();
    assert!(rows.is_empty());

    let generated_dir = env.root().join("generated");
    assert_eq!(std::fs::read_dir(generated_dir).unwrap().count(), 0);
}

#[actix_rt::test]
async fn test_generative_image_is_stored_unchanged() {
    let env = create_test_env().await;
    let rendered = photo(256, 192, image::ImageFormat::Png);
    let app = create_test_app(
        &env,
        client_with(
            Some(Arc::new(FixedImageGenerator(rendered.clone()))),
            Arc::new(StyleFilterRenderer),
        ),
    )
    .await;
    let (user_id, upload_id) = upload_storefront(&app, "SAP1", &jpeg(320, 240)).await;

    let (status, body) = post_json(
        &app,
        "/api/generate",
        json!({ "uploadId": upload_id, "userId": user_id, "designTypes": ["eco_smart"] }),
    )
    .await;
    assert_eq!(status, 200, "unexpected body: {}", body);

    let design = &designs(&body)[0];
    let file_path = design["filePath"].as_str().unwrap();
    assert!(file_path.ends_with(".png"));
    assert_eq!(design["width"], 256);
    assert_eq!(design["height"], 192);

    let (status, served) = get_bytes(&app, file_path).await;
    assert_eq!(status, 200);
    assert_eq!(served, rendered);
}

#[actix_rt::test]
async fn test_fallback_output_is_deterministic() {
    let env = create_test_env().await;
    let app = create_test_app(&env, fallback_client()).await;
    let source = jpeg(320, 240);

    let mut outputs = Vec::new();
    for sap in ["SAP-A", "SAP-B"] {
        let (user_id, upload_id) = upload_storefront(&app, sap, &source).await;
        let (status, body) = post_json(
            &app,
            "/api/generate",
            json!({ "uploadId": upload_id, "userId": user_id, "designTypes": ["festive"] }),
        )
        .await;
        assert_eq!(status, 200, "unexpected body: {}", body);

        let file_path = designs(&body)[0]["filePath"].as_str().unwrap().to_string();
        outputs.push(std::fs::read(env.asset_path(&file_path)).unwrap());
    }

    assert_eq!(outputs[0], outputs[1]);
    assert_ne!(outputs[0], source);
}

#[actix_rt::test]
async fn test_generate_for_someone_elses_upload_is_not_found() {
    let env = create_test_env().await;
    let app = create_test_app(&env, fallback_client()).await;
    let (_, upload_id) = upload_storefront(&app, "SAP-OWNER", &jpeg(320, 240)).await;
    let (intruder, _) = upload_storefront(&app, "SAP-OTHER", &jpeg(320, 240)).await;

    let (status, body) = post_json(
        &app,
        "/api/generate",
        json!({ "uploadId": upload_id, "userId": intruder }),
    )
    .await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "NOT_FOUND");

    let (status, _) = post_json(&app, "/api/generate", json!({ "uploadId": upload_id })).await;
    assert_eq!(status, 404);

    let (status, _) = post_json(
        &app,
        "/api/generate",
        json!({ "uploadId": Uuid::now_v7(), "userId": intruder }),
    )
    .await;
    assert_eq!(status, 404);
}

#[actix_rt::test]
async fn test_anonymous_upload_can_be_generated() {
    let env = create_test_env().await;
    let app = create_test_app(&env, fallback_client()).await;
    let (_, body) = upload_jpeg(&app, &[], &jpeg(320, 240)).await;
    let upload_id = body["data"]["uploadId"].as_str().unwrap();

    let (status, body) = post_json(
        &app,
        "/api/generate",
        json!({ "uploadId": upload_id, "designTypes": ["eco_smart"] }),
    )
    .await;

    assert_eq!(status, 200, "unexpected body: {}", body);
    assert!(designs(&body)[0]["userId"].is_null());
}

#[actix_rt::test]
async fn test_interior_generation_follows_storefront_style() {
    let env = create_test_env().await;
    let app = create_test_app(&env, fallback_client()).await;
    let p = seed_participant(&app, "SAP123").await;

    assert_eq!(p.interior_designs.len(), 1);
    let interior = &p.interior_designs[0];
    assert_eq!(interior["isInterior"], true);
    assert_eq!(interior["designType"], "eco_smart");
    assert_eq!(
        interior["storefrontDesignId"].as_str().unwrap(),
        p.storefront_id(0)
    );

    let storefront_label = match p.storefront_designs[0]["designType"].as_str().unwrap() {
        "modern_premium" => "Modern Premium",
        "festive" => "Festive",
        other => panic!("unexpected storefront style {}", other),
    };
    let prompt = interior["prompt"].as_str().unwrap();
    assert!(prompt.contains(&format!("{} storefront design", storefront_label)));
}

#[actix_rt::test]
async fn test_generation_endpoint_must_match_upload_kind() {
    let env = create_test_env().await;
    let app = create_test_app(&env, fallback_client()).await;
    let p = seed_participant(&app, "SAP123").await;

    let (status, body) = post_json(
        &app,
        "/api/generate/interior",
        json!({ "uploadId": p.upload_id, "userId": p.user_id }),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "INVALID_INPUT");
    let message = body["message"].as_str().unwrap();
    assert!(message.ends_with("holds storefront photos; use /generate"), "{}", message);

    let interior_upload = p.interior_designs[0]["uploadId"].as_str().unwrap();
    let (status, body) = post_json(
        &app,
        "/api/generate",
        json!({ "uploadId": interior_upload, "userId": p.user_id }),
    )
    .await;
    assert_eq!(status, 400);
    let message = body["message"].as_str().unwrap();
    assert!(message.ends_with("holds interior photos; use /generate/interior"), "{}", message);
}

#[actix_rt::test]
async fn test_generate_single_and_status() {
    let env = create_test_env().await;
    let app = create_test_app(&env, fallback_client()).await;
    let (user_id, upload_id) = upload_storefront(&app, "SAP1", &jpeg(320, 240)).await;

    let status_uri = format!("/api/generate/status/{}?userId={}", upload_id, user_id);
    let (status, body) = get_json(&app, &status_uri).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["completedDesigns"], 0);
    assert_eq!(body["data"]["totalDesigns"], 4);
    assert_eq!(body["data"]["isComplete"], false);

    let (status, body) = post_json(
        &app,
        "/api/generate/single",
        json!({ "uploadId": upload_id, "userId": user_id, "designType": "trust_heritage" }),
    )
    .await;
    assert_eq!(status, 200, "unexpected body: {}", body);
    assert_eq!(body["data"]["designType"], "trust_heritage");

    let (_, body) = get_json(&app, &status_uri).await;
    assert_eq!(body["data"]["completedDesigns"], 1);
    assert_eq!(body["data"]["designs"].as_array().unwrap().len(), 1);

    let (status, _) = post_json(
        &app,
        "/api/generate",
        json!({
            "uploadId": upload_id,
            "userId": user_id,
            "designTypes": ["modern_premium", "eco_smart", "festive"],
        }),
    )
    .await;
    assert_eq!(status, 200);

    let (_, body) = get_json(&app, &status_uri).await;
    assert_eq!(body["data"]["completedDesigns"], 4);
    assert_eq!(body["data"]["isComplete"], true);
}
