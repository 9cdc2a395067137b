//! Photo upload tests: validation, user dedup and stored bytes.

use facade_contest_lib::config::UploadSettings;
use serde_json::Value;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_storefront_upload_registers_user_and_stores_photo() {
    let env = create_test_env().await;
    let app = create_test_app(&env, fallback_client()).await;
    let photo = jpeg(1024, 768);

    let info = user_info("SAP123", "Sharma Traders");
    let (status, body) = upload_jpeg(&app, &[("userInfo", &info)], &photo).await;

    assert_eq!(status, 201, "unexpected body: {}", body);
    assert_eq!(body["success"], true);
    let data = &body["data"];
    assert!(data["userId"].is_string());
    assert_eq!(data["width"], 1024);
    assert_eq!(data["height"], 768);
    assert_eq!(data["mimeType"], "image/jpeg");
    assert_eq!(data["uploadType"], "storefront");
    assert_eq!(data["originalName"], "shop.jpg");

    let file_path = data["filePath"].as_str().unwrap();
    assert!(file_path.starts_with("/uploads/"), "got {}", file_path);
    assert!(file_path.ends_with(".jpg"));

    let (status, served) = get_bytes(&app, file_path).await;
    assert_eq!(status, 200);
    assert_eq!(served, photo, "served photo must match the upload byte for byte");
}

#[actix_rt::test]
async fn test_same_sap_code_reuses_one_user() {
    let env = create_test_env().await;
    let app = create_test_app(&env, fallback_client()).await;

    let first = user_info("SAP123", "Sharma Traders");
    let (_, a) = upload_jpeg(&app, &[("userInfo", &first)], &jpeg(200, 150)).await;
    let second = user_info("SAP123", "Sharma Cement House");
    let (_, b) = upload_jpeg(&app, &[("userInfo", &second)], &jpeg(200, 150)).await;

    assert_eq!(a["data"]["userId"], b["data"]["userId"]);
    assert_ne!(a["data"]["uploadId"], b["data"]["uploadId"]);
    assert_eq!(env.pool.count_users().await.unwrap(), 1);

    let user = env
        .pool
        .find_user_by_sap_code("SAP123")
        .await
        .unwrap()
        .expect("user should exist");
    assert_eq!(user.dealership_name.as_deref(), Some("Sharma Cement House"));
}

#[actix_rt::test]
async fn test_anonymous_upload_has_no_owner() {
    let env = create_test_env().await;
    let app = create_test_app(&env, fallback_client()).await;

    let (status, body) = upload_jpeg(&app, &[], &jpeg(200, 150)).await;

    assert_eq!(status, 201);
    assert!(body["data"]["userId"].is_null());
    assert_eq!(env.pool.count_users().await.unwrap(), 0);
}

#[actix_rt::test]
async fn test_upload_without_image_is_rejected() {
    let env = create_test_env().await;
    let app = create_test_app(&env, fallback_client()).await;

    let (status, body) = post_multipart(&app, "/api/upload", &[("userId", "x")], None).await;

    assert_eq!(status, 400);
    assert_eq!(body["error"], "INVALID_INPUT");
}

#[actix_rt::test]
async fn test_upload_rejects_undecodable_bytes() {
    let env = create_test_env().await;
    let app = create_test_app(&env, fallback_client()).await;

    let (status, body) = upload_jpeg(&app, &[], b"definitely not a jpeg").await;

    assert_eq!(status, 400);
    assert_eq!(body["error"], "INVALID_IMAGE");
}

#[actix_rt::test]
async fn test_upload_rejects_disallowed_type() {
    let env = create_test_env().await;
    let app = create_test_app(&env, fallback_client()).await;

    let data = photo(64, 64, image::ImageFormat::Png);
    let (status, body) = post_multipart(
        &app,
        "/api/upload",
        &[],
        Some(FilePart {
            filename: "anim.gif",
            content_type: "image/gif",
            data: &data,
        }),
    )
    .await;

    assert_eq!(status, 400);
    assert_eq!(body["error"], "INVALID_INPUT");
}

#[actix_rt::test]
async fn test_upload_rejects_oversized_file() {
    let env = create_test_env().await;
    let limits = UploadSettings {
        max_upload_size: 1024 * 1024,
        ..test_upload_settings()
    };
    let app = create_test_app_with_limits(&env, fallback_client(), limits).await;

    let data = vec![0xAB; 1024 * 1024 + 1];
    let (status, body) = upload_jpeg(&app, &[], &data).await;

    assert_eq!(status, 400);
    assert_eq!(body["error"], "FILE_TOO_LARGE");
    assert!(body["message"].as_str().unwrap().contains("1MB"));
}

#[actix_rt::test]
async fn test_png_upload_keeps_png_extension() {
    let env = create_test_env().await;
    let app = create_test_app(&env, fallback_client()).await;

    let data = photo(120, 80, image::ImageFormat::Png);
    let (status, body) = post_multipart(
        &app,
        "/api/upload",
        &[],
        Some(FilePart {
            filename: "shop.png",
            content_type: "image/png",
            data: &data,
        }),
    )
    .await;

    assert_eq!(status, 201);
    assert_eq!(body["data"]["mimeType"], "image/png");
    assert!(body["data"]["filePath"].as_str().unwrap().ends_with(".png"));
}

#[actix_rt::test]
async fn test_interior_upload_requires_own_storefront_design() {
    let env = create_test_env().await;
    let app = create_test_app(&env, fallback_client()).await;

    let owner = seed_participant(&app, "SAP-OWNER").await;
    let other = seed_participant(&app, "SAP-OTHER").await;
    let foreign_design = other.storefront_id(0);

    let (status, body) = post_multipart(
        &app,
        "/api/upload/interior",
        &[
            ("userId", &owner.user_id),
            ("storefrontDesignId", &foreign_design),
        ],
        Some(FilePart {
            filename: "inside.jpg",
            content_type: "image/jpeg",
            data: &jpeg(200, 150),
        }),
    )
    .await;
    assert_eq!(status, 403, "unexpected body: {}", body);
    assert_eq!(body["error"], "FORBIDDEN");

    // An interior design cannot anchor another interior photo.
    let interior = owner.interior_id(0);
    let (status, _) = post_multipart(
        &app,
        "/api/upload/interior",
        &[("userId", &owner.user_id), ("storefrontDesignId", &interior)],
        Some(FilePart {
            filename: "inside.jpg",
            content_type: "image/jpeg",
            data: &jpeg(200, 150),
        }),
    )
    .await;
    assert_eq!(status, 403);
}

#[actix_rt::test]
async fn test_interior_upload_requires_ids() {
    let env = create_test_env().await;
    let app = create_test_app(&env, fallback_client()).await;

    let (status, body) = post_multipart(
        &app,
        "/api/upload/interior",
        &[],
        Some(FilePart {
            filename: "inside.jpg",
            content_type: "image/jpeg",
            data: &jpeg(200, 150),
        }),
    )
    .await;

    assert_eq!(status, 400);
    assert_eq!(body["error"], "INVALID_INPUT");
}

#[actix_rt::test]
async fn test_interior_upload_links_storefront_design() {
    let env = create_test_env().await;
    let app = create_test_app(&env, fallback_client()).await;
    let p = seed_participant(&app, "SAP123").await;

    let (status, body) = get_json(&app, &format!("/api/upload/{}", p.user_id)).await;
    assert_eq!(status, 200);

    let uploads = body["data"].as_array().unwrap();
    assert_eq!(uploads.len(), 2);
    let interior: Vec<&Value> = uploads
        .iter()
        .filter(|u| u["uploadType"] == "interior")
        .collect();
    assert_eq!(interior.len(), 1);
    assert_eq!(
        interior[0]["storefrontDesignId"].as_str().unwrap(),
        p.storefront_id(0)
    );
}

#[actix_rt::test]
async fn test_delete_upload_is_owner_only_and_removes_files() {
    let env = create_test_env().await;
    let app = create_test_app(&env, fallback_client()).await;
    let owner = seed_participant(&app, "SAP-OWNER").await;
    let other = seed_participant(&app, "SAP-OTHER").await;

    let design_path = owner.storefront_designs[0]["filePath"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(env.asset_path(&design_path).exists());

    let (status, _) = delete(
        &app,
        &format!("/api/upload/{}?userId={}", owner.upload_id, other.user_id),
    )
    .await;
    assert_eq!(status, 404);
    assert!(env.asset_path(&design_path).exists());

    let (status, body) = delete(
        &app,
        &format!("/api/upload/{}?userId={}", owner.upload_id, owner.user_id),
    )
    .await;
    assert_eq!(status, 200, "unexpected body: {}", body);
    // Two storefront designs plus the interior design built on one of them.
    assert_eq!(body["data"]["deletedDesigns"], 3);
    assert!(!env.asset_path(&design_path).exists());
    let interior_path = owner.interior_designs[0]["filePath"].as_str().unwrap();
    assert!(!env.asset_path(interior_path).exists());

    let (_, body) = get_json(&app, &format!("/api/upload/{}", owner.user_id)).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}
