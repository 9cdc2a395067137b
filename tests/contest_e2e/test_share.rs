//! Share tests: logging, public contest links, leaderboard and stats.

use serde_json::json;
use uuid::Uuid;

use super::test_helpers::*;

#[actix_rt::test]
async fn test_share_own_design_returns_contest_link() {
    let env = create_test_env().await;
    let app = create_test_app(&env, fallback_client()).await;
    let p = seed_participant(&app, "SAP123").await;

    let (status, body) = post_json(
        &app,
        "/api/share",
        json!({ "userId": p.user_id, "designId": p.storefront_id(0), "platform": "WhatsApp" }),
    )
    .await;

    assert_eq!(status, 200, "unexpected body: {}", body);
    assert_eq!(body["message"], "Share logged successfully");
    let data = &body["data"];
    let code = data["shareCode"].as_str().unwrap();
    assert_eq!(code.len(), 16);
    assert_eq!(
        data["contestUrl"],
        format!("{}/contest/{}", TEST_PUBLIC_URL, code)
    );
    assert_eq!(
        data["shareContent"]["title"],
        "Check out my Modern Premium façade design!"
    );
    assert_eq!(
        data["shareContent"]["text"],
        format!("I transformed my shop with {}'s AR design app! - Dealer SAP123", TEST_BRAND)
    );
    assert_eq!(data["shareContent"]["hashtags"].as_array().unwrap().len(), 5);
    assert!(
        data["sharingUrls"]["whatsapp"]
            .as_str()
            .unwrap()
            .starts_with("https://wa.me/?text=")
    );
    assert_eq!(data["design"]["designId"], p.storefront_id(0).as_str());
}

#[actix_rt::test]
async fn test_share_foreign_design_is_not_found() {
    let env = create_test_env().await;
    let app = create_test_app(&env, fallback_client()).await;
    let owner = seed_participant(&app, "SAP-OWNER").await;
    let other = seed_participant(&app, "SAP-OTHER").await;

    let (status, body) = post_json(
        &app,
        "/api/share",
        json!({ "userId": other.user_id, "designId": owner.storefront_id(0) }),
    )
    .await;

    assert_eq!(status, 404);
    assert_eq!(body["error"], "NOT_FOUND");
}

#[actix_rt::test]
async fn test_contest_entry_is_public_by_share_code() {
    let env = create_test_env().await;
    let app = create_test_app(&env, fallback_client()).await;
    let p = seed_participant(&app, "SAP123").await;

    let (_, body) = post_json(
        &app,
        "/api/share",
        json!({ "userId": p.user_id, "designId": p.interior_id(0) }),
    )
    .await;
    let code = body["data"]["shareCode"].as_str().unwrap().to_string();

    let (status, body) = get_json(&app, &format!("/api/share/contest/{}", code)).await;
    assert_eq!(status, 200);
    let entry = &body["data"];
    assert_eq!(entry["shareCode"], code.as_str());
    assert_eq!(entry["platform"], "unknown");
    assert_eq!(entry["isContestEntry"], true);
    assert_eq!(entry["design"]["designId"], p.interior_id(0).as_str());
    assert_eq!(entry["originalImage"]["uploadType"], "interior");
    assert_eq!(entry["participant"]["dealershipName"], "Dealer SAP123");

    let (status, _) = get_json(&app, "/api/share/contest/0000000000000000").await;
    assert_eq!(status, 404);
}

#[actix_rt::test]
async fn test_user_shares_filter_by_platform() {
    let env = create_test_env().await;
    let app = create_test_app(&env, fallback_client()).await;
    let p = seed_participant(&app, "SAP123").await;

    for (design, platform) in [
        (p.storefront_id(0), "facebook"),
        (p.storefront_id(1), "whatsapp"),
        (p.storefront_id(0), "Facebook"),
    ] {
        let (status, _) = post_json(
            &app,
            "/api/share",
            json!({ "userId": p.user_id, "designId": design, "platform": platform }),
        )
        .await;
        assert_eq!(status, 200);
    }

    let (status, body) = get_json(&app, &format!("/api/share/user/{}", p.user_id)).await;
    assert_eq!(status, 200);
    let shares = body["data"].as_array().unwrap();
    assert_eq!(shares.len(), 3);
    assert!(shares.iter().all(|s| {
        s["contestUrl"]
            .as_str()
            .unwrap()
            .ends_with(s["shareCode"].as_str().unwrap())
    }));

    let (_, body) = get_json(
        &app,
        &format!("/api/share/user/{}?platform=facebook", p.user_id),
    )
    .await;
    let shares = body["data"].as_array().unwrap();
    assert_eq!(shares.len(), 2);
    assert!(shares.iter().all(|s| s["designType"] == "modern_premium"));

    let (_, body) = get_json(&app, &format!("/api/share/user/{}", Uuid::now_v7())).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[actix_rt::test]
async fn test_share_leaderboard_and_stats() {
    let env = create_test_env().await;
    let app = create_test_app(&env, fallback_client()).await;
    let busy = seed_participant(&app, "SAP-BUSY").await;
    let quiet = seed_participant(&app, "SAP-QUIET").await;

    for (design, platform) in [
        (busy.storefront_id(0), "facebook"),
        (busy.storefront_id(1), "twitter"),
        (busy.interior_id(0), "facebook"),
    ] {
        post_json(
            &app,
            "/api/share",
            json!({ "userId": busy.user_id, "designId": design, "platform": platform }),
        )
        .await;
    }
    post_json(
        &app,
        "/api/share",
        json!({
            "userId": quiet.user_id,
            "designId": quiet.storefront_id(0),
            "platform": "linkedin",
        }),
    )
    .await;

    let (status, body) = get_json(&app, "/api/share/leaderboard").await;
    assert_eq!(status, 200);
    let board = &body["data"];
    assert_eq!(board["totalParticipants"], 2);
    let rows = board["leaderboard"].as_array().unwrap();
    assert_eq!(rows[0]["rank"], 1);
    assert_eq!(rows[0]["userId"], busy.user_id.as_str());
    assert_eq!(rows[0]["totalShares"], 3);
    assert_eq!(rows[0]["uniqueDesigns"], 3);
    assert_eq!(rows[0]["platformsUsed"], 2);
    assert_eq!(rows[0]["dealershipName"], "Dealer SAP-BUSY");
    assert_eq!(rows[1]["userId"], quiet.user_id.as_str());

    let (_, body) = get_json(&app, "/api/share/leaderboard?limit=1").await;
    assert_eq!(body["data"]["leaderboard"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"]["totalParticipants"], 2);

    let (status, body) = get_json(&app, "/api/share/stats").await;
    assert_eq!(status, 200);
    let stats = &body["data"];
    assert_eq!(stats["totalShares"], 4);
    assert_eq!(stats["uniqueUsers"], 2);
    assert_eq!(stats["uniqueDesigns"], 4);
    let platforms = stats["sharesByPlatform"].as_array().unwrap();
    assert_eq!(platforms[0]["platform"], "facebook");
    assert_eq!(platforms[0]["count"], 2);
}

#[actix_rt::test]
async fn test_share_leaderboard_breaks_ties_by_latest_share() {
    let env = create_test_env().await;
    let app = create_test_app(&env, fallback_client()).await;
    let early = seed_participant(&app, "SAP-EARLY").await;
    let late = seed_participant(&app, "SAP-LATE").await;

    for p in [&early, &late] {
        let (status, body) = post_json(
            &app,
            "/api/share",
            json!({ "userId": p.user_id, "designId": p.storefront_id(0), "platform": "whatsapp" }),
        )
        .await;
        assert_eq!(status, 200, "unexpected body: {}", body);
    }

    let (status, body) = get_json(&app, "/api/share/leaderboard").await;
    assert_eq!(status, 200);
    let rows = body["data"]["leaderboard"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["userId"], late.user_id.as_str());
    assert_eq!(rows[0]["rank"], 1);
    assert_eq!(rows[1]["userId"], early.user_id.as_str());
    assert_eq!(rows[1]["rank"], 2);

    let (_, body) = get_json(&app, "/api/share/stats").await;
    let platforms = body["data"]["sharesByPlatform"].as_array().unwrap();
    assert_eq!(platforms.len(), 1);
    assert_eq!(platforms[0]["count"], 2);
}

#[actix_rt::test]
async fn test_health_endpoints() {
    let env = create_test_env().await;
    let app = create_test_app(&env, fallback_client()).await;

    let (status, body) = get_json(&app, "/api/health").await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "healthy");

    let (status, body) = get_json(&app, "/api/ready").await;
    assert_eq!(status, 200);
    assert_eq!(body["database"], "connected");
    assert_eq!(body["storage"], "connected");
}

#[actix_rt::test]
async fn test_ready_reports_missing_storage() {
    let env = create_test_env().await;
    let app = create_test_app(&env, fallback_client()).await;

    std::fs::remove_dir_all(env.root().join("generated")).unwrap();

    let (status, body) = get_json(&app, "/api/ready").await;
    assert_eq!(status, 503);
    assert_eq!(body["status"], "not_ready");
    assert_eq!(body["database"], "connected");
    assert_eq!(body["storage"], "unavailable");
}
