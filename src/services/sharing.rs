//! Social share log, share links and the public contest-entry view.

use std::collections::{HashMap, HashSet};

use tracing::{info, warn};
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{
    ContestEntryView, DesignSummary, DesignType, Participant, PlatformCount, ShareContent,
    ShareLeaderboard, ShareLeaderboardEntry, ShareRequest, ShareResponse, ShareStats,
    SharingUrls, UploadSummary, UserShare, UserSharesQuery,
};

pub const HASHTAGS: [&str; 5] = [
    "JKLakshmi",
    "FacadeDesign",
    "ARDesign",
    "CementDesign",
    "ShopMakeover",
];

const DEFAULT_PLATFORM: &str = "unknown";
const MAX_PLATFORM_LEN: usize = 32;
const CODE_ATTEMPTS: usize = 3;

/// Public site details used to build share links.
#[derive(Debug, Clone)]
pub struct ContestSite {
    /// Frontend base URL
    pub public_url: String,
    pub brand_name: String,
}

impl ContestSite {
    /// Public URL of a shared entry.
    pub fn contest_url(&self, share_code: &str) -> String {
        contest_url(&self.public_url, share_code)
    }
}

/// Opaque share token: 16 lowercase hex chars.
pub fn generate_share_code() -> String {
    hex::encode(rand::random::<[u8; 8]>())
}

/// Public URL of a shared entry.
pub fn contest_url(public_url: &str, share_code: &str) -> String {
    format!("{}/contest/{}", public_url.trim_end_matches('/'), share_code)
}

fn normalize_platform(platform: Option<&str>) -> String {
    let platform = platform.map(str::trim).unwrap_or_default().to_lowercase();
    if platform.is_empty() {
        DEFAULT_PLATFORM.to_string()
    } else {
        platform.chars().take(MAX_PLATFORM_LEN).collect()
    }
}

/// Message for a shared design.
pub fn share_content(
    design_type: &str,
    dealership_name: Option<&str>,
    brand: &str,
    url: &str,
) -> ShareContent {
    let style = DesignType::parse(design_type)
        .map(|t| t.label().to_string())
        .unwrap_or_else(|| design_type.replace('_', " "));

    let mut text = format!("I transformed my shop with {}'s AR design app!", brand);
    if let Some(name) = dealership_name {
        text.push_str(" - ");
        text.push_str(name);
    }

    ShareContent {
        title: format!("Check out my {} façade design!", style),
        text,
        url: url.to_string(),
        hashtags: HASHTAGS.iter().map(|h| h.to_string()).collect(),
    }
}

/// Per-platform share links for `content`.
pub fn sharing_urls(content: &ShareContent) -> SharingUrls {
    let url = urlencoding::encode(&content.url);
    let text = urlencoding::encode(&content.text);

    SharingUrls {
        facebook: format!(
            "https://www.facebook.com/sharer/sharer.php?u={}&quote={}",
            url, text
        ),
        twitter: format!(
            "https://twitter.com/intent/tweet?text={}&url={}&hashtags={}",
            text,
            url,
            content.hashtags.join(",")
        ),
        whatsapp: format!(
            "https://wa.me/?text={}",
            urlencoding::encode(&format!("{} {}", content.text, content.url))
        ),
        linkedin: format!(
            "https://www.linkedin.com/sharing/share-offsite/?url={}",
            url
        ),
        telegram: format!("https://t.me/share/url?url={}&text={}", url, text),
    }
}

/// Log a share of one of the user's designs and build the links.
pub async fn log_share(
    db: &DbPool,
    site: &ContestSite,
    req: ShareRequest,
) -> AppResult<ShareResponse> {
    let design = db
        .get_design_for_user(req.design_id, req.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Design".to_string()))?;
    let user = db.get_user_by_id(req.user_id).await?;
    let platform = normalize_platform(req.platform.as_deref());

    let mut attempt = 0;
    let share = loop {
        attempt += 1;
        let code = generate_share_code();
        match db.insert_share(req.user_id, design.id, &platform, &code).await {
            Ok(share) => break share,
            Err(AppError::Conflict(msg)) if attempt < CODE_ATTEMPTS => {
                warn!(attempt, error = %msg, "Share code collision, retrying");
            }
            Err(e) => return Err(e),
        }
    };

    let url = site.contest_url(&share.share_code);
    let content = share_content(
        &design.design_type,
        user.as_ref().and_then(|u| u.dealership_name.as_deref()),
        &site.brand_name,
        &url,
    );

    info!(
        share_id = %share.id,
        user_id = %share.user_id,
        design_id = %share.design_id,
        platform = %share.share_platform,
        "Share logged"
    );

    Ok(ShareResponse {
        share_id: share.id,
        share_code: share.share_code,
        contest_url: url,
        sharing_urls: sharing_urls(&content),
        share_content: content,
        design: DesignSummary::from(design),
    })
}

/// Public view of a shared entry. The share code is the capability.
pub async fn contest_entry(db: &DbPool, share_code: &str) -> AppResult<ContestEntryView> {
    let share = db
        .get_share_by_code(share_code)
        .await?
        .ok_or_else(|| AppError::NotFound("Contest entry".to_string()))?;

    let design = db
        .get_design(share.design_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Contest entry".to_string()))?;
    let upload = db.get_upload(design.upload_id).await?;
    let user = db.get_user_by_id(share.user_id).await?;

    Ok(ContestEntryView {
        share_code: share.share_code,
        platform: share.share_platform,
        shared_at: share.shared_at,
        is_contest_entry: share.contest_entry,
        design: DesignSummary::from(design),
        original_image: upload.map(UploadSummary::from),
        participant: Participant {
            dealership_name: user.and_then(|u| u.dealership_name),
        },
    })
}

/// A user's shares, newest first.
pub async fn user_shares(
    db: &DbPool,
    site: &ContestSite,
    user_id: Uuid,
    query: &UserSharesQuery,
) -> AppResult<Vec<UserShare>> {
    let platform = query.platform.as_deref().map(|p| normalize_platform(Some(p)));
    let shares = db
        .list_shares_for_user(user_id, platform.as_deref(), query.contest_only)
        .await?;

    let design_ids: Vec<Uuid> = shares
        .iter()
        .map(|s| s.design_id)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    let designs: HashMap<Uuid, _> = db
        .get_designs_by_ids(design_ids)
        .await?
        .into_iter()
        .map(|d| (d.id, d))
        .collect();

    Ok(shares
        .into_iter()
        .map(|s| {
            let design = designs.get(&s.design_id);
            UserShare {
                contest_url: site.contest_url(&s.share_code),
                design_type: design.map(|d| {
                    DesignType::parse(&d.design_type)
                        .map(|t| t.as_str().to_string())
                        .unwrap_or_else(|| d.design_type.clone())
                }),
                file_path: design.map(|d| d.stored_path.clone()),
                share_id: s.id,
                share_code: s.share_code,
                design_id: s.design_id,
                platform: s.share_platform,
                shared_at: s.shared_at,
                is_contest_entry: s.contest_entry,
            }
        })
        .collect())
}

/// Users ranked by contest-entry share count.
pub async fn leaderboard(db: &DbPool, limit: Option<usize>) -> AppResult<ShareLeaderboard> {
    let limit = limit.unwrap_or(50).clamp(1, 500);
    let top = db.rank_share_participants(limit as u64).await?;
    let total_participants = db.count_share_participants().await? as usize;

    let names: HashMap<Uuid, Option<String>> = db
        .get_users_by_ids(top.iter().map(|p| p.user_id).collect())
        .await?
        .into_iter()
        .map(|u| (u.id, u.dealership_name))
        .collect();

    let leaderboard = top
        .into_iter()
        .enumerate()
        .map(|(i, p)| ShareLeaderboardEntry {
            rank: i + 1,
            dealership_name: names.get(&p.user_id).cloned().flatten(),
            user_id: p.user_id,
            total_shares: p.total_shares as u64,
            unique_designs: p.unique_designs as u64,
            platforms_used: p.platforms_used as u64,
            latest_share: p.latest_share,
        })
        .collect();

    Ok(ShareLeaderboard {
        leaderboard,
        total_participants,
    })
}

/// Overall contest-entry share statistics.
pub async fn stats(db: &DbPool) -> AppResult<ShareStats> {
    let totals = db.share_totals().await?;
    let shares_by_platform = db
        .shares_by_platform()
        .await?
        .into_iter()
        .map(|p| PlatformCount {
            platform: p.platform,
            count: p.count as u64,
        })
        .collect();

    Ok(ShareStats {
        total_shares: totals.total_shares as u64,
        unique_users: totals.unique_users as u64,
        unique_designs: totals.unique_designs as u64,
        shares_by_platform,
    })
}
