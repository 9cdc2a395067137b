//! Read side of a user's designs: grouped listing, detail, stats, selection.
//!
//! Every lookup is scoped to the requesting user. A design owned by someone
//! else is indistinguishable from a missing one.

use std::collections::HashMap;

use uuid::Uuid;

use crate::db::DbPool;
use crate::entity::generated_design;
use crate::error::{AppError, AppResult};
use crate::models::{
    DesignDetail, DesignGroup, DesignListQuery, DesignStats, DesignSummary, DesignType,
    DesignTypeCount, SelectDesignResponse, UploadSummary,
};

/// Group designs by upload, preserving the newest-first order of `designs`.
pub fn group_by_upload(
    designs: Vec<generated_design::Model>,
    uploads: HashMap<Uuid, UploadSummary>,
) -> Vec<DesignGroup> {
    let mut groups: Vec<DesignGroup> = Vec::new();
    let mut index: HashMap<Uuid, usize> = HashMap::new();

    for design in designs {
        let slot = *index.entry(design.upload_id).or_insert_with(|| {
            groups.push(DesignGroup {
                upload_id: design.upload_id,
                original_image: uploads.get(&design.upload_id).cloned(),
                designs: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].designs.push(DesignSummary::from(design));
    }

    groups
}

/// A user's designs grouped by upload.
pub async fn list_designs(
    db: &DbPool,
    user_id: Uuid,
    query: &DesignListQuery,
) -> AppResult<Vec<DesignGroup>> {
    let designs = db.list_designs_for_user(user_id, query).await?;

    let mut upload_ids: Vec<Uuid> = designs.iter().map(|d| d.upload_id).collect();
    upload_ids.sort();
    upload_ids.dedup();

    let uploads = db
        .get_uploads_by_ids(upload_ids)
        .await?
        .into_iter()
        .map(|u| (u.id, UploadSummary::from(u)))
        .collect();

    Ok(group_by_upload(designs, uploads))
}

/// One of the user's designs with its original photo.
pub async fn design_detail(db: &DbPool, design_id: Uuid, user_id: Uuid) -> AppResult<DesignDetail> {
    let design = db
        .get_design_for_user(design_id, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Design".to_string()))?;
    let upload = db.get_upload(design.upload_id).await?;

    Ok(DesignDetail {
        design: DesignSummary::from(design),
        original_image: upload.map(UploadSummary::from),
    })
}

/// Count designs per canonical style, listing every style.
pub fn count_by_type(designs: &[generated_design::Model]) -> Vec<DesignTypeCount> {
    let mut counts: HashMap<DesignType, u64> = HashMap::new();
    let mut unknown: HashMap<&str, u64> = HashMap::new();

    for design in designs {
        match DesignType::parse(&design.design_type) {
            Some(t) => *counts.entry(t).or_default() += 1,
            None => *unknown.entry(design.design_type.as_str()).or_default() += 1,
        }
    }

    let mut result: Vec<DesignTypeCount> = DesignType::ALL
        .iter()
        .map(|t| DesignTypeCount {
            design_type: t.as_str().to_string(),
            count: counts.get(t).copied().unwrap_or(0),
        })
        .collect();

    let mut extra: Vec<_> = unknown.into_iter().collect();
    extra.sort();
    result.extend(extra.into_iter().map(|(tag, count)| DesignTypeCount {
        design_type: tag.to_string(),
        count,
    }));
    result
}

/// Totals for a user's uploads and designs.
pub async fn design_stats(db: &DbPool, user_id: Uuid) -> AppResult<DesignStats> {
    let designs = db
        .list_designs_for_user(user_id, &DesignListQuery::default())
        .await?;
    let uploads = db.list_uploads_for_user(user_id).await?;

    let interior = designs.iter().filter(|d| d.is_interior).count() as u64;

    Ok(DesignStats {
        total_designs: designs.len() as u64,
        total_uploads: uploads.len() as u64,
        storefront_designs: designs.len() as u64 - interior,
        interior_designs: interior,
        designs_by_type: count_by_type(&designs),
    })
}

/// Acknowledge the selection of one of the user's designs.
pub async fn select_design(
    db: &DbPool,
    design_id: Uuid,
    user_id: Uuid,
) -> AppResult<SelectDesignResponse> {
    let design = db
        .get_design_for_user(design_id, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Design".to_string()))?;

    let summary = DesignSummary::from(design);
    Ok(SelectDesignResponse {
        design_id: summary.design_id,
        design_type: summary.design_type,
        is_interior: summary.is_interior,
        selected: true,
    })
}
