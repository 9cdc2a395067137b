//! Upload and generation workflow.
//!
//! Turns one uploaded photo into an upload row plus up to four persisted
//! design variants. Every style runs as its own task; a failed style is
//! logged and left out of the result, and only a run where nothing
//! succeeded fails the request.

use std::sync::Arc;

use chrono::Utc;
use futures_util::future::join_all;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::UploadSettings;
use crate::db::DbPool;
use crate::db::designs::{NewDesign, RemovedRows};
use crate::db::uploads::NewUpload;
use crate::entity::{generated_design, upload};
use crate::error::{AppError, AppResult};
use crate::models::{
    DesignSummary, DesignType, GenerateResponse, GenerationStatus, UploadResponse, UploadType,
    UserProfile,
};
use crate::services::generation::DesignClient;
use crate::services::image_processing;
use crate::services::prompts;
use crate::services::storage::{
    AssetKind, AssetStore, content_type_for_extension, extension_for_content_type,
};

/// A photo received from the client.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub original_name: String,
    /// Content type claimed by the client, if any
    pub declared_mime: Option<String>,
    pub data: Vec<u8>,
}

/// Who the client claims to be.
#[derive(Debug, Clone, Default)]
pub struct OwnerHint {
    /// Profile with a SAP code; wins over `user_id`
    pub profile: Option<UserProfile>,
    /// Previously returned server id
    pub user_id: Option<Uuid>,
}

/// Outcome of one style task.
#[derive(Debug)]
pub struct StyleResult {
    pub design_type: DesignType,
    pub outcome: AppResult<generated_design::Model>,
}

/// Aggregated fan-out result.
#[derive(Debug, Default)]
pub struct GenerationReport {
    pub completed: Vec<generated_design::Model>,
    pub failed: Vec<(DesignType, String)>,
}

impl GenerationReport {
    pub fn from_results(results: Vec<StyleResult>) -> Self {
        let mut report = Self::default();
        for result in results {
            match result.outcome {
                Ok(design) => report.completed.push(design),
                Err(e) => report.failed.push((result.design_type, e.to_string())),
            }
        }
        report
    }

    /// Completed designs, or `GenerationFailed` when there are none.
    pub fn into_completed(self) -> AppResult<Vec<generated_design::Model>> {
        if self.completed.is_empty() {
            let reasons = self
                .failed
                .iter()
                .map(|(t, e)| format!("{}: {}", t, e))
                .collect::<Vec<_>>()
                .join("; ");
            return Err(AppError::GenerationFailed(reasons));
        }
        Ok(self.completed)
    }
}

/// Per-call generation context shared by the style tasks.
struct GenerationContext<'a> {
    upload: &'a upload::Model,
    source: &'a [u8],
    /// Set for interior uploads
    storefront: Option<(Uuid, DesignType)>,
}

/// Upload and generation workflow.
#[derive(Clone)]
pub struct Orchestrator {
    db: DbPool,
    store: Arc<dyn AssetStore>,
    client: DesignClient,
    limits: UploadSettings,
    brand: String,
}

impl Orchestrator {
    pub fn new(
        db: DbPool,
        store: Arc<dyn AssetStore>,
        client: DesignClient,
        limits: UploadSettings,
        brand: String,
    ) -> Self {
        Self {
            db,
            store,
            client,
            limits,
            brand,
        }
    }

    /// Upload limits applied to incoming photos.
    pub fn limits(&self) -> &UploadSettings {
        &self.limits
    }

    /// Check size, declared type and image structure. No side effects.
    fn validate_photo(&self, photo: &PhotoUpload) -> AppResult<image_processing::ImageInfo> {
        if photo.data.is_empty() {
            return Err(AppError::InvalidInput(
                "Please select an image file to upload".to_string(),
            ));
        }

        if photo.data.len() > self.limits.max_upload_size {
            return Err(AppError::PayloadTooLarge(format!(
                "File size must be less than {}MB",
                self.limits.max_upload_size / (1024 * 1024)
            )));
        }

        if let Some(ref mime) = photo.declared_mime {
            if !self.limits.is_allowed(mime) {
                return Err(AppError::InvalidInput(format!(
                    "File type {} not allowed. Allowed types: {}",
                    mime,
                    self.limits.allowed_mime_types.join(", ")
                )));
            }
        }

        image_processing::validate_image(&photo.data, &self.limits.allowed_mime_types)
    }

    /// Resolve the owning user: upsert by SAP code when a profile is given,
    /// else accept a known server id, else anonymous.
    async fn resolve_owner(&self, owner: OwnerHint) -> AppResult<Option<Uuid>> {
        if let Some(profile) = owner.profile {
            let user = self.db.upsert_user(&profile).await?;
            info!(user_id = %user.id, sap_code = %user.sap_code, "Resolved user by SAP code");
            return Ok(Some(user.id));
        }

        if let Some(id) = owner.user_id {
            if self.db.get_user_by_id(id).await?.is_some() {
                return Ok(Some(id));
            }
            debug!(user_id = %id, "Ignoring unknown user id, upload stays anonymous");
        }

        Ok(None)
    }

    async fn store_original(
        &self,
        photo: PhotoUpload,
        info: image_processing::ImageInfo,
        user_id: Option<Uuid>,
        upload_type: UploadType,
        storefront_design_id: Option<Uuid>,
    ) -> AppResult<UploadResponse> {
        let stored_filename = format!(
            "{}-{}.{}",
            hex::encode(rand::random::<[u8; 16]>()),
            Utc::now().timestamp_millis(),
            extension_for_content_type(info.mime_type)
        );

        let stored = self
            .store
            .store(AssetKind::Upload, &stored_filename, photo.data, info.mime_type)
            .await?;

        let new = NewUpload {
            user_id,
            original_name: sanitize_original_name(&photo.original_name),
            stored_filename,
            stored_path: stored.reference.clone(),
            storage_key: stored.key.clone(),
            file_size: stored.file_size,
            mime_type: info.mime_type.to_string(),
            upload_type,
            storefront_design_id,
        };

        let row = match self.db.insert_upload(new).await {
            Ok(row) => row,
            Err(e) => {
                self.remove_asset(&stored.key).await;
                return Err(e);
            }
        };

        info!(
            upload_id = %row.id,
            user_id = ?row.user_id,
            upload_type = %row.upload_type,
            size = row.file_size,
            "Photo uploaded"
        );

        Ok(UploadResponse {
            upload_id: row.id,
            user_id: row.user_id,
            file_path: row.stored_path,
            original_name: row.original_name,
            file_size: row.file_size,
            mime_type: row.mime_type,
            width: info.width,
            height: info.height,
            upload_type: row.upload_type,
            storefront_design_id: row.storefront_design_id,
        })
    }

    /// Validate and store a storefront photo.
    pub async fn handle_upload(
        &self,
        photo: PhotoUpload,
        owner: OwnerHint,
    ) -> AppResult<UploadResponse> {
        let info = self.validate_photo(&photo)?;
        let user_id = self.resolve_owner(owner).await?;
        self.store_original(photo, info, user_id, UploadType::Storefront, None)
            .await
    }

    /// Validate and store an interior photo linked to one of the user's
    /// storefront designs.
    pub async fn handle_interior_upload(
        &self,
        photo: PhotoUpload,
        user_id: Uuid,
        storefront_design_id: Uuid,
    ) -> AppResult<UploadResponse> {
        let info = self.validate_photo(&photo)?;

        self.db
            .get_storefront_design_for_user(storefront_design_id, user_id)
            .await?
            .ok_or_else(|| {
                AppError::Forbidden(
                    "Storefront design does not belong to this user".to_string(),
                )
            })?;

        self.store_original(
            photo,
            info,
            Some(user_id),
            UploadType::Interior,
            Some(storefront_design_id),
        )
        .await
    }

    /// Load an upload the caller may use. Owned uploads require the owner's
    /// id; anonymous uploads are open.
    pub async fn load_upload(
        &self,
        upload_id: Uuid,
        user_id: Option<Uuid>,
    ) -> AppResult<upload::Model> {
        let upload = self
            .db
            .get_upload(upload_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Upload".to_string()))?;

        match upload.user_id {
            Some(owner) if Some(owner) != user_id => Err(AppError::NotFound("Upload".to_string())),
            _ => Ok(upload),
        }
    }

    /// Generate the requested styles for an upload of the expected kind.
    pub async fn generate_designs(
        &self,
        upload_id: Uuid,
        user_id: Option<Uuid>,
        styles: &[DesignType],
        expected: UploadType,
    ) -> AppResult<GenerateResponse> {
        let upload = self.load_upload(upload_id, user_id).await?;

        if upload.upload_type != expected.as_str() {
            let endpoint = match expected {
                UploadType::Storefront => "/generate/interior",
                UploadType::Interior => "/generate",
            };
            return Err(AppError::InvalidInput(format!(
                "Upload {} holds {} photos; use {}",
                upload.id, upload.upload_type, endpoint
            )));
        }

        let designs = self.run_styles(&upload, styles).await?;

        info!(
            upload_id = %upload.id,
            requested = styles.len(),
            completed = designs.len(),
            "Design generation finished"
        );

        Ok(GenerateResponse {
            upload_id: upload.id,
            user_id: upload.user_id,
            original_image: upload.stored_path.clone(),
            generated_designs: designs.into_iter().map(DesignSummary::from).collect(),
        })
    }

    /// Generate a single style for an upload of either kind.
    pub async fn generate_single(
        &self,
        upload_id: Uuid,
        user_id: Option<Uuid>,
        design_type: DesignType,
    ) -> AppResult<DesignSummary> {
        let upload = self.load_upload(upload_id, user_id).await?;
        let mut designs = self.run_styles(&upload, &[design_type]).await?;
        designs
            .pop()
            .map(DesignSummary::from)
            .ok_or_else(|| AppError::GenerationFailed(design_type.to_string()))
    }

    async fn run_styles(
        &self,
        upload: &upload::Model,
        styles: &[DesignType],
    ) -> AppResult<Vec<generated_design::Model>> {
        let source = self.store.get_object(&upload.storage_key).await?;
        let storefront = self.storefront_context(upload).await?;

        let ctx = GenerationContext {
            upload,
            source: &source,
            storefront,
        };

        let tasks = styles.iter().map(|&design_type| {
            let ctx = &ctx;
            async move {
                StyleResult {
                    design_type,
                    outcome: self.generate_style(ctx, design_type).await,
                }
            }
        });

        let report = GenerationReport::from_results(join_all(tasks).await);
        for (design_type, reason) in &report.failed {
            warn!(
                upload_id = %upload.id,
                design_type = %design_type,
                reason = %reason,
                "Style generation failed, skipping"
            );
        }

        report.into_completed()
    }

    /// Storefront id and style that an interior upload complements.
    async fn storefront_context(
        &self,
        upload: &upload::Model,
    ) -> AppResult<Option<(Uuid, DesignType)>> {
        if upload.upload_type != UploadType::Interior.as_str() {
            return Ok(None);
        }

        let storefront_id = upload.storefront_design_id.ok_or_else(|| {
            AppError::InvalidInput("Interior upload has no storefront design".to_string())
        })?;

        let storefront = self
            .db
            .get_design(storefront_id)
            .await?
            .filter(|d| !d.is_interior && d.user_id == upload.user_id)
            .ok_or_else(|| AppError::NotFound("Storefront design".to_string()))?;

        let style = DesignType::parse(&storefront.design_type).ok_or_else(|| {
            AppError::Database(format!(
                "Unknown design type '{}' on design {}",
                storefront.design_type, storefront.id
            ))
        })?;

        Ok(Some((storefront.id, style)))
    }

    async fn generate_style(
        &self,
        ctx: &GenerationContext<'_>,
        design_type: DesignType,
    ) -> AppResult<generated_design::Model> {
        let prompt = match ctx.storefront {
            Some((_, storefront_style)) => {
                prompts::interior_prompt(design_type, storefront_style, &self.brand)
            }
            None => prompts::facade_prompt(design_type, &self.brand),
        };

        let image = self
            .client
            .generate(ctx.source, &ctx.upload.mime_type, design_type, prompt)
            .await?;

        debug!(
            upload_id = %ctx.upload.id,
            design_type = %design_type,
            provenance = ?image.provenance,
            "Design image ready"
        );

        let ext = image::guess_format(&image.bytes)
            .ok()
            .and_then(|f| f.extensions_str().first().copied())
            .unwrap_or("jpg");
        let filename = format!(
            "{}_{}_{}.{}",
            design_type,
            ctx.upload.id.simple(),
            Utc::now().timestamp_millis(),
            ext
        );

        let stored = self
            .store
            .store(
                AssetKind::Generated,
                &filename,
                image.bytes,
                content_type_for_extension(ext),
            )
            .await?;

        let new = NewDesign {
            upload_id: ctx.upload.id,
            user_id: ctx.upload.user_id,
            design_type,
            filename,
            stored_path: stored.reference.clone(),
            storage_key: stored.key.clone(),
            file_size: stored.file_size,
            width: stored.width.map(|w| w as i32),
            height: stored.height.map(|h| h as i32),
            ai_prompt: image.prompt,
            is_interior: ctx.storefront.is_some(),
            storefront_design_id: ctx.storefront.map(|(id, _)| id),
        };

        match self.db.insert_design(new).await {
            Ok(row) => Ok(row),
            Err(e) => {
                self.remove_asset(&stored.key).await;
                Err(e)
            }
        }
    }

    /// Completed versus expected designs for an upload.
    pub async fn generation_status(
        &self,
        upload_id: Uuid,
        user_id: Option<Uuid>,
    ) -> AppResult<GenerationStatus> {
        let upload = self.load_upload(upload_id, user_id).await?;
        let designs = self.db.list_designs_for_upload(upload.id).await?;

        let total = DesignType::ALL.len() as u32;
        let completed = designs.len() as u32;

        Ok(GenerationStatus {
            upload_id: upload.id,
            user_id: upload.user_id,
            is_complete: completed >= total,
            total_designs: total,
            completed_designs: completed,
            designs: designs.into_iter().map(DesignSummary::from).collect(),
        })
    }

    /// Delete an owned upload with its designs, then remove the files.
    /// Interior uploads built on its storefront designs are removed too.
    pub async fn delete_upload(&self, upload_id: Uuid, user_id: Uuid) -> AppResult<usize> {
        let (upload, removed) = self.db.delete_upload_for_user(upload_id, user_id).await?;

        self.remove_asset(&upload.storage_key).await;
        self.remove_rows(&removed).await;

        info!(
            upload_id = %upload.id,
            designs = removed.designs.len(),
            interior_uploads = removed.uploads.len(),
            "Upload deleted"
        );
        Ok(removed.designs.len())
    }

    /// Delete an owned design, then remove its file. Deleting a storefront
    /// design also removes the interior uploads and designs built on it.
    pub async fn delete_design(&self, design_id: Uuid, user_id: Uuid) -> AppResult<usize> {
        let removed = self.db.delete_design_for_user(design_id, user_id).await?;
        self.remove_rows(&removed).await;
        info!(
            design_id = %design_id,
            designs = removed.designs.len(),
            interior_uploads = removed.uploads.len(),
            "Design deleted"
        );
        Ok(removed.designs.len())
    }

    /// Readiness probe for the asset backend.
    pub async fn check_storage(&self) -> AppResult<()> {
        self.store.check().await
    }

    async fn remove_rows(&self, removed: &RemovedRows) {
        for upload in &removed.uploads {
            self.remove_asset(&upload.storage_key).await;
        }
        for design in &removed.designs {
            self.remove_asset(&design.storage_key).await;
        }
    }

    /// Best-effort asset removal.
    async fn remove_asset(&self, key: &str) {
        if let Err(e) = self.store.delete_object(key).await {
            warn!(key = %key, error = %e, "Failed to remove asset");
        }
    }
}

/// Keep only the final path segment of a client file name.
fn sanitize_original_name(name: &str) -> String {
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    if base.is_empty() {
        "photo".to_string()
    } else {
        base.chars().take(255).collect()
    }
}
