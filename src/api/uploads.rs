//! Photo upload API handlers.
//!
//! - `POST /upload` - storefront photo (multipart `image`, optional `userId`, `userInfo`)
//! - `POST /upload/interior` - interior photo (multipart `image`, `userId`, `storefrontDesignId`)
//! - `GET /upload/{userId}` - a user's uploads
//! - `DELETE /upload/{uploadId}?userId=` - delete an upload with its designs

use std::collections::HashMap;

use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use futures_util::StreamExt;
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::{ApiResponse, OwnerQuery, UploadResponse, UploadSummary, UserInfo};
use crate::services::{OwnerHint, Orchestrator, PhotoUpload};

/// Multipart field holding the photo.
const IMAGE_FIELD: &str = "image";

/// Limit for non-file form fields.
const MAX_TEXT_FIELD_SIZE: usize = 16 * 1024;

/// Parsed multipart form: at most one photo plus text fields.
#[derive(Debug, Default)]
struct UploadForm {
    image: Option<PhotoUpload>,
    fields: HashMap<String, String>,
}

impl UploadForm {
    fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Optional id field; client placeholders such as "undefined" count as absent.
    fn optional_id(&self, name: &str) -> Option<Uuid> {
        self.text(name).and_then(|v| Uuid::parse_str(v).ok())
    }

    fn required_id(&self, name: &str) -> AppResult<Uuid> {
        let value = self
            .text(name)
            .ok_or_else(|| AppError::InvalidInput(format!("Missing required field: {}", name)))?;
        Uuid::parse_str(value)
            .map_err(|_| AppError::InvalidInput(format!("Invalid {}: '{}'", name, value)))
    }

    fn take_image(&mut self) -> AppResult<PhotoUpload> {
        self.image.take().ok_or_else(|| {
            AppError::InvalidInput("Please select an image file to upload".to_string())
        })
    }
}

/// Read the multipart body, enforcing the photo size limit while streaming.
async fn read_form(mut payload: Multipart, max_upload_size: usize) -> AppResult<UploadForm> {
    let mut form = UploadForm::default();

    while let Some(item) = payload.next().await {
        let mut field = item
            .map_err(|e| AppError::InvalidInput(format!("Invalid multipart payload: {}", e)))?;
        let name = field.name().unwrap_or_default().to_string();

        if name == IMAGE_FIELD {
            if form.image.is_some() {
                return Err(AppError::InvalidInput(
                    "Only one file can be uploaded at a time".to_string(),
                ));
            }

            let original_name = field
                .content_disposition()
                .and_then(|cd| cd.get_filename())
                .unwrap_or("photo")
                .to_string();
            let declared_mime = field.content_type().map(|m| m.essence_str().to_string());

            let mut data = Vec::new();
            while let Some(chunk) = field.next().await {
                let chunk = chunk
                    .map_err(|e| AppError::InvalidInput(format!("Upload interrupted: {}", e)))?;
                if data.len() + chunk.len() > max_upload_size {
                    return Err(AppError::PayloadTooLarge(format!(
                        "File size must be less than {}MB",
                        max_upload_size / (1024 * 1024)
                    )));
                }
                data.extend_from_slice(&chunk);
            }

            form.image = Some(PhotoUpload {
                original_name,
                declared_mime,
                data,
            });
        } else {
            let mut value = Vec::new();
            while let Some(chunk) = field.next().await {
                let chunk = chunk
                    .map_err(|e| AppError::InvalidInput(format!("Invalid form field: {}", e)))?;
                if value.len() + chunk.len() > MAX_TEXT_FIELD_SIZE {
                    return Err(AppError::InvalidInput(format!(
                        "Form field '{}' is too large",
                        name
                    )));
                }
                value.extend_from_slice(&chunk);
            }

            let value = String::from_utf8(value).map_err(|_| {
                AppError::InvalidInput(format!("Form field '{}' is not valid UTF-8", name))
            })?;
            form.fields.insert(name, value);
        }
    }

    Ok(form)
}

/// Upload a storefront photo.
///
/// A `userInfo` JSON field with a SAP code creates or updates the participant;
/// otherwise a known `userId` is reused; otherwise the upload is anonymous.
#[utoipa::path(
    post,
    path = "/api/upload",
    tag = "Uploads",
    request_body(content_type = "multipart/form-data", description = "Fields: image (file), userId, userInfo (JSON)"),
    responses(
        (status = 201, description = "Photo stored", body = UploadResponse),
        (status = 400, description = "Missing, oversized or invalid image", body = crate::error::ErrorResponse),
        (status = 500, description = "Storage failure", body = crate::error::ErrorResponse),
    )
)]
pub async fn upload_storefront(
    orchestrator: web::Data<Orchestrator>,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let mut form = read_form(payload, orchestrator.limits().max_upload_size).await?;
    let photo = form.take_image()?;

    let profile = match form.text("userInfo") {
        Some(raw) => serde_json::from_str::<UserInfo>(raw)
            .map_err(|e| AppError::InvalidInput(format!("Invalid userInfo: {}", e)))?
            .into_profile()?,
        None => None,
    };

    let owner = OwnerHint {
        profile,
        user_id: form.optional_id("userId"),
    };

    let response = orchestrator.handle_upload(photo, owner).await?;
    Ok(HttpResponse::Created().json(ApiResponse::with_message(
        "Image uploaded successfully",
        response,
    )))
}

/// Upload an interior photo for one of the user's storefront designs.
#[utoipa::path(
    post,
    path = "/api/upload/interior",
    tag = "Uploads",
    request_body(content_type = "multipart/form-data", description = "Fields: image (file), userId, storefrontDesignId"),
    responses(
        (status = 201, description = "Photo stored", body = UploadResponse),
        (status = 400, description = "Missing field or invalid image", body = crate::error::ErrorResponse),
        (status = 403, description = "Storefront design does not belong to the user", body = crate::error::ErrorResponse),
    )
)]
pub async fn upload_interior(
    orchestrator: web::Data<Orchestrator>,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let mut form = read_form(payload, orchestrator.limits().max_upload_size).await?;
    let photo = form.take_image()?;
    let user_id = form.required_id("userId")?;
    let storefront_design_id = form.required_id("storefrontDesignId")?;

    let response = orchestrator
        .handle_interior_upload(photo, user_id, storefront_design_id)
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::with_message(
        "Interior image uploaded successfully",
        response,
    )))
}

/// List a user's uploads, newest first.
#[utoipa::path(
    get,
    path = "/api/upload/{userId}",
    tag = "Uploads",
    params(("userId" = Uuid, Path, description = "Participant id")),
    responses(
        (status = 200, description = "Uploads", body = Vec<UploadSummary>),
    )
)]
pub async fn list_uploads(
    pool: web::Data<DbPool>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let uploads: Vec<UploadSummary> = pool
        .list_uploads_for_user(path.into_inner())
        .await?
        .into_iter()
        .map(UploadSummary::from)
        .collect();
    Ok(HttpResponse::Ok().json(ApiResponse::ok(uploads)))
}

/// Delete an upload, its designs and their files.
#[utoipa::path(
    delete,
    path = "/api/upload/{uploadId}",
    tag = "Uploads",
    params(
        ("uploadId" = Uuid, Path, description = "Upload id"),
        OwnerQuery,
    ),
    responses(
        (status = 200, description = "Upload deleted"),
        (status = 404, description = "Upload not found for this user", body = crate::error::ErrorResponse),
    )
)]
pub async fn delete_upload(
    orchestrator: web::Data<Orchestrator>,
    path: web::Path<Uuid>,
    query: web::Query<OwnerQuery>,
) -> AppResult<HttpResponse> {
    let upload_id = path.into_inner();
    let deleted_designs = orchestrator.delete_upload(upload_id, query.user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        "Upload deleted successfully",
        serde_json::json!({ "uploadId": upload_id, "deletedDesigns": deleted_designs }),
    )))
}

/// Configure upload routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/upload").route(web::post().to(upload_storefront)))
        .service(web::resource("/upload/interior").route(web::post().to(upload_interior)))
        // GET takes a user id, DELETE an upload id
        .service(
            web::resource("/upload/{id}")
                .route(web::get().to(list_uploads))
                .route(web::delete().to(delete_upload)),
        );
}
