//! Design generation API handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{
    ApiResponse, DesignSummary, GenerateRequest, GenerateResponse, GenerateSingleRequest,
    GenerationStatus, OptionalOwnerQuery, UploadType,
};
use crate::services::Orchestrator;

/// Generate storefront designs for an uploaded photo.
///
/// Runs every requested style (all four by default). Styles that fail are
/// left out of the response; the request fails only when none succeed.
#[utoipa::path(
    post,
    path = "/api/generate",
    tag = "Generation",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Designs generated", body = GenerateResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 404, description = "Upload not found", body = crate::error::ErrorResponse),
        (status = 500, description = "No style could be generated", body = crate::error::ErrorResponse),
    )
)]
pub async fn generate(
    orchestrator: web::Data<Orchestrator>,
    body: web::Json<GenerateRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let response = orchestrator
        .generate_designs(req.upload_id, req.user_id, &req.styles(), UploadType::Storefront)
        .await?;
    let message = format!(
        "Generated {} design(s) successfully",
        response.generated_designs.len()
    );
    Ok(HttpResponse::Ok().json(ApiResponse::with_message(message, response)))
}

/// Generate interior designs matching the linked storefront design.
#[utoipa::path(
    post,
    path = "/api/generate/interior",
    tag = "Generation",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Interior designs generated", body = GenerateResponse),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 404, description = "Upload or storefront design not found", body = crate::error::ErrorResponse),
        (status = 500, description = "No style could be generated", body = crate::error::ErrorResponse),
    )
)]
pub async fn generate_interior(
    orchestrator: web::Data<Orchestrator>,
    body: web::Json<GenerateRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let response = orchestrator
        .generate_designs(req.upload_id, req.user_id, &req.styles(), UploadType::Interior)
        .await?;
    let message = format!(
        "Generated {} interior design(s) successfully",
        response.generated_designs.len()
    );
    Ok(HttpResponse::Ok().json(ApiResponse::with_message(message, response)))
}

/// Generate one style for an upload.
#[utoipa::path(
    post,
    path = "/api/generate/single",
    tag = "Generation",
    request_body = GenerateSingleRequest,
    responses(
        (status = 200, description = "Design generated", body = DesignSummary),
        (status = 404, description = "Upload not found", body = crate::error::ErrorResponse),
        (status = 500, description = "Generation failed", body = crate::error::ErrorResponse),
    )
)]
pub async fn generate_single(
    orchestrator: web::Data<Orchestrator>,
    body: web::Json<GenerateSingleRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let design = orchestrator
        .generate_single(req.upload_id, req.user_id, req.design_type)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(design)))
}

/// Completed versus expected designs for an upload.
#[utoipa::path(
    get,
    path = "/api/generate/status/{uploadId}",
    tag = "Generation",
    params(
        ("uploadId" = Uuid, Path, description = "Upload id"),
        OptionalOwnerQuery,
    ),
    responses(
        (status = 200, description = "Generation progress", body = GenerationStatus),
        (status = 404, description = "Upload not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn generation_status(
    orchestrator: web::Data<Orchestrator>,
    path: web::Path<Uuid>,
    query: web::Query<OptionalOwnerQuery>,
) -> AppResult<HttpResponse> {
    let status = orchestrator
        .generation_status(path.into_inner(), query.user_id)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(status)))
}

/// Configure generation routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/generate").route(web::post().to(generate)))
        .service(web::resource("/generate/interior").route(web::post().to(generate_interior)))
        .service(web::resource("/generate/single").route(web::post().to(generate_single)))
        .service(
            web::resource("/generate/status/{upload_id}").route(web::get().to(generation_status)),
        );
}
