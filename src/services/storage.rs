//! Asset storage for uploaded originals and generated designs.
//!
//! Two backends implement [`AssetStore`]: the local filesystem (served by the
//! server under `/uploads` and `/generated`) and S3-compatible object storage
//! (AWS S3 or MinIO for development). Bytes are written verbatim.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{Credentials, Region};
use secrecy::ExposeSecret;
use tracing::{debug, info};

use crate::config::{S3Settings, StorageBackend, StorageSettings};
use crate::error::{AppError, AppResult};

/// Asset category; decides the key prefix and the public URL prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    /// Original photos
    Upload,
    /// Generated or locally processed variants
    Generated,
}

impl AssetKind {
    pub fn dir(&self) -> &'static str {
        match self {
            Self::Upload => "uploads",
            Self::Generated => "generated",
        }
    }
}

/// Result of storing one asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAsset {
    /// Backend key to read the bytes back
    pub key: String,
    /// Publicly resolvable path or URL
    pub reference: String,
    pub file_size: i64,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Durable storage for image bytes.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Write bytes under `key`, returning the public reference.
    async fn put_object(&self, key: &str, data: Vec<u8>, content_type: &str) -> AppResult<String>;

    /// Read the bytes stored under `key`.
    async fn get_object(&self, key: &str) -> AppResult<Vec<u8>>;

    /// Remove `key`. Missing objects are not an error.
    async fn delete_object(&self, key: &str) -> AppResult<()>;

    /// Confirm the backend is reachable and writable locations exist.
    async fn check(&self) -> AppResult<()>;

    /// Store an asset and describe it (size and, when decodable, dimensions).
    async fn store(
        &self,
        kind: AssetKind,
        filename: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> AppResult<StoredAsset> {
        let key = asset_key(kind, filename)?;
        let file_size = data.len() as i64;
        let dimensions = image::ImageReader::new(std::io::Cursor::new(&data))
            .with_guessed_format()
            .ok()
            .and_then(|reader| reader.into_dimensions().ok());

        let reference = self.put_object(&key, data, content_type).await?;
        debug!(key = %key, size = file_size, "Asset stored");

        Ok(StoredAsset {
            key,
            reference,
            file_size,
            width: dimensions.map(|(w, _)| w),
            height: dimensions.map(|(_, h)| h),
        })
    }
}

/// Build `<kind>/<filename>`, rejecting anything that is not a plain file name.
pub fn asset_key(kind: AssetKind, filename: &str) -> AppResult<String> {
    let mut components = Path::new(filename).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(format!("{}/{}", kind.dir(), filename)),
        _ => Err(AppError::InvalidInput(format!(
            "Invalid asset file name '{}'",
            filename
        ))),
    }
}

/// Get the content type for a file based on its extension.
pub fn content_type_for_extension(ext: &str) -> &'static str {
    match ext.to_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

/// File extension for an accepted MIME type.
pub fn extension_for_content_type(mime: &str) -> &'static str {
    match mime {
        "image/png" => "png",
        "image/webp" => "webp",
        _ => "jpg",
    }
}

/// Build the configured asset store.
pub async fn build_asset_store(
    settings: &StorageSettings,
) -> AppResult<std::sync::Arc<dyn AssetStore>> {
    match settings.backend {
        StorageBackend::Local => Ok(std::sync::Arc::new(
            LocalAssetStore::new(&settings.data_dir).await?,
        )),
        StorageBackend::S3 => Ok(std::sync::Arc::new(S3AssetStore::new(&settings.s3).await?)),
    }
}

/// Filesystem store rooted at the data directory.
#[derive(Debug, Clone)]
pub struct LocalAssetStore {
    root: PathBuf,
}

impl LocalAssetStore {
    /// Create the store and its `uploads/` and `generated/` directories.
    pub async fn new(root: impl AsRef<Path>) -> AppResult<Self> {
        let root = root.as_ref().to_path_buf();
        for kind in [AssetKind::Upload, AssetKind::Generated] {
            tokio::fs::create_dir_all(root.join(kind.dir()))
                .await
                .map_err(|e| {
                    AppError::Storage(format!("Failed to create {} directory: {}", kind.dir(), e))
                })?;
        }

        info!("Local asset storage initialized at {}", root.display());
        Ok(Self { root })
    }

    /// Directory served under `/<kind>`.
    pub fn dir_for(&self, kind: AssetKind) -> PathBuf {
        self.root.join(kind.dir())
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

#[async_trait]
impl AssetStore for LocalAssetStore {
    async fn put_object(&self, key: &str, data: Vec<u8>, _content_type: &str) -> AppResult<String> {
        tokio::fs::write(self.path_for(key), data)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to write {}: {}", key, e)))?;
        Ok(format!("/{}", key))
    }

    async fn get_object(&self, key: &str) -> AppResult<Vec<u8>> {
        match tokio::fs::read(self.path_for(key)).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AppError::NotFound(format!("File {}", key)))
            }
            Err(e) => Err(AppError::Storage(format!("Failed to read {}: {}", key, e))),
        }
    }

    async fn delete_object(&self, key: &str) -> AppResult<()> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Storage(format!("Failed to delete {}: {}", key, e))),
        }
    }

    async fn check(&self) -> AppResult<()> {
        for kind in [AssetKind::Upload, AssetKind::Generated] {
            let dir = self.dir_for(kind);
            match tokio::fs::metadata(&dir).await {
                Ok(meta) if meta.is_dir() => {}
                Ok(_) => {
                    return Err(AppError::Storage(format!("{} is not a directory", dir.display())));
                }
                Err(e) => {
                    return Err(AppError::Storage(format!("{}: {}", dir.display(), e)));
                }
            }
        }
        Ok(())
    }
}

/// S3 storage client wrapper.
#[derive(Clone)]
pub struct S3AssetStore {
    client: Client,
    bucket: String,
    prefix: Option<String>,
    public_base: String,
}

impl S3AssetStore {
    /// Create a new S3 storage client from configuration.
    pub async fn new(config: &S3Settings) -> AppResult<Self> {
        let credentials = Credentials::new(
            &config.access_key,
            config.secret_key.expose_secret(),
            None,
            None,
            "facade",
        );

        let region = Region::new(config.region.clone());

        let mut s3_config_builder = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(region)
            .credentials_provider(credentials)
            .force_path_style(true); // Required for MinIO

        // Use custom endpoint for MinIO in development
        if let Some(ref endpoint) = config.endpoint {
            s3_config_builder = s3_config_builder.endpoint_url(endpoint);
        }

        let client = Client::from_conf(s3_config_builder.build());

        let storage = Self {
            client,
            bucket: config.bucket.clone(),
            prefix: config
                .prefix
                .as_ref()
                .map(|p| p.trim_matches('/').to_string())
                .filter(|p| !p.is_empty()),
            public_base: public_base_url(config),
        };

        // Verify bucket exists or create it
        storage.ensure_bucket_exists().await?;

        info!("S3 storage initialized: bucket={}", config.bucket);

        Ok(storage)
    }

    /// Ensure the bucket exists, creating it if necessary.
    async fn ensure_bucket_exists(&self) -> AppResult<()> {
        match self.client.head_bucket().bucket(&self.bucket).send().await {
            Ok(_) => Ok(()),
            Err(e) => {
                let service_error = e.into_service_error();
                if service_error.is_not_found() {
                    info!("Creating S3 bucket '{}'", self.bucket);
                    self.client
                        .create_bucket()
                        .bucket(&self.bucket)
                        .send()
                        .await
                        .map_err(|e| {
                            AppError::Storage(format!("Failed to create bucket: {}", e))
                        })?;
                    Ok(())
                } else {
                    Err(AppError::Storage(format!(
                        "Failed to access bucket '{}': {}",
                        self.bucket, service_error
                    )))
                }
            }
        }
    }

    fn object_key(&self, key: &str) -> String {
        prefixed_key(self.prefix.as_deref(), key)
    }
}

/// Object key with the optional folder prefix applied.
fn prefixed_key(prefix: Option<&str>, key: &str) -> String {
    match prefix {
        Some(prefix) => format!("{}/{}", prefix, key),
        None => key.to_string(),
    }
}

/// Public base URL: explicit override, else the virtual-hosted AWS URL.
fn public_base_url(config: &S3Settings) -> String {
    match config.public_url {
        Some(ref url) => url.trim_end_matches('/').to_string(),
        None => format!(
            "https://{}.s3.{}.amazonaws.com",
            config.bucket, config.region
        ),
    }
}

#[async_trait]
impl AssetStore for S3AssetStore {
    async fn put_object(&self, key: &str, data: Vec<u8>, content_type: &str) -> AppResult<String> {
        let object_key = self.object_key(key);
        let body = aws_sdk_s3::primitives::ByteStream::from(data);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&object_key)
            .body(body)
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("Failed to upload file to S3: {}", e)))?;

        Ok(format!("{}/{}", self.public_base, object_key))
    }

    async fn get_object(&self, key: &str) -> AppResult<Vec<u8>> {
        let object_key = self.object_key(key);
        let response = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(&object_key)
            .send()
            .await
            .map_err(|e| {
                let service_error = e.into_service_error();
                if service_error.is_no_such_key() {
                    AppError::NotFound(format!("File {}", key))
                } else {
                    AppError::Storage(format!("Failed to get file from S3: {}", service_error))
                }
            })?;

        let data = response
            .body
            .collect()
            .await
            .map_err(|e| AppError::Storage(format!("Failed to read S3 response body: {}", e)))?
            .into_bytes()
            .to_vec();

        Ok(data)
    }

    async fn delete_object(&self, key: &str) -> AppResult<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(self.object_key(key))
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("Failed to delete file from S3: {}", e)))?;
        Ok(())
    }

    async fn check(&self) -> AppResult<()> {
        self.client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .map(|_| ())
            .map_err(|e| {
                AppError::Storage(format!(
                    "Bucket '{}' unreachable: {}",
                    self.bucket,
                    e.into_service_error()
                ))
            })
    }
}
