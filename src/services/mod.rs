//! Business logic services.

pub mod contest;
pub mod gallery;
pub mod generation;
pub mod image_processing;
pub mod orchestrator;
pub mod prompts;
pub mod sharing;
pub mod storage;

pub use generation::{DesignClient, FallbackRenderer, ImageGenerator, StyleFilterRenderer};
pub use orchestrator::{OwnerHint, Orchestrator, PhotoUpload};
pub use sharing::ContestSite;
pub use storage::{AssetStore, LocalAssetStore, build_asset_store};
