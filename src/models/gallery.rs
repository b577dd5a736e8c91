//! Book gallery images

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Gallery entry name that marks the canonical cover
pub const COVER_IMAGE_NAME: &str = "coverImage";

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    pub id: i32,
    #[serde(skip)]
    pub book_id: i32,
    pub image_name: String,
    pub image_path: String,
    pub created_at: DateTime<Utc>,
}

impl GalleryImage {
    pub fn is_cover(&self) -> bool {
        self.image_name == COVER_IMAGE_NAME
    }
}

/// Register an already stored image against a book
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGalleryImage {
    #[validate(length(min = 1, max = 255, message = "Image name must be 1-255 characters"))]
    pub image_name: String,
    #[validate(length(min = 1, max = 1024, message = "Image path must be 1-1024 characters"))]
    pub image_path: String,
}
