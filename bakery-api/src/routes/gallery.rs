/// Gallery endpoints
///
/// - `GET /gallery` - Public listing, newest first (`?category=` filter)
/// - `GET /admin/gallery` - All photos plus pending flash messages
/// - `POST /admin/gallery/upload` - Multipart: `photo`, `title`,
///   `description`, `category`
/// - `POST /admin/gallery/:id/delete` - Remove image file and row
/// - `POST /admin/gallery/:id/edit` - Form: `title`, `description`, `category`
///
/// Admin actions answer with a redirect to `/admin/gallery` and report their
/// outcome as a flash message.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::{non_empty, ApiForm},
    session::ShopSession,
};
use axum::{
    extract::{Multipart, Path, Query, State},
    response::Redirect,
    Json,
};
use bakery_shared::{
    models::gallery::{CreatePhoto, Photo, UpdatePhoto},
    upload::{self, UploadError},
};
use bytes::Bytes;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;

const ADMIN_GALLERY: &str = "/admin/gallery";

#[derive(Debug, Deserialize)]
pub struct GalleryQuery {
    pub category: Option<String>,
}

/// Photo as shown to clients, with its public image URL
#[derive(Debug, Serialize)]
pub struct PhotoView {
    #[serde(flatten)]
    pub photo: Photo,
    pub image_url: String,
}

#[derive(Debug, Serialize)]
pub struct GalleryView {
    pub photos: Vec<PhotoView>,
    pub categories: Vec<String>,
    pub selected_category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AdminGalleryView {
    pub photos: Vec<PhotoView>,
    pub flash: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct EditPhotoForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
}

/// Editable photo metadata, bounded by the gallery column widths
#[derive(Debug, Validate)]
struct PhotoDetails {
    #[validate(length(max = 100, message = "Title is too long"))]
    title: String,

    #[validate(length(max = 50, message = "Category is too long"))]
    category: Option<String>,
}

impl PhotoDetails {
    /// Returns the flash message for the first failing field
    fn check(&self) -> Result<(), String> {
        self.validate().map_err(|errors| {
            let fields = errors.field_errors();
            ["title", "category"]
                .iter()
                .filter_map(|field| fields.get(*field))
                .flat_map(|errors| errors.iter())
                .find_map(|error| error.message.as_ref().map(|m| m.to_string()))
                .unwrap_or_else(|| "Invalid photo details".to_string())
        })
    }
}

/// Fields collected from the upload form
#[derive(Debug, Default)]
struct UploadForm {
    filename: Option<String>,
    data: Bytes,
    title: Option<String>,
    description: Option<String>,
    category: Option<String>,
}

impl UploadForm {
    async fn read(mut multipart: Multipart) -> ApiResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "photo" => {
                    form.filename = field.file_name().map(str::to_string);
                    form.data = field.bytes().await?;
                }
                "title" => form.title = non_empty(Some(field.text().await?)),
                "description" => form.description = non_empty(Some(field.text().await?)),
                "category" => form.category = non_empty(Some(field.text().await?)),
                other => tracing::debug!(field = %other, "Ignoring unknown upload field"),
            }
        }

        Ok(form)
    }

    /// Checks the form and returns the stored filename and row to insert
    fn into_photo(self) -> Result<(String, Bytes, CreatePhoto), String> {
        let filename = self.filename.unwrap_or_default();
        if filename.trim().is_empty() || self.data.is_empty() {
            return Err(UploadError::MissingFile.to_string());
        }

        let stored = upload::stored_filename(&filename, Utc::now()).map_err(|e| e.to_string())?;
        let title = self.title.ok_or_else(|| "Title is required".to_string())?;

        let details = PhotoDetails {
            title,
            category: self.category,
        };
        details.check()?;

        let photo = CreatePhoto {
            title: details.title,
            description: self.description,
            image_path: stored.clone(),
            category: details.category,
        };
        Ok((stored, self.data, photo))
    }
}

fn photo_views(state: &AppState, photos: Vec<Photo>) -> Vec<PhotoView> {
    photos
        .into_iter()
        .map(|photo| PhotoView {
            image_url: state.image_url(&photo.image_path),
            photo,
        })
        .collect()
}

pub async fn public_gallery(
    State(state): State<AppState>,
    Query(query): Query<GalleryQuery>,
) -> ApiResult<Json<GalleryView>> {
    let selected_category = non_empty(query.category);
    let photos = Photo::list(&state.db, selected_category.as_deref()).await?;
    let categories = Photo::categories(&state.db).await?;

    Ok(Json(GalleryView {
        photos: photo_views(&state, photos),
        categories,
        selected_category,
    }))
}

pub async fn admin_gallery(
    State(state): State<AppState>,
    session: ShopSession,
) -> ApiResult<Json<AdminGalleryView>> {
    let photos = Photo::list(&state.db, None).await?;

    Ok(Json(AdminGalleryView {
        photos: photo_views(&state, photos),
        flash: session.take_flashes().await?,
    }))
}

/// Stores an uploaded image and records it in the gallery
///
/// # Errors
///
/// - `409 Conflict`: An image with the generated name already exists
/// - `413 Payload Too Large`: Body exceeds the upload limit
pub async fn upload_photo(
    State(state): State<AppState>,
    session: ShopSession,
    multipart: Multipart,
) -> ApiResult<Redirect> {
    let form = UploadForm::read(multipart).await?;

    let (stored, data, new_photo) = match form.into_photo() {
        Ok(parts) => parts,
        Err(message) => {
            session.flash(message).await?;
            return Ok(Redirect::to(ADMIN_GALLERY));
        }
    };

    if let Err(e) = state.images.save(&stored, &data).await {
        return Err(match e.kind() {
            std::io::ErrorKind::AlreadyExists => {
                ApiError::Conflict(format!("Image {} already exists", stored))
            }
            _ => ApiError::InternalError(format!("Failed to store image: {}", e)),
        });
    }

    let photo = match Photo::create(&state.db, new_photo).await {
        Ok(photo) => photo,
        Err(e) => {
            if let Err(remove_err) = state.images.remove(&stored).await {
                tracing::warn!(
                    image = %stored,
                    error = %remove_err,
                    "Failed to remove image after insert error"
                );
            }
            return Err(e.into());
        }
    };

    tracing::info!(
        photo_id = photo.id,
        image = %photo.image_path,
        bytes = data.len(),
        "Gallery photo uploaded"
    );
    session.flash("Photo uploaded successfully").await?;
    Ok(Redirect::to(ADMIN_GALLERY))
}

/// Removes the image file, then the row
///
/// A missing or unremovable file does not block the row delete.
pub async fn delete_photo(
    State(state): State<AppState>,
    session: ShopSession,
    Path(photo_id): Path<i64>,
) -> ApiResult<Redirect> {
    let photo = Photo::find_by_id(&state.db, photo_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Photo not found".to_string()))?;

    if let Err(e) = state.images.remove(&photo.image_path).await {
        tracing::warn!(
            photo_id,
            image = %photo.image_path,
            error = %e,
            "Failed to remove gallery image"
        );
        session.flash(format!("Error deleting file: {}", e)).await?;
    }

    Photo::delete(&state.db, photo_id).await?;

    tracing::info!(photo_id, "Gallery photo deleted");
    session.flash("Photo deleted successfully").await?;
    Ok(Redirect::to(ADMIN_GALLERY))
}

pub async fn edit_photo(
    State(state): State<AppState>,
    session: ShopSession,
    Path(photo_id): Path<i64>,
    ApiForm(form): ApiForm<EditPhotoForm>,
) -> ApiResult<Redirect> {
    let Some(title) = non_empty(form.title) else {
        session.flash("Title is required").await?;
        return Ok(Redirect::to(ADMIN_GALLERY));
    };

    let details = PhotoDetails {
        title,
        category: non_empty(form.category),
    };
    if let Err(message) = details.check() {
        session.flash(message).await?;
        return Ok(Redirect::to(ADMIN_GALLERY));
    }

    let update = UpdatePhoto {
        title: details.title,
        description: non_empty(form.description),
        category: details.category,
    };

    Photo::update_metadata(&state.db, photo_id, update)
        .await?
        .ok_or_else(|| ApiError::NotFound("Photo not found".to_string()))?;

    tracing::info!(photo_id, "Gallery photo updated");
    session.flash("Photo details updated successfully").await?;
    Ok(Redirect::to(ADMIN_GALLERY))
}
