/**
 * Avatar Upload Handler
 *
 * PATCH /api/users/avatars (multipart, file field `avatar`)
 *
 * The upload is staged into the tmp directory first, then the extension
 * is checked against the allow-list, the image is resized to a fixed
 * 250x250 square, and the file is moved into the public avatar directory
 * under a freshly generated unique filename. On any failure after the
 * file is staged the temporary file is deleted, so no orphaned uploads
 * remain from a failed request.
 */

use std::path::{Path as FsPath, PathBuf};
use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    response::Json,
};
use image::imageops::FilterType;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::users::set_avatar_url;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::server::config::AppConfig;

/// Accepted avatar file extensions
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Side length of the stored square avatar
pub const AVATAR_SIZE: u32 = 250;

/// Check an extension (lowercased) against the allow-list
pub fn allowed_extension(ext: &str) -> bool {
    ALLOWED_EXTENSIONS.contains(&ext)
}

/// Lowercased extension of an uploaded filename
pub fn file_extension(filename: &str) -> String {
    FsPath::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .unwrap_or_default()
}

/// Remove a staged upload, logging if the cleanup itself fails
async fn discard_upload(path: &FsPath) {
    if let Err(err) = tokio::fs::remove_file(path).await {
        tracing::error!("Failed to remove staged upload {:?}: {}", path, err);
    }
}

fn resize_in_place(path: PathBuf) -> Result<(), image::ImageError> {
    let avatar = image::open(&path)?;
    avatar
        .resize_exact(AVATAR_SIZE, AVATAR_SIZE, FilterType::Triangle)
        .save(&path)
}

/// Write the upload into the tmp directory, then check the extension
///
/// The extension check runs after staging; a rejected upload is removed
/// before the error is returned, so nothing stays behind in the tmp
/// directory. Returns the staged path and the lowercased extension.
async fn stage_upload(
    tmp_dir: &FsPath,
    filename: &str,
    bytes: &[u8],
) -> Result<(PathBuf, String), ApiError> {
    let ext = file_extension(filename);
    let staged_ext = if ext.is_empty() { "bin" } else { ext.as_str() };
    let staged_name = format!("{}.{}", Uuid::new_v4(), staged_ext);
    let staged_path = tmp_dir.join(staged_name);

    tokio::fs::create_dir_all(tmp_dir).await?;
    tokio::fs::write(&staged_path, bytes).await?;

    if !allowed_extension(&ext) {
        discard_upload(&staged_path).await;
        return Err(ApiError::validation(
            "avatar",
            "avatar must be a .jpg, .jpeg or .png image",
        ));
    }

    Ok((staged_path, ext))
}

pub async fn update_avatar(
    State(pool): State<Option<PgPool>>,
    State(config): State<Arc<AppConfig>>,
    AuthUser(user): AuthUser,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>, ApiError> {
    let pool = pool.ok_or_else(|| ApiError::storage("database not configured"))?;

    // Find the avatar file field
    let mut upload: Option<(String, axum::body::Bytes)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::validation("avatar", "malformed multipart body"))?
    {
        if field.name() == Some("avatar") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|_| ApiError::validation("avatar", "malformed multipart body"))?;
            upload = Some((filename, bytes));
            break;
        }
    }
    let (filename, bytes) = upload.ok_or_else(|| ApiError::missing_field("avatar"))?;

    let (staged_path, ext) = stage_upload(&config.tmp_dir, &filename, &bytes).await?;

    // Resize to the fixed square
    let resize_target = staged_path.clone();
    match tokio::task::spawn_blocking(move || resize_in_place(resize_target)).await {
        Ok(Ok(())) => {}
        Ok(Err(err)) => {
            tracing::warn!("Failed to decode uploaded avatar: {}", err);
            discard_upload(&staged_path).await;
            return Err(ApiError::validation("avatar", "avatar is not a valid image"));
        }
        Err(err) => {
            discard_upload(&staged_path).await;
            return Err(ApiError::storage(err));
        }
    }

    // Move into the public avatar directory under a fresh unique name
    let final_name = format!("{}.{}", Uuid::new_v4(), ext);
    let avatars_dir = config.avatars_dir();
    let final_path = avatars_dir.join(&final_name);

    if let Err(err) = tokio::fs::create_dir_all(&avatars_dir).await {
        discard_upload(&staged_path).await;
        return Err(err.into());
    }
    if let Err(err) = tokio::fs::rename(&staged_path, &final_path).await {
        discard_upload(&staged_path).await;
        return Err(err.into());
    }

    let avatar_url = format!("/avatars/{final_name}");
    set_avatar_url(&pool, user.id, &avatar_url).await?;

    tracing::info!("Avatar updated for user {}", user.id);
    Ok(Json(serde_json::json!({ "avatarURL": avatar_url })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_extensions() {
        assert!(allowed_extension("jpg"));
        assert!(allowed_extension("jpeg"));
        assert!(allowed_extension("png"));
        assert!(!allowed_extension("gif"));
        assert!(!allowed_extension("svg"));
        assert!(!allowed_extension(""));
    }

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension("photo.PNG"), "png");
        assert_eq!(file_extension("archive.tar.gz"), "gz");
        assert_eq!(file_extension("noext"), "");
    }

    #[tokio::test]
    async fn test_gif_upload_rejected_and_discarded() {
        let dir = tempfile::tempdir().unwrap();

        let err = stage_upload(dir.path(), "pic.gif", b"GIF89a")
            .await
            .unwrap_err();

        assert_eq!(
            err.status_code(),
            axum::http::StatusCode::BAD_REQUEST
        );
        assert_eq!(err.message(), "avatar must be a .jpg, .jpeg or .png image");
        // The staged file is gone
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_allowed_upload_is_staged() {
        let dir = tempfile::tempdir().unwrap();

        let (path, ext) = stage_upload(dir.path(), "pic.PNG", b"bytes").await.unwrap();

        assert_eq!(ext, "png");
        assert_eq!(std::fs::read(&path).unwrap(), b"bytes");
    }

    #[test]
    fn test_resize_rejects_non_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("junk.png");
        std::fs::write(&path, b"not an image").unwrap();

        assert!(resize_in_place(path).is_err());
    }

    #[test]
    fn test_resize_to_fixed_square() {
        use image::GenericImageView;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.png");
        image::RgbaImage::new(40, 20).save(&path).unwrap();

        resize_in_place(path.clone()).unwrap();

        let resized = image::open(&path).unwrap();
        assert_eq!(resized.dimensions(), (AVATAR_SIZE, AVATAR_SIZE));
    }
}
