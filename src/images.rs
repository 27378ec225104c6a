use std::{fs, io, path::Path};

use base64::{Engine as _, engine::general_purpose::STANDARD};
use thiserror::Error;

use crate::constants::{CATEGORY_IMAGE_DIR, DATA_URL_PREFIX, IMAGE_PATH_PREFIX, PLACEHOLDER_IMAGE};

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("could not read image {path}: {source}")]
    Unreadable {
        path: String,
        #[source]
        source: io::Error,
    },
}

pub fn resolve_new_image(upload: Option<&str>, typed: &str) -> String {
    if let Some(data_url) = upload {
        return data_url.to_string();
    }

    let typed = typed.trim();
    if typed.is_empty() {
        return PLACEHOLDER_IMAGE.to_string();
    }
    qualify_typed_path(typed)
}

pub fn resolve_edit_image(upload: Option<&str>, typed: &str, previous: &str) -> String {
    if let Some(data_url) = upload {
        return data_url.to_string();
    }

    let typed = typed.trim();
    if typed.is_empty() {
        previous.to_string()
    } else {
        typed.to_string()
    }
}

fn qualify_typed_path(typed: &str) -> String {
    if typed.starts_with(IMAGE_PATH_PREFIX) || typed.starts_with(DATA_URL_PREFIX) {
        typed.to_string()
    } else {
        format!("{}{}", CATEGORY_IMAGE_DIR, typed)
    }
}

pub fn editor_prefill(img: &str) -> &str {
    if img.starts_with(DATA_URL_PREFIX) { "" } else { img }
}

pub fn encode_image_file(path: &Path) -> Result<String, ImageError> {
    let bytes = fs::read(path).map_err(|e| ImageError::Unreadable {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(format!(
        "data:{};base64,{}",
        mime_for_extension(path),
        STANDARD.encode(bytes)
    ))
}

fn mime_for_extension(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use std::{path::PathBuf, time::SystemTime};

    use super::*;

    fn unique_path(prefix: &str, extension: &str) -> PathBuf {
        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        PathBuf::from(format!("/tmp/{}_{}.{}", prefix, now, extension))
    }

    #[test]
    fn test_new_image_falls_back_to_placeholder() {
        assert_eq!(resolve_new_image(None, ""), "images/placeholder.jpg");
        assert_eq!(resolve_new_image(None, "   "), "images/placeholder.jpg");
    }

    #[test]
    fn test_new_image_qualifies_bare_filenames() {
        assert_eq!(
            resolve_new_image(None, "spring.png"),
            "images/packagelist/spring.png"
        );
        assert_eq!(
            resolve_new_image(None, "images/custom/spring.png"),
            "images/custom/spring.png"
        );
        assert_eq!(
            resolve_new_image(None, "data:image/png;base64,AAA"),
            "data:image/png;base64,AAA"
        );
    }

    #[test]
    fn test_new_image_upload_wins() {
        assert_eq!(
            resolve_new_image(Some("data:image/png;base64,AAA"), "spring.png"),
            "data:image/png;base64,AAA"
        );
    }

    #[test]
    fn test_edit_image_keeps_typed_path_verbatim() {
        assert_eq!(
            resolve_edit_image(None, "photos/raw.png", "images/old.png"),
            "photos/raw.png"
        );
        assert_eq!(
            resolve_edit_image(None, "  ", "images/old.png"),
            "images/old.png"
        );
        assert_eq!(
            resolve_edit_image(Some("data:image/gif;base64,BBB"), "typed.png", "old"),
            "data:image/gif;base64,BBB"
        );
    }

    #[test]
    fn test_editor_prefill_hides_data_urls() {
        assert_eq!(
            editor_prefill("images/packagelist/package1.png"),
            "images/packagelist/package1.png"
        );
        assert_eq!(editor_prefill("data:image/png;base64,AAA"), "");
    }

    #[test]
    fn test_encode_image_file_builds_data_url() {
        let path = unique_path("darkroom_image_encode", "png");
        fs::write(&path, [137u8, 80, 78, 71]).unwrap();

        let data_url = encode_image_file(&path).unwrap();
        assert!(data_url.starts_with("data:image/png;base64,"));
        let payload = data_url.rsplit(',').next().unwrap();
        assert_eq!(STANDARD.decode(payload).unwrap(), vec![137u8, 80, 78, 71]);

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_encode_unknown_extension_uses_octet_stream() {
        let path = unique_path("darkroom_image_unknown", "bin");
        fs::write(&path, [1u8, 2, 3]).unwrap();

        let data_url = encode_image_file(&path).unwrap();
        assert!(data_url.starts_with("data:application/octet-stream;base64,"));

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_encode_missing_file_is_an_error() {
        let path = unique_path("darkroom_image_missing", "png");
        assert!(encode_image_file(&path).is_err());
    }
}
