// src/core/photo.rs
//! Pre-upload checks for profile photos

use crate::types::PhotoUpload;

const MAX_PHOTO_SIZE: usize = 10 * 1024 * 1024;
const PNG_SIGNATURE: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
const JPEG_SIGNATURE: &[u8] = &[0xFF, 0xD8, 0xFF];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoErrorType {
    EmptyFile,
    TooLarge,
    CorruptedFile,
    WrongFormat,
}

impl PhotoErrorType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyFile => "IMAGE_EMPTY",
            Self::TooLarge => "IMAGE_TOO_LARGE",
            Self::CorruptedFile => "IMAGE_CORRUPTED",
            Self::WrongFormat => "IMAGE_WRONG_FORMAT",
        }
    }
}

#[derive(Debug, Clone)]
pub struct PhotoValidationError {
    pub error_type: PhotoErrorType,
    pub message: String,
}

impl PhotoValidationError {
    fn new(error_type: PhotoErrorType, message: impl Into<String>) -> Self {
        Self {
            error_type,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for PhotoValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.error_type.code())
    }
}

pub fn validate_photo(photo: &PhotoUpload) -> Result<(), PhotoValidationError> {
    let bytes = &photo.bytes;

    if bytes.is_empty() {
        return Err(PhotoValidationError::new(
            PhotoErrorType::EmptyFile,
            "Photo file is empty",
        ));
    }

    if bytes.len() > MAX_PHOTO_SIZE {
        return Err(PhotoValidationError::new(
            PhotoErrorType::TooLarge,
            format!(
                "Photo too large: {:.1}MB (max 10MB)",
                bytes.len() as f64 / 1024.0 / 1024.0
            ),
        ));
    }

    if bytes.len() < 8 {
        return Err(PhotoValidationError::new(
            PhotoErrorType::CorruptedFile,
            "Photo file too small or corrupted",
        ));
    }

    let name = photo.file_name.to_lowercase();
    if name.ends_with(".png") {
        if bytes.starts_with(PNG_SIGNATURE) {
            Ok(())
        } else if bytes.starts_with(JPEG_SIGNATURE) {
            Err(PhotoValidationError::new(
                PhotoErrorType::WrongFormat,
                "File is JPEG but has .png extension",
            ))
        } else {
            Err(PhotoValidationError::new(
                PhotoErrorType::CorruptedFile,
                "Invalid PNG file",
            ))
        }
    } else if name.ends_with(".jpg") || name.ends_with(".jpeg") {
        if bytes.starts_with(JPEG_SIGNATURE) {
            Ok(())
        } else if bytes.starts_with(PNG_SIGNATURE) {
            Err(PhotoValidationError::new(
                PhotoErrorType::WrongFormat,
                "File is PNG but has .jpg/.jpeg extension",
            ))
        } else {
            Err(PhotoValidationError::new(
                PhotoErrorType::CorruptedFile,
                "Invalid JPEG file",
            ))
        }
    } else {
        Err(PhotoValidationError::new(
            PhotoErrorType::WrongFormat,
            "Unsupported photo format, use PNG or JPEG",
        ))
    }
}
