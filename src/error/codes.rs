//! Error codes for ordering-helper-backend
//!
//! Ranges:
//! - 0xxx: general
//! - 1xxx: store / menu
//! - 2xxx: OCR ingestion
//! - 3xxx: order pipeline
//! - 4xxx: voice synthesis
//! - 5xxx: LINE push
//! - 6xxx: translation
//! - 9xxx: system

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    Success = 0,
    Unknown = 1,
    ValidationFailed = 2,
    NotFound = 3,
    InvalidRequest = 5,

    // Store / menu
    InvalidStoreId = 1001,
    MenuItemNotFound = 1002,

    // OCR
    OcrUnrecognised = 2001,
    OcrJsonInvalid = 2002,
    OcrTimeout = 2003,
    OcrBackendError = 2004,
    ImageTooLarge = 2005,
    UnsupportedImageFormat = 2006,

    // Order pipeline
    OrderNotFound = 3001,
    OrderEmpty = 3002,
    DataConflict = 3003,
    OrderAlreadyTerminal = 3004,

    // Voice
    VoiceFileNotFound = 4001,
    ResourceExhausted = 4002,

    // LINE
    InvalidLineUserId = 5001,
    PushFailed = 5002,

    // Translation
    UnsupportedLanguage = 6001,

    // System
    InternalError = 9001,
    DatabaseError = 9002,
    NetworkError = 9003,
    TimeoutError = 9004,
    ConfigError = 9005,
}

impl ErrorCode {
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidRequest => "Invalid request",

            ErrorCode::InvalidStoreId => "Invalid store identifier",
            ErrorCode::MenuItemNotFound => "Menu item not found",

            ErrorCode::OcrUnrecognised => "Menu image could not be recognised",
            ErrorCode::OcrJsonInvalid => "Vision response was not valid JSON",
            ErrorCode::OcrTimeout => "圖片處理時間過長,請嘗試上傳較小的圖片",
            ErrorCode::OcrBackendError => "Vision backend unreachable",
            ErrorCode::ImageTooLarge => "Image exceeds the maximum allowed size",
            ErrorCode::UnsupportedImageFormat => "Unsupported image format",

            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderEmpty => "Cart is empty",
            ErrorCode::DataConflict => "Order data conflict",
            ErrorCode::OrderAlreadyTerminal => "Order has already reached a terminal state",

            ErrorCode::VoiceFileNotFound => "Voice file not found",
            ErrorCode::ResourceExhausted => "Resource budget exceeded",

            ErrorCode::InvalidLineUserId => "LINE user id is not well-formed",
            ErrorCode::PushFailed => "LINE push delivery failed",

            ErrorCode::UnsupportedLanguage => "Unsupported language tag",

            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            5 => Ok(ErrorCode::InvalidRequest),

            1001 => Ok(ErrorCode::InvalidStoreId),
            1002 => Ok(ErrorCode::MenuItemNotFound),

            2001 => Ok(ErrorCode::OcrUnrecognised),
            2002 => Ok(ErrorCode::OcrJsonInvalid),
            2003 => Ok(ErrorCode::OcrTimeout),
            2004 => Ok(ErrorCode::OcrBackendError),
            2005 => Ok(ErrorCode::ImageTooLarge),
            2006 => Ok(ErrorCode::UnsupportedImageFormat),

            3001 => Ok(ErrorCode::OrderNotFound),
            3002 => Ok(ErrorCode::OrderEmpty),
            3003 => Ok(ErrorCode::DataConflict),
            3004 => Ok(ErrorCode::OrderAlreadyTerminal),

            4001 => Ok(ErrorCode::VoiceFileNotFound),
            4002 => Ok(ErrorCode::ResourceExhausted),

            5001 => Ok(ErrorCode::InvalidLineUserId),
            5002 => Ok(ErrorCode::PushFailed),

            6001 => Ok(ErrorCode::UnsupportedLanguage),

            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        for code in [
            ErrorCode::Success,
            ErrorCode::InvalidStoreId,
            ErrorCode::OcrTimeout,
            ErrorCode::OrderNotFound,
            ErrorCode::InvalidLineUserId,
            ErrorCode::InternalError,
        ] {
            let n: u16 = code.into();
            assert_eq!(ErrorCode::try_from(n).unwrap(), code);
        }
    }

    #[test]
    fn try_from_invalid() {
        assert_eq!(ErrorCode::try_from(424242), Err(InvalidErrorCode(424242)));
    }

    #[test]
    fn is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::OrderNotFound.is_success());
    }
}
