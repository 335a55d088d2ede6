//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            Self::NotFound
            | Self::MenuItemNotFound
            | Self::OrderNotFound
            | Self::VoiceFileNotFound => StatusCode::NOT_FOUND,

            Self::DataConflict | Self::OrderAlreadyTerminal => StatusCode::CONFLICT,

            Self::OcrUnrecognised | Self::OcrJsonInvalid => StatusCode::UNPROCESSABLE_ENTITY,

            Self::OcrTimeout | Self::OcrBackendError => StatusCode::INTERNAL_SERVER_ERROR,

            Self::NetworkError | Self::TimeoutError => StatusCode::SERVICE_UNAVAILABLE,

            Self::InternalError | Self::DatabaseError | Self::ConfigError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            // Validation / malformed-input errors default to 400
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps() {
        assert_eq!(ErrorCode::OrderNotFound.http_status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn ocr_unrecognised_is_422() {
        assert_eq!(
            ErrorCode::OcrUnrecognised.http_status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn ocr_timeout_is_500() {
        assert_eq!(
            ErrorCode::OcrTimeout.http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn store_id_default_400() {
        assert_eq!(
            ErrorCode::InvalidStoreId.http_status(),
            StatusCode::BAD_REQUEST
        );
    }
}
