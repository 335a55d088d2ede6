//! Error category classification, by leading digit of the error code.

use super::codes::ErrorCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    General,
    Store,
    Ocr,
    Order,
    Voice,
    Line,
    Translation,
    System,
}

impl ErrorCategory {
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Store,
            2000..3000 => Self::Ocr,
            3000..4000 => Self::Order,
            4000..5000 => Self::Voice,
            5000..6000 => Self::Line,
            6000..7000 => Self::Translation,
            _ => Self::System,
        }
    }
}

impl ErrorCode {
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_boundaries() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1001), ErrorCategory::Store);
        assert_eq!(ErrorCategory::from_code(2003), ErrorCategory::Ocr);
        assert_eq!(ErrorCategory::from_code(3001), ErrorCategory::Order);
        assert_eq!(ErrorCategory::from_code(4001), ErrorCategory::Voice);
        assert_eq!(ErrorCategory::from_code(5001), ErrorCategory::Line);
        assert_eq!(ErrorCategory::from_code(6001), ErrorCategory::Translation);
        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::System);
    }
}
