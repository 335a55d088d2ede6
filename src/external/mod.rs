//! External collaborators: vision OCR, TTS, translation, LINE push, OIDC.
//! We specify only the contracts we consume (spec §1).

pub mod line;
pub mod oidc;
pub mod translation;
pub mod tts;
pub mod vision;
