//! Crate-wide error type

/// Everything that can fail outside of normal gameplay outcomes.
///
/// Collisions are not errors: they are reported through tick outcomes.
#[derive(thiserror::Error, Debug)]
pub enum ArcadeError {
    #[error("Could not parse settings: {0}")]
    Settings(#[from] serde_json::Error),
    #[error("Invalid setting `{field}`: {reason}")]
    InvalidSetting { field: &'static str, reason: String },
    #[error("No free cell found for food after {attempts} attempts")]
    FoodPlacement { attempts: u32 },
    #[error("Platform error: {0}")]
    Platform(String),
    #[error("Graphics error: {0}")]
    Graphics(String),
}

pub type Result<T> = std::result::Result<T, ArcadeError>;
