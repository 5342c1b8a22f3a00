use thiserror::Error;

#[derive(Error, Debug)]
pub enum StarforceError {
    #[error("Invalid input for {field}: {value:?}")]
    InvalidInput { field: &'static str, value: String },

    #[error("Invalid range: cannot go from star {start} to star {target}")]
    InvalidRange { start: u32, target: u32 },

    #[error("Zero success probability at star {level}")]
    DegenerateProbability { level: u32 },

    #[error("Success probability {success} exceeds 1 at star {level}")]
    ProbabilityOverflow { level: u32, success: f64 },

    #[error("Invalid odds table: {0}")]
    InvalidOdds(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StarforceError>;
