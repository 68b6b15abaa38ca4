use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Attribute '{attribute}' unreadable: {reason}")]
    AttributeUnreadable {
        attribute: &'static str,
        reason: String,
    },

    #[error("Icon lookup failed for {package}: {reason}")]
    IconLookup { package: String, reason: String },

    #[error("Failed to write '{attribute}' on '{title}': {reason}")]
    RenderWrite {
        attribute: &'static str,
        title: String,
        reason: String,
    },

    #[error("Transform fault: {0}")]
    TransformFault(String),

    #[error("{0}")]
    Other(String),
}
