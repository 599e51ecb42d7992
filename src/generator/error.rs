use thiserror::Error;

/// Why one output format could not be produced. Other formats are unaffected.
#[derive(Error, Debug)]
pub enum EmitError {
    #[error("template not found: {0}")]
    TemplateMissing(String),

    #[error("invalid template: {0}")]
    TemplateInvalid(String),

    #[error("serialization failed: {0}")]
    Serialize(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
