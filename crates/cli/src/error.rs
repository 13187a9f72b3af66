use filter_engine::{CompileError, settings::SettingsError};
use model::{records::record::RecordError, schema::SchemaError};
use rsql_syntax::SyntaxError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read input file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Invalid schema document: {0}")]
    Schema(#[from] SchemaError),

    #[error("Invalid settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("{}", .0.format_error())]
    Syntax(#[from] SyntaxError),

    #[error("Failed to compile filter: {0}")]
    Compile(CompileError),

    #[error("Invalid record: {0}")]
    Record(#[from] RecordError),

    #[error("Failed to deserialize records as JSON: {0}")]
    JsonDeserialize(#[from] serde_json::Error),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(serde_json::Error),

    #[error("Entity '{0}' is not defined in the schema document")]
    UnknownEntity(String),

    #[error("Expected a JSON array of records")]
    NotAnArray,
}

impl From<CompileError> for CliError {
    fn from(err: CompileError) -> Self {
        match err {
            CompileError::Parse(syntax) => CliError::Syntax(syntax),
            other => CliError::Compile(other),
        }
    }
}
