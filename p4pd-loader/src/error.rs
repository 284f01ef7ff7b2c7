//! Loader errors
//!
//! Every variant is fatal: the IR is trusted to be self-consistent, so any
//! dangling reference aborts the load and names the entity that holds it.

use p4pd_model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("Malformed IR document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{entity}: {source}")]
    InvalidKind {
        entity: String,
        #[source]
        source: ModelError,
    },

    #[error("{entity}: header '{header}' is not declared")]
    UnknownHeader { entity: String, header: String },

    #[error("{entity}: header type '{header_type}' is not declared")]
    UnknownHeaderType { entity: String, header_type: String },

    #[error("{entity}: header type '{header_type}' has no field '{field}'")]
    UnknownField {
        entity: String,
        header_type: String,
        field: String,
    },

    #[error("{entity}: malformed field reference {value}")]
    MalformedFieldRef { entity: String, value: String },

    #[error("Table '{table}' references unknown action '{action}'")]
    UnknownAction { table: String, action: String },

    #[error("Table '{table}' default entry references unknown action id {id}")]
    UnknownActionId { table: String, id: i64 },

    #[error("Table '{table}' references unknown action profile '{profile}'")]
    UnknownActionProfile { table: String, profile: String },

    #[error("Indirect table '{table}' names no action profile")]
    MissingActionProfile { table: String },

    #[error("Learn list '{learn_list}': no action writes {header}.{field}")]
    UnresolvedLearnField {
        learn_list: String,
        header: String,
        field: String,
    },

    #[error("Learn list '{learn_list}': '{field}' is not a recovered metadata field")]
    UnknownMetadata { learn_list: String, field: String },

    #[error("Learn list '{learn_list}': unsupported element type '{kind}'")]
    UnsupportedLearnElement { learn_list: String, kind: String },

    #[error("Direct array '{array}' has no binding")]
    MissingBinding { array: String },

    #[error("Direct array '{array}' is bound to unknown table '{table}'")]
    UnknownBinding { array: String, table: String },

    #[error("Indexed array '{array}' has no size")]
    MissingSize { array: String },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LoaderError>;
