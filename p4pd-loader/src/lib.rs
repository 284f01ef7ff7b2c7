//! bmv2 JSON IR Loader
//!
//! Load a compiled P4 program into a PD generator [`Model`](p4pd_model::Model).
//!
//! ## Example
//!
//! ```rust
//! use p4pd_loader::load;
//!
//! let source = r#"{
//!     "header_types": [], "headers": [],
//!     "actions": [{"name": "drop", "id": 0, "runtime_data": [], "primitives": []}],
//!     "pipelines": [], "learn_lists": [],
//!     "meter_arrays": [], "counter_arrays": [], "register_arrays": []
//! }"#;
//!
//! let model = load(source).unwrap();
//! assert!(model.actions.contains("drop"));
//! ```

pub mod error;
pub mod ir;
pub mod metadata;
pub mod legacy;
pub mod loader;

pub use error::{LoaderError, Result};
pub use ir::IrDocument;
pub use loader::{load, load_document, load_file, load_value, VALID_MARKER};
pub use metadata::{MetadataNames, SCALARS_HEADER_TYPE};
