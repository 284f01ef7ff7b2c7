//! # Metadata Name Recovery
//!
//! The compiler flattens user metadata into the synthetic `scalars_0`
//! header type, renaming each field `metadata._<name><index>` where
//! `<index>` counts the metadata fields seen so far. Learn lists only
//! refer to these mangled names, so the readable name is recovered here by
//! dropping the `metadata._` prefix and the positional index.

use crate::ir::IrHeaderType;
use std::collections::BTreeMap;

/// Header type holding flattened scalars and metadata
pub const SCALARS_HEADER_TYPE: &str = "scalars_0";

const METADATA_MARKER: &str = "metadata";
const METADATA_PREFIX: &str = "metadata._";

/// Mangled scalar field name -> readable metadata name
///
/// A name that does not end with its positional index is kept whole
/// instead of losing as many trailing characters as the index has digits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataNames {
    names: BTreeMap<String, String>,
}

impl MetadataNames {
    pub fn from_header_types(header_types: &[IrHeaderType]) -> Self {
        let mut names = BTreeMap::new();

        for header_type in header_types
            .iter()
            .filter(|t| t.name == SCALARS_HEADER_TYPE)
        {
            let metadata_fields = header_type
                .fields
                .iter()
                .filter(|f| f.name.contains(METADATA_MARKER));

            for (index, field) in metadata_fields.enumerate() {
                let unprefixed = field.name.replace(METADATA_PREFIX, "");
                let readable = strip_index(&unprefixed, index);
                tracing::trace!("metadata field {} -> {}", field.name, readable);
                names.insert(field.name.clone(), readable.to_string());
            }
        }

        Self { names }
    }

    /// Readable name for a mangled scalar field
    pub fn resolve(&self, field: &str) -> Option<&str> {
        self.names.get(field).map(String::as_str)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Drop the positional index appended by the compiler
///
/// Names that do not end with their index are kept unchanged.
fn strip_index(name: &str, index: usize) -> &str {
    name.strip_suffix(index.to_string().as_str()).unwrap_or(name)
}
