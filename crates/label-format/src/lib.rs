pub mod errors;
pub mod export;
pub mod extract;
pub mod metadata;
pub mod sidecar;

pub use errors::ExportError;
pub use export::export_labeled_geometry;
pub use extract::{extract_labels, relation_matrix, PartLabels};
pub use metadata::{save_metadata, PartMetadata, FORMAT_VERSION};
pub use sidecar::sidecar_json;
