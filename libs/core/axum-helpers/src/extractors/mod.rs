//! Request extractors that reject with the shared JSON error body.

pub mod id_path;
pub mod uuid_path;
pub mod validated_json;

pub use id_path::IdPath;
pub use uuid_path::UuidPath;
pub use validated_json::ValidatedJson;
