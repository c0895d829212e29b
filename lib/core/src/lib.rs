pub mod error;
pub mod module;
pub mod text;
pub mod types;

pub use error::ServiceError;
pub use module::Module;
pub use text::{extraer_youtube_id, generar_slug};
pub use types::{ListParams, ListResult, merge_patch, new_id, now_rfc3339};
