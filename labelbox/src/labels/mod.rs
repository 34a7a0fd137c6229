//! Labels: named, colored tags owned by a group

mod model;
mod repository;
mod routes;

pub use model::{LabelCreate, LabelOut, LabelSummary, LabelUpdate};
pub use repository::{InMemoryLabelRepository, LabelRepository};
pub use routes::{routes, versioned_routes, COLLECTION_METHODS};
