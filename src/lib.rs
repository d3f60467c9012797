// Rubric: nearest-centroid TF-IDF classification for news articles.
//
// This is the library root. Each module corresponds to one stage of the
// classification pipeline or one of the collaborators around it.

pub mod config;
pub mod db;
pub mod error;
pub mod model;
pub mod output;
pub mod service;
pub mod status;
pub mod store;
pub mod text;

pub use error::{ClassifierError, Result};
pub use service::ClassifierService;
