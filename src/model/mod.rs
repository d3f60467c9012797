// Vector-space model — corpus, dictionary, centroids and nearest-centroid
// classification.
//
// Everything in here is synchronous and pure over a CorpusModel snapshot.
// Loading, saving and locking live in `store` and `service`.

pub mod corpus;
pub mod dictionary;
pub mod centroid;
pub mod classifier;

pub use classifier::{classify, Ranking, ScoredCategory};
pub use corpus::{CorpusModel, DocumentId};
pub use dictionary::{build_dictionary, Dictionary};
