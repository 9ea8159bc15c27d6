//! Subject vocabulary and preference encoding.
//!
//! Every subject-valued attribute (liked subjects, offered subjects, scored
//! subjects, grades) is encoded against one fixed, ordered vocabulary so
//! that student and profile vectors can be combined with dot products.
//!
//! # Key Types
//!
//! - [`SubjectVocabulary`]: Ordered subject names, with a process-wide default
//! - [`SubjectVector`]: Dense vector in vocabulary order
//! - [`SubjectInput`]: Sparse list, sparse mapping, or an already-encoded vector

mod encoder;
mod vector;
mod vocabulary;

pub use encoder::SubjectInput;
pub use vector::SubjectVector;
pub use vocabulary::{normalize_name, SubjectVocabulary};
