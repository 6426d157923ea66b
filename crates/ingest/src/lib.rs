pub mod chunker;
pub mod decoder;
pub mod normalize;

pub use chunker::{Chunker, ChunkerConfig};
pub use decoder::{DecodeError, decode};
pub use normalize::{TextNormalizer, preview};
