//! Access to the compiler's build output

pub mod artifacts;

pub use artifacts::ArtifactStore;
