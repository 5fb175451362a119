//! High-level operations.

pub mod assemble;

pub use assemble::AssetAssembler;
