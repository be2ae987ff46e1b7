// All core functionality is in ghostscan-core
// This CLI acts as a thin wrapper around the core library

// CLI-specific modules
pub mod input;

// Re-export core types for convenience
pub use ghostscan_core::*;
