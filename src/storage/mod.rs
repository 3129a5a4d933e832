// In-memory storage.

pub mod map;

// Re-export main types
pub use map::Map;
