pub mod member;
pub mod roster;
pub mod search;
pub mod team;

// Re-export all models for easy importing
pub use member::*;
pub use roster::*;
pub use search::*;
pub use team::*;
