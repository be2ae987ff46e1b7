// Paragraph role rules - used when rebuilding a cleaned document
// - engine.rs: RoleEngine, the RoleRule trait and BlockContext helpers
// - role_detection.rs: title, author/affiliation, heading and reference heuristics

pub mod engine;
pub mod role_detection;

pub use engine::*;
