/// Core value types shared across modules.
pub mod core;
/// Error taxonomy.
pub mod error;
/// Hashing and small numeric helpers.
pub mod math;
