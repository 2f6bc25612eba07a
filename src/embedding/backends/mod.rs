#[cfg(feature = "fastembed")]
pub mod fastembed;
pub mod hashing;
