// Test module organization
pub mod mock_engine;
pub mod test_find;
pub mod test_flags;
pub mod test_split;
#[cfg(feature = "serde")]
pub mod test_serde;
