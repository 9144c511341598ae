pub mod cache;
pub mod dataset_entry;
pub mod error;
mod file_utils;
pub mod mock_set;
pub mod registry;

#[cfg(test)]
pub(crate) mod test_utils;
