pub mod connection;
pub mod event;
pub mod hub;

#[cfg(test)]
pub(crate) mod test_utils;
