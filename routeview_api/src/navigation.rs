pub mod start;
pub mod ws;
