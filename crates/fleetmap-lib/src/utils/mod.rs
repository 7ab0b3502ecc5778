// Utilities module

pub mod time;
