pub mod error;

pub mod csv;
