//! Progress display while stages run

pub mod reporter;
