//! Library components of the `pgx` command line tool.

pub mod logging;
pub mod request;
