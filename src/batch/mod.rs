pub mod sql_file;
pub use sql_file::*;

pub mod report;
pub use report::*;

pub mod processor;
pub use processor::*;
