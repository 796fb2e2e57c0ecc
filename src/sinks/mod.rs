//! Sink implementations
//!
//! Any `std::io::Write + Send` value can back a collector; these cover the
//! cases the standard library does not.

pub mod buffer;
pub mod file;

pub use buffer::SharedBuffer;
pub use file::FileSink;
