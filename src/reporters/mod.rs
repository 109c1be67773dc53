//! Local and composite reporters.
//!
//! # Data Flow
//! ```text
//! fan_out.rs: one error → N reporters, concurrently, joined before return
//! writer.rs:  error → "{err}\n" on a byte stream
//! trace.rs:   error → tracing event
//! ```
//!
//! # Design Decisions
//! - None of these reporters can fail outward
//! - Writer and tracing reporters are the usual backups for wire delivery

pub mod fan_out;
pub mod trace;
pub mod writer;

pub use fan_out::FanOutReporter;
pub use trace::TracingReporter;
pub use writer::WriterReporter;
