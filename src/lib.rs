//! `timedline`: annotate each line from stdin with the time elapsed since the
//! previous line.
//!
//! A format template such as `"%5m ms | %i"` is compiled once into a
//! [`Template`], then an [`Engine`] renders it for every input record,
//! measuring elapsed time with a monotonic [`Clock`].
//!
//! # Example
//!
//! ```
//! use std::io::Cursor;
//! use timedline::{Engine, MonotonicClock, Template};
//!
//! let template = Template::compile("[%i]").unwrap();
//! let mut engine = Engine::new(template, MonotonicClock);
//! let mut out = Vec::new();
//!
//! engine.run(Cursor::new("hello\nworld\n"), &mut out).unwrap();
//! assert_eq!(out, b"[hello]\n[world]\n");
//! ```

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod render;
pub mod template;

// Re-export primary API types for convenience.
pub use config::Config;
pub use engine::{Clock, Engine, MonotonicClock, Record};
pub use error::{TemplateError, TimedlineError};
pub use template::{Fill, Pad, Part, Template, Unit};
