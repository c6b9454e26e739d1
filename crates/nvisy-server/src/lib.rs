#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod error;
mod utility;

pub mod extract;
pub mod handler;
pub mod prelude;
pub mod service;

pub use crate::error::{BoxedError, Error, ErrorKind, Result};
pub use crate::utility::tracing_targets::{TRACING_TARGET_EXTRACT, TRACING_TARGET_SERVICE};
