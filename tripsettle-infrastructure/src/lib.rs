#![warn(clippy::uninlined_format_args)]

pub mod json_source;

pub use json_source::JsonTripSource;
