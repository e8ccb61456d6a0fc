//! Terminal sink collaborators: encoders, writers, and the sink core

pub mod encoder;
pub mod sink_core;
pub mod writer;

pub use encoder::{Encoder, EncoderConfig, TimestampFormat};
pub use sink_core::SinkCore;
pub use writer::open_writers;
