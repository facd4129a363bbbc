//! Server-side services.

pub mod order_pipeline;

pub use order_pipeline::{OrderPipeline, SubmissionError, SubmissionReport};
