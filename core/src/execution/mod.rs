//! Execution tracing

pub mod tracer;

pub use self::tracer::{ExecutionTrace, ExecutionTracer, TraceError, TraceEvent, TraceMetadata, TracePoint};
