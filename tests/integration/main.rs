mod engine_lifecycle;
mod session_flow;
mod source_resolution;
mod support;
