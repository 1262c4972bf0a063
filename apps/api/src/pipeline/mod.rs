//! Request-processing pipeline: content fingerprinting, prompt adapter
//! fan-out, and cached persistence of processed applications.

pub mod builder;
pub mod fingerprint;
pub mod flows;
pub mod handlers;
pub mod orchestrator;
pub mod prompts;
