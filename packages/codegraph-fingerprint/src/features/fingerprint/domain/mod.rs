//! Fingerprint domain: canonical body accumulation and function contexts

mod abstraction;
mod context;

pub use abstraction::{Abstraction, FUNC_CALL, FUNC_DEF, FUNC_NAME, VAR};
pub use context::FunctionContext;
