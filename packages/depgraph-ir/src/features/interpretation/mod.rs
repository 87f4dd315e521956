pub mod dependency_summary;
pub mod identifier_analysis;
pub mod path_resolver;
pub mod ports;
pub mod registry;

pub use ports::{InterpretationContext, Interpreter};
pub use registry::{InterpreterRegistry, InterpreterRunOutcome};
