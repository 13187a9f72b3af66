pub mod cache;
pub mod coercion;
pub mod compiler;
pub mod error;
pub mod like;
pub mod naming;
pub mod predicate;
pub mod resolver;
pub mod settings;

pub use compiler::FilterCompiler;
pub use error::{CompileError, Result};
pub use naming::NamingConvention;
pub use predicate::{CompiledPredicate, PredicateNode};
pub use settings::CompilerSettings;
