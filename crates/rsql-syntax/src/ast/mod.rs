pub mod comparator;
pub mod literal;
pub mod node;
pub mod span;

pub use comparator::Comparator;
pub use literal::RawLiteral;
pub use node::{Comparison, FilterNode};
pub use span::Span;
