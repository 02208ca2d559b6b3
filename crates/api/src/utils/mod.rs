mod span;

pub use span::parse_span;
