mod templates;


pub use templates::{PageKind, RenderedPage, StaticPages};
