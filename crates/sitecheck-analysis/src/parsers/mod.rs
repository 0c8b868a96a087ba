//! HTML parser subsystem: tree-sitter HTML grammar, owned document trees,
//! thread_local parser instance, session-scoped parse cache.

pub mod cache;
pub mod entities;
pub mod error_tolerant;
pub mod html;
pub mod types;

pub use cache::DocumentCache;
pub use html::parse_html;
pub use types::{Child, Element, HtmlDocument, NodeId};
