//! Content resolution for pointer resources
//!
//! Summary, transcript and emotion envelopes carry a URL instead of the
//! content itself. Once such a resource completes, the resolver fetches the
//! URL and decodes the body. What happens when that fails is governed by a
//! `ResolveFailurePolicy`.

mod policy;
mod resolver;

pub use policy::ResolveFailurePolicy;
pub use resolver::{is_pointer, ContentResolver, ResolveError};
