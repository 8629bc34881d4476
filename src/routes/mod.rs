//! Route handlers. Each takes the raw query (GET) or body (POST) and returns
//! an HTML fragment.

pub mod card;
pub mod settings;
pub mod util;
