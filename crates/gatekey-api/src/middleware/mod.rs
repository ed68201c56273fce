//! HTTP middleware: content-type enforcement, CORS, request logging.

pub mod content_type;
pub mod cors;
pub mod logging;
