// Resume import: PDF text extraction, section parsing, upload storage.

pub mod extract;
pub mod handlers;
pub mod sections;
