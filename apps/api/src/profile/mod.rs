// Profile normalization core and the Profile API.
// Everything under here except `store` and `handlers` is pure and synchronous.

pub mod entities;
pub mod fields;
pub mod grouping;
pub mod handlers;
pub mod heuristics;
pub mod models;
pub mod normalize;
pub mod reader;
pub mod serializer;
pub mod store;
pub mod tokenizer;
