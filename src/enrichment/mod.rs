pub mod http;
pub mod knowledge_base;
pub mod metadata;
pub mod resolver;
