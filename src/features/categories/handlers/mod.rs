mod vocabulary_handler;

pub use vocabulary_handler::*;
