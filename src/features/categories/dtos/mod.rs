mod vocabulary_dto;

pub use vocabulary_dto::*;
