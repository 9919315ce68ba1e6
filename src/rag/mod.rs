//! RAG (Retrieval-Augmented Generation) module
//!
//! End-to-end grounded answering: embed the query, fetch the top-k nearest
//! chunks from the vector store, assemble them into a grounding context and
//! generate an answer with the language model.

pub mod context;
pub mod retriever;

pub use context::assemble_context;
pub use retriever::Retriever;
