pub mod category_store;
pub mod classifier;
pub mod result;
pub mod types;
pub mod vocabulary;
