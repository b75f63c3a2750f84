pub mod limit;
pub mod mutate;
pub mod prompt;
