pub mod read_models;
pub mod todos;
