pub mod download;
pub mod interactive;
pub mod prompt;
