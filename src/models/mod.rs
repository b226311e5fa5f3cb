pub use prenivdl_core::models::{media, settings};
