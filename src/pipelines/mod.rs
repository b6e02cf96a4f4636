pub mod url;

pub use url::{extract_recipe, process};
