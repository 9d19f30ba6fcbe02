pub mod validation;

pub use validation::ValidJson;
