pub mod lists;

pub use lists::{split_comma_list, split_delimited_list};
