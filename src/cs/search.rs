pub mod bracket;

pub use bracket::{bracket, upper_bound_binary, upper_bound_linear, SearchStrategy};
