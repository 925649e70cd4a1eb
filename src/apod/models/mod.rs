mod picture;

pub use picture::{MediaType, Picture};
