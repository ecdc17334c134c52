pub mod errors;
pub mod db;
pub mod post;
pub mod comment;

pub use post::PostStatus;

#[cfg(test)]
mod tests;
