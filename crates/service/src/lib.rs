//! Service layer providing the blog's business operations on top of models.
//! - Separates business logic from data access.
//! - Reuses validation and entity definitions in `models` crate.
//! - Wraps every operation in an explicit transaction.

pub mod errors;
pub mod blog;
#[cfg(test)]
pub mod test_support;
