//! Catalog domain model.
//!
//! # Responsibility
//! - Define the plain records tracked by the catalog managers.
//! - Define the `Dataset` unit that storage reads and writes as a whole.
//!
//! # Invariants
//! - `Book::isbn` and `User::user_id` are unique keys within their section.
//! - At most one `CheckoutRecord` exists per isbn.
//! - Checkout records do not reference books/users by hard constraint.

pub mod book;
pub mod checkout;
pub mod dataset;
pub mod user;
