//! Customer account domain: types, lifecycle rules, and validation.
//!
//! A customer account tracks what a customer owes the business. Balance
//! fields change only through the payment processor; profile edits can
//! never touch them.

pub mod error;
pub mod types;
pub mod validation;

pub use error::AccountError;
pub use types::{
    AccountStatus, AccountType, CreateAccountInput, CustomerAccount, UpdateProfileInput,
    generate_account_number,
};
pub use validation::{
    validate_create, validate_delete, validate_profile_update, validate_status_transition,
};
