/// Validation functions for email addresses
pub mod validation;
