pub mod check;
pub mod init;
pub mod validate;

/// Exit code for form data that fails validation.
pub const EXIT_INVALID: i32 = 1;

/// Exit code for a schema that cannot be compiled or does not fit the data.
pub const EXIT_SCHEMA_FAULT: i32 = 2;
