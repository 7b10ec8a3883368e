mod email_address;
mod full_name;

pub use email_address::EmailAddress;
pub use full_name::FullName;
