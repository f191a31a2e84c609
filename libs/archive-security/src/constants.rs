//! Well-known role values and profile attribute names.

/// The single privileged role value. Compared with exact string equality.
pub const ADMIN_ROLE: &str = "admin";

/// Profile attribute holding the principal's role.
pub const ROLE_ATTRIBUTE: &str = "role";
