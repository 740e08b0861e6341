//! Account role constants.
//!
//! Roles are stored as plain strings on the `users` table and embedded in
//! JWT claims. Producers publish beats and receive marketplace payouts;
//! buyers purchase licenses.

/// Role for accounts that publish beats and link a Mercado Pago account.
pub const ROLE_PRODUCER: &str = "producer";

/// Role for accounts that only purchase licenses.
pub const ROLE_BUYER: &str = "buyer";

/// Whether a role string names a known role.
pub fn is_valid_role(role: &str) -> bool {
    role == ROLE_PRODUCER || role == ROLE_BUYER
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_roles_are_valid() {
        assert!(is_valid_role(ROLE_PRODUCER));
        assert!(is_valid_role(ROLE_BUYER));
    }

    #[test]
    fn unknown_role_is_invalid() {
        assert!(!is_valid_role("admin"));
        assert!(!is_valid_role(""));
    }
}
