//! Signature policy for inbound Mercado Pago notifications.
//!
//! Notifications carry a shared secret in `x-mp-signature` or
//! `x-signature`. With no secret configured the policy denies everything;
//! local development can opt into the old permissive behavior with an
//! explicit insecure flag.

/// Header names accepted for the shared-secret signature.
pub const SIGNATURE_HEADERS: [&str; 2] = ["x-mp-signature", "x-signature"];

/// Decides whether an inbound webhook request is trusted.
#[derive(Debug, Clone)]
pub struct SignaturePolicy {
    secret: Option<String>,
    allow_insecure: bool,
}

impl SignaturePolicy {
    pub fn new(secret: Option<String>, allow_insecure: bool) -> Self {
        Self {
            secret,
            allow_insecure,
        }
    }

    /// Verify a provided signature value against the policy.
    ///
    /// - Secret configured: the provided value must match exactly.
    /// - No secret, insecure mode enabled: everything is accepted.
    /// - No secret, insecure mode off: everything is rejected.
    pub fn verify(&self, provided: Option<&str>) -> bool {
        match &self.secret {
            Some(secret) => provided == Some(secret.as_str()),
            None => self.allow_insecure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_signature_is_accepted() {
        let policy = SignaturePolicy::new(Some("s3cret".to_string()), false);
        assert!(policy.verify(Some("s3cret")));
    }

    #[test]
    fn mismatched_or_absent_signature_is_rejected() {
        let policy = SignaturePolicy::new(Some("s3cret".to_string()), false);
        assert!(!policy.verify(Some("wrong")));
        assert!(!policy.verify(None));
    }

    #[test]
    fn no_secret_rejects_by_default() {
        let policy = SignaturePolicy::new(None, false);
        assert!(!policy.verify(None));
        assert!(!policy.verify(Some("anything")));
    }

    #[test]
    fn insecure_mode_accepts_unsigned_requests() {
        let policy = SignaturePolicy::new(None, true);
        assert!(policy.verify(None));
        assert!(policy.verify(Some("anything")));
    }

    #[test]
    fn insecure_flag_does_not_bypass_a_configured_secret() {
        let policy = SignaturePolicy::new(Some("s3cret".to_string()), true);
        assert!(!policy.verify(None));
        assert!(policy.verify(Some("s3cret")));
    }
}
