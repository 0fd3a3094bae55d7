//! Shared accessor for records that resolve to an email address.

/// A record the API resolves to a full email address.
///
/// Implemented by [`Mailbox`](crate::Mailbox) and [`Identity`](crate::Identity)
/// so callers can work with either without knowing which one they hold.
pub trait Addressable {
    /// The resolved `local_part@domain` address, as reported by the API.
    fn address(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Identity, Mailbox};

    fn addresses(records: &[&dyn Addressable]) -> Vec<String> {
        records.iter().map(|r| r.address().to_string()).collect()
    }

    #[test]
    fn mailbox_and_identity_share_accessor() {
        let mailbox = Mailbox {
            address: "alice@example.com".into(),
            ..Mailbox::default()
        };
        let identity = Identity {
            address: "sales@example.com".into(),
            ..Identity::default()
        };

        assert_eq!(
            addresses(&[&mailbox, &identity]),
            ["alice@example.com", "sales@example.com"]
        );
    }
}
