//! Identity records and the `mailboxes/{local_part}/identities` endpoints.

use crate::client::{decode, encode, non_blank, nullable};
use crate::{Addressable, Client, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Which credentials an identity authenticates with.
///
/// Values the client does not know are kept verbatim in [`PasswordUse::Other`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordUse {
    /// The identity cannot log in; it only sends and receives as an alias.
    None,
    /// Log in with the owning mailbox's password.
    Mailbox,
    /// Log in with the identity's own password.
    Custom,
    /// Any other value reported by the API.
    Other(String),
}

impl PasswordUse {
    /// Wire representation.
    pub fn as_str(&self) -> &str {
        match self {
            PasswordUse::None => "none",
            PasswordUse::Mailbox => "mailbox",
            PasswordUse::Custom => "custom",
            PasswordUse::Other(raw) => raw,
        }
    }
}

impl From<String> for PasswordUse {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "none" => PasswordUse::None,
            "mailbox" => PasswordUse::Mailbox,
            "custom" => PasswordUse::Custom,
            _ => PasswordUse::Other(raw),
        }
    }
}

impl Serialize for PasswordUse {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PasswordUse {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from)
    }
}

/// An alternate address a mailbox can send and receive as.
///
/// Identities are scoped by the owning mailbox's local part and their own
/// local part, which doubles as the identity id in request paths.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Identity {
    #[serde(deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub local_part: String,
    #[serde(deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub domain: String,
    #[serde(deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub address: String,
    #[serde(deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(deserialize_with = "nullable", skip_serializing_if = "std::ops::Not::not")]
    pub may_send: bool,
    #[serde(deserialize_with = "nullable", skip_serializing_if = "std::ops::Not::not")]
    pub may_receive: bool,
    #[serde(deserialize_with = "nullable", skip_serializing_if = "std::ops::Not::not")]
    pub may_access_imap: bool,
    #[serde(deserialize_with = "nullable", skip_serializing_if = "std::ops::Not::not")]
    pub may_access_pop3: bool,
    #[serde(deserialize_with = "nullable", skip_serializing_if = "std::ops::Not::not")]
    pub may_access_managesieve: bool,
    /// Always sent, empty when the identity has no password of its own.
    #[serde(deserialize_with = "nullable")]
    pub password: String,
    /// Blank values from the API decode to `None`.
    #[serde(deserialize_with = "non_blank", skip_serializing_if = "Option::is_none")]
    pub password_use: Option<PasswordUse>,
    #[serde(deserialize_with = "nullable", skip_serializing_if = "std::ops::Not::not")]
    pub footer_active: bool,
    #[serde(deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub footer_plain_body: String,
    #[serde(deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub footer_html_body: String,
}

impl Addressable for Identity {
    fn address(&self) -> &str {
        &self.address
    }
}

#[derive(Deserialize)]
struct IdentityList {
    #[serde(default, deserialize_with = "nullable", alias = "Identities")]
    identities: Vec<Identity>,
}

impl Client {
    /// Get all identities of a mailbox.
    ///
    /// Returns an empty list when the mailbox has none.
    pub async fn list_identities(&self, local_part: &str) -> Result<Vec<Identity>> {
        const OP: &str = "list_identities";

        let body = self
            .get(&identities_path(local_part))
            .await
            .map_err(|e| e.context(OP))?;
        let list: IdentityList = decode(&body).map_err(|e| e.context(OP))?;
        Ok(list.identities)
    }

    /// Get a single identity of a mailbox.
    pub async fn get_identity(&self, local_part: &str, id: &str) -> Result<Identity> {
        const OP: &str = "get_identity";

        let body = self
            .get(&identity_path(local_part, id))
            .await
            .map_err(|e| e.context(OP))?;
        decode(&body).map_err(|e| e.context(OP))
    }

    /// Create an identity on a mailbox and return it as stored by the API.
    pub async fn create_identity(&self, local_part: &str, identity: &Identity) -> Result<Identity> {
        const OP: &str = "create_identity";

        let request = encode(identity).map_err(|e| e.context(OP))?;
        let body = self
            .post(&identities_path(local_part), request)
            .await
            .map_err(|e| e.context(OP))?;
        decode(&body).map_err(|e| e.context(OP))
    }

    /// Create an identity that can log in.
    ///
    /// An empty `password` makes the identity reuse the mailbox password;
    /// anything else becomes the identity's own password.
    ///
    /// # Examples
    /// ```no_run
    /// # use migadu_client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), migadu_client::Error> {
    /// let client = Client::new("admin@example.com", "api-key", None, "example.com", None)?;
    /// let identity = client
    ///     .create_identity_with_password("alice", "Sales", "sales", "")
    ///     .await?;
    /// println!("{}", identity.address);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_identity_with_password(
        &self,
        local_part: &str,
        name: &str,
        id: &str,
        password: &str,
    ) -> Result<Identity> {
        let password_use = if password.is_empty() {
            PasswordUse::Mailbox
        } else {
            PasswordUse::Custom
        };
        let identity = Identity {
            name: name.to_string(),
            local_part: id.to_string(),
            password: password.to_string(),
            password_use: Some(password_use),
            ..Identity::default()
        };
        self.create_identity(local_part, &identity).await
    }

    /// Create an identity that cannot log in.
    pub async fn create_identity_no_auth(
        &self,
        local_part: &str,
        name: &str,
        id: &str,
    ) -> Result<Identity> {
        let identity = Identity {
            name: name.to_string(),
            local_part: id.to_string(),
            password_use: Some(PasswordUse::None),
            ..Identity::default()
        };
        self.create_identity(local_part, &identity).await
    }

    /// Update an identity with the non-empty fields of `changes`.
    pub async fn update_identity(
        &self,
        local_part: &str,
        id: &str,
        changes: &Identity,
    ) -> Result<Identity> {
        const OP: &str = "update_identity";

        let request = encode(changes).map_err(|e| e.context(OP))?;
        let body = self
            .put(&identity_path(local_part, id), request)
            .await
            .map_err(|e| e.context(OP))?;
        decode(&body).map_err(|e| e.context(OP))
    }

    /// Delete an identity.
    pub async fn delete_identity(&self, local_part: &str, id: &str) -> Result<()> {
        self.delete(&identity_path(local_part, id))
            .await
            .map_err(|e| e.context("delete_identity"))?;
        Ok(())
    }
}

fn identities_path(local_part: &str) -> String {
    format!("mailboxes/{local_part}/identities")
}

fn identity_path(local_part: &str, id: &str) -> String {
    format!("mailboxes/{local_part}/identities/{id}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn password_is_always_encoded() {
        let identity = Identity {
            local_part: "sales".into(),
            password_use: Some(PasswordUse::None),
            ..Identity::default()
        };

        assert_eq!(
            serde_json::to_value(&identity).unwrap(),
            json!({"local_part": "sales", "password": "", "password_use": "none"})
        );
    }

    #[test]
    fn decodes_password_use() {
        let identity: Identity = serde_json::from_value(json!({
            "local_part": "sales",
            "address": "sales@example.com",
            "password_use": "custom",
            "may_send": true,
            "footer_html_body": null
        }))
        .unwrap();

        assert_eq!(identity.password_use, Some(PasswordUse::Custom));
        assert!(identity.may_send);
        assert_eq!(identity.footer_html_body, "");
        assert_eq!(identity.address(), "sales@example.com");
    }

    #[test]
    fn list_survives_unknown_password_use() {
        let list: IdentityList = serde_json::from_value(json!({
            "identities": [
                {"local_part": "sales", "password_use": "alias"},
                {"local_part": "support", "password_use": "mailbox"},
                {"local_part": "info", "password_use": ""}
            ]
        }))
        .unwrap();

        assert_eq!(
            list.identities[0].password_use,
            Some(PasswordUse::Other("alias".into()))
        );
        assert_eq!(list.identities[1].password_use, Some(PasswordUse::Mailbox));
        assert_eq!(list.identities[2].password_use, None);
        assert_eq!(list.identities[0].password_use.as_ref().map(PasswordUse::as_str), Some("alias"));
    }

    #[test]
    fn paths_nest_under_mailbox() {
        assert_eq!(identities_path("alice"), "mailboxes/alice/identities");
        assert_eq!(identity_path("alice", "sales"), "mailboxes/alice/identities/sales");
    }
}
