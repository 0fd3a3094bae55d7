//! Mailbox records and the `mailboxes` endpoints.

use crate::client::{decode, encode, non_blank, nullable};
use crate::{Addressable, Client, Identity, Result};
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const SUBPATH: &str = "mailboxes";

/// How the initial password of a new mailbox is set.
///
/// Values the client does not know are kept verbatim in [`PasswordMethod::Other`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordMethod {
    /// The password is supplied in the request.
    Password,
    /// The user receives an invitation at the recovery address and picks one.
    Invitation,
    /// Any other value reported by the API.
    Other(String),
}

impl PasswordMethod {
    /// Wire representation.
    pub fn as_str(&self) -> &str {
        match self {
            PasswordMethod::Password => "password",
            PasswordMethod::Invitation => "invitation",
            PasswordMethod::Other(raw) => raw,
        }
    }
}

impl From<String> for PasswordMethod {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "password" => PasswordMethod::Password,
            "invitation" => PasswordMethod::Invitation,
            _ => PasswordMethod::Other(raw),
        }
    }
}

impl Serialize for PasswordMethod {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PasswordMethod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from)
    }
}

/// A mailbox on the client's domain.
///
/// Used both as the decoded API response and as the request body for create
/// and update calls. Empty strings, `false` flags, empty lists and `None`
/// values are left out of request bodies, so a default record with a few
/// fields set acts as a partial update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Mailbox {
    /// Part before the `@`; identifies the mailbox within the domain.
    #[serde(deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub local_part: String,
    /// Domain the mailbox belongs to. Set by the API.
    #[serde(deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub domain: String,
    /// Full address. Set by the API.
    #[serde(deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub address: String,
    /// Display name.
    #[serde(deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Internal mailboxes only exchange mail with the domain's own addresses.
    #[serde(deserialize_with = "nullable", skip_serializing_if = "std::ops::Not::not")]
    pub is_internal: bool,
    /// Allowed to send mail.
    #[serde(deserialize_with = "nullable", skip_serializing_if = "std::ops::Not::not")]
    pub may_send: bool,
    /// Accepts incoming mail.
    #[serde(deserialize_with = "nullable", skip_serializing_if = "std::ops::Not::not")]
    pub may_receive: bool,
    /// IMAP login allowed.
    #[serde(deserialize_with = "nullable", skip_serializing_if = "std::ops::Not::not")]
    pub may_access_imap: bool,
    /// POP3 login allowed.
    #[serde(deserialize_with = "nullable", skip_serializing_if = "std::ops::Not::not")]
    pub may_access_pop3: bool,
    /// ManageSieve login allowed.
    #[serde(deserialize_with = "nullable", skip_serializing_if = "std::ops::Not::not")]
    pub may_access_managesieve: bool,
    /// Write-only. Blank values from the API decode to `None`.
    #[serde(deserialize_with = "non_blank", skip_serializing_if = "Option::is_none")]
    pub password_method: Option<PasswordMethod>,
    /// Write-only.
    #[serde(deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub password: String,
    /// Write-only. Receives the invitation for [`PasswordMethod::Invitation`].
    #[serde(deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub password_recovery_email: String,
    /// What happens to mail classified as spam, e.g. `folder` or `drop`.
    #[serde(deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub spam_action: String,
    /// Spam filter strictness, e.g. `default` or `most_permissive`.
    #[serde(deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub spam_aggressiveness: String,
    /// Senders whose mail is always rejected.
    #[serde(deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub sender_denylist: Vec<String>,
    /// Senders whose mail bypasses the spam filter.
    #[serde(deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub sender_allowlist: Vec<String>,
    /// Recipient addresses this mailbox refuses mail for.
    #[serde(deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub recipient_denylist: Vec<String>,
    /// Autoresponder switched on.
    #[serde(deserialize_with = "nullable", skip_serializing_if = "std::ops::Not::not")]
    pub autorespond_active: bool,
    /// Subject line of automatic replies.
    #[serde(deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub autorespond_subject: String,
    /// Body of automatic replies.
    #[serde(deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub autorespond_body: String,
    /// Autoresponder stops after this instant; see [`crate::timestamp`] for the wire format.
    #[serde(with = "crate::timestamp", skip_serializing_if = "Option::is_none")]
    pub autorespond_expires_on: Option<DateTime<FixedOffset>>,
    /// Footer appended to outgoing mail.
    #[serde(deserialize_with = "nullable", skip_serializing_if = "std::ops::Not::not")]
    pub footer_active: bool,
    /// Footer for plain-text messages.
    #[serde(deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub footer_plain_body: String,
    /// Footer for HTML messages.
    #[serde(deserialize_with = "nullable", skip_serializing_if = "String::is_empty")]
    pub footer_html_body: String,
    /// Identities attached to this mailbox.
    #[serde(deserialize_with = "nullable", skip_serializing_if = "Vec::is_empty")]
    pub identities: Vec<Identity>,
}

impl Addressable for Mailbox {
    fn address(&self) -> &str {
        &self.address
    }
}

#[derive(Deserialize)]
struct MailboxList {
    #[serde(default, deserialize_with = "nullable", alias = "Mailboxes")]
    mailboxes: Vec<Mailbox>,
}

impl Client {
    /// Get all mailboxes on the domain.
    ///
    /// Returns an empty list when the domain has none.
    ///
    /// # Examples
    /// ```no_run
    /// # use migadu_client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), migadu_client::Error> {
    /// let client = Client::new("admin@example.com", "api-key", None, "example.com", None)?;
    /// for mailbox in client.list_mailboxes().await? {
    ///     println!("{}", mailbox.address);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list_mailboxes(&self) -> Result<Vec<Mailbox>> {
        const OP: &str = "list_mailboxes";

        let body = self.get(SUBPATH).await.map_err(|e| e.context(OP))?;
        let list: MailboxList = decode(&body).map_err(|e| e.context(OP))?;
        Ok(list.mailboxes)
    }

    /// Get a single mailbox by local part.
    pub async fn get_mailbox(&self, local_part: &str) -> Result<Mailbox> {
        const OP: &str = "get_mailbox";

        let body = self
            .get(&mailbox_path(local_part))
            .await
            .map_err(|e| e.context(OP))?;
        decode(&body).map_err(|e| e.context(OP))
    }

    /// Create a mailbox and return it as stored by the API.
    pub async fn create_mailbox(&self, mailbox: &Mailbox) -> Result<Mailbox> {
        const OP: &str = "create_mailbox";

        let request = encode(mailbox).map_err(|e| e.context(OP))?;
        let body = self
            .post(SUBPATH, request)
            .await
            .map_err(|e| e.context(OP))?;
        decode(&body).map_err(|e| e.context(OP))
    }

    /// Create a mailbox with its password set directly.
    ///
    /// # Examples
    /// ```no_run
    /// # use migadu_client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), migadu_client::Error> {
    /// let client = Client::new("admin@example.com", "api-key", None, "example.com", None)?;
    /// let mailbox = client
    ///     .create_mailbox_with_password("Alice", "alice", "correct horse", false)
    ///     .await?;
    /// println!("{}", mailbox.address);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_mailbox_with_password(
        &self,
        name: &str,
        local_part: &str,
        password: &str,
        is_internal: bool,
    ) -> Result<Mailbox> {
        let mailbox = Mailbox {
            name: name.to_string(),
            local_part: local_part.to_string(),
            password: password.to_string(),
            is_internal,
            ..Mailbox::default()
        };
        self.create_mailbox(&mailbox).await
    }

    /// Create a mailbox whose owner sets the password through an invitation
    /// sent to `recovery_email`.
    pub async fn create_mailbox_with_invite(
        &self,
        name: &str,
        local_part: &str,
        recovery_email: &str,
        is_internal: bool,
    ) -> Result<Mailbox> {
        let mailbox = Mailbox {
            name: name.to_string(),
            local_part: local_part.to_string(),
            password_method: Some(PasswordMethod::Invitation),
            password_recovery_email: recovery_email.to_string(),
            is_internal,
            ..Mailbox::default()
        };
        self.create_mailbox(&mailbox).await
    }

    /// Update a mailbox with the non-empty fields of `changes`.
    pub async fn update_mailbox(&self, local_part: &str, changes: &Mailbox) -> Result<Mailbox> {
        const OP: &str = "update_mailbox";

        let request = encode(changes).map_err(|e| e.context(OP))?;
        let body = self
            .put(&mailbox_path(local_part), request)
            .await
            .map_err(|e| e.context(OP))?;
        decode(&body).map_err(|e| e.context(OP))
    }

    /// Delete a mailbox.
    pub async fn delete_mailbox(&self, local_part: &str) -> Result<()> {
        self.delete(&mailbox_path(local_part))
            .await
            .map_err(|e| e.context("delete_mailbox"))?;
        Ok(())
    }
}

fn mailbox_path(local_part: &str) -> String {
    format!("{SUBPATH}/{local_part}")
}
