use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MailHeader {
    pub from: String,
    pub subject: String,
    pub date: String,
    pub formatted_date: String,
}

/// One message as delivered by the upstream mail store. The list view only
/// holds clones of what it needs for rendering and the checked set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mail {
    pub ident: String,
    pub header: MailHeader,
    /// Mailbox folder labels ("inbox", "drafts", "sent", ...).
    pub tags: Vec<String>,
    #[serde(default)]
    pub body: String,
}
