use anyhow::Result;

use crate::domain::mail::Mail;

/// Local cache of mails the surrounding application reads to feed the list
/// view. The widget itself never touches this; the app loop queries it and
/// publishes the result on the bus.
pub trait MailStore {
    fn upsert_mails(&mut self, mails: &[Mail]) -> Result<()>;

    /// All mails carrying `tag`, newest first.
    fn list_tag(&self, tag: &str) -> Result<Vec<Mail>>;

    fn get(&self, ident: &str) -> Result<Option<Mail>>;
}
