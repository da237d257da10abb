use crate::domain::mail::Mail;

/// One rendered mail summary, in the state the list last drew it.
#[derive(Debug, Clone, PartialEq)]
pub struct MailRow {
    pub ident: String,
    pub from: String,
    pub subject: String,
    pub formatted_date: String,
    pub selected: bool,
    pub checked: bool,
}

/// Builds one list row from a mail. The full webmail row renderer lives
/// outside this crate; the list view only cares that it gets a row back.
pub trait RowFactory {
    fn build(&self, mail: &Mail, selected: bool, checked: bool) -> MailRow;
}

/// Plain factory that copies the header fields straight into the row.
#[derive(Debug, Default)]
pub struct SummaryRowFactory;

impl RowFactory for SummaryRowFactory {
    fn build(&self, mail: &Mail, selected: bool, checked: bool) -> MailRow {
        MailRow {
            ident: mail.ident.clone(),
            from: mail.header.from.clone(),
            subject: mail.header.subject.clone(),
            formatted_date: mail.header.formatted_date.clone(),
            selected,
            checked,
        }
    }
}
