pub mod row;

use std::collections::BTreeMap;

use log::debug;

use crate::bus::{Event, EventSink, NodeId, Region, Target};
use crate::domain::mail::Mail;
use crate::mail_list::row::{MailRow, RowFactory};
use crate::router::UrlParams;

const DRAFTS_TAG: &str = "drafts";
const SENT_TAG: &str = "sent";

/// Drafts open in the composer; everything else opens in the detail pane.
pub fn open_event_for(tag: &str, ident: String) -> Event {
    if tag == DRAFTS_TAG {
        Event::OpenDraft { ident }
    } else {
        Event::OpenMail { ident }
    }
}

/// The mail list widget: keeps the open-mail and checked-mail state, holds
/// the row view-model a rendering adapter draws from, and answers channel
/// events with derived events of its own.
pub struct MailListView {
    current_ident: String,
    current_tag: String,
    checked: BTreeMap<String, Mail>,
    rows: Vec<MailRow>,
    /// Set after the first URL-driven open attempt; never reset.
    opened_from_url: bool,
    url_params: Box<dyn UrlParams>,
    factory: Box<dyn RowFactory>,
}

impl MailListView {
    pub fn new(url_params: Box<dyn UrlParams>, factory: Box<dyn RowFactory>) -> Self {
        Self {
            current_ident: String::new(),
            current_tag: String::new(),
            checked: BTreeMap::new(),
            rows: Vec::new(),
            opened_from_url: false,
            url_params,
            factory,
        }
    }

    pub fn rows(&self) -> &[MailRow] {
        &self.rows
    }

    pub fn current_ident(&self) -> &str {
        &self.current_ident
    }

    pub fn current_tag(&self) -> &str {
        &self.current_tag
    }

    pub fn checked_mails(&self) -> &BTreeMap<String, Mail> {
        &self.checked
    }

    /// Entry point for everything arriving on the channel. Events this view
    /// has no handler for fall through untouched; missing data inside a
    /// payload is a no-op, never an error.
    pub fn on_event(&mut self, event: &Event, sink: &mut dyn EventSink) {
        match event {
            Event::MailsAvailable {
                mails,
                tag,
                ident,
                open_ident,
            } => self.show_mails(mails, tag.as_deref(), ident.as_deref(), open_ident.as_deref(), sink),
            Event::MailsAvailableForRefresh { mails } => self.refresh_mail_list(mails, sink),
            Event::MailChecked { mail } => self.add_to_checked(mail.clone(), sink),
            Event::MailUnchecked { mails } => self.remove_from_checked(mails, sink),
            Event::DraftSaved => self.refresh_after_save_draft(sink),
            Event::MailSent => self.refresh_after_mail_sent(sink),
            Event::UpdateSelected { ident } => self.update_selected(ident, sink),
            Event::CleanSelected => self.clean_selected(),
            Event::WantCheckedMails { caller } => self.respond_with_checked_mails(*caller, sink),
            _ => {}
        }
    }

    fn show_mails(
        &mut self,
        mails: &[Mail],
        tag: Option<&str>,
        ident: Option<&str>,
        open_ident: Option<&str>,
        sink: &mut dyn EventSink,
    ) {
        debug!("showing {} mails (tag {tag:?})", mails.len());
        if let Some(ident) = ident {
            self.current_ident = ident.to_string();
        }
        if let Some(tag) = tag {
            self.current_tag = tag.to_string();
        }

        self.refresh_mail_list(mails, sink);
        sink.emit(Target::Document, Event::ResetScroll);

        if let Some(open_ident) = open_ident {
            // the payload tag picks the dispatcher, not the current one
            let tag = tag.unwrap_or_default();
            sink.emit(Target::Document, open_event_for(tag, open_ident.to_string()));
        }

        self.open_mail_from_url(sink);
    }

    fn open_mail_from_url(&mut self, sink: &mut dyn EventSink) {
        if self.opened_from_url {
            return;
        }
        self.opened_from_url = true;

        let Some(mail_ident) = self.url_params.mail_ident() else {
            return;
        };
        sink.emit(
            Target::Document,
            open_event_for(&self.current_tag, mail_ident.clone()),
        );
        sink.emit(
            Target::Document,
            Event::PushState {
                tag: self.current_tag.clone(),
                mail_ident,
            },
        );
    }

    fn refresh_mail_list(&mut self, mails: &[Mail], sink: &mut dyn EventSink) {
        sink.emit(Target::Document, Event::Teardown);
        self.rows.clear();

        for mail in mails {
            let selected = mail.ident == self.current_ident;
            let checked = self.checked.contains_key(&mail.ident);
            let row = self.factory.build(mail, selected, checked);
            self.rows.push(row);
        }

        for region in [Region::List, Region::Body, Region::Subject, Region::Recipients] {
            sink.emit(Target::Document, Event::HighlightResults { region });
        }
    }

    // ----- selection -----

    fn update_selected(&mut self, ident: &str, sink: &mut dyn EventSink) {
        if ident != self.current_ident {
            self.uncheck_current_mail(sink);
            self.current_ident = ident.to_string();
        }
        self.check_current_mail(sink);
    }

    pub fn check_current_mail(&mut self, sink: &mut dyn EventSink) {
        self.set_current_checkbox(true, sink);
    }

    pub fn uncheck_current_mail(&mut self, sink: &mut dyn EventSink) {
        self.set_current_checkbox(false, sink);
    }

    fn set_current_checkbox(&mut self, checked: bool, sink: &mut dyn EventSink) {
        let Some(row) = self.rows.iter_mut().find(|r| r.ident == self.current_ident) else {
            return;
        };
        row.checked = checked;
        sink.emit(
            Target::Document,
            Event::CheckboxChange {
                ident: row.ident.clone(),
                checked,
            },
        );
    }

    fn clean_selected(&mut self) {
        self.current_ident.clear();
    }

    // ----- checked mails -----

    fn respond_with_checked_mails(&self, caller: NodeId, sink: &mut dyn EventSink) {
        sink.emit(
            Target::Node(caller),
            Event::HereCheckedMails {
                mails: self.checked.clone(),
            },
        );
    }

    fn add_to_checked(&mut self, mail: Mail, sink: &mut dyn EventSink) {
        if let Some(row) = self.rows.iter_mut().find(|r| r.ident == mail.ident) {
            row.checked = true;
        }
        self.checked.insert(mail.ident.clone(), mail);
        self.update_check_all(sink);
    }

    fn remove_from_checked(&mut self, mails: &[Mail], sink: &mut dyn EventSink) {
        for mail in mails {
            self.checked.remove(&mail.ident);
            if let Some(row) = self.rows.iter_mut().find(|r| r.ident == mail.ident) {
                row.checked = false;
            }
        }
        self.update_check_all(sink);
    }

    fn update_check_all(&self, sink: &mut dyn EventSink) {
        sink.emit(
            Target::Document,
            Event::HasMailsChecked(!self.checked.is_empty()),
        );
    }

    // ----- upstream refreshes -----

    fn refresh_with_scroll(&self, sink: &mut dyn EventSink) {
        sink.emit(Target::Document, Event::RefreshMailList);
        sink.emit(Target::Document, Event::ResetScroll);
    }

    fn refresh_after_save_draft(&self, sink: &mut dyn EventSink) {
        if self.current_tag == DRAFTS_TAG {
            self.refresh_with_scroll(sink);
        }
    }

    fn refresh_after_mail_sent(&self, sink: &mut dyn EventSink) {
        if self.current_tag == DRAFTS_TAG || self.current_tag == SENT_TAG {
            self.refresh_with_scroll(sink);
        }
    }
}
