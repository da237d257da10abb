pub mod events;
pub mod state;
pub mod ui;

use anyhow::Result;
use crossterm::event::{self, Event as TermEvent};
use log::debug;
use ratatui::DefaultTerminal;

use crate::bus::{Envelope, Event, EventBus, Target};
use crate::domain::mail::Mail;
use crate::mail_list::MailListView;
use crate::mail_list::row::SummaryRowFactory;
use crate::router::HashParams;
use crate::store::repo::MailStore;
use crate::terminal::events::STATUS_NODE;
use crate::terminal::state::{OpenedMail, UiState};

/// Runs the list view inside a terminal. The start URL plays the part the
/// location hash plays in the webmail: it picks the folder and may name a
/// mail to open right away.
pub fn run_tui(
    store: &mut dyn MailStore,
    default_tag: &str,
    start_url: Option<&str>,
) -> Result<()> {
    let params = match start_url {
        Some(raw) => HashParams::parse(raw)?,
        None => HashParams::default(),
    };
    let tag = params.tag().unwrap_or(default_tag).to_string();

    let mut app = TuiApp {
        view: MailListView::new(Box::new(params), Box::new(SummaryRowFactory)),
        bus: EventBus::new(),
        ui: UiState::new(),
        mails: Vec::new(),
        tag,
    };

    let mails = store.list_tag(&app.tag)?;
    app.mails = mails.clone();
    app.bus.publish(Event::MailsAvailable {
        mails,
        tag: Some(app.tag.clone()),
        ident: None,
        open_ident: None,
    });
    app.pump(store)?;

    let terminal = ratatui::init();
    let result = app.run(terminal, store);
    ratatui::restore();
    result
}

struct TuiApp {
    view: MailListView,
    bus: EventBus,
    ui: UiState,
    mails: Vec<Mail>,
    tag: String,
}

impl TuiApp {
    fn run(&mut self, mut terminal: DefaultTerminal, store: &mut dyn MailStore) -> Result<()> {
        loop {
            terminal.draw(|f| ui::render(f, &mut self.ui, &self.view, &self.tag))?;
            if let TermEvent::Key(key) = event::read()? {
                if events::handle_key(key, &mut self.ui, &self.view, &self.mails, &mut self.bus) {
                    return Ok(());
                }
                self.pump(store)?;
            }
        }
    }

    /// Drains the channel one envelope at a time: the list view reacts first
    /// and may enqueue derived events, then the terminal side reacts to the
    /// same envelope. New envelopes land at the back, so delivery stays in
    /// publish order.
    fn pump(&mut self, store: &mut dyn MailStore) -> Result<()> {
        while let Some(envelope) = self.bus.next() {
            self.view.on_event(&envelope.event, &mut self.bus);
            self.react(envelope, store)?;
        }
        Ok(())
    }

    fn react(&mut self, envelope: Envelope, store: &mut dyn MailStore) -> Result<()> {
        let target = envelope.target;
        match envelope.event {
            Event::ResetScroll => self.ui.reset_scroll(self.view.rows().len()),

            Event::RefreshMailList => {
                let mails = store.list_tag(&self.tag)?;
                self.mails = mails.clone();
                self.bus.publish(Event::MailsAvailableForRefresh { mails });
            }

            Event::OpenMail { ident } | Event::OpenDraft { ident } => {
                self.open(&ident, store)?;
            }

            Event::HasMailsChecked(has) => self.ui.has_checked = has,

            Event::PushState { tag, mail_ident } => {
                self.ui.notice = format!("/#/{tag}/mail/{mail_ident}");
            }

            Event::HereCheckedMails { mails } if target == Target::Node(STATUS_NODE) => {
                self.ui.notice = format!("{} mail(s) checked", mails.len());
            }

            _ => {}
        }
        Ok(())
    }

    fn open(&mut self, ident: &str, store: &mut dyn MailStore) -> Result<()> {
        let Some(mail) = store.get(ident)? else {
            debug!("open requested for unknown mail {ident}");
            return Ok(());
        };
        if let Some(pos) = self.mails.iter().position(|m| m.ident == ident) {
            self.ui.cursor.select(Some(pos));
        }
        self.ui.opened = Some(OpenedMail {
            ident: mail.ident,
            subject: mail.header.subject,
            body: mail.body,
        });
        self.ui.body_scroll = 0;
        Ok(())
    }
}
