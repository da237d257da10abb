use std::collections::{BTreeMap, VecDeque};

use crate::domain::mail::Mail;

/// Addressable UI node on the channel, for directed replies.
pub type NodeId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// The shared document-wide channel.
    Document,
    /// A single node; only that node is expected to react.
    Node(NodeId),
}

/// Screen region that search highlighting applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    List,
    Body,
    Subject,
    Recipients,
}

/// Every named event the channel carries. The list view consumes some of
/// these and produces others; components ignore variants they have no
/// handler for.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A fresh batch of mails for the active folder. `ident` updates which
    /// mail counts as open; `open_ident` is a history-navigation identifier
    /// that should be opened right away.
    MailsAvailable {
        mails: Vec<Mail>,
        tag: Option<String>,
        ident: Option<String>,
        open_ident: Option<String>,
    },
    /// Re-delivered batch after a refresh request; no selection or scroll
    /// side effects.
    MailsAvailableForRefresh { mails: Vec<Mail> },
    /// A mail's checkbox was ticked.
    MailChecked { mail: Mail },
    /// One or more checkboxes were unticked.
    MailUnchecked { mails: Vec<Mail> },
    /// A draft was stored upstream.
    DraftSaved,
    /// A mail left the outbox.
    MailSent,
    /// A different mail is now open in the detail pane.
    UpdateSelected { ident: String },
    /// Forget which mail is open.
    CleanSelected,
    /// Ask the list view for its checked set; answered at `Node(caller)`.
    WantCheckedMails { caller: NodeId },

    /// Open a mail in the detail pane.
    OpenMail { ident: String },
    /// Open a draft in the composer.
    OpenDraft { ident: String },
    /// The router should record this location.
    PushState { tag: String, mail_ident: String },
    /// Scroll the list pane back to the top.
    ResetScroll,
    /// Re-run search highlighting over a region.
    HighlightResults { region: Region },
    /// Whether any mail is currently checked (drives the check-all box).
    HasMailsChecked(bool),
    /// Snapshot of the checked set, sent to whoever asked.
    HereCheckedMails { mails: BTreeMap<String, Mail> },
    /// The list wants its mails re-delivered.
    RefreshMailList,
    /// Rendered rows are about to be discarded; release row resources.
    Teardown,
    /// A checkbox changed state outside of a direct click.
    CheckboxChange { ident: String, checked: bool },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub target: Target,
    pub event: Event,
}

/// Sink half of the channel handed to event handlers, so they can emit
/// without seeing the concrete bus.
pub trait EventSink {
    fn emit(&mut self, target: Target, event: Event);
}

/// Synchronous FIFO channel. `publish` appends, `next` pops; the owning loop
/// pumps each envelope through its components in subscription order before
/// looking at the next one.
#[derive(Debug, Default)]
pub struct EventBus {
    queue: VecDeque<Envelope>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit on the shared document channel.
    pub fn publish(&mut self, event: Event) {
        self.emit(Target::Document, event);
    }

    pub fn next(&mut self) -> Option<Envelope> {
        self.queue.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Take everything still queued, oldest first.
    pub fn drain(&mut self) -> Vec<Envelope> {
        self.queue.drain(..).collect()
    }
}

impl EventSink for EventBus {
    fn emit(&mut self, target: Target, event: Event) {
        log::trace!("bus: {target:?} {event:?}");
        self.queue.push_back(Envelope { target, event });
    }
}
