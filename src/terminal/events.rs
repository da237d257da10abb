use crossterm::event::{KeyCode, KeyEvent};

use crate::bus::{Event, EventBus, NodeId};
use crate::domain::mail::Mail;
use crate::mail_list::{MailListView, open_event_for};
use crate::terminal::state::UiState;

/// Node the status line listens on for directed replies.
pub const STATUS_NODE: NodeId = 1;

/// Translates a key press into channel events. Returns `true` when the
/// application should quit.
pub fn handle_key(
    key: KeyEvent,
    ui: &mut UiState,
    view: &MailListView,
    mails: &[Mail],
    bus: &mut EventBus,
) -> bool {
    match key.code {
        KeyCode::Char('q') => return true,

        KeyCode::Esc => {
            if ui.opened.is_some() {
                ui.close_mail();
                return false;
            }
            return true;
        }

        KeyCode::Down | KeyCode::Char('j') => ui.move_cursor(1, mails.len()),
        KeyCode::Up | KeyCode::Char('k') => ui.move_cursor(-1, mails.len()),
        KeyCode::Home => {
            if !mails.is_empty() {
                ui.cursor.select(Some(0));
            }
        }
        KeyCode::End => {
            if !mails.is_empty() {
                ui.cursor.select(Some(mails.len() - 1));
            }
        }

        KeyCode::Enter => {
            if let Some(mail) = cursor_mail(ui, mails) {
                let ident = mail.ident.clone();
                bus.publish(Event::UpdateSelected {
                    ident: ident.clone(),
                });
                bus.publish(open_event_for(view.current_tag(), ident));
            }
        }

        KeyCode::Char(' ') => {
            if let Some(mail) = cursor_mail(ui, mails) {
                if view.checked_mails().contains_key(&mail.ident) {
                    bus.publish(Event::MailUnchecked {
                        mails: vec![mail.clone()],
                    });
                } else {
                    bus.publish(Event::MailChecked { mail: mail.clone() });
                }
            }
        }

        KeyCode::Char('c') => bus.publish(Event::CleanSelected),
        KeyCode::Char('x') => bus.publish(Event::WantCheckedMails {
            caller: STATUS_NODE,
        }),

        KeyCode::PageDown => ui.scroll_body(10),
        KeyCode::PageUp => ui.scroll_body(-10),

        _ => {}
    }
    false
}

fn cursor_mail<'a>(ui: &UiState, mails: &'a [Mail]) -> Option<&'a Mail> {
    mails.get(ui.cursor.selected()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    use crate::domain::mail::MailHeader;
    use crate::mail_list::row::SummaryRowFactory;
    use crate::router::HashParams;

    fn mail(ident: &str) -> Mail {
        Mail {
            ident: ident.to_string(),
            header: MailHeader {
                from: format!("{ident}@mail.com"),
                subject: format!("subject {ident}"),
                date: "2012-12-26T01:38:46".to_string(),
                formatted_date: "Dec 26".to_string(),
            },
            tags: vec!["inbox".to_string()],
            body: format!("body {ident}"),
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn view_on(tag: &str, mails: Vec<Mail>, bus: &mut EventBus) -> MailListView {
        let mut view = MailListView::new(
            Box::new(HashParams::default()),
            Box::new(SummaryRowFactory),
        );
        view.on_event(
            &Event::MailsAvailable {
                mails,
                tag: Some(tag.to_string()),
                ident: None,
                open_ident: None,
            },
            bus,
        );
        bus.drain();
        view
    }

    #[test]
    fn q_quits() {
        let mut bus = EventBus::new();
        let view = view_on("inbox", vec![], &mut bus);
        let mut ui = UiState::new();
        assert!(handle_key(key(KeyCode::Char('q')), &mut ui, &view, &[], &mut bus));
        assert!(bus.is_empty());
    }

    #[test]
    fn esc_closes_the_opened_mail_before_quitting() {
        let mut bus = EventBus::new();
        let view = view_on("inbox", vec![], &mut bus);
        let mut ui = UiState::new();
        ui.opened = Some(crate::terminal::state::OpenedMail {
            ident: "1".to_string(),
            subject: "s".to_string(),
            body: "b".to_string(),
        });

        assert!(!handle_key(key(KeyCode::Esc), &mut ui, &view, &[], &mut bus));
        assert!(ui.opened.is_none());
        assert!(handle_key(key(KeyCode::Esc), &mut ui, &view, &[], &mut bus));
    }

    #[test]
    fn enter_selects_and_opens_the_cursor_mail() {
        let mut bus = EventBus::new();
        let mails = vec![mail("1"), mail("2")];
        let view = view_on("inbox", mails.clone(), &mut bus);
        let mut ui = UiState::new();
        ui.move_cursor(1, mails.len());

        handle_key(key(KeyCode::Enter), &mut ui, &view, &mails, &mut bus);
        let events: Vec<Event> = bus.drain().into_iter().map(|e| e.event).collect();
        assert_eq!(
            events,
            vec![
                Event::UpdateSelected {
                    ident: "2".to_string()
                },
                Event::OpenMail {
                    ident: "2".to_string()
                },
            ]
        );
    }

    #[test]
    fn enter_on_a_draft_opens_the_composer() {
        let mut bus = EventBus::new();
        let mails = vec![mail("9")];
        let view = view_on("drafts", mails.clone(), &mut bus);
        let mut ui = UiState::new();

        handle_key(key(KeyCode::Enter), &mut ui, &view, &mails, &mut bus);
        let events: Vec<Event> = bus.drain().into_iter().map(|e| e.event).collect();
        assert_eq!(
            events[1],
            Event::OpenDraft {
                ident: "9".to_string()
            }
        );
    }

    #[test]
    fn space_checks_then_unchecks() {
        let mut bus = EventBus::new();
        let mails = vec![mail("1")];
        let mut view = view_on("inbox", mails.clone(), &mut bus);
        let mut ui = UiState::new();

        handle_key(key(KeyCode::Char(' ')), &mut ui, &view, &mails, &mut bus);
        let first = bus.drain();
        assert_eq!(first[0].event, Event::MailChecked { mail: mail("1") });

        view.on_event(&first[0].event, &mut bus);
        bus.drain();

        handle_key(key(KeyCode::Char(' ')), &mut ui, &view, &mails, &mut bus);
        let second = bus.drain();
        assert_eq!(
            second[0].event,
            Event::MailUnchecked {
                mails: vec![mail("1")]
            }
        );
    }

    #[test]
    fn x_asks_for_the_checked_set() {
        let mut bus = EventBus::new();
        let view = view_on("inbox", vec![], &mut bus);
        let mut ui = UiState::new();

        handle_key(key(KeyCode::Char('x')), &mut ui, &view, &[], &mut bus);
        let events = bus.drain();
        assert_eq!(
            events[0].event,
            Event::WantCheckedMails {
                caller: STATUS_NODE
            }
        );
    }
}
