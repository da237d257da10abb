use anyhow::Result;
use rusqlite::{Connection, OptionalExtension, params};

use crate::domain::mail::{Mail, MailHeader};
use crate::store::repo::MailStore;

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &std::path::Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            PRAGMA journal_mode=WAL;

            CREATE TABLE IF NOT EXISTS mails (
                ident           TEXT PRIMARY KEY,
                from_addr       TEXT NOT NULL,
                subject         TEXT NOT NULL,
                date            TEXT NOT NULL,
                formatted_date  TEXT NOT NULL,
                body            TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS mail_tags (
                ident  TEXT NOT NULL,
                tag    TEXT NOT NULL,
                PRIMARY KEY (ident, tag)
            );
            "#,
        )?;
        Ok(())
    }

    fn tags_for(&self, ident: &str) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare(r#"SELECT tag FROM mail_tags WHERE ident=?1 ORDER BY tag"#)?;
        let mut rows = stmt.query(params![ident])?;
        let mut out = Vec::new();
        while let Some(r) = rows.next()? {
            out.push(r.get(0)?);
        }
        Ok(out)
    }

    fn mail_from_row(&self, r: &rusqlite::Row<'_>) -> Result<Mail> {
        let ident: String = r.get(0)?;
        let tags = self.tags_for(&ident)?;
        Ok(Mail {
            header: MailHeader {
                from: r.get(1)?,
                subject: r.get(2)?,
                date: r.get(3)?,
                formatted_date: r.get(4)?,
            },
            body: r.get(5)?,
            tags,
            ident,
        })
    }
}

impl MailStore for SqliteStore {
    fn upsert_mails(&mut self, mails: &[Mail]) -> Result<()> {
        let tx = self.conn.transaction()?;
        {
            let mut upsert = tx.prepare(
                r#"
                INSERT INTO mails (ident, from_addr, subject, date, formatted_date, body)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                ON CONFLICT(ident) DO UPDATE SET
                  from_addr=excluded.from_addr,
                  subject=excluded.subject,
                  date=excluded.date,
                  formatted_date=excluded.formatted_date,
                  body=excluded.body
                "#,
            )?;
            let mut clear_tags = tx.prepare(r#"DELETE FROM mail_tags WHERE ident=?1"#)?;
            let mut add_tag =
                tx.prepare(r#"INSERT OR IGNORE INTO mail_tags (ident, tag) VALUES (?1, ?2)"#)?;

            for m in mails {
                upsert.execute(params![
                    m.ident,
                    m.header.from,
                    m.header.subject,
                    m.header.date,
                    m.header.formatted_date,
                    m.body,
                ])?;
                clear_tags.execute(params![m.ident])?;
                for tag in &m.tags {
                    add_tag.execute(params![m.ident, tag])?;
                }
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn list_tag(&self, tag: &str) -> Result<Vec<Mail>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT m.ident, m.from_addr, m.subject, m.date, m.formatted_date, m.body
            FROM mails m
            JOIN mail_tags t ON t.ident = m.ident
            WHERE t.tag = ?1
            ORDER BY m.date DESC, m.ident DESC
            "#,
        )?;

        let mut rows = stmt.query(params![tag])?;
        let mut out = Vec::new();
        while let Some(r) = rows.next()? {
            out.push(self.mail_from_row(r)?);
        }
        Ok(out)
    }

    fn get(&self, ident: &str) -> Result<Option<Mail>> {
        let row = self
            .conn
            .query_row(
                r#"
                SELECT ident, from_addr, subject, date, formatted_date, body
                FROM mails WHERE ident=?1
                "#,
                params![ident],
                |r| {
                    Ok((
                        r.get::<_, String>(0)?,
                        r.get::<_, String>(1)?,
                        r.get::<_, String>(2)?,
                        r.get::<_, String>(3)?,
                        r.get::<_, String>(4)?,
                        r.get::<_, String>(5)?,
                    ))
                },
            )
            .optional()?;

        let Some((ident, from, subject, date, formatted_date, body)) = row else {
            return Ok(None);
        };
        let tags = self.tags_for(&ident)?;
        Ok(Some(Mail {
            header: MailHeader {
                from,
                subject,
                date,
                formatted_date,
            },
            body,
            tags,
            ident,
        }))
    }
}
