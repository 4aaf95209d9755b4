//! Notes command: show or replace the plain-text notes pad.

use std::io::Write;

use anyhow::{Context, Result};
use echo_db::Database;

pub fn run<W: Write>(writer: &mut W, db: &Database, set: Option<&str>) -> Result<()> {
    if let Some(text) = set {
        db.save_notes(text).context("failed to save notes")?;
        writeln!(writer, "Notes saved ({} characters)", text.chars().count())?;
        return Ok(());
    }

    let notes = db.load_notes().context("failed to load notes")?;
    if notes.is_empty() {
        writeln!(writer, "No notes yet.")?;
    } else {
        writeln!(writer, "{notes}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notes(db: &Database, set: Option<&str>) -> String {
        let mut output = Vec::new();
        run(&mut output, db, set).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn empty_notes_message() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(notes(&db, None), "No notes yet.\n");
    }

    #[test]
    fn set_then_show() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(notes(&db, Some("buy milk\ncall mum")), "Notes saved (17 characters)\n");
        assert_eq!(notes(&db, None), "buy milk\ncall mum\n");
    }
}
