//! Interactive record selection on a terminal.

use std::io::{self, BufRead, Write};

use toshi_core::{Record, RecordPicker};
use tracing::warn;

/// Records shown per screen.
pub const RECORDS_PER_PAGE: usize = 5;

const RULE_WIDTH: usize = 72;

/// Pages through records five at a time and reads a choice per line.
///
/// Accepts a 1-based record number, `n` / `p` to move between screens and
/// `q` to quit. End of input quits.
#[derive(Debug)]
pub struct TerminalPicker<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalPicker<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn prompt(&mut self, records: &[Record]) -> io::Result<Option<Record>> {
        let mut start = 0;
        loop {
            self.render(records, start)?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }

            match line.trim() {
                "q" => return Ok(None),
                "n" if start + RECORDS_PER_PAGE < records.len() => start += RECORDS_PER_PAGE,
                "p" if start > 0 => start -= RECORDS_PER_PAGE,
                choice => match choice.parse::<usize>() {
                    Ok(n) if (1..=records.len()).contains(&n) => {
                        return Ok(Some(records[n - 1].clone()));
                    }
                    _ => writeln!(self.output, "Invalid input. Please try again.")?,
                },
            }
        }
    }

    fn render(&mut self, records: &[Record], start: usize) -> io::Result<()> {
        let end = (start + RECORDS_PER_PAGE).min(records.len());
        let out = &mut self.output;

        writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(out, "Books {} to {} of {}", start + 1, end, records.len())?;
        writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;

        for (offset, record) in records[start..end].iter().enumerate() {
            writeln!(out, "#{}", start + offset + 1)?;
            let identifiers = record.identifiers.join(", ");
            for (label, value) in [
                ("Title", record.title.as_str()),
                ("Author(s)", record.authors.as_str()),
                ("Year", record.year.as_str()),
                ("Publisher", record.publisher.as_str()),
                ("Pages", record.pages.as_str()),
                ("Language", record.language.as_str()),
                ("Size", record.size.as_str()),
                ("Format", record.extension.as_str()),
                ("ISBN(s)", identifiers.as_str()),
            ] {
                if !value.is_empty() {
                    writeln!(out, "  {:<12} {value}", format!("{label}:"))?;
                }
            }
            writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
        }

        writeln!(out, "\nOptions:")?;
        writeln!(out, "Enter the number of the book to select it.")?;
        if start > 0 {
            writeln!(out, "Enter 'p' for Previous page.")?;
        }
        if end < records.len() {
            writeln!(out, "Enter 'n' for Next page.")?;
        }
        writeln!(out, "Enter 'q' to Quit.")?;
        write!(out, "Your choice: ")?;
        out.flush()
    }
}

impl<R: BufRead, W: Write> RecordPicker for TerminalPicker<R, W> {
    fn pick(&mut self, records: &[Record]) -> Option<Record> {
        if records.is_empty() {
            return None;
        }
        match self.prompt(records) {
            Ok(choice) => choice,
            Err(error) => {
                warn!(error = %error, "terminal selection failed");
                None
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn records(count: usize) -> Vec<Record> {
        (1..=count)
            .map(|i| Record {
                id: i.to_string(),
                title: format!("Book {i}"),
                extension: "epub".to_string(),
                ..Record::default()
            })
            .collect()
    }

    fn pick_with(input: &str, records: &[Record]) -> (Option<Record>, String) {
        let mut output = Vec::new();
        let picked = TerminalPicker::new(Cursor::new(input.as_bytes()), &mut output).pick(records);
        (picked, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_numeric_choice_is_one_based() {
        let (picked, screen) = pick_with("2\n", &records(3));
        assert_eq!(picked.unwrap().id, "2");
        assert!(screen.contains("Books 1 to 3 of 3"));
        assert!(screen.contains("Title:       Book 1"));
        assert!(!screen.contains("Next page"));
    }

    #[test]
    fn test_quit_and_eof_select_nothing() {
        assert!(pick_with("q\n", &records(3)).0.is_none());
        assert!(pick_with("", &records(3)).0.is_none());
    }

    #[test]
    fn test_next_page_then_choose() {
        let (picked, screen) = pick_with("n\n7\n", &records(12));
        assert_eq!(picked.unwrap().id, "7");
        assert!(screen.contains("Books 6 to 10 of 12"));
        assert!(screen.contains("Enter 'p' for Previous page."));
    }

    #[test]
    fn test_invalid_input_reprompts() {
        let (picked, screen) = pick_with("0\nabc\np\n1\n", &records(2));
        assert_eq!(picked.unwrap().id, "1");
        assert_eq!(screen.matches("Invalid input").count(), 3);
    }
}
