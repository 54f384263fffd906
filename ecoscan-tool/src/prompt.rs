//! Confirmation forms: present fields, wait for confirm or cancel.

use std::io::{BufRead, Write};

use ecoscan_core::ActivityKind;

/// User-entered photo metadata. Both fields may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhotoDetails {
    pub title: String,
    pub description: String,
}

/// A modal request/response surface. `None` means the user cancelled.
pub trait Prompt {
    fn photo_details(&mut self) -> std::io::Result<Option<PhotoDetails>>;

    fn association(&mut self) -> std::io::Result<Option<ActivityKind>>;
}

impl<P: Prompt + ?Sized> Prompt for Box<P> {
    fn photo_details(&mut self) -> std::io::Result<Option<PhotoDetails>> {
        (**self).photo_details()
    }

    fn association(&mut self) -> std::io::Result<Option<ActivityKind>> {
        (**self).association()
    }
}

/// Answers taken from command-line flags.
#[derive(Debug, Default)]
pub struct ArgsPrompt {
    pub details: Option<PhotoDetails>,
    pub association: Option<ActivityKind>,
}

impl Prompt for ArgsPrompt {
    fn photo_details(&mut self) -> std::io::Result<Option<PhotoDetails>> {
        Ok(self.details.clone())
    }

    fn association(&mut self) -> std::io::Result<Option<ActivityKind>> {
        Ok(self.association)
    }
}

/// Interactive prompt over a line reader. End of input cancels.
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, label: &str) -> std::io::Result<Option<String>> {
        write!(self.output, "{label}: ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

impl<R: BufRead, W: Write> Prompt for LinePrompt<R, W> {
    fn photo_details(&mut self) -> std::io::Result<Option<PhotoDetails>> {
        writeln!(self.output, "Photo details (Ctrl-D to cancel)")?;
        let Some(title) = self.ask("Title")? else {
            return Ok(None);
        };
        let Some(description) = self.ask("Short description")? else {
            return Ok(None);
        };
        Ok(Some(PhotoDetails { title, description }))
    }

    fn association(&mut self) -> std::io::Result<Option<ActivityKind>> {
        writeln!(self.output, "Associate location with: [1] last scan (default)  [2] last photo")?;
        loop {
            let Some(answer) = self.ask("Choice")? else {
                return Ok(None);
            };
            match answer.trim() {
                "" | "1" => return Ok(Some(ActivityKind::Scan)),
                "2" => return Ok(Some(ActivityKind::Photo)),
                other => match other.parse() {
                    Ok(kind) => return Ok(Some(kind)),
                    Err(_) => writeln!(self.output, "Please answer 1 or 2")?,
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompt(input: &str) -> LinePrompt<&[u8], Vec<u8>> {
        LinePrompt::new(input.as_bytes(), Vec::new())
    }

    #[test]
    fn photo_details_confirmed() {
        let mut p = prompt("Oak\nBy the river\n");

        let details = p.photo_details().unwrap().unwrap();

        assert_eq!(details.title, "Oak");
        assert_eq!(details.description, "By the river");
    }

    #[test]
    fn photo_details_blank_fields_allowed() {
        let mut p = prompt("\n\n");

        assert_eq!(p.photo_details().unwrap(), Some(PhotoDetails::default()));
    }

    #[test]
    fn photo_details_cancelled_on_eof() {
        let mut p = prompt("Oak\n");

        assert_eq!(p.photo_details().unwrap(), None);
    }

    #[test]
    fn association_choices() {
        assert_eq!(prompt("\n").association().unwrap(), Some(ActivityKind::Scan));
        assert_eq!(prompt("2\n").association().unwrap(), Some(ActivityKind::Photo));
        assert_eq!(prompt("x\nphoto\n").association().unwrap(), Some(ActivityKind::Photo));
        assert_eq!(prompt("").association().unwrap(), None);
    }

    #[test]
    fn args_prompt_returns_flags() {
        let mut p = ArgsPrompt {
            details: None,
            association: Some(ActivityKind::Photo),
        };

        assert_eq!(p.photo_details().unwrap(), None);
        assert_eq!(p.association().unwrap(), Some(ActivityKind::Photo));
    }
}
