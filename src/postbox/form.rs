//! # Post-Composition Form
//!
//! Collects title, tags, and content one field at a time, the REPL analogue
//! of a modal form. The controller routes raw lines here while the form is
//! open; each line fills the current field and [`CompositionForm::input`]
//! reports either the next prompt or a completed [`Submission`].
//!
//! Lifecycle rules:
//! - `create` opens the form with empty fields.
//! - Cancel or a successful submit clears all fields and closes the form.
//! - A validation failure keeps the fields and reopens at the title prompt
//!   so the user can correct them; an empty line at a prompt keeps the
//!   field's current value.

/// Completed form fields, ready for `submit_create`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}

/// What the form wants next after consuming a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormStep {
    /// Show this prompt and feed the next line back in.
    Prompt(String),
    /// All fields collected.
    Submit(Submission),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Tags,
    Content,
}

#[derive(Debug, Default)]
pub struct CompositionForm {
    title: String,
    tags: String,
    content: String,
    cursor: Option<Field>,
}

impl CompositionForm {
    /// Open the form with empty fields and return the first prompt.
    pub fn open(&mut self) -> String {
        self.clear();
        self.cursor = Some(Field::Title);
        self.prompt(Field::Title)
    }

    pub fn is_open(&self) -> bool {
        self.cursor.is_some()
    }

    /// Discard all fields and close.
    pub fn cancel(&mut self) {
        self.clear();
        self.cursor = None;
    }

    /// Close after a successful submit; fields are cleared the same way.
    pub fn close(&mut self) {
        self.cancel();
    }

    /// Keep the fields but restart at the title prompt, used after a
    /// validation failure so the user can correct the bad field.
    pub fn reopen_for_correction(&mut self) -> String {
        self.cursor = Some(Field::Title);
        self.prompt(Field::Title)
    }

    /// Consume one input line for the current field.
    ///
    /// An empty line keeps the field's existing value, which only matters on
    /// a correction pass.
    pub fn input(&mut self, line: &str) -> FormStep {
        let field = match self.cursor {
            Some(field) => field,
            // Input routed to a closed form opens it.
            None => return FormStep::Prompt(self.open()),
        };

        match field {
            Field::Title => {
                if !line.is_empty() {
                    self.title = line.to_string();
                }
                self.cursor = Some(Field::Tags);
                FormStep::Prompt(self.prompt(Field::Tags))
            }
            Field::Tags => {
                if !line.is_empty() {
                    self.tags = line.to_string();
                }
                self.cursor = Some(Field::Content);
                FormStep::Prompt(self.prompt(Field::Content))
            }
            Field::Content => {
                if !line.is_empty() {
                    self.content = line.to_string();
                }
                FormStep::Submit(Submission {
                    title: self.title.clone(),
                    content: self.content.clone(),
                    tags: split_tags(&self.tags),
                })
            }
        }
    }

    fn clear(&mut self) {
        self.title.clear();
        self.tags.clear();
        self.content.clear();
    }

    fn prompt(&self, field: Field) -> String {
        let (label, current) = match field {
            Field::Title => ("Title", &self.title),
            Field::Tags => ("Tags (comma-separated)", &self.tags),
            Field::Content => ("Content", &self.content),
        };
        if current.is_empty() {
            format!("{}:", label)
        } else {
            format!("{} [{}]:", label, current)
        }
    }
}

/// Split a tags field on commas, trimming each label.
///
/// Inner empty labels survive ("a,,b" keeps the middle entry); only an
/// entirely empty field yields an empty sequence.
pub fn split_tags(field: &str) -> Vec<String> {
    if field.trim().is_empty() {
        return Vec::new();
    }
    field.split(',').map(|tag| tag.trim().to_string()).collect()
}
