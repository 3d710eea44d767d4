//! Where a running session draws itself.
//!
//! The engines only talk to a [`SessionOutput`]; the CLI implements it over
//! the terminal, tests use [`MemoryOutput`].

pub trait SessionOutput {
    /// Audible or visual cue. Fires at session start and end only.
    fn bell(&mut self);

    /// Show a scripted prompt in its own block, below the progress line.
    fn cue(&mut self, text: &str);

    /// Overwrite the single progress line in place.
    fn redraw(&mut self, line: &str);

    /// Blank the progress line.
    fn clear_line(&mut self);

    /// Free-standing status text (headers, completion message).
    fn message(&mut self, text: &str);

    /// Status text printed flush left, like the progress line below it.
    fn line(&mut self, text: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputEvent {
    Bell,
    Cue(String),
    Redraw(String),
    ClearLine,
    Message(String),
    Line(String),
}

/// Records every call, in order.
#[derive(Debug, Default)]
pub struct MemoryOutput {
    pub events: Vec<OutputEvent>,
}

impl MemoryOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bell_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, OutputEvent::Bell))
            .count()
    }

    pub fn cues(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                OutputEvent::Cue(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn redraws(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                OutputEvent::Redraw(line) => Some(line.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn messages(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                OutputEvent::Message(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn lines(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                OutputEvent::Line(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl SessionOutput for MemoryOutput {
    fn bell(&mut self) {
        self.events.push(OutputEvent::Bell);
    }

    fn cue(&mut self, text: &str) {
        self.events.push(OutputEvent::Cue(text.to_string()));
    }

    fn redraw(&mut self, line: &str) {
        self.events.push(OutputEvent::Redraw(line.to_string()));
    }

    fn clear_line(&mut self) {
        self.events.push(OutputEvent::ClearLine);
    }

    fn message(&mut self, text: &str) {
        self.events.push(OutputEvent::Message(text.to_string()));
    }

    fn line(&mut self, text: &str) {
        self.events.push(OutputEvent::Line(text.to_string()));
    }
}
