//! Terminal rendering of a running session.

use std::io::{self, BufRead, IsTerminal, Write};

use calm_core::storage::BellConfig;
use calm_core::SessionOutput;

pub const WIDTH: usize = 60;

/// Pad `text` on the left so it sits in the middle of `width` columns.
pub fn centered(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    format!("{}{}", " ".repeat((width - len) / 2), text)
}

pub fn print_centered(text: &str) {
    println!("{}", centered(text, WIDTH));
}

pub fn rule(ch: char) -> String {
    ch.to_string().repeat(WIDTH)
}

/// Clear the screen, but only when talking to a real terminal.
pub fn clear_screen(enabled: bool) {
    let mut stdout = io::stdout();
    if enabled && stdout.is_terminal() {
        let _ = write!(stdout, "\x1B[2J\x1B[H");
        let _ = stdout.flush();
    }
}

/// Print `message` and read one line. `None` on end of input.
pub fn prompt(message: &str) -> io::Result<Option<String>> {
    print!("{message}");
    io::stdout().flush()?;
    let mut line = String::new();
    let read = io::stdin().lock().read_line(&mut line)?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// Wait for Enter before going back to the menu.
pub fn pause() -> io::Result<()> {
    prompt("Press Enter to return to menu...").map(|_| ())
}

/// [`SessionOutput`] over stdout.
///
/// The progress line is redrawn in place with `\r`; anything else first
/// moves off that line so cues and messages get their own block.
pub struct TerminalOutput {
    out: io::Stdout,
    bell: BellConfig,
    /// Width of the progress line currently on screen, 0 if none.
    line_len: usize,
}

impl TerminalOutput {
    pub fn new(bell: BellConfig) -> Self {
        Self {
            out: io::stdout(),
            bell,
            line_len: 0,
        }
    }

    fn leave_progress_line(&mut self) {
        if self.line_len > 0 {
            let _ = writeln!(self.out);
            self.line_len = 0;
        }
    }
}

impl SessionOutput for TerminalOutput {
    fn bell(&mut self) {
        if !self.bell.enabled {
            return;
        }
        if self.bell.visual_fallback {
            self.leave_progress_line();
            let _ = writeln!(self.out, "\n***\n");
        } else {
            let _ = write!(self.out, "\x07");
        }
        let _ = self.out.flush();
    }

    fn cue(&mut self, text: &str) {
        self.leave_progress_line();
        let _ = writeln!(self.out, "\n{}", centered(text, WIDTH));
        let _ = self.out.flush();
    }

    fn redraw(&mut self, line: &str) {
        let len = line.chars().count();
        // Pad with spaces so a shorter line fully covers a longer one.
        let pad = self.line_len.saturating_sub(len);
        let _ = write!(self.out, "\r{}{}", line, " ".repeat(pad));
        let _ = self.out.flush();
        self.line_len = len;
    }

    fn clear_line(&mut self) {
        if self.line_len > 0 {
            let _ = write!(self.out, "\r{}\r", " ".repeat(self.line_len));
            let _ = self.out.flush();
            self.line_len = 0;
        }
    }

    fn message(&mut self, text: &str) {
        self.leave_progress_line();
        let _ = writeln!(self.out, "{}", centered(text, WIDTH));
        let _ = self.out.flush();
    }

    fn line(&mut self, text: &str) {
        self.leave_progress_line();
        let _ = writeln!(self.out, "{text}");
        let _ = self.out.flush();
    }
}
