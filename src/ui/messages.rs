use crate::utils::colors::{BLUE, BOLD, GREEN, RED, RESET, YELLOW};
use std::fmt;

enum Tone {
    Info,
    Success,
    Warning,
    Error,
}

impl Tone {
    fn style(&self) -> (&'static str, &'static str) {
        match self {
            Tone::Info => (BLUE, "ℹ️"),
            Tone::Success => (GREEN, "✅"),
            Tone::Warning => (YELLOW, "⚠️"),
            Tone::Error => (RED, "❌"),
        }
    }
}

fn render<T: fmt::Display>(tone: Tone, msg: T) -> String {
    let (color, icon) = tone.style();
    format!("{}{}{} {}{}", color, BOLD, icon, RESET, msg)
}

pub fn info<T: fmt::Display>(msg: T) {
    println!("{}", render(Tone::Info, msg));
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{}", render(Tone::Success, msg));
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{}", render(Tone::Warning, msg));
}

/// Errors go to stderr.
pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{}", render(Tone::Error, msg));
}
