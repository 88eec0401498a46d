//! Line-oriented command shell driving an editor session

use std::fmt::Write as _;

use fos_fonts::{FontStyle, FontWeight};

use crate::editor::TextEditor;
use crate::options::{family_options, weight_options};
use crate::storage::Storage;
use crate::style::StyleInjector;
use crate::{EditorError, Result};

/// Help text printed by `help`
pub const HELP: &str = "\
commands:
  text <content>     replace the editor text
  family <name>      switch font family
  weight <n>         pick a weight of the current family
  italic <on|off>    toggle italic (also: italic, normal)
  show               print the preview
  families           list font families
  weights            list weights of the current family
  help               print this help
  quit               end the session";

/// Shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Text(String),
    Family(String),
    Weight(FontWeight),
    Style(FontStyle),
    Show,
    Families,
    Weights,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim_start();
        let (name, raw) = line.split_once(char::is_whitespace).unwrap_or((line.trim_end(), ""));
        let rest = raw.trim();

        match name {
            // Text keeps everything after the first separator
            "text" => Ok(Command::Text(raw.to_string())),
            "family" => {
                let family = required("family", rest)?;
                Ok(Command::Family(family.to_string()))
            }
            "weight" => {
                let value = required("weight", rest)?;
                let weight = value.parse::<FontWeight>().map_err(|_| EditorError::InvalidArgument {
                    command: "weight",
                    value: value.to_string(),
                })?;
                Ok(Command::Weight(weight))
            }
            "italic" => {
                let style = match rest {
                    "" | "on" | "true" | "italic" => FontStyle::Italic,
                    "off" | "false" | "normal" => FontStyle::Normal,
                    other => {
                        return Err(EditorError::InvalidArgument {
                            command: "italic",
                            value: other.to_string(),
                        });
                    }
                };
                Ok(Command::Style(style))
            }
            "normal" => Ok(Command::Style(FontStyle::Normal)),
            "show" => Ok(Command::Show),
            "families" => Ok(Command::Families),
            "weights" => Ok(Command::Weights),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(EditorError::UnknownCommand(other.to_string())),
        }
    }
}

fn required<'a>(command: &'static str, value: &'a str) -> Result<&'a str> {
    if value.is_empty() {
        Err(EditorError::MissingArgument(command))
    } else {
        Ok(value)
    }
}

/// Result of executing a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Text to print (may be empty)
    Output(String),
    /// End of session
    Quit,
}

/// Execute a command against an editor
pub fn execute<S: Storage, I: StyleInjector>(editor: &mut TextEditor<S, I>, command: Command) -> Result<Outcome> {
    let output = match command {
        Command::Text(text) => {
            editor.set_text(text);
            String::new()
        }
        Command::Family(family) => {
            editor.select_family(&family)?;
            selection(editor)
        }
        Command::Weight(weight) => {
            editor.select_weight(weight)?;
            selection(editor)
        }
        Command::Style(style) => {
            editor.select_style(style)?;
            if style.is_italic() && !editor.state().italic {
                format!("{} (no italic at this weight)", selection(editor))
            } else {
                selection(editor)
            }
        }
        Command::Show => show(editor),
        Command::Families => {
            let current = &editor.state().family;
            let mut out = String::new();
            for option in family_options(editor.catalog()) {
                let marker = if &option.value == current { '*' } else { ' ' };
                let _ = writeln!(out, "{} {}", marker, option.label);
            }
            out.trim_end().to_string()
        }
        Command::Weights => {
            let state = editor.state();
            let mut out = String::new();
            for option in weight_options(editor.catalog(), &state.family)? {
                let marker = if option.value == state.weight.to_string() { '*' } else { ' ' };
                let _ = writeln!(out, "{} {}", marker, option.label);
            }
            out.trim_end().to_string()
        }
        Command::Help => HELP.to_string(),
        Command::Quit => return Ok(Outcome::Quit),
    };

    Ok(Outcome::Output(output))
}

fn selection<S: Storage, I: StyleInjector>(editor: &TextEditor<S, I>) -> String {
    let state = editor.state();
    format!("{} {} {}", state.family, state.weight, state.style())
}

fn show<S: Storage, I: StyleInjector>(editor: &TextEditor<S, I>) -> String {
    let state = editor.state();
    let asset = editor
        .active_asset()
        .map(|a| a.to_string())
        .unwrap_or_else(|| "(none)".to_string());
    format!("{}\nasset: {}\n\n{}", state.preview_style(), asset, state.text)
}
