//! Interactive session: a line-oriented shell over the editor core.
//!
//! Each input line becomes one or more `UiEvent`s; confirmations are read
//! from the same input. End of input behaves like `quit`.

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use shm_core::config::Layout;
use shm_editor::annotate::GutterMode;
use shm_editor::mirror::SurfaceId;
use shm_editor::{AppState, UiEvent};

use super::{fields, highlight};
use crate::runtime::Runtime;

const HELP: &str = "\
Commands:
  set FIELD=VALUE            set a field (e.g. set Name=beacon)
  fields                     list fields and current values
  generate                   render the fields and append to the output
  show [secondary]           print the output (or the secondary view)
  lines [secondary]          print the output with line numbers and highlighting
  type [secondary] TEXT      insert TEXT at the cursor (\\n for newline)
  replace [secondary] TEXT   replace the whole text
  key [secondary] KEY        press a key (enter, backspace, delete, tab,
                             left, right, up, down, home, end)
  clear                      clear the output
  reset                      reset every field to its default
  copy                       copy the output to the clipboard
  save PATH                  save the output to a file
  open | close               open or close the mirrored secondary view
  highlight [on|off]         toggle syntax highlighting
  wrap COLUMNS | off         number visual rows wrapped at COLUMNS
  height [secondary] ROWS    set the visible row count
  scroll [secondary] ROW     set the first visible row
  help                       show this help
  quit                       save field values and exit";

#[derive(Debug)]
enum Command {
    Empty,
    Help,
    Fields,
    Show(SurfaceId),
    Lines(SurfaceId),
    Close,
    Event(UiEvent),
}

pub fn run(no_config: bool, layout: Option<Layout>) -> Result<()> {
    let config = super::load_config(no_config, layout)?;
    let mut app = AppState::from_config(&config);
    let mut rt = Runtime::new(io::stdin().lock(), io::stdout().lock()).persist_fields(!no_config);

    writeln!(
        rt.out(),
        "shm session ({} layout). Type 'help' for commands.",
        app.layout
    )?;
    run_loop(&mut app, &mut rt)
}

fn run_loop<R: BufRead, W: Write>(app: &mut AppState, rt: &mut Runtime<R, W>) -> Result<()> {
    let mut line = String::new();
    while !rt.should_quit() {
        write!(rt.out(), "> ")?;
        rt.out().flush()?;

        line.clear();
        if rt.input().read_line(&mut line).context("read command")? == 0 {
            writeln!(rt.out())?;
            rt.dispatch(app, UiEvent::Quit)?;
            break;
        }

        match parse_command(line.trim_end_matches(['\r', '\n'])) {
            Ok(command) => execute(app, rt, command)?,
            Err(msg) => writeln!(rt.out(), "error: {msg}")?,
        }
    }
    Ok(())
}

fn execute<R: BufRead, W: Write>(
    app: &mut AppState,
    rt: &mut Runtime<R, W>,
    command: Command,
) -> Result<()> {
    match command {
        Command::Empty => {}
        Command::Help => writeln!(rt.out(), "{HELP}")?,
        Command::Fields => writeln!(rt.out(), "{}", fields::table(&app.fields))?,
        Command::Show(surface) => match app.mirror.surface(surface) {
            Some(buf) => writeln!(rt.out(), "{}", buf.text())?,
            None => writeln!(rt.out(), "The secondary view is not open")?,
        },
        Command::Lines(surface) => match app.mirror.surface(surface) {
            Some(buf) => {
                let rendered = highlight::render_annotated(
                    &buf.text(),
                    app.annotations(surface),
                    app.annotator.gutter_mode(),
                    app.annotator.highlighting() && io::stdout().is_terminal(),
                );
                write!(rt.out(), "{rendered}")?;
            }
            None => writeln!(rt.out(), "The secondary view is not open")?,
        },
        Command::Close => match app.mirror.secondary_handle() {
            Some(handle) => rt.dispatch(app, UiEvent::CloseSecondary(handle))?,
            None => writeln!(rt.out(), "The secondary view is not open")?,
        },
        Command::Event(event) => rt.dispatch(app, event)?,
    }
    Ok(())
}

fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(word, rest)| (word, rest.trim()));

    let command = match word.to_ascii_lowercase().as_str() {
        "" => Command::Empty,
        "help" | "?" => Command::Help,
        "fields" => Command::Fields,
        "set" => {
            let (field, value) = crate::cli::parse_assignment(rest)?;
            Command::Event(UiEvent::SetField { field, value })
        }
        "generate" | "gen" => Command::Event(UiEvent::Generate),
        "show" => Command::Show(parse_surface(rest)?),
        "lines" => Command::Lines(parse_surface(rest)?),
        "type" | "paste" => {
            let (surface, text) = split_surface(rest);
            Command::Event(UiEvent::Paste {
                surface,
                text: unescape(text),
            })
        }
        "replace" => {
            let (surface, text) = split_surface(rest);
            Command::Event(UiEvent::ReplaceText {
                surface,
                text: unescape(text),
            })
        }
        "key" => {
            let (surface, name) = split_surface(rest);
            Command::Event(UiEvent::Key {
                surface,
                key: parse_key(name)?,
            })
        }
        "clear" => Command::Event(UiEvent::Clear),
        "reset" => Command::Event(UiEvent::ResetFields),
        "copy" => Command::Event(UiEvent::Copy),
        "save" => {
            if rest.is_empty() {
                return Err("usage: save PATH".to_string());
            }
            Command::Event(UiEvent::Save { path: rest.into() })
        }
        "open" => Command::Event(UiEvent::OpenSecondary),
        "close" => Command::Close,
        "highlight" => Command::Event(match rest {
            "" | "toggle" => UiEvent::ToggleHighlight,
            "on" => UiEvent::SetHighlight(true),
            "off" => UiEvent::SetHighlight(false),
            other => return Err(format!("expected on, off or toggle, got '{other}'")),
        }),
        "wrap" => {
            let mode = match rest {
                "off" => GutterMode::Logical,
                columns => {
                    let width = columns
                        .parse::<u16>()
                        .map_err(|err| format!("expected a column count or 'off': {err}"))?;
                    GutterMode::from_wrap_width(Some(width))
                }
            };
            Command::Event(UiEvent::SetGutterMode(mode))
        }
        "height" => {
            let (surface, rows) = split_surface(rest);
            Command::Event(UiEvent::Resize {
                surface,
                height: parse_rows(rows)?,
            })
        }
        "scroll" => {
            let (surface, row) = split_surface(rest);
            Command::Event(UiEvent::Scroll {
                surface,
                first_row: parse_rows(row)?,
            })
        }
        "quit" | "exit" => Command::Event(UiEvent::Quit),
        other => return Err(format!("unknown command '{other}' (try 'help')")),
    };
    Ok(command)
}

fn parse_surface(word: &str) -> Result<SurfaceId, String> {
    match word {
        "" | "primary" => Ok(SurfaceId::Primary),
        "secondary" => Ok(SurfaceId::Secondary),
        other => Err(format!("unknown view '{other}'")),
    }
}

/// Splits an optional leading view name off `rest`.
fn split_surface(rest: &str) -> (SurfaceId, &str) {
    let (word, tail) = rest.split_once(' ').unwrap_or((rest, ""));
    match word {
        "secondary" => (SurfaceId::Secondary, tail),
        "primary" => (SurfaceId::Primary, tail),
        _ => (SurfaceId::Primary, rest),
    }
}

fn parse_rows(raw: &str) -> Result<usize, String> {
    raw.trim()
        .parse()
        .map_err(|err| format!("expected a row number: {err}"))
}

fn parse_key(name: &str) -> Result<KeyEvent, String> {
    let code = match name.trim().to_ascii_lowercase().as_str() {
        "enter" => KeyCode::Enter,
        "backspace" => KeyCode::Backspace,
        "delete" => KeyCode::Delete,
        "tab" => KeyCode::Tab,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        other => return Err(format!("unknown key '{other}'")),
    };
    Ok(KeyEvent::new(code, KeyModifiers::NONE))
}

/// Expands `\n`, `\t` and `\\` escapes.
fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
