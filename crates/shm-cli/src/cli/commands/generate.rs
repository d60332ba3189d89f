//! One-shot generation: set fields, render, then print, save or copy.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use shm_core::config::Layout;
use shm_editor::fields::FieldId;
use shm_editor::{AppState, UiEvent};

use crate::runtime::Runtime;

#[derive(Debug, Default)]
pub struct GenerateOptions {
    pub assignments: Vec<(FieldId, String)>,
    pub count: Option<String>,
    pub output: Option<PathBuf>,
    pub copy: bool,
    pub remember: bool,
    pub no_config: bool,
    pub layout: Option<Layout>,
}

pub fn run(opts: &GenerateOptions) -> Result<()> {
    let config = super::load_config(opts.no_config, opts.layout)?;
    let mut app = AppState::from_config(&config);

    // Markup owns stdout; status lines go to stderr.
    let mut rt = Runtime::new(io::empty(), io::stderr().lock())
        .persist_fields(opts.remember)
        .strict(true);

    for (field, value) in &opts.assignments {
        rt.dispatch(
            &mut app,
            UiEvent::SetField {
                field: *field,
                value: value.clone(),
            },
        )?;
    }
    if let Some(count) = &opts.count {
        rt.dispatch(
            &mut app,
            UiEvent::SetField {
                field: FieldId::NumberOfShines,
                value: count.clone(),
            },
        )?;
    }

    rt.dispatch(&mut app, UiEvent::Generate)?;
    tracing::info!(blocks = app.log.count(), layout = %app.layout, "generate_command");

    if let Some(path) = &opts.output {
        rt.dispatch(&mut app, UiEvent::Save { path: path.clone() })?;
    }
    if opts.copy {
        rt.dispatch(&mut app, UiEvent::Copy)?;
    }
    if opts.output.is_none() && !opts.copy {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(app.output_text().as_bytes())
            .and_then(|()| stdout.flush())
            .context("write markup to stdout")?;
    }

    rt.dispatch(&mut app, UiEvent::Quit)
}
