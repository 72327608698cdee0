mod args;
mod host;
mod markdown;
mod render;

use std::fmt::Write;
use std::path::Path;
use std::{env, fs, process};

use anyhow::{Context, Result, anyhow};
use livelinks_config::Config;
use livelinks_engine::{
    DocumentId, EngineOptions, IdGenerator, LinkView, PassInput, SelectionRange, SequentialIds,
    UuidIds, ViewState,
};
use relative_path::RelativePathBuf;

use args::{Args, USAGE};
use host::{ConsoleButton, ConsoleHost};
use markdown::{MarkdownDocument, WikiLinkIndex};
use render::{RenderedMarks, render_html, render_table};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let argv: Vec<String> = env::args().collect();
    let program = argv.first().map_or("livelinks-cli", String::as_str);
    let args = match Args::parse(argv.iter().skip(1).cloned()) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e:#}");
            eprintln!("Usage: {program} {USAGE}");
            process::exit(2);
        }
    };

    let config = load_config(args.config.as_deref())?;
    let options = config
        .engine_options()
        .context("Invalid link settings in config")?;
    let text = fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    print!("{}", run(&args, options, &text)?);
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from_path(path)?
            .ok_or_else(|| anyhow!("Config file {} does not exist", path.display())),
        None => Ok(Config::load()?.unwrap_or_default()),
    }
}

/// Notes are identified by their relative path; absolute paths fall back
/// to the file name.
fn document_id(path: &Path) -> DocumentId {
    match RelativePathBuf::from_path(path) {
        Ok(relative) => DocumentId::new(relative),
        Err(_) => {
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            DocumentId::from(name.as_str())
        }
    }
}

/// Runs one live pass over `text`, binds the rendered marks and replays the
/// requested pointer events. Returns the report to print.
fn run(args: &Args, options: EngineOptions, text: &str) -> Result<String> {
    let document = MarkdownDocument::parse(text);
    let id = document_id(&args.file);
    let mut index = WikiLinkIndex::new();
    index.insert(id.clone(), text);
    let visible = document.everything();
    let input = PassInput {
        document: &id,
        syntax: &document,
        index: &index,
        visible: &visible,
    };

    let ids: Box<dyn IdGenerator> = if args.stable_ids {
        Box::new(SequentialIds::default())
    } else {
        Box::new(UuidIds)
    };
    let mut view = LinkView::with_ids(options, ids);
    let mut host = ConsoleHost::new(document.text());
    let mut button = ConsoleButton::default();
    view.open(ViewState::live(), &input, Some(&mut button), &mut host)
        .context("Link pass failed")?;

    let snapshot = view.snapshot();
    let mut rendered = RenderedMarks::from_snapshot(&snapshot);
    let bound = view.on_rendered(&mut rendered);
    log::info!("{bound} of {} marks bound", rendered.marks.len());

    let mut out = if args.html {
        render_html(text, &rendered) + "\n"
    } else {
        render_table(text, &snapshot)
    };
    if button.hidden {
        out.push_str("mode switch hidden\n");
    }

    if !args.cursors.is_empty() {
        host.selection = args
            .cursors
            .iter()
            .map(|&offset| SelectionRange::caret(offset))
            .collect();
    }
    let mut replay = host.take_events();

    for (offset, click) in [(args.hover, false), (args.click, true)]
        .into_iter()
        .filter_map(|(offset, click)| offset.map(|offset| (offset, click)))
    {
        let Some(link) = rendered.link_at(&snapshot, offset).cloned() else {
            replay.push(format!("no link at {offset}"));
            continue;
        };
        let selection = host.selection.clone();
        let expanded = view.hover(&link, &selection, &mut host);
        replay.extend(host.take_events());
        replay.push(format!(
            "hover {offset}: {}",
            if expanded { "expanded" } else { "collapsed" }
        ));
        if click {
            let outcome = view.click(&link, &mut host);
            replay.extend(host.take_events());
            replay.push(format!("click {offset}: {outcome:?}"));
        }
    }

    if !replay.is_empty() {
        out.push_str("events:\n");
        for event in replay {
            let _ = writeln!(out, "  {event}");
        }
    }
    Ok(out)
}
