//! CLI command implementations

use crate::settings::Settings;
use anyhow::Context as _;
use quill_core::SymbolTree;
use quill_indexer::{discover_tables, BuildReport, BuiltinTable, Coordinator, KeySource, TableFile};
use quill_intellisense::{parse_script, HeadlessPopup, HeadlessTooltip, Intellisense, MemoryBuffer, TextBuffer};
use std::path::PathBuf;
use std::sync::Arc;

/// Everything a command needs from the command line and config.
pub struct Context {
    root: PathBuf,
    settings: Settings,
    /// `--tables` override; forces a fresh build.
    tables: Option<PathBuf>,
}

impl Context {
    pub fn new(root: PathBuf, settings: Settings, tables: Option<PathBuf>) -> Self {
        Self { root, settings, tables }
    }

    fn tables_dir(&self) -> Option<PathBuf> {
        self.tables.clone().or_else(|| self.settings.tables_dir(&self.root))
    }
}

/// Build the tree from the built-in tables and any table files.
fn build(ctx: &Context) -> anyhow::Result<BuildReport> {
    let files: Vec<TableFile> = match ctx.tables_dir() {
        Some(dir) => discover_tables(&dir)
            .with_context(|| format!("failed to discover tables in {}", dir.display()))?
            .into_iter()
            .map(TableFile::new)
            .collect(),
        None => Vec::new(),
    };

    let builtins = BuiltinTable::ALL;
    let mut sources: Vec<&dyn KeySource> = Vec::new();
    if ctx.settings.builtin {
        sources.extend(builtins.iter().map(|table| table as &dyn KeySource));
    }
    sources.extend(files.iter().map(|file| file as &dyn KeySource));

    Coordinator::with_delimiter(ctx.settings.intellisense.delimiter).build(&sources)
}

/// The snapshot when one exists and no `--tables` was given, else a build.
fn load_tree(ctx: &Context) -> anyhow::Result<SymbolTree> {
    if ctx.tables.is_none() {
        if let Some(tree) = quill_core::load_snapshot(&ctx.root)
            .with_context(|| format!("failed to load snapshot under {}", ctx.root.display()))?
        {
            tracing::debug!("Using index snapshot ({} keys)", tree.key_count());
            return Ok(tree);
        }
    }
    Ok(build(ctx)?.tree)
}

pub fn index(ctx: &Context, save: bool) -> anyhow::Result<()> {
    tracing::info!("Indexing keys for: {}", ctx.root.display());

    let report = build(ctx)?;
    for rejected in &report.rejected {
        println!("rejected {:?} from {}: {}", rejected.label, rejected.source, rejected.error);
    }
    println!(
        "{} keys, {} nodes, {} rejected",
        report.inserted,
        report.tree.node_count(),
        report.rejected.len()
    );

    if save {
        let path = quill_core::save_snapshot(&report.tree, &ctx.root)?;
        tracing::info!("Snapshot written to {}", path.display());
    }
    Ok(())
}

pub fn tree(ctx: &Context, depth: Option<usize>) -> anyhow::Result<()> {
    let tree = load_tree(ctx)?;
    print!("{}", tree.render_outline(depth));
    Ok(())
}

pub fn complete(ctx: &Context, word: &str) -> anyhow::Result<()> {
    let tree = load_tree(ctx)?;
    match tree.complete(word) {
        Some((_, candidates)) => {
            for candidate in candidates {
                let kind = candidate.kind.map(|k| k.to_string()).unwrap_or_default();
                println!("{}\t{}\t{}", candidate.label, candidate.completion, kind);
            }
        }
        None => println!("no completions for {:?}", word),
    }
    Ok(())
}

pub fn define(ctx: &Context, word: &str) -> anyhow::Result<()> {
    let tree = load_tree(ctx)?;
    match tree.definition(word) {
        Some(definition) => println!("{}", definition.text),
        None => println!("no definition"),
    }
    Ok(())
}

pub fn simulate(ctx: &Context, text: &str, keys: &str) -> anyhow::Result<()> {
    let events = parse_script(keys).context("invalid key script")?;
    let tree = Arc::new(load_tree(ctx)?);

    let mut intellisense = Intellisense::new(
        tree,
        ctx.settings.intellisense.clone(),
        HeadlessPopup::default(),
        HeadlessTooltip::default(),
    );
    let mut buffer = MemoryBuffer::new(text);

    for event in events {
        let outcome = intellisense.handle(&mut buffer, event);
        tracing::debug!("{:?} -> {:?}", event, outcome);
    }

    print_state(&intellisense, &buffer);
    Ok(())
}

fn print_state(intellisense: &Intellisense<HeadlessPopup, HeadlessTooltip>, buffer: &MemoryBuffer) {
    println!("buffer: {:?}", buffer.as_str());
    let caret = buffer.caret_position();
    println!("caret: {}:{}", caret.line, caret.column);

    let popup = intellisense.popup();
    if popup.visible {
        println!("popup:");
        for (i, item) in popup.items.iter().enumerate() {
            let marker = if popup.highlighted == Some(i) { '>' } else { ' ' };
            println!("  {} {}", marker, item.label);
        }
    } else {
        println!("popup: hidden");
    }

    match &intellisense.tooltip().layout {
        Some(layout) if intellisense.is_tooltip_visible() => {
            println!("tooltip:");
            for line in &layout.lines {
                println!("  {}", line);
            }
        }
        _ => println!("tooltip: hidden"),
    }
}

pub fn clear(ctx: &Context) -> anyhow::Result<()> {
    tracing::info!("Clearing cache for: {}", ctx.root.display());

    quill_core::clear_cache(&ctx.root)?;

    tracing::info!("Cache cleared");
    Ok(())
}
