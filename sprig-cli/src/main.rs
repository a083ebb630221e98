//! sprig CLI
//!
//! Parses a markup file (or an inline string) and prints the tree, a JSON
//! dump, or the result of an id/class/tag query.

mod output;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use sprig_common::warning::set_warnings_enabled;
use sprig_dom::{DomTree, NodeId};
use sprig_html::{ParseOptions, TreeBuilder, UnbalancedClosePolicy, VoidElementMatching};

/// Parse markup into an element tree and query it.
#[derive(Debug, Parser)]
#[command(name = "sprig", version, about)]
struct Cli {
    /// Markup file to parse
    #[arg(required_unless_present = "html", conflicts_with = "html")]
    file: Option<PathBuf>,

    /// Parse this markup string instead of a file
    #[arg(long)]
    html: Option<String>,

    /// Print the first element with this id
    #[arg(long)]
    id: Option<String>,

    /// Print every element with this class
    #[arg(long)]
    class: Option<String>,

    /// Print every element with this tag name
    #[arg(long)]
    tag: Option<String>,

    /// Print JSON instead of an indented tree
    #[arg(long)]
    json: bool,

    /// What to do with a closing tag that has no open element
    #[arg(long, default_value_t = UnbalancedClosePolicy::Clamp)]
    unbalanced_close: UnbalancedClosePolicy,

    /// How void elements are recognised
    #[arg(long, default_value_t = VoidElementMatching::Exact)]
    void_matching: VoidElementMatching,

    /// Drop text nodes made only of whitespace
    #[arg(long)]
    trim_whitespace: bool,

    /// List recovered parse issues on stderr
    #[arg(long)]
    issues: bool,

    /// Do not print parser warnings
    #[arg(long, short)]
    quiet: bool,
}

impl Cli {
    const fn options(&self) -> ParseOptions {
        ParseOptions::new()
            .with_unbalanced_close(self.unbalanced_close)
            .with_void_elements(self.void_matching)
            .with_whitespace_text(!self.trim_whitespace)
    }

    fn read_markup(&self) -> Result<String> {
        if let Some(html) = &self.html {
            return Ok(html.clone());
        }
        let Some(path) = &self.file else {
            bail!("no input: pass a file or --html '<...>'");
        };
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
    }

    /// Nodes selected by the query flags, or `None` when no query was given.
    fn select(&self, tree: &DomTree) -> Option<Vec<NodeId>> {
        let root = tree.root();
        if let Some(id) = &self.id {
            return Some(tree.find_by_id(root, id).into_iter().collect());
        }
        if let Some(class) = &self.class {
            return Some(tree.find_all_by_class_name(root, class));
        }
        self.tag
            .as_ref()
            .map(|tag| tree.find_all_by_tag_name(root, tag))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    set_warnings_enabled(!cli.quiet);

    let markup = cli.read_markup()?;
    let tokens = sprig_html::tokenizer::tokenize(&markup);
    let (tree, issues) = TreeBuilder::new(tokens)
        .with_options(cli.options())
        .try_run()
        .context("parsing markup")?;

    if cli.issues {
        for issue in &issues {
            eprintln!(
                "{} at byte {} (token {}): {}",
                issue.kind, issue.position, issue.token_index, issue.message
            );
        }
    }

    let selected = cli.select(&tree);
    let mut stdout = std::io::stdout().lock();
    match (selected, cli.json) {
        (None, false) => output::write_tree(&mut stdout, &tree, tree.root(), 0)?,
        (None, true) => {
            let value = output::node_to_json(&tree, tree.root())?;
            output::write_json(&mut stdout, &value)?;
        }
        (Some(ids), false) => {
            for id in ids {
                output::write_tree(&mut stdout, &tree, id, 0)?;
            }
        }
        (Some(ids), true) => {
            let nodes = ids
                .into_iter()
                .map(|id| output::node_to_json(&tree, id))
                .collect::<Result<Vec<_>>>()?;
            output::write_json(&mut stdout, &serde_json::Value::Array(nodes))?;
        }
    }

    Ok(())
}
