//! Sapling CLI
//!
//! Parse an HTML file or string and print the resulting tree, the token
//! stream, or the parse errors.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::Parser;
use owo_colors::OwoColorize;
use sapling_common::{Diagnostics, Severity};
use sapling_dom::{DomTree, NodeId, NodeType, QualName, dump};
use sapling_html::{ParserOptions, parse_document, parse_fragment, tokenize};
use serde_json::{Value, json};

/// Sapling: WHATWG HTML tree construction
#[derive(Parser, Debug)]
#[command(name = "sapling")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Print the tree of a file
    sapling ./index.html

    # Parse inline HTML
    sapling --html '<table>foo<tr><td>bar'

    # Parse a fragment as the children of a <tr>
    sapling --fragment tr --html '<td>cell'

    # Show insertion mode switches
    RUST_LOG=debug sapling --html '<title>x'
"#)]
struct Cli {
    /// Path to an HTML file
    #[arg(value_name = "FILE", conflicts_with = "html")]
    path: Option<PathBuf>,

    /// Parse an HTML string directly instead of a file
    #[arg(long, value_name = "HTML")]
    html: Option<String>,

    /// Print the token stream instead of the tree
    #[arg(long)]
    tokens: bool,

    /// Print the tree and diagnostics as JSON
    #[arg(long, conflicts_with = "tokens")]
    json: bool,

    /// Parse as a fragment in a context element with this tag name
    #[arg(long, value_name = "TAG")]
    fragment: Option<String>,

    /// Parse with the scripting flag enabled
    #[arg(long)]
    scripting: bool,

    /// Exit with a failure status if any parse error was reported
    #[arg(long)]
    deny_warnings: bool,

    /// Log every token dispatch at debug level
    #[arg(long)]
    trace_modes: bool,
}

fn main() -> Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let source = read_source(&cli)?;
    let mut diagnostics = Diagnostics::new();

    if cli.tokens {
        for (token, span) in tokenize(&source, &mut diagnostics) {
            println!("{:>5}..{:<5} {token}", span.start, span.end);
        }
    } else {
        let options = ParserOptions::default()
            .with_scripting(cli.scripting)
            .with_trace_modes(cli.trace_modes);
        let (tree, root) = match &cli.fragment {
            Some(context) => {
                let tree = parse_fragment(
                    &source,
                    QualName::html(context.to_ascii_lowercase()),
                    options,
                    &mut diagnostics,
                );
                let root = tree.document_element().unwrap_or(NodeId::ROOT);
                (tree, root)
            }
            None => (
                parse_document(&source, options, &mut diagnostics),
                NodeId::ROOT,
            ),
        };

        if cli.json {
            let output = json!({
                "quirksMode": format!("{:?}", tree.quirks_mode()),
                "children": tree.children(root).iter().map(|&id| node_to_json(&tree, id)).collect::<Vec<_>>(),
                "diagnostics": serde_json::to_value(diagnostics.entries())?,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(exit_code(&cli, &diagnostics));
        }

        print_tree(&tree, root);
    }

    for diagnostic in diagnostics.iter() {
        let line = diagnostic.render(&source);
        match diagnostic.severity {
            Severity::Warning => eprintln!("{}", line.yellow()),
            Severity::Error => eprintln!("{}", line.red()),
        }
    }
    if !diagnostics.is_empty() {
        eprintln!("{}", format!("{} parse error(s)", diagnostics.len()).bold());
    }
    Ok(exit_code(&cli, &diagnostics))
}

/// Load the input from `--html` or the file argument.
fn read_source(cli: &Cli) -> Result<String> {
    if let Some(html) = &cli.html {
        Ok(html.clone())
    } else if let Some(path) = &cli.path {
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
    } else {
        bail!("expected a file path or --html")
    }
}

fn exit_code(cli: &Cli, diagnostics: &Diagnostics) -> ExitCode {
    if cli.deny_warnings && !diagnostics.is_empty() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Print the tree in the html5lib format, colored by node kind when
/// stdout is a terminal.
fn print_tree(tree: &DomTree, root: NodeId) {
    for line in dump(tree, root).lines() {
        let Some(body) = line.strip_prefix("| ") else {
            println!("{line}");
            continue;
        };
        let content = body.trim_start();
        let indent = &body[..body.len() - content.len()];
        if content.starts_with("<!--") || content.starts_with("<!DOCTYPE") {
            println!("| {indent}{}", content.dimmed());
        } else if content.starts_with('<') {
            println!("| {indent}{}", content.cyan());
        } else if content.starts_with('"') {
            println!("| {indent}{}", content.green());
        } else {
            println!("| {indent}{}", content.magenta());
        }
    }
}

fn node_to_json(tree: &DomTree, id: NodeId) -> Value {
    let Some(node) = tree.get(id) else {
        return Value::Null;
    };
    let children: Vec<Value> = tree
        .children(id)
        .iter()
        .map(|&child| node_to_json(tree, child))
        .collect();

    match &node.node_type {
        NodeType::Document => json!({ "type": "document", "children": children }),
        NodeType::Doctype(doctype) => json!({
            "type": "doctype",
            "name": doctype.name,
            "publicId": doctype.public_id,
            "systemId": doctype.system_id,
        }),
        NodeType::Element(element) => {
            let attributes: serde_json::Map<String, Value> = element
                .attrs
                .iter()
                .map(|attr| (attr.qualified_name(), Value::from(attr.value.clone())))
                .collect();
            json!({
                "type": "element",
                "namespace": element.namespace().url(),
                "tagName": element.tag_name(),
                "attributes": attributes,
                "children": children,
            })
        }
        NodeType::Text(text) => json!({ "type": "text", "content": text }),
        NodeType::Comment(text) => json!({ "type": "comment", "content": text }),
    }
}
