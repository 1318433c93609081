//! Node statistics collection and display
//!
//! Counts nodes per kind across one or more documents, along with the
//! deepest nesting seen and the number of nodes of unknown kind.

use serde::Serialize;
use std::collections::HashMap;
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::ast::{Ast, NodeId};
use crate::walker::{TreeWalker, Visit, Visitor, WalkReport};

/// Collected statistics about a set of documents.
#[derive(Debug, Clone, Default, Serialize)]
pub struct KindStats {
    pub documents: usize,
    pub nodes: usize,
    pub max_depth: usize,
    /// Nodes whose kind had no walk order
    pub unknown: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub by_kind: Vec<KindCount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KindCount {
    pub kind: String,
    pub count: usize,
}

/// Configuration for statistics collection.
#[derive(Debug, Clone, Default)]
pub struct StatsConfig {
    /// Count absent child slots as `null` literals
    pub walk_nulls: bool,
}

/// Statistics collector; a [`Visitor`] that accumulates across walks.
#[derive(Debug, Default)]
pub struct StatsCollector {
    config: StatsConfig,
    documents: usize,
    nodes: usize,
    unknown: usize,
    depth: usize,
    max_depth: usize,
    by_kind: HashMap<String, usize>,
}

impl StatsCollector {
    pub fn new(config: StatsConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Walk one document and add its nodes to the totals.
    pub fn record_document(&mut self, ast: &mut Ast, root: NodeId) -> WalkReport {
        let walk_nulls = self.config.walk_nulls;
        let report = TreeWalker::new(&mut *self)
            .with_walk_nulls(walk_nulls)
            .walk(ast, root);
        self.documents += 1;
        self.unknown += report.unknown_kinds.len();
        report
    }

    /// Finalize and return the collected statistics.
    pub fn finalize(self) -> KindStats {
        let mut by_kind: Vec<KindCount> = self
            .by_kind
            .into_iter()
            .map(|(kind, count)| KindCount { kind, count })
            .collect();

        // Most frequent first, then alphabetical
        by_kind.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.kind.cmp(&b.kind)));

        KindStats {
            documents: self.documents,
            nodes: self.nodes,
            max_depth: self.max_depth,
            unknown: self.unknown,
            by_kind,
        }
    }
}

impl Visitor for StatsCollector {
    fn before_visit(&mut self, ast: &Ast, node: NodeId) -> Visit {
        self.nodes += 1;
        self.max_depth = self.max_depth.max(self.depth);
        self.depth += 1;
        *self
            .by_kind
            .entry(ast.kind(node).to_string())
            .or_insert(0) += 1;
        Visit::Continue
    }

    fn after_visit(&mut self, _ast: &Ast, _node: NodeId) {
        self.depth -= 1;
    }
}

/// Print statistics to stdout with optional color.
pub fn print_stats(stats: &KindStats, use_color: bool) -> io::Result<()> {
    let color_choice = if use_color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(color_choice);

    // Header
    let mut bold = ColorSpec::new();
    bold.set_bold(true);
    stdout.set_color(&bold)?;
    writeln!(stdout, "Node Statistics")?;
    stdout.reset()?;
    writeln!(stdout, "───────────────")?;

    writeln!(stdout, "Documents:    {}", stats.documents)?;
    writeln!(stdout, "Nodes:        {}", format_number(stats.nodes))?;
    writeln!(stdout, "Max depth:    {}", stats.max_depth)?;
    if stats.unknown > 0 {
        let mut warn = ColorSpec::new();
        warn.set_fg(Some(Color::Yellow));
        stdout.set_color(&warn)?;
        writeln!(stdout, "Unknown:      {}", stats.unknown)?;
        stdout.reset()?;
    }
    writeln!(stdout)?;

    if !stats.by_kind.is_empty() {
        stdout.set_color(&bold)?;
        writeln!(stdout, "By Kind:")?;
        stdout.reset()?;

        let mut kind_color = ColorSpec::new();
        kind_color.set_fg(Some(Color::Cyan));

        for entry in &stats.by_kind {
            write!(stdout, "  ")?;
            stdout.set_color(&kind_color)?;
            write!(stdout, "{:<28}", entry.kind)?;
            stdout.reset()?;
            writeln!(stdout, "{:>10}", format_number(entry.count))?;
        }
    }

    Ok(())
}

/// Format a number with thousand separators.
fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);

    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    result
}

/// Print statistics as JSON.
pub fn print_stats_json(stats: &KindStats) -> io::Result<()> {
    let json = serde_json::to_string_pretty(stats).map_err(io::Error::other)?;
    println!("{}", json);
    Ok(())
}
