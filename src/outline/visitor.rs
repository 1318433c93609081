//! OutlineVisitor - records one line per visited node

use serde::Serialize;

use crate::ast::{Ast, NodeId};
use crate::progress::{NoProgress, Progress};
use crate::walker::{TreeWalker, Visit, Visitor, WalkReport};

use super::config::OutlineConfig;

/// One line of an outline.
#[derive(Debug, Clone, Serialize)]
pub struct OutlineEntry {
    pub depth: usize,
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Tree-drawing prefix inherited from ancestors (without the connector).
    #[serde(skip)]
    pub prefix: String,
    #[serde(skip)]
    pub is_last: bool,
    /// Direct children not shown because the node was collapsed.
    #[serde(skip_serializing_if = "is_zero")]
    pub hidden: usize,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub synthetic: bool,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Outline {
    pub entries: Vec<OutlineEntry>,
    pub walk: WalkReport,
    /// The walk stopped early because the progress sink was canceled.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub canceled: bool,
}

struct Frame {
    remaining: usize,
    is_last: bool,
}

/// Visitor that turns a walk into [`OutlineEntry`] lines.
///
/// Advances its progress sink by one per recorded node (null placeholders
/// excluded) and stops
/// descending once the sink reports cancellation.
pub struct OutlineVisitor<P: Progress = NoProgress> {
    config: OutlineConfig,
    progress: P,
    frames: Vec<Frame>,
    entries: Vec<OutlineEntry>,
    canceled: bool,
}

impl<P: Progress> OutlineVisitor<P> {
    pub fn new(config: OutlineConfig, progress: P) -> Self {
        Self {
            config,
            progress,
            frames: Vec::new(),
            entries: Vec::new(),
            canceled: false,
        }
    }

    /// Close the progress sink and return the collected outline.
    pub fn finish(mut self, walk: WalkReport) -> Outline {
        self.progress.done();
        Outline {
            entries: self.entries,
            walk,
            canceled: self.canceled,
        }
    }

    fn visible_children(&self, ast: &Ast, id: NodeId) -> usize {
        ast.child_slots(id).map_or(0, |slots| {
            slots
                .iter()
                .filter(|slot| slot.is_some() || self.config.walk_nulls)
                .count()
        })
    }

    fn prefix(&self) -> String {
        self.frames
            .iter()
            .skip(1)
            .map(|frame| if frame.is_last { "    " } else { "│   " })
            .collect()
    }
}

impl<P: Progress> Visitor for OutlineVisitor<P> {
    fn before_visit(&mut self, ast: &Ast, id: NodeId) -> Visit {
        let depth = self.frames.len();
        let is_last = match self.frames.last_mut() {
            Some(parent) => {
                parent.remaining = parent.remaining.saturating_sub(1);
                parent.remaining == 0
            }
            None => true,
        };

        if self.canceled || self.progress.is_canceled() {
            self.canceled = true;
            self.frames.push(Frame {
                remaining: 0,
                is_last,
            });
            return Visit::SkipSubtree;
        }

        let node = ast.node(id);
        let children = self.visible_children(ast, id);
        let collapse = children > 0
            && (self.config.is_collapsed(&node.kind) || self.config.at_max_depth(depth));

        self.entries.push(OutlineEntry {
            depth,
            kind: node.kind.to_string(),
            label: node.label(),
            prefix: self.prefix(),
            is_last,
            hidden: if collapse { children } else { 0 },
            synthetic: node.is_synthetic(),
        });
        // Placeholders are not part of the arena total.
        if !node.is_synthetic() {
            self.progress.tick();
        }

        self.frames.push(Frame {
            remaining: if collapse { 0 } else { children },
            is_last,
        });
        if collapse {
            Visit::SkipSubtree
        } else {
            Visit::Continue
        }
    }

    fn after_visit(&mut self, _ast: &Ast, _id: NodeId) {
        self.frames.pop();
    }
}

/// Walk `root` and build its outline, reporting one unit per node to
/// `progress`.
pub fn outline<P: Progress>(
    ast: &mut Ast,
    root: NodeId,
    config: &OutlineConfig,
    mut progress: P,
) -> Outline {
    progress.set_total_work(ast.len() as f64);
    let visitor = OutlineVisitor::new(config.clone(), progress);
    let mut walker = TreeWalker::new(visitor).with_walk_nulls(config.walk_nulls);
    let report = walker.walk(ast, root);
    walker.into_visitor().finish(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::NodeKind;
    use crate::progress::CompositeProgress;
    use crate::test_utils::{RecordingProgress, sample_program};

    fn lines(outline: &Outline) -> Vec<String> {
        outline
            .entries
            .iter()
            .map(|e| {
                let label = e.label.as_deref().map(|l| format!(" {}", l)).unwrap_or_default();
                format!("{}{}{}", "  ".repeat(e.depth), e.kind, label)
            })
            .collect()
    }

    #[test]
    fn test_outline_lists_every_node() {
        let (mut ast, root) = sample_program();
        let outline = outline(&mut ast, root, &OutlineConfig::default(), NoProgress);
        assert_eq!(
            lines(&outline),
            vec![
                "Program",
                "  VariableDeclaration const",
                "    VariableDeclarator",
                "      Identifier greeting",
                "      TemplateLiteral",
                "        TemplateElement `hello `",
                "        Identifier name",
                "        TemplateElement ``",
                "  ExpressionStatement",
                "    CallExpression",
                "      MemberExpression",
                "        Identifier console",
                "        Identifier log",
                "      Identifier greeting",
            ]
        );
        assert!(!outline.canceled);
    }

    #[test]
    fn test_last_sibling_flags_and_prefixes() {
        let (mut ast, root) = sample_program();
        let outline = outline(&mut ast, root, &OutlineConfig::default(), NoProgress);
        let entries = &outline.entries;

        // VariableDeclaration is not the last statement, ExpressionStatement is.
        assert!(!entries[1].is_last);
        assert!(entries[8].is_last);
        // Children of the first statement draw a continuing rail.
        assert_eq!(entries[2].prefix, "│   ");
        assert_eq!(entries[3].prefix, "│       ");
        // Children of the last statement do not.
        assert_eq!(entries[9].prefix, "    ");
    }

    #[test]
    fn test_max_depth_collapses_deeper_nodes() {
        let (mut ast, root) = sample_program();
        let config = OutlineConfig {
            max_depth: Some(1),
            ..Default::default()
        };
        let outline = outline(&mut ast, root, &config, NoProgress);
        assert_eq!(
            lines(&outline),
            vec!["Program", "  VariableDeclaration const", "  ExpressionStatement"]
        );
        assert_eq!(outline.entries[1].hidden, 1);
        assert_eq!(outline.walk.skipped, 2);
    }

    #[test]
    fn test_collapsed_kinds_hide_subtree() {
        let (mut ast, root) = sample_program();
        let config = OutlineConfig {
            collapse: vec![NodeKind::TemplateLiteral],
            ..Default::default()
        };
        let outline = outline(&mut ast, root, &config, NoProgress);
        let template = outline
            .entries
            .iter()
            .find(|e| e.kind == "TemplateLiteral")
            .unwrap();
        assert_eq!(template.hidden, 3);
        assert!(!outline.entries.iter().any(|e| e.kind == "TemplateElement"));
    }

    #[test]
    fn test_walk_nulls_shows_placeholders() {
        let (mut ast, root) = sample_program();
        let config = OutlineConfig {
            walk_nulls: true,
            ..Default::default()
        };
        let outline = outline(&mut ast, root, &config, NoProgress);
        // Every child slot in the sample program is filled.
        assert_eq!(outline.walk.synthesized, 0);

        let (mut ast, root) = crate::test_utils::parse(
            r#"{"type": "ReturnStatement", "argument": null}"#,
        );
        let outline = super::outline(&mut ast, root, &config, NoProgress);
        assert_eq!(outline.entries.len(), 2);
        assert!(outline.entries[1].synthetic);
        assert_eq!(outline.entries[1].label.as_deref(), Some("null"));
    }

    #[test]
    fn test_progress_ticks_per_node_and_finishes() {
        let (mut ast, root) = sample_program();
        let total = ast.len() as f64;
        let progress = RecordingProgress::new();
        let outline = outline(&mut ast, root, &OutlineConfig::default(), progress.clone());

        assert_eq!(progress.total_work(), Some(total));
        assert_eq!(progress.last_worked(), Some(outline.entries.len() as f64));
        assert_eq!(progress.done_calls(), 1);
    }

    #[test]
    fn test_cancellation_stops_descent() {
        let (mut ast, root) = sample_program();
        let progress = RecordingProgress::new().cancel_after(3);
        let outline = outline(&mut ast, root, &OutlineConfig::default(), progress);

        assert!(outline.canceled);
        assert_eq!(outline.entries.len(), 3);
    }

    #[test]
    fn test_placeholders_keep_progress_within_total() {
        let (mut ast, root) = crate::test_utils::parse(
            r#"{"type": "IfStatement",
                "consequent": {"type": "ReturnStatement", "argument": null},
                "alternate": null}"#,
        );
        let root_sink = RecordingProgress::new();
        let composite = CompositeProgress::new(root_sink.clone());
        let config = OutlineConfig {
            walk_nulls: true,
            ..Default::default()
        };

        let outline = outline(&mut ast, root, &config, composite.sub_progress());

        assert_eq!(outline.entries.len(), 5);
        assert_eq!(outline.walk.synthesized, 3);
        let history = root_sink.worked_history();
        assert!(history.iter().all(|f| (0.0..=1.0).contains(f)), "{:?}", history);
        assert_eq!(root_sink.last_worked(), Some(1.0));
        assert_eq!(root_sink.done_calls(), 1);
    }
}
