//! Performance benchmarks for eswalk

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use eswalk::test_utils::{SAMPLE_PROGRAM, sample_program};
use eswalk::{
    Ast, Child, CompositeProgress, NoProgress, NodeId, NodeKind, OutlineConfig, Progress,
    StatsCollector, StatsConfig, TreeWalker, Visit, outline,
};
use serde_json::Value;

/// A left-leaning chain of `depth` binary expressions.
fn deep_tree(depth: usize) -> (Ast, NodeId) {
    let mut ast = Ast::new();
    let mut current = ast.add_node(NodeKind::Identifier);
    ast.set_prop(current, "name", Value::from("x"));
    for _ in 0..depth {
        let parent = ast.add_node(NodeKind::BinaryExpression);
        ast.set_prop(parent, "operator", Value::from("+"));
        let right = ast.add_node(NodeKind::Identifier);
        ast.set_prop(right, "name", Value::from("y"));
        ast.set_child(parent, "left", Child::Node(current));
        ast.set_child(parent, "right", Child::Node(right));
        current = parent;
    }
    (ast, current)
}

/// One block holding `width` expression statements.
fn wide_tree(width: usize) -> (Ast, NodeId) {
    let mut ast = Ast::new();
    let block = ast.add_node(NodeKind::BlockStatement);
    let mut body = Vec::with_capacity(width);
    for i in 0..width {
        let statement = ast.add_node(NodeKind::ExpressionStatement);
        let ident = ast.add_node(NodeKind::Identifier);
        ast.set_prop(ident, "name", Value::from(format!("v{}", i)));
        ast.set_child(statement, "expression", Child::Node(ident));
        body.push(Some(statement));
    }
    ast.set_child(block, "body", Child::List(body));
    (ast, block)
}

fn count_nodes(ast: &mut Ast, root: NodeId) -> usize {
    let mut count = 0;
    TreeWalker::from_fns(
        |_: &Ast, _: NodeId| {
            count += 1;
            Visit::Continue
        },
        |_: &Ast, _: NodeId| {},
    )
    .walk(ast, root);
    count
}

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse_sample_program", |b| {
        b.iter(|| Ast::from_json(black_box(SAMPLE_PROGRAM)))
    });
}

fn bench_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("walk");

    let (mut sample, sample_root) = sample_program();
    group.bench_function("sample_program", |b| {
        b.iter(|| count_nodes(&mut sample, black_box(sample_root)))
    });

    let (mut deep, deep_root) = deep_tree(10_000);
    group.bench_function("deep_10k", |b| {
        b.iter(|| count_nodes(&mut deep, black_box(deep_root)))
    });

    let (mut wide, wide_root) = wide_tree(10_000);
    group.bench_function("wide_10k", |b| {
        b.iter(|| count_nodes(&mut wide, black_box(wide_root)))
    });

    group.bench_function("wide_10k_stats", |b| {
        b.iter(|| {
            let mut collector = StatsCollector::new(StatsConfig::default());
            collector.record_document(&mut wide, wide_root);
            collector.finalize()
        })
    });

    group.finish();
}

fn bench_outline(c: &mut Criterion) {
    let (mut wide, wide_root) = wide_tree(10_000);
    let config = OutlineConfig::default();
    c.bench_function("outline_wide_10k", |b| {
        b.iter(|| outline(&mut wide, wide_root, &config, NoProgress))
    });
}

fn bench_composite(c: &mut Criterion) {
    let mut group = c.benchmark_group("composite_progress");

    group.bench_function("100_children_x_100_ticks", |b| {
        b.iter(|| {
            let composite = CompositeProgress::new(NoProgress);
            let mut children: Vec<_> = (0..100)
                .map(|i| composite.weighted_sub_progress(i as f64 + 1.0))
                .collect();
            for child in &mut children {
                child.set_total_work(100.0);
            }
            for _ in 0..100 {
                for child in &mut children {
                    child.tick();
                }
            }
            for child in &mut children {
                child.done();
            }
            black_box(composite.fraction())
        })
    });

    group.finish();
}

criterion_group!(benches, bench_parse, bench_walk, bench_outline, bench_composite);
criterion_main!(benches);
