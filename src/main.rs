//! CLI entry point for eswalk

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use eswalk::{
    CancelToken, CompositeProgress, Document, DocumentReport, NodeKind, OutlineConfig,
    OutlineFormatter, OutputConfig, Progress, ProgressProxy, SourceConfig, StatsCollector,
    StatsConfig, SubProgress, TerminalProgress, compile_pattern, discover, find_labels,
    init_logging, load_all, outline, print_json, print_matches, print_stats, print_stats_json,
    print_summary,
};
use termcolor::ColorChoice;
use tracing::{debug, warn_span};

/// Color output mode
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
fn should_use_color(mode: ColorMode, is_terminal: bool) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // Respect NO_COLOR environment variable (https://no-color.org/)
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            is_terminal
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "eswalk")]
#[command(about = "Walk ESTree JSON syntax trees and print their outline")]
#[command(version)]
struct Args {
    /// ESTree JSON files or directories to scan for them
    #[arg(default_value = ".")]
    paths: Vec<PathBuf>,

    /// Include hidden files and files excluded by .gitignore
    #[arg(short, long)]
    all: bool,

    /// Descend only N levels deep
    #[arg(short = 'L', long = "level")]
    level: Option<usize>,

    /// Show nodes of KIND without their subtree (can be used multiple times)
    #[arg(long = "collapse", value_name = "KIND")]
    collapse: Vec<String>,

    /// Show absent child slots as `null` literals
    #[arg(long = "walk-nulls")]
    walk_nulls: bool,

    /// List nodes whose label matches REGEX instead of the outline
    #[arg(long = "find", value_name = "REGEX", conflicts_with = "stats")]
    find: Option<String>,

    /// Show node kind statistics instead of the outline
    #[arg(long = "stats")]
    stats: bool,

    /// Output in JSON format
    #[arg(long = "json")]
    json: bool,

    /// Control color output: auto, always, never
    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorMode,

    /// Ignore files matching pattern (can be used multiple times)
    #[arg(short = 'I', long = "ignore")]
    ignore: Vec<String>,

    /// Number of parallel workers for parsing
    /// (0 = auto-detect, 1 = sequential, N = use N workers)
    #[arg(short = 'j', long = "jobs", default_value = "0")]
    jobs: usize,

    /// Do not draw a progress bar on stderr
    #[arg(long = "no-progress")]
    no_progress: bool,

    /// Stop walking further documents after the first unknown node kind
    #[arg(long = "fail-fast")]
    fail_fast: bool,

    /// Exit with status 2 if any document failed to load or had unknown kinds
    #[arg(long = "strict")]
    strict: bool,

    /// Log lifecycle events to stderr (overridden by ESWALK_LOG)
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

enum Mode {
    Outline(OutlineConfig),
    Find(regex::Regex),
    Stats(StatsCollector),
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);
    let started = Instant::now();

    let source_config = SourceConfig {
        show_all: args.all,
        ignore_patterns: args.ignore.clone(),
        parallel_workers: args.jobs,
        ..Default::default()
    };

    let paths = discover(&args.paths, &source_config).unwrap_or_else(|e| {
        eprintln!("eswalk: {}", e);
        process::exit(1);
    });
    if paths.is_empty() {
        eprintln!("eswalk: warning: no documents found");
    }

    let mut mode = if let Some(pattern) = &args.find {
        Mode::Find(compile_pattern(pattern).unwrap_or_else(|e| {
            eprintln!("eswalk: {}", e);
            process::exit(1);
        }))
    } else if args.stats {
        Mode::Stats(StatsCollector::new(StatsConfig {
            walk_nulls: args.walk_nulls,
        }))
    } else {
        Mode::Outline(OutlineConfig {
            max_depth: args.level,
            collapse: collapse_kinds(&args.collapse),
            walk_nulls: args.walk_nulls,
        })
    };

    let loaded = load_all(&paths, source_config.parallel_workers);

    let output_config = OutputConfig {
        use_color: should_use_color(args.color, std::io::stdout().is_terminal()),
        ..Default::default()
    };
    let cancel = CancelToken::new();
    let composite = CompositeProgress::new(root_sink(&args, cancel.clone()));

    // Every sub-progress exists before any finishes, so the root sees done
    // only once all documents are through.
    let work: Vec<(eswalk::Result<Document>, Option<SubProgress>)> = loaded
        .into_iter()
        .map(|result| {
            let sub = result
                .as_ref()
                .ok()
                .map(|doc| composite.weighted_sub_progress(doc.bytes as f64));
            (result, sub)
        })
        .collect();

    let mut reports = Vec::with_capacity(work.len());
    let mut failed = 0;
    let mut unclean = 0;
    let mut nodes = 0;

    for (path, (result, sub)) in paths.iter().zip(work) {
        let (mut doc, mut sub) = match (result, sub) {
            (Ok(doc), Some(sub)) => (doc, sub),
            (Ok(_), None) => continue,
            (Err(e), _) => {
                eprintln!("eswalk: {}", e);
                failed += 1;
                reports.push(DocumentReport::failed(path.clone(), e));
                continue;
            }
        };
        sub.set_title(&display_name(&doc.path));
        // Walker diagnostics carry the document path through this span.
        let _span = warn_span!("document", path = %doc.path.display()).entered();

        let mut report = DocumentReport {
            path: doc.path.clone(),
            outline: None,
            matches: None,
            error: None,
        };
        let walk = match &mut mode {
            Mode::Outline(config) => {
                let result = outline(&mut doc.ast, doc.root, config, sub);
                let walk = result.walk.clone();
                report.outline = Some(result);
                walk
            }
            Mode::Find(_) if sub.is_canceled() => {
                sub.done();
                Default::default()
            }
            Mode::Find(pattern) => {
                let (found, walk) = find_labels(&mut doc.ast, doc.root, pattern);
                report.matches = Some(found);
                sub.done();
                walk
            }
            Mode::Stats(_) if sub.is_canceled() => {
                sub.done();
                Default::default()
            }
            Mode::Stats(collector) => {
                let walk = collector.record_document(&mut doc.ast, doc.root);
                sub.done();
                walk
            }
        };

        nodes += walk.visited;
        if !walk.is_clean() {
            unclean += 1;
            if args.fail_fast {
                cancel.cancel();
            }
        }
        reports.push(report);
    }

    let result = match mode {
        Mode::Stats(collector) => {
            let stats = collector.finalize();
            if args.json {
                print_stats_json(&stats)
            } else {
                print_stats(&stats, output_config.use_color)
            }
        }
        _ if args.json => print_json(&reports),
        Mode::Find(_) => reports.iter().try_for_each(|report| match &report.matches {
            Some(found) => print_matches(&output_config, &report.path, found),
            None => Ok(()),
        }),
        Mode::Outline(_) => {
            let formatter = OutlineFormatter::new(output_config.clone());
            reports
                .iter()
                .filter_map(|report| report.outline.as_ref().map(|o| (&report.path, o)))
                .try_for_each(|(path, o)| formatter.print(&path.display().to_string(), o))
                .and_then(|()| {
                    print_summary(output_config.use_color, reports.len() - failed, nodes)
                })
        }
    };

    if let Err(e) = result {
        eprintln!("eswalk: error writing output: {}", e);
        process::exit(1);
    }

    let elapsed = Duration::from_millis(started.elapsed().as_millis() as u64);
    debug!(
        documents = reports.len(),
        failed,
        elapsed = %humantime::format_duration(elapsed),
        "finished"
    );

    if args.strict && (failed > 0 || unclean > 0) {
        process::exit(2);
    }
}

/// Progress root: a bar on stderr when it is a terminal, otherwise a sink
/// that only carries the cancel flag.
fn root_sink(args: &Args, cancel: CancelToken) -> ProgressProxy {
    let stderr_is_terminal = std::io::stderr().is_terminal();
    let sink: Box<dyn Progress> = if args.no_progress || !stderr_is_terminal {
        Box::new(cancel)
    } else {
        let choice = if should_use_color(args.color, stderr_is_terminal) {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        Box::new(TerminalProgress::stderr(choice).with_cancel_token(cancel))
    };
    ProgressProxy::new(Some(sink)).on_done(|| debug!("all documents walked"))
}

fn collapse_kinds(names: &[String]) -> Vec<NodeKind> {
    names
        .iter()
        .map(|name| {
            let Ok(kind) = name.parse::<NodeKind>();
            if kind.is_unknown() {
                eprintln!("eswalk: warning: --collapse: unknown node kind '{}'", name);
            }
            kind
        })
        .collect()
}

fn display_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_kinds_parses_known_and_unknown() {
        let kinds = collapse_kinds(&["FunctionExpression".to_string(), "JSXElement".to_string()]);
        assert_eq!(kinds[0], NodeKind::FunctionExpression);
        assert!(kinds[1].is_unknown());
    }

    #[test]
    fn test_explicit_color_modes_ignore_terminal() {
        assert!(should_use_color(ColorMode::Always, false));
        assert!(!should_use_color(ColorMode::Never, true));
    }

    #[test]
    fn test_display_name_uses_file_name() {
        assert_eq!(display_name(std::path::Path::new("src/app.json")), "app.json");
    }
}
