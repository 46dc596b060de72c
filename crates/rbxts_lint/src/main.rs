//! rbxts-lint CLI - A fast linter for roblox-ts projects
//!
//! Usage: rbxts-lint [OPTIONS] [PATHS]...

mod walker;

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use dashmap::DashSet;
use memmap2::Mmap;
use rayon::prelude::*;
use rbxts_cache::Cache;
use rbxts_linter::diagnostics::{Diagnostic, Severity};
use rbxts_linter::{HostInfo, RuleSettings};
use rbxts_project::Project;
use rustc_hash::FxHashSet;
use std::fs::File;
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;
use walker::SmartWalker;

/// Host information resolved from the project's tsconfig
struct ProjectHostInfo {
    scopes: Vec<String>,
}

impl HostInfo for ProjectHostInfo {
    fn allowed_scopes(&self) -> &[String] {
        &self.scopes
    }
}

/// An extremely fast linter for roblox-ts TypeScript
#[derive(Parser, Debug)]
#[command(name = "rbxts-lint")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    #[command(flatten)]
    lint_args: LintArgs,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Lint TypeScript files (default)
    Lint(LintArgs),
    /// Project configuration checks
    Project {
        #[command(subcommand)]
        cmd: ProjectCommands,
    },
}

#[derive(clap::Subcommand, Debug)]
enum ProjectCommands {
    /// Check tsconfig.json and typeRoots health
    Check {
        /// Project root directory (containing tsconfig.json)
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

#[derive(Parser, Debug, Clone)]
struct LintArgs {
    /// Files or directories to lint
    #[arg(default_value = ".")]
    paths: Vec<PathBuf>,

    /// Select specific rules (comma-separated codes)
    #[arg(long, value_delimiter = ',')]
    select: Option<Vec<String>>,

    /// Ignore specific rules (comma-separated codes)
    #[arg(long, value_delimiter = ',')]
    ignore: Option<Vec<String>>,

    /// Exclude files matching glob patterns (comma-separated)
    #[arg(long, value_delimiter = ',')]
    exclude: Option<Vec<String>>,

    /// Path to a rule settings JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    format: String,

    /// Apply fixes where available
    #[arg(long)]
    fix: bool,

    /// Show statistics
    #[arg(long)]
    statistics: bool,

    /// Suppress output (exit code only)
    #[arg(short, long)]
    quiet: bool,

    /// Disable caching (re-lint all files)
    #[arg(long)]
    no_cache: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Lint(args)) => run_lint(args),
        Some(Commands::Project { cmd }) => run_project(cmd),
        None => run_lint(cli.lint_args),
    }
}

fn run_project(cmd: ProjectCommands) -> Result<()> {
    match cmd {
        ProjectCommands::Check { path } => {
            let Some(tsconfig_path) = Project::locate(&path) else {
                println!(
                    "{} no tsconfig.json found under {}",
                    "error".red().bold(),
                    path.display()
                );
                std::process::exit(1);
            };
            let project = Project::open(tsconfig_path)?;
            println!(
                "{} in {}",
                "Checking project configuration".cyan().bold(),
                project.root.display()
            );

            let declared = project.type_roots();
            let existing = project.existing_type_roots();
            let mut missing = 0;
            for root in &declared {
                let full = project.root.join(root);
                if existing.contains(&full) {
                    println!("{} typeRoot {}", "ok".green().bold(), root);
                } else {
                    println!("{} typeRoot {} does not exist", "warning".yellow().bold(), root);
                    missing += 1;
                }
            }

            let scopes = project.allowed_scopes();
            if scopes.is_empty() {
                println!("{} no npm scopes declared via typeRoots", "warning".yellow().bold());
            } else {
                println!("Allowed scopes: {}", scopes.join(", "));
            }

            if missing > 0 {
                std::process::exit(1);
            }
        }
    }
    Ok(())
}

fn run_lint(args: LintArgs) -> Result<()> {
    let start = Instant::now();
    let discover_start = Instant::now();

    // Determine project root for cache loading
    let project_root = args
        .paths
        .first()
        .map(|p| {
            if p.is_dir() {
                p.clone()
            } else {
                p.parent()
                    .map(|p| p.to_path_buf())
                    .unwrap_or_else(|| PathBuf::from("."))
            }
        })
        .unwrap_or_else(|| PathBuf::from("."));

    // Rule settings are validated before any file is touched; a bad
    // config document is fatal here.
    let settings = match &args.config {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            match RuleSettings::from_json(&content) {
                Ok(settings) => settings,
                Err(e) => bail!("{e}"),
            }
        }
        None => RuleSettings::default(),
    };

    // Load cache
    let cache = if args.no_cache {
        Cache::new()
    } else {
        Cache::load(&project_root)
    };
    let cache = Arc::new(cache);

    // Channels for the file pipeline
    let (tx, rx) = crossbeam_channel::unbounded::<PathBuf>();

    // Set of seen files (to avoid double processing)
    let seen_files = Arc::new(DashSet::new());

    // Optimistically seed the pipeline with cached files so reading can
    // start while the walker confirms their existence.
    if !args.no_cache {
        for path in cache.get_files() {
            seen_files.insert(path.clone());
            let _ = tx.send(path);
        }
    }

    // Set of confirmed files (actually exist on disk during this run)
    let confirmed_files = Arc::new(DashSet::new());

    let tx_discovery = tx.clone();
    let paths_clone = args.paths.clone();
    let exclude_clone = args.exclude.clone();
    let seen_files_clone = seen_files.clone();
    let confirmed_files_clone = confirmed_files.clone();
    let cache_clone = cache.clone();

    let discovery_thread = std::thread::spawn(move || {
        let walker = SmartWalker::new(
            tx_discovery,
            seen_files_clone,
            confirmed_files_clone,
            exclude_clone,
            cache_clone,
        );
        walker.run(&paths_clone);
    });

    // Drop the original tx so the channel closes when discovery finishes
    drop(tx);

    let discover_time = discover_start.elapsed();

    // Resolve host info from the project tsconfig (cached by mtime)
    let host = build_host_info(&project_root, &cache);

    let read_start = Instant::now();
    let _ = discovery_thread.join();

    let all_paths: Vec<PathBuf> = rx.into_iter().collect();

    // Batch parallel read, memory-mapped for larger files
    let file_data: Vec<(PathBuf, String)> = all_paths
        .par_iter()
        .filter(|path| confirmed_files.contains(*path))
        .filter_map(|path| read_file_fast(path).map(|content| (path.clone(), content)))
        .collect();

    let read_time = read_start.elapsed();

    let file_count = file_data.len();
    if file_count == 0 {
        if !args.quiet {
            println!(
                "{}",
                "No TypeScript files found (checked extensions: .ts, .tsx)".yellow()
            );
        }
        return Ok(());
    }

    if !args.quiet && args.format == "text" {
        println!("{}", format!("Linting {file_count} file(s)...").cyan().bold());
    }

    let cached_count = AtomicUsize::new(0);

    // Pre-allocate rules once for sharing across threads
    let all_rules = rbxts_linter::rules::all_rules_with(&settings);

    // Validate --ignore and --select arguments against available rules
    let valid_codes: FxHashSet<&str> = all_rules.iter().map(|r| r.code().as_str()).collect();

    for (flag, list) in [("--ignore", &args.ignore), ("--select", &args.select)] {
        if let Some(codes) = list {
            for code in codes {
                if !valid_codes.contains(code.as_str()) {
                    println!(
                        "{} Unknown rule code in {}: {}",
                        "warning".yellow().bold(),
                        flag,
                        code
                    );
                }
            }
        }
    }

    let analysis_start = Instant::now();

    let error_count = AtomicUsize::new(0);
    let warning_count = AtomicUsize::new(0);
    let info_count = AtomicUsize::new(0);
    let hint_count = AtomicUsize::new(0);

    // Lint all files in parallel
    let all_diagnostics: Vec<(PathBuf, Vec<Diagnostic>)> = file_data
        .par_iter()
        .filter_map(|(path, content)| {
            // Skip unchanged files
            if !args.no_cache {
                let hash = rbxts_cache::hash_content(content);
                if cache.is_fresh_with_hash(path, hash) {
                    cached_count.fetch_add(1, Ordering::Relaxed);
                    if let Some(entry) = cache.get(path) {
                        if entry.has_errors {
                            error_count.fetch_add(entry.diagnostic_count, Ordering::Relaxed);
                        }
                    }
                    return None;
                }
            }

            // A panic inside one file's lint is contained to that file
            let lint_result = panic::catch_unwind(panic::AssertUnwindSafe(|| {
                rbxts_linter::lint_source_with_rules(
                    content,
                    path.to_str().unwrap_or(""),
                    &all_rules,
                    &host,
                )
            }));

            let diagnostics = match lint_result {
                Ok(diags) => diags,
                Err(_) => {
                    if !args.quiet {
                        eprintln!(
                            "{}: Internal error (panic during linting)",
                            path.display().to_string().red()
                        );
                    }
                    error_count.fetch_add(1, Ordering::Relaxed);
                    return None;
                }
            };

            if !args.no_cache {
                let has_errors = diagnostics
                    .iter()
                    .any(|d| matches!(d.severity, Severity::Error));
                cache.update(path.clone(), content, diagnostics.len(), has_errors);
            }

            Some((path.clone(), diagnostics))
        })
        .collect();

    let analysis_time = analysis_start.elapsed();

    // Filter, count and render diagnostics
    let mut total_diagnostics = 0;
    let mut fix_count = 0;
    let mut fixable_count = 0;
    let mut output_buffer = String::with_capacity(16384);

    let content_map: std::collections::HashMap<&PathBuf, &String> =
        file_data.iter().map(|(path, content)| (path, content)).collect();

    for (path, diagnostics) in &all_diagnostics {
        let mut file_fixes = Vec::new();
        let content = content_map.get(path).map(|s| s.as_str()).unwrap_or("");

        for diag in diagnostics {
            if let Some(ref ignore) = args.ignore {
                if ignore.contains(&diag.code) {
                    continue;
                }
            }
            if let Some(ref select) = args.select {
                if !select.contains(&diag.code) {
                    continue;
                }
            }

            total_diagnostics += 1;

            match diag.severity {
                Severity::Error => error_count.fetch_add(1, Ordering::Relaxed),
                Severity::Warning => warning_count.fetch_add(1, Ordering::Relaxed),
                Severity::Info => info_count.fetch_add(1, Ordering::Relaxed),
                Severity::Hint => hint_count.fetch_add(1, Ordering::Relaxed),
            };

            if diag.fix.is_some() {
                fixable_count += 1;
            }

            if args.fix {
                if let Some(fix) = &diag.fix {
                    file_fixes.extend(fix.edits.clone());
                    fix_count += 1;
                }
            }

            if !args.quiet {
                format_diagnostic_buffered(&mut output_buffer, path, diag, &args.format, content);
            }
        }

        if !file_fixes.is_empty() {
            if let Err(e) = apply_fixes(path, file_fixes) {
                if !args.quiet {
                    output_buffer.push_str(&format!(
                        "{}: Failed to apply fixes: {}\n",
                        path.display().to_string().red(),
                        e
                    ));
                }
            }
        }
    }

    if !args.quiet {
        use std::io::Write;
        let stdout = std::io::stdout();
        let mut handle = std::io::BufWriter::new(stdout.lock());
        let _ = write!(handle, "{output_buffer}");
    }

    let duration = start.elapsed();

    // Print summary
    if !args.quiet && args.format == "text" {
        println!();
        let errors = error_count.load(Ordering::Relaxed);
        let warnings = warning_count.load(Ordering::Relaxed);
        let infos = info_count.load(Ordering::Relaxed);
        let hints = hint_count.load(Ordering::Relaxed);

        if total_diagnostics == 0 {
            println!("{}", "All checks passed!".green().bold());
        } else {
            let mut parts = Vec::new();
            if errors > 0 {
                parts.push(format!("{} {}", errors.to_string().red().bold(), "error(s)".red()));
            }
            if warnings > 0 {
                parts.push(format!(
                    "{} {}",
                    warnings.to_string().yellow().bold(),
                    "warning(s)".yellow()
                ));
            }
            if infos > 0 {
                parts.push(format!("{} {}", infos.to_string().blue().bold(), "info(s)".blue()));
            }
            if hints > 0 {
                parts.push(format!("{} {}", hints.to_string().cyan().bold(), "hint(s)".cyan()));
            }

            print!("Found ");
            for (i, part) in parts.iter().enumerate() {
                if i > 0 {
                    if i == parts.len() - 1 {
                        print!(" and ");
                    } else {
                        print!(", ");
                    }
                }
                print!("{part}");
            }
            println!();
        }

        if fix_count > 0 {
            println!("{}", format!("Applied {fix_count} fix(es)").green().bold());
        } else if fixable_count > 0 {
            println!();
            println!(
                "{}",
                format!("Tip: Run with --fix to automatically apply {fixable_count} fix(es)").cyan()
            );
        }
    }

    if args.statistics {
        let cached = cached_count.load(Ordering::Relaxed);
        println!(
            "\nChecked {} files in {:.2}ms ({:.0} files/sec){}",
            file_count,
            duration.as_secs_f64() * 1000.0,
            file_count as f64 / duration.as_secs_f64(),
            if cached > 0 {
                format!(" [{cached} cached]")
            } else {
                String::new()
            }
        );

        let discover_ms = discover_time.as_secs_f64() * 1000.0;
        let read_ms = read_time.as_secs_f64() * 1000.0;
        let analysis_ms = analysis_time.as_secs_f64() * 1000.0;
        let total_ms = duration.as_secs_f64() * 1000.0;

        let bar_width = 50;
        let draw_timeline = |start_ms: f64, dur_ms: f64| -> String {
            let start_ratio = if total_ms > 0.0 { start_ms / total_ms } else { 0.0 };
            let width_ratio = if total_ms > 0.0 { dur_ms / total_ms } else { 0.0 };

            let start_idx = (start_ratio * bar_width as f64).round() as usize;
            let mut width = (width_ratio * bar_width as f64).round() as usize;
            if width == 0 && width_ratio > 0.001 {
                width = 1;
            }

            let mut bar = String::with_capacity(bar_width + 2);
            bar.push('[');
            for i in 0..bar_width {
                if i >= start_idx && i < start_idx + width {
                    bar.push('#');
                } else {
                    bar.push(' ');
                }
            }
            bar.push(']');
            bar
        };

        let mut current_start = 0.0;
        println!("  Setup:     {discover_ms:>6.2}ms {}", draw_timeline(current_start, discover_ms));
        current_start += discover_ms;
        println!(
            "  Pipeline:  {read_ms:>6.2}ms {} (Discovery + Read)",
            draw_timeline(current_start, read_ms)
        );
        current_start += read_ms;

        // Break the analysis phase down by CPU contribution
        let (parse_cpu, lint_cpu) = rbxts_linter::get_statistics_ms();
        let total_analysis_cpu = parse_cpu + lint_cpu;
        if total_analysis_cpu > 0.0 {
            let parse_wall = analysis_ms * (parse_cpu / total_analysis_cpu);
            let lint_wall = analysis_ms * (lint_cpu / total_analysis_cpu);

            println!("  Parsing:   {parse_wall:>6.2}ms {}", draw_timeline(current_start, parse_wall));
            current_start += parse_wall;
            println!("  Linting:   {lint_wall:>6.2}ms {}", draw_timeline(current_start, lint_wall));
        } else {
            println!("  Analysis:  {analysis_ms:>6.2}ms {}", draw_timeline(current_start, analysis_ms));
        }
    }

    // Save cache to disk, pruning files the walker did not confirm
    if !args.no_cache {
        if !confirmed_files.is_empty() {
            cache.prune_with_confirmed(&confirmed_files);
        }
        let _ = cache.save(&project_root);
    }

    let errors = error_count.load(Ordering::Relaxed);
    if errors > 0 {
        std::process::exit(1);
    }

    Ok(())
}

/// Resolve allowed npm scopes from tsconfig, cached by mtime
fn build_host_info(project_root: &Path, cache: &Cache) -> ProjectHostInfo {
    let Some(tsconfig_path) = Project::locate(project_root) else {
        return ProjectHostInfo {
            scopes: vec!["@rbxts".to_string()],
        };
    };

    if let Some(type_roots) = cache.get_tsconfig_type_roots(&tsconfig_path) {
        return ProjectHostInfo {
            scopes: rbxts_project::allowed_scopes_from(&type_roots),
        };
    }

    match Project::open(tsconfig_path.clone()) {
        Ok(project) => {
            let type_roots = project.type_roots();
            cache.set_tsconfig_type_roots(&tsconfig_path, type_roots.clone());
            ProjectHostInfo {
                scopes: rbxts_project::allowed_scopes_from(&type_roots),
            }
        }
        Err(_) => ProjectHostInfo {
            scopes: vec!["@rbxts".to_string()],
        },
    }
}

fn format_diagnostic_buffered(
    buffer: &mut String,
    path: &Path,
    diag: &Diagnostic,
    format: &str,
    content: &str,
) {
    use std::fmt::Write;
    if format == "json" {
        if let Ok(line) = serde_json::to_string(diag) {
            let _ = writeln!(buffer, "{line}");
        }
        return;
    }

    let line = format!(
        "{}:{}:{}: {} [{}]: {}\n",
        path.display().to_string().white().bold(),
        diag.location.line,
        diag.location.column,
        match diag.severity {
            Severity::Error => "error".red().bold(),
            Severity::Warning => "warning".yellow().bold(),
            Severity::Info => "info".blue(),
            Severity::Hint => "hint".cyan(),
        },
        diag.code.cyan(),
        diag.message
    );
    buffer.push_str(&line);

    if !content.is_empty() && diag.location.line > 0 {
        format_code_snippet(buffer, diag, content);
    }
}

fn format_code_snippet(buffer: &mut String, diag: &Diagnostic, content: &str) {
    use std::fmt::Write;
    let line_idx = (diag.location.line - 1) as usize;

    let Some(line_content) = content.lines().nth(line_idx) else {
        return;
    };

    let line_num_str = diag.location.line.to_string();
    let padding = " ".repeat(line_num_str.len());
    let gutter_color = colored::Color::Blue;

    let _ = writeln!(buffer, "{} {} ", padding.color(gutter_color), "|".color(gutter_color));
    let _ = writeln!(
        buffer,
        "{} {} {}",
        line_num_str.color(gutter_color),
        "|".color(gutter_color),
        line_content
    );

    if diag.location.column > 0 {
        let col_idx = (diag.location.column - 1) as usize;
        if col_idx < line_content.len() {
            let mut indent = String::new();
            for ch in line_content.chars().take(col_idx) {
                indent.push(if ch == '\t' { '\t' } else { ' ' });
            }

            let span_len = if diag.location.end > diag.location.start {
                (diag.location.end - diag.location.start) as usize
            } else {
                1
            };

            let remaining_len = line_content.len() - col_idx;
            let underline_len = std::cmp::min(span_len, remaining_len).max(1);

            let color = match diag.severity {
                Severity::Error => colored::Color::Red,
                Severity::Warning => colored::Color::Yellow,
                Severity::Info => colored::Color::Blue,
                Severity::Hint => colored::Color::Cyan,
            };

            let _ = writeln!(
                buffer,
                "{} {} {}{}",
                padding.color(gutter_color),
                "|".color(gutter_color),
                indent,
                "^".repeat(underline_len).color(color).bold()
            );
        }
    }
}

/// Apply edits right-to-left so earlier offsets stay valid
fn apply_fixes(path: &Path, mut edits: Vec<rbxts_linter::Edit>) -> Result<()> {
    let mut content = std::fs::read_to_string(path)?;
    edits.sort_by(|a, b| b.start.cmp(&a.start));

    let mut last_start = content.len();
    for edit in edits {
        let start = edit.start as usize;
        let end = edit.end as usize;

        if start <= end && end <= last_start && end <= content.len() {
            content.replace_range(start..end, &edit.replacement);
            last_start = start;
        }
    }

    std::fs::write(path, content)?;
    Ok(())
}

/// Read a file using memory-mapped I/O for better performance.
/// Falls back to a regular read for small files (< 4KB) where mmap
/// overhead isn't worth it.
fn read_file_fast(path: &Path) -> Option<String> {
    let file = File::open(path).ok()?;
    let metadata = file.metadata().ok()?;
    let len = metadata.len() as usize;

    if len < 4096 {
        return std::fs::read_to_string(path).ok();
    }

    // SAFETY: the mapping is only read, and converted to an owned String
    // immediately.
    #[allow(unsafe_code)]
    let mmap = unsafe { Mmap::map(&file).ok()? };

    std::str::from_utf8(&mmap).ok().map(|s| s.to_string())
}
