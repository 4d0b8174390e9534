use clap::{Parser, Subcommand};
use ss_app::{AppResult, BatchRequest, RunOptions, project_service, run_service};
use ss_batch::{BatchProgressEvent, BatchStage};
use ss_core::format_value;
use ss_engine::{DryRunEngine, LineGeometry};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "ss-cli")]
#[command(about = "SeaSweep CLI - offshore simulation batch sweeps", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a declaration and resolve its batch
    Validate {
        /// Path to the declaration (YAML, or JSON by extension)
        declaration_path: PathBuf,
    },
    /// List the cases a declaration will run
    Plan {
        /// Path to the declaration
        declaration_path: PathBuf,
        /// Print each case's directives
        #[arg(long)]
        directives: bool,
    },
    /// Run the batch against the in-memory dry-run engine
    DryRun {
        /// Path to the declaration
        declaration_path: PathBuf,
        /// Nodes per line
        #[arg(long, default_value_t = 11)]
        line_nodes: usize,
        /// Sections per line
        #[arg(long, default_value_t = 10)]
        line_sections: usize,
        /// Section length in metres
        #[arg(long, default_value_t = 10.0)]
        section_length: f64,
        /// Treat end B as connected (not anchored)
        #[arg(long)]
        free_end_b: bool,
        /// Logged samples per dynamic run
        #[arg(long, default_value_t = 11)]
        samples: usize,
        /// Sample interval in seconds
        #[arg(long, default_value_t = 0.1)]
        interval: f64,
        /// Skip writing cases and the aggregate
        #[arg(long)]
        no_save: bool,
        /// Output root (defaults to the declaration's save directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List stored batches, or the cases of one batch
    Cases {
        /// Path to the declaration
        declaration_path: PathBuf,
        /// Batch ID to show
        batch_id: Option<String>,
        /// Output root (defaults to `.seasweep` next to the declaration)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { declaration_path } => cmd_validate(&declaration_path),
        Commands::Plan {
            declaration_path,
            directives,
        } => cmd_plan(&declaration_path, directives),
        Commands::DryRun {
            declaration_path,
            line_nodes,
            line_sections,
            section_length,
            free_end_b,
            samples,
            interval,
            no_save,
            output,
        } => {
            let mut engine = DryRunEngine::new().with_samples(samples, interval);
            engine.default_line = LineGeometry::uniform(line_nodes, line_sections, section_length, !free_end_b);
            let options = RunOptions {
                save: !no_save,
                output_dir: output,
                ..RunOptions::default()
            };
            cmd_dry_run(&declaration_path, options, &mut engine)
        }
        Commands::Cases {
            declaration_path,
            batch_id,
            output,
        } => cmd_cases(&declaration_path, batch_id.as_deref(), output.as_deref()),
    }
}

fn cmd_validate(declaration_path: &Path) -> AppResult<()> {
    println!("Validating declaration: {}", declaration_path.display());
    let declaration = project_service::load_declaration(declaration_path)?;
    let summary = project_service::summarize(&declaration)?;
    println!("✓ Declaration is valid");
    println!("  Name:     {}", summary.name);
    println!("  Batch:    {} ({} cases)", summary.kind, summary.case_count);
    let mut analyses = Vec::new();
    if summary.statics {
        analyses.push("statics");
    }
    if summary.dynamics {
        analyses.push("dynamics");
    }
    if summary.modal {
        analyses.push("modal");
    }
    println!("  Analysis: {}", analyses.join(", "));
    println!("  Columns:  {}", summary.independent);
    for monitor in &summary.monitors {
        println!("            {}", monitor);
    }
    Ok(())
}

fn cmd_plan(declaration_path: &Path, show_directives: bool) -> AppResult<()> {
    let declaration = project_service::load_declaration(declaration_path)?;
    let cases = project_service::list_planned_cases(&declaration)?;

    if cases.is_empty() {
        println!("No cases planned");
        return Ok(());
    }

    println!("{} planned case(s):", cases.len());
    for case in &cases {
        println!(
            "  {:>4}  {}  ({})",
            case.index + 1,
            case.id,
            format_value(case.independent_value)
        );
        if show_directives {
            for directive in &case.directives {
                println!("          {}", directive);
            }
        }
    }
    Ok(())
}

fn cmd_dry_run(declaration_path: &Path, options: RunOptions, engine: &mut DryRunEngine) -> AppResult<()> {
    println!("Dry run: {}", declaration_path.display());
    let request = BatchRequest {
        declaration_path,
        options,
    };

    let mut last_emit = Instant::now();
    let mut last_stage = None;
    let response = run_service::run_batch_with_progress(
        &request,
        engine,
        Some(&mut |event: BatchProgressEvent| {
            let emit_now = last_stage != Some(event.stage) || last_emit.elapsed().as_millis() >= 100;
            if emit_now {
                render_cli_progress(&event);
                last_stage = Some(event.stage);
                last_emit = Instant::now();
            }
        }),
    )?;
    clear_progress_line();

    println!(
        "✓ Batch completed: {} ({} cases, {:.2}s)",
        response.batch_id, response.case_count, response.total_time_s
    );
    if let Some(dir) = &response.batch_dir {
        println!("  Saved to {}", dir.display());
    }

    let table = response.aggregate.table();
    println!();
    println!("{}", table.column_names().join("\t"));
    for i in 0..response.aggregate.row_count() {
        let cells: Vec<String> = table
            .row(i)
            .into_iter()
            .map(|v| v.map(format_value).unwrap_or_default())
            .collect();
        println!("{}", cells.join("\t"));
    }
    Ok(())
}

fn cmd_cases(declaration_path: &Path, batch_id: Option<&str>, output: Option<&Path>) -> AppResult<()> {
    let Some(batch_id) = batch_id else {
        let batches = run_service::list_batches(declaration_path, output)?;
        if batches.is_empty() {
            println!("No stored batches");
        } else {
            println!("Stored batches:");
            for id in batches {
                println!("  {}", id);
            }
        }
        return Ok(());
    };

    let (manifest, cases) = run_service::load_batch(declaration_path, output, batch_id)?;
    println!("Batch: {} ({})", manifest.name, manifest.kind);
    println!("  ID:        {}", manifest.batch_id);
    println!("  Timestamp: {}", manifest.timestamp);
    println!("  Engine:    {}", manifest.engine_version);
    println!("  Completed: {}/{}", manifest.completed_cases.len(), manifest.case_count);
    for case in &cases {
        println!(
            "  {:>4}  {}  files: {}",
            case.index + 1,
            case.case_id,
            if case.files.is_empty() {
                "-".to_string()
            } else {
                case.files.join(", ")
            }
        );
    }
    Ok(())
}

fn clear_progress_line() {
    print!("\r{}\r", " ".repeat(120));
    let _ = io::stdout().flush();
}

fn render_cli_progress(event: &BatchProgressEvent) {
    if event.stage == BatchStage::Completed {
        return;
    }
    let width = 28usize;
    let fraction = event.fraction_complete();
    let filled = ((fraction * width as f64).round() as usize).min(width);
    let bar = format!("{}{}", "#".repeat(filled), "-".repeat(width.saturating_sub(filled)));
    let case = match (&event.case_id, event.case_index) {
        (Some(id), Some(i)) => format!("case {}/{} {}", i + 1, event.case_count, id),
        _ => format!("{} case(s)", event.case_count),
    };
    print!(
        "\r[{}] {:>6.2}%  {}  {}  elapsed={:.1}s",
        bar,
        fraction * 100.0,
        event.stage.label(),
        case,
        event.elapsed_wall_s
    );
    let _ = io::stdout().flush();
}
