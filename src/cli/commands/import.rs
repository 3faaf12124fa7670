//! `propdesk import` command - Import records from CSV files
//!
//! Drives one [`ImportSession`] end to end: upload, auto-map plus any
//! `--map` overrides (or interactive prompts), validation, review, commit.

use console::style;
use dialoguer::{theme::ColorfulTheme, Select};
use miette::{IntoDiagnostic, Result};
use std::path::{Path, PathBuf};

use crate::cli::args::parse_kind;
use crate::cli::helpers::truncate_str;
use crate::cli::GlobalOpts;
use crate::core::assign::RoundRobin;
use crate::core::book::Book;
use crate::core::identity::EntityKind;
use crate::core::workspace::Workspace;
use crate::core::Config;
use crate::import::catalog;
use crate::import::template::template_csv;
use crate::import::{
    BatchStamp, CsvMode, ImportError, ImportSession, Target, ValidationReport,
};

/// Row errors printed before the rest are summarised
const MAX_ERRORS_SHOWN: usize = 20;

#[derive(clap::Args, Debug)]
pub struct ImportArgs {
    /// Record type to import (contact, unit, partner)
    #[arg(value_parser = parse_kind)]
    pub kind: Option<EntityKind>,

    /// CSV file to import
    pub file: Option<PathBuf>,

    /// Print a CSV template for the record type
    #[arg(long)]
    pub template: bool,

    /// Override a column mapping: COLUMN=FIELD (repeatable)
    ///
    /// COLUMN is a 1-based column number or the header text; FIELD is a
    /// field key or label, or `skip`.
    #[arg(long = "map", value_name = "COLUMN=FIELD")]
    pub map: Vec<String>,

    /// Choose the target of every column interactively
    #[arg(long, short = 'i')]
    pub interactive: bool,

    /// Validate and review without saving anything
    #[arg(long)]
    pub dry_run: bool,

    /// Parse quoted fields per RFC 4180 instead of splitting on every comma
    #[arg(long)]
    pub strict_csv: bool,

    /// Write row errors as CSV to this path
    #[arg(long, value_name = "PATH")]
    pub errors_out: Option<PathBuf>,

    /// Number of valid records to preview
    #[arg(long, value_name = "N")]
    pub preview: Option<usize>,
}

pub fn run(args: ImportArgs, global: &GlobalOpts) -> Result<()> {
    if args.template {
        let kind = args.kind.ok_or_else(|| {
            miette::miette!(
                "Record type required for template generation. Usage: propdesk import --template contact"
            )
        })?;
        return print_template(kind);
    }

    let kind = args
        .kind
        .ok_or_else(|| miette::miette!("Record type required. Usage: propdesk import contact leads.csv"))?;
    let file_path = args
        .file
        .clone()
        .ok_or_else(|| miette::miette!("CSV file required. Usage: propdesk import contact leads.csv"))?;
    if !file_path.exists() {
        return Err(miette::miette!("File not found: {}", file_path.display()));
    }

    let workspace = Workspace::discover().map_err(|e| miette::miette!("{}", e))?;
    let config = Config::load(Some(&workspace));
    let mut book = Book::load(&workspace)?;

    let mut options = config.import_options();
    if args.strict_csv {
        options.csv_mode = CsvMode::Rfc4180;
    }
    let preview_rows = args.preview.unwrap_or_else(|| config.preview_rows());

    println!(
        "{} Importing {} from {}{}",
        style("→").blue(),
        style(kind.plural()).cyan(),
        style(file_path.display()).yellow(),
        if args.dry_run {
            style(" (dry run)").dim().to_string()
        } else {
            String::new()
        }
    );

    let text = read_input(&file_path)?;
    let mut session = ImportSession::new(options, BatchStamp::new(config.author()));
    session.select_type(kind)?;
    session.upload(&text)?;

    for spec in &args.map {
        session.apply_override(spec)?;
    }
    if args.interactive {
        prompt_mapping(&mut session)?;
    }

    loop {
        if !global.quiet {
            println!();
            println!("{}", mapping_table(&session));
        }

        match session.validate(&book) {
            Ok(_) => {}
            Err(e @ ImportError::MissingMappings { .. }) if args.interactive => {
                println!("{} {}", style("✗").red(), e);
                prompt_mapping(&mut session)?;
                continue;
            }
            Err(e) => return Err(e.into()),
        }

        let report = current_report(&session)?;
        print_review(kind, report, preview_rows, global.quiet);

        if !args.interactive {
            break;
        }
        match prompt_review(args.dry_run)? {
            ReviewChoice::Proceed => break,
            ReviewChoice::Remap => {
                session.back_to_mapping()?;
                prompt_mapping(&mut session)?;
            }
            ReviewChoice::Cancel => {
                session.cancel()?;
                println!("{}", style("Import cancelled. Nothing was saved.").yellow());
                return Ok(());
            }
        }
    }

    let report = current_report(&session)?;
    if let Some(path) = &args.errors_out {
        write_error_log(report, path)?;
    }

    if args.dry_run {
        session.cancel()?;
        println!();
        println!(
            "{}",
            style("Dry run complete. Nothing was saved.").yellow()
        );
        return Ok(());
    }

    if report.records.is_empty() {
        session.cancel()?;
        println!();
        println!("{}", style("No valid records to import.").yellow());
        return Ok(());
    }

    let mut assigner = RoundRobin::new(config.agents(), book.len(EntityKind::Contact));
    let result = session.commit(&mut book, &mut assigner)?;
    book.save(&workspace, kind)?;

    println!();
    println!(
        "{} Imported {} {}",
        style("✓").green(),
        style(result.applied).green(),
        kind.plural()
    );
    if result.skipped_duplicates > 0 {
        println!(
            "  {} already present, skipped",
            style(result.skipped_duplicates).yellow()
        );
    }
    if result.assigned > 0 {
        println!(
            "  {} assigned to agents round-robin",
            style(result.assigned).cyan()
        );
    }

    Ok(())
}

fn print_template(kind: EntityKind) -> Result<()> {
    // Output to stdout (can be redirected to file)
    print!("{}", template_csv(kind)?);

    // Hint on stderr so it doesn't end up in the redirected file
    eprintln!();
    eprintln!(
        "{} Template generated. Redirect to file: propdesk import --template {} > {}.csv",
        style("→").blue(),
        kind,
        kind.plural()
    );
    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).into_diagnostic()?;
    String::from_utf8(bytes)
        .map_err(|_| miette::miette!("{} is not UTF-8 text", path.display()))
}

fn current_report(session: &ImportSession) -> Result<&ValidationReport> {
    session
        .report()
        .ok_or_else(|| miette::miette!("import session has no validation report"))
}

fn mapping_table(session: &ImportSession) -> String {
    let mut builder = tabled::builder::Builder::default();
    builder.push_record(["#", "Column", "Maps to"]);
    if let Some(mapping) = session.mapping() {
        for (col, target) in mapping.iter() {
            let header = session.headers().get(col).map(String::as_str).unwrap_or("");
            let target = match target {
                Target::Skip => style("(skip)").dim().to_string(),
                Target::Field(field) => field.label().to_string(),
            };
            builder.push_record([(col + 1).to_string(), truncate_str(header, 30), target]);
        }
    }
    builder
        .build()
        .with(tabled::settings::Style::markdown())
        .to_string()
}

fn print_review(kind: EntityKind, report: &ValidationReport, preview_rows: usize, quiet: bool) {
    let summary = report.summary();

    println!();
    println!("{}", style("─".repeat(50)).dim());
    println!("{}", style("Review").bold());
    println!("{}", style("─".repeat(50)).dim());
    println!("  Rows in file:  {}", style(summary.total_row_count).cyan());
    println!("  Valid:         {}", style(summary.valid_count).green());
    if summary.error_count > 0 {
        println!("  Errors:        {}", style(summary.error_count).red());
    }
    if summary.blank_count() > 0 {
        println!("  Blank:         {}", style(summary.blank_count()).dim());
    }

    let preview = report.preview(preview_rows);
    if !quiet && !preview.is_empty() {
        let mut builder = tabled::builder::Builder::default();
        builder.push_record(["Row", "ID", "Name", "Details"]);
        for item in preview {
            builder.push_record([
                (item.row_index + 2).to_string(),
                item.record.id().to_string(),
                truncate_str(item.record.title(), 30),
                item.record.detail(),
            ]);
        }
        println!();
        println!(
            "{}",
            style(format!("First {} valid {}:", preview.len(), kind.plural())).bold()
        );
        println!(
            "{}",
            builder
                .build()
                .with(tabled::settings::Style::markdown())
        );
    }

    if report.has_errors() {
        println!();
        println!("{}", style("Row errors:").bold());
        for error in report.errors.iter().take(MAX_ERRORS_SHOWN) {
            println!(
                "  {} row {}: {}",
                style("✗").red(),
                error.row_number,
                error.message
            );
        }
        if report.errors.len() > MAX_ERRORS_SHOWN {
            println!(
                "  {}",
                style(format!(
                    "... and {} more (use --errors-out to save them all)",
                    report.errors.len() - MAX_ERRORS_SHOWN
                ))
                .dim()
            );
        }
    }
}

fn write_error_log(report: &ValidationReport, path: &Path) -> Result<()> {
    std::fs::write(path, report.error_log_csv()?).into_diagnostic()?;
    println!(
        "{} Wrote {} row error(s) to {}",
        style("→").blue(),
        report.errors.len(),
        style(path.display()).yellow()
    );
    Ok(())
}

/// Ask for each column's target, starting from the current mapping
fn prompt_mapping(session: &mut ImportSession) -> Result<()> {
    let kind = session
        .kind()
        .ok_or_else(|| miette::miette!("no record type selected"))?;
    let specs = catalog::catalog(kind);
    let theme = ColorfulTheme::default();

    let mut items = vec!["(skip)".to_string()];
    items.extend(specs.iter().map(|spec| {
        if spec.required {
            format!("{} *", spec.label)
        } else {
            spec.label.to_string()
        }
    }));

    let headers = session.headers().to_vec();
    for (col, header) in headers.iter().enumerate() {
        let current = session
            .mapping()
            .map(|m| m.get(col))
            .unwrap_or(Target::Skip);
        let default = match current {
            Target::Skip => 0,
            Target::Field(field) => specs
                .iter()
                .position(|spec| spec.field == field)
                .map_or(0, |i| i + 1),
        };

        let selection = Select::with_theme(&theme)
            .with_prompt(format!("Column {} \"{}\"", col + 1, header))
            .items(&items)
            .default(default)
            .interact()
            .into_diagnostic()?;

        let target = match selection {
            0 => Target::Skip,
            n => Target::Field(specs[n - 1].field),
        };
        session.remap(col, target)?;
    }
    Ok(())
}

enum ReviewChoice {
    Proceed,
    Remap,
    Cancel,
}

fn prompt_review(dry_run: bool) -> Result<ReviewChoice> {
    let proceed = if dry_run { "Finish dry run" } else { "Commit valid records" };
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("What next?")
        .items(&[proceed, "Back to mapping", "Cancel import"])
        .default(0)
        .interact()
        .into_diagnostic()?;

    Ok(match selection {
        0 => ReviewChoice::Proceed,
        1 => ReviewChoice::Remap,
        _ => ReviewChoice::Cancel,
    })
}
