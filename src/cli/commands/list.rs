//! `propdesk list` command - Show stored records

use console::style;
use miette::{IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style};

use crate::cli::args::parse_kind;
use crate::cli::helpers::truncate_str;
use crate::core::book::Book;
use crate::core::identity::EntityKind;
use crate::core::workspace::Workspace;

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Record type (contact, unit, partner)
    #[arg(value_parser = parse_kind)]
    pub kind: EntityKind,

    /// Show at most N records
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ListArgs) -> Result<()> {
    let workspace = Workspace::discover().map_err(|e| miette::miette!("{}", e))?;
    let book = Book::load(&workspace)?;
    let limit = args.limit.unwrap_or(usize::MAX);

    if args.json {
        let json = match args.kind {
            EntityKind::Contact => serde_json::to_string_pretty(&take(&book.contacts, limit)),
            EntityKind::Unit => serde_json::to_string_pretty(&take(&book.units, limit)),
            EntityKind::Partner => serde_json::to_string_pretty(&take(&book.partners, limit)),
        }
        .into_diagnostic()?;
        println!("{}", json);
        return Ok(());
    }

    let total = book.len(args.kind);
    if total == 0 {
        println!("No {} found.", args.kind.plural());
        return Ok(());
    }

    let mut builder = Builder::default();
    match args.kind {
        EntityKind::Contact => {
            builder.push_record(["ID", "Name", "Mobile", "Source", "Project", "Agent", "Status"]);
            for c in take(&book.contacts, limit) {
                builder.push_record([
                    c.id.to_string(),
                    truncate_str(&c.name, 24),
                    c.mobile.clone(),
                    c.source.clone(),
                    c.project.clone().unwrap_or_default(),
                    c.assigned_to.clone().unwrap_or_default(),
                    c.status.to_string(),
                ]);
            }
        }
        EntityKind::Unit => {
            builder.push_record(["ID", "Unit", "Project", "Config", "Floor", "Area", "Price", "Status"]);
            for u in take(&book.units, limit) {
                builder.push_record([
                    u.id.to_string(),
                    u.unit_number.clone(),
                    truncate_str(&u.project, 24),
                    u.configuration.clone().unwrap_or_default(),
                    u.floor.map(|f| f.to_string()).unwrap_or_default(),
                    u.area.to_string(),
                    u.price.to_string(),
                    u.status.to_string(),
                ]);
            }
        }
        EntityKind::Partner => {
            builder.push_record(["ID", "Name", "Mobile", "Firm", "License", "Tier", "City"]);
            for p in take(&book.partners, limit) {
                builder.push_record([
                    p.id.to_string(),
                    truncate_str(&p.name, 24),
                    p.mobile.clone(),
                    p.firm.clone().unwrap_or_default(),
                    p.license_id.clone(),
                    p.tier.to_string(),
                    p.city.clone().unwrap_or_default(),
                ]);
            }
        }
    }

    println!("{}", builder.build().with(Style::markdown()));
    if limit < total {
        println!();
        println!("{}", style(format!("Showing {} of {}", limit, total)).dim());
    }
    Ok(())
}

fn take<T>(items: &[T], limit: usize) -> &[T] {
    &items[..items.len().min(limit)]
}
