//! `propdesk fields` command - Show the field catalog for a record type

use console::style;
use miette::Result;
use tabled::{builder::Builder, settings::Style};

use crate::cli::args::parse_kind;
use crate::core::identity::EntityKind;
use crate::import::catalog;

#[derive(clap::Args, Debug)]
pub struct FieldsArgs {
    /// Record type (contact, unit, partner)
    #[arg(value_parser = parse_kind)]
    pub kind: EntityKind,
}

pub fn run(args: FieldsArgs) -> Result<()> {
    let mut builder = Builder::default();
    builder.push_record(["Key", "Label", "Required", "Type", "Also matches"]);

    for spec in catalog::catalog(args.kind) {
        builder.push_record([
            spec.key.to_string(),
            spec.label.to_string(),
            if spec.required { "yes" } else { "" }.to_string(),
            spec.value.as_str().to_string(),
            catalog::synonyms(spec.key).join(", "),
        ]);
    }

    println!("{}", builder.build().with(Style::markdown()));

    if args.kind == EntityKind::Partner {
        println!();
        println!(
            "{} Partners also need a 10-digit mobile number",
            style("note:").dim()
        );
    }

    Ok(())
}
