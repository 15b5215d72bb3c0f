//! Properties command implementation.

use crate::cli::PropertiesArgs;
use crate::error::Result;
use crate::output::Formatter;
use wikimeta_domain::KnowledgeGraph;
use wikimeta_extractor::{PropertyExtractor, QueryOptions};

/// Execute the properties command.
pub async fn execute_properties<G: KnowledgeGraph>(
    args: PropertiesArgs,
    graph: G,
    options: &QueryOptions,
    formatter: &Formatter,
) -> Result<()> {
    let options = effective_options(&args, options);

    let extractor = PropertyExtractor::new(graph);
    let extraction = extractor.extract_detailed(&args.entity, &options).await?;

    println!("{}", formatter.format_extraction(args.entity.trim(), &extraction)?);
    Ok(())
}

/// Apply command-line overrides to the configured options.
fn effective_options(args: &PropertiesArgs, options: &QueryOptions) -> QueryOptions {
    let mut effective = if args.strict {
        QueryOptions {
            language: options.language.clone(),
            internal_link_prefix: options.internal_link_prefix.clone(),
            space_replacement: options.space_replacement.clone(),
            ..QueryOptions::strict()
        }
    } else {
        options.clone()
    };

    if let Some(replacement) = &args.space_replacement {
        effective.space_replacement = replacement.clone();
    }
    effective
}
