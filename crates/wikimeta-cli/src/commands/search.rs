//! Search command implementation.

use crate::cli::SearchArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use wikimeta_domain::KnowledgeGraph;
use wikimeta_extractor::{EntitySearch, QueryOptions};

/// Execute the search command.
pub async fn execute_search<G: KnowledgeGraph>(
    args: SearchArgs,
    graph: G,
    options: &QueryOptions,
    formatter: &Formatter,
) -> Result<()> {
    if args.limit == Some(0) {
        return Err(CliError::InvalidInput("Limit must be at least 1".to_string()));
    }

    let search = EntitySearch::new(graph);
    let mut entities = search.search(&args.query, options).await?;

    if let Some(limit) = args.limit {
        entities.truncate(limit);
    }

    println!("{}", formatter.format_entities(&entities)?);
    Ok(())
}
