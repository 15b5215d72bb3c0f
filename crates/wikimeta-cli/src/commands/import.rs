//! Import command implementation.

use crate::cli::ImportArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::store::FrontMatterStore;
use wikimeta_domain::{DocumentRef, KnowledgeGraph};
use wikimeta_importer::{ImportReport, Importer};

/// Execute the import command.
pub async fn execute_import<G: KnowledgeGraph>(
    args: ImportArgs,
    graph: G,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let report = run_import(args, graph, config).await?;
    println!("{}", formatter.format_import(&report)?);
    Ok(())
}

/// Run the import selected by the arguments.
pub async fn run_import<G: KnowledgeGraph>(
    args: ImportArgs,
    graph: G,
    config: &Config,
) -> Result<ImportReport> {
    let root = args.root.clone().unwrap_or_else(|| config.settings.root.clone());
    let store = FrontMatterStore::new(root);

    let mut merge = config.merge.clone();
    merge.overwrite |= args.overwrite;

    let importer = Importer::new(graph, store, config.query.clone(), merge)?;

    let report = match (&args.search, &args.file) {
        (Some(query), _) => {
            let template = args
                .template
                .as_deref()
                .unwrap_or(&config.settings.import_template);
            importer.import_search_result(query, template).await?
        }
        (None, Some(file)) => {
            let doc = DocumentRef::new(file.as_str());
            match &args.entity {
                Some(entity) => importer.import_entity(&doc, entity).await?,
                None => importer.import_from_document(&doc).await?,
            }
        }
        (None, None) => {
            return Err(CliError::InvalidInput(
                "Either a document path or --search is required".to_string(),
            ))
        }
    };

    Ok(report)
}
