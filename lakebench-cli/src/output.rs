//! Output format handling for CLI commands.

use lakebench_datasets::Table;
use lakebench_queries::Query;
use serde::Serialize;

#[derive(clap::ValueEnum, Clone, Debug, Default, PartialEq, Eq, Copy)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn is_machine_readable(&self) -> bool {
        matches!(self, OutputFormat::Json)
    }
}

#[derive(Serialize)]
pub struct QueryListing {
    pub query: Query,
    pub tables: Vec<Table>,
}

pub fn query_listing() -> Vec<QueryListing> {
    Query::ALL
        .into_iter()
        .map(|query| QueryListing {
            query,
            tables: query.dependencies().to_vec(),
        })
        .collect()
}

pub fn render_listing(format: OutputFormat) -> anyhow::Result<String> {
    let listing = query_listing();
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&listing)?),
        OutputFormat::Text => {
            let mut out = String::new();
            for entry in listing {
                let tables: Vec<&str> = entry.tables.iter().map(|t| t.name()).collect();
                out.push_str(&format!("{:<5} {}\n", entry.query.to_string(), tables.join(", ")));
            }
            Ok(out)
        }
    }
}
