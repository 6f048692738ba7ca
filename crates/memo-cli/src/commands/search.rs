use crate::commands::common::{normalize_search_query, GlobalOptions};
use crate::commands::list::run_list;
use crate::error::CliError;

pub async fn run_search(options: &GlobalOptions, query: &str, json: bool) -> Result<(), CliError> {
    let query = normalize_search_query(query)?;
    run_list(options, Some(&query), json).await
}
