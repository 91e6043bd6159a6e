use super::ReportableRepo;
use crate::Result;
use core::fmt::Write;
use serde_json::json;

#[expect(unused_results, reason = "Map::insert intentionally overwrites values")]
pub fn generate<W: Write>(repos: &[ReportableRepo], writer: &mut W) -> Result<()> {
    let mut repo_data = Vec::with_capacity(repos.len());

    for repo in repos {
        let mut repo_obj = serde_json::Map::new();
        repo_obj.insert("repository".to_string(), json!(repo.spec.to_string()));
        repo_obj.insert("description".to_string(), json!(repo.description));
        repo_obj.insert("cached".to_string(), json!(repo.cached));

        // Flatten the score fields into the repository object
        if let serde_json::Value::Object(result) = serde_json::to_value(&repo.result)? {
            repo_obj.extend(result);
        }

        repo_data.push(json!(repo_obj));
    }

    let output = json!({
        "repositories": repo_data
    });

    writeln!(writer, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}
