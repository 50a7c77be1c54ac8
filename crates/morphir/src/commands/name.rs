//! Name Command
//!
//! Show how free text splits into a Morphir name and how that name renders.

use crate::error::CliError;
use crate::output::{OutputFormat, write_json};
use morphir_ir::codec::json::naming::name_to_json;
use morphir_ir::naming::{FQName, Name};
use serde::Serialize;
use starbase::AppResult;

/// JSON output for the name command
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct NameResult {
    pub input: String,
    pub words: Vec<String>,
    pub camel_case: String,
    pub title_case: String,
    pub snake_case: String,
    pub human_words: Vec<String>,
    pub json: serde_json::Value,
    /// Set when the input is a canonical `Package:Module:localName`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fqname: Option<FQNameResult>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct FQNameResult {
    pub package_path: Vec<Vec<String>>,
    pub module_path: Vec<Vec<String>>,
    pub local_name: Vec<String>,
    pub canonical: String,
}

fn path_words(path: &morphir_ir::Path) -> Vec<Vec<String>> {
    path.segments().iter().map(|n| n.words().to_vec()).collect()
}

pub fn describe_name(text: &str) -> NameResult {
    let name = Name::from_str(text);
    let fqname = text.contains(':').then(|| FQName::parse(text).ok()).flatten().map(|fq| {
        FQNameResult {
            package_path: path_words(fq.package_path()),
            module_path: path_words(fq.module_path()),
            local_name: fq.local_name().words().to_vec(),
            canonical: fq.to_string(),
        }
    });

    NameResult {
        input: text.to_string(),
        words: name.words().to_vec(),
        camel_case: name.to_camel_case(),
        title_case: name.to_title_case(),
        snake_case: name.to_snake_case(),
        human_words: name.to_human_words(),
        json: name_to_json(&name),
        fqname,
    }
}

/// Run the name command.
pub fn run_name(text: String, format: OutputFormat) -> AppResult {
    let result = describe_name(&text);

    if format.is_json() {
        write_json(&result).map_err(CliError::from)?;
        return Ok(None);
    }

    println!("{:?}", result.input);
    println!("  words:       {}", result.json);
    println!("  camelCase:   {}", result.camel_case);
    println!("  TitleCase:   {}", result.title_case);
    println!("  snake_case:  {}", result.snake_case);
    println!("  human words: {}", result.human_words.join(" "));
    if let Some(fq) = &result.fqname {
        println!("  fqname:      {}", fq.canonical);
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_name() {
        let result = describe_name("valueInUSD");
        assert_eq!(result.words, vec!["value", "in", "u", "s", "d"]);
        assert_eq!(result.camel_case, "valueInUSD");
        assert_eq!(result.human_words, vec!["value", "in", "USD"]);
        assert_eq!(result.json, serde_json::json!(["value", "in", "u", "s", "d"]));
        assert!(result.fqname.is_none());
    }

    #[test]
    fn test_describe_fqname() {
        let result = describe_name("Morphir.SDK:Basics:negate");
        let fq = result.fqname.unwrap();
        assert_eq!(fq.package_path, vec![vec!["morphir"], vec!["s", "d", "k"]]);
        assert_eq!(fq.local_name, vec!["negate"]);
        assert_eq!(fq.canonical, "Morphir.SDK:Basics:negate");
    }
}
