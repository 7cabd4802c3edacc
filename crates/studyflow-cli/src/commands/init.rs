//! The `studyflow init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    let path = std::path::Path::new("studyflow.toml");
    if path.exists() {
        println!("studyflow.toml already exists, skipping.");
        return Ok(());
    }

    std::fs::write(path, SAMPLE_CONFIG)?;
    println!("Created studyflow.toml");

    println!("\nNext steps:");
    println!("  1. Export STUDYFLOW_AI_API_KEY, or edit the provider keys in studyflow.toml");
    println!("  2. Run: studyflow breakdown --input notes.txt --grade G5 --kind reading");
    println!("  3. Without a key, studyflow uses its built-in engine");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# studyflow configuration

default_provider = "openai"
# default_model = "gpt-4.1-mini"
temperature = 0.3
max_tokens = 2000
timeout_secs = 30
comprehension_factor = 1.15

[providers.openai]
type = "openai"
api_key = "${OPENAI_API_KEY}"

[providers.anthropic]
type = "anthropic"
api_key = "${ANTHROPIC_API_KEY}"

# Any OpenAI-compatible gateway:
# [providers.gateway]
# type = "openai"
# api_key = "${GATEWAY_API_KEY}"
# base_url = "https://llm-gateway.internal.example"
"#;
