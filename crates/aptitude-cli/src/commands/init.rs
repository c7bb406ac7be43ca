//! The `aptitude init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_unless_exists(Path::new("aptitude.toml"), SAMPLE_CONFIG)?;

    std::fs::create_dir_all("question-banks")?;
    write_unless_exists(Path::new("question-banks/example.toml"), EXAMPLE_BANK)?;

    println!("\nNext steps:");
    println!("  1. Edit question-banks/example.toml");
    println!("  2. Run: aptitude validate --bank question-banks/example.toml");
    println!("  3. Run: aptitude take --bank question-banks/example.toml");

    Ok(())
}

fn write_unless_exists(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# aptitude configuration

# Question bank used by `aptitude take` (built-in bank when unset)
# question_bank = "question-banks/example.toml"

output_dir = "./aptitude-results"

# Rescale each category to 0-5 on the results page and certificate
scale_scores = true

[certificate]
title = "Certificate of Assessment"
attribution = "Tested with Aptitude"
"#;

const EXAMPLE_BANK: &str = r#"[bank]
id = "example"
name = "Example Question Bank"
description = "A short bank to get started"

[[questions]]
id = "doubling"
text = "If a pattern is 2, 4, 8, 16, what comes next?"
category = "Analytical"
type = "numeric_choice"
options = [32, 34, 36, 40]
correct = 32

[[questions]]
id = "empathy"
text = "I feel comfortable understanding how others feel."
category = "Social"
type = "likert"

[[questions]]
id = "fairness"
text = "I often think about fairness and justice."
category = "Moral"
type = "likert"

[[questions]]
id = "codes"
text = "I enjoy puzzles that use symbols and codes."
category = "Symbolic"
type = "likert"

[[questions]]
id = "prototypes"
text = "I like designing or building prototypes."
category = "Creative-Technical"
type = "likert"
"#;
