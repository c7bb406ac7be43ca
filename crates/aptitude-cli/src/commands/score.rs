//! The `aptitude score` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use aptitude_core::answer::AnswerSheet;
use aptitude_core::config::load_config;
use aptitude_core::parser::parse_question_bank;
use aptitude_core::scoring::{score_answers, NOMINAL_MAX};

pub fn execute(
    answers_path: PathBuf,
    bank_path: Option<PathBuf>,
    format: String,
    scaled: bool,
) -> Result<()> {
    let bank = match &bank_path {
        Some(path) => parse_question_bank(path)?,
        None => load_config()?.load_bank()?,
    };
    let answers = AnswerSheet::load_json(&answers_path)?;

    if let Some((position, _)) = answers.iter().find(|(pos, _)| *pos >= bank.len()) {
        eprintln!(
            "Warning: answer for position {position} is outside the {} question bank, ignored.",
            bank.len()
        );
    }

    let raw = score_answers(&bank, &answers);
    let scores = if scaled {
        raw.scaled(&bank, NOMINAL_MAX)
    } else {
        raw
    };

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&scores)?),
        "text" => {
            let header = if scaled {
                format!("Score (/ {NOMINAL_MAX})")
            } else {
                "Score".to_string()
            };
            let mut table = Table::new();
            table.set_header(vec!["Category".to_string(), header]);
            for (category, score) in scores.iter() {
                table.add_row(vec![Cell::new(category), Cell::new(format!("{score:.2}"))]);
            }
            println!(
                "Question bank: {} ({} answered of {})",
                bank.name,
                answers.len(),
                bank.len()
            );
            println!("{table}");
        }
        other => anyhow::bail!("unknown format '{other}', expected text or json"),
    }

    Ok(())
}
