//! The `aptitude take` command.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;

use aptitude_core::answer::Answer;
use aptitude_core::config::load_config_from;
use aptitude_core::model::{LikertLevel, Question, QuestionBank, QuestionKind};
use aptitude_core::parser::parse_question_bank;
use aptitude_core::report::AssessmentReport;
use aptitude_core::scoring::NOMINAL_MAX;
use aptitude_core::session::{Gender, Profile, Session, Step, AGE_RANGE};
use aptitude_report::certificate::{certificate_file_name, write_certificate, CertificateStyle};
use aptitude_report::html::write_html_report;

pub fn execute(
    bank_path: Option<PathBuf>,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
    certificate: bool,
    html: bool,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let bank = match &bank_path {
        Some(path) => parse_question_bank(path)?,
        None => config.load_bank()?,
    };
    let output = output.unwrap_or_else(|| config.output_dir.clone());

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock());

    let report = console.run(&bank, config.scale_scores)?;

    std::fs::create_dir_all(&output)?;
    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");

    let json_path = output.join(format!("result-{timestamp}.json"));
    report.save_json(&json_path)?;
    console.say(&format!("\nResults saved to: {}", json_path.display()))?;

    if certificate {
        let style = CertificateStyle::from(config.certificate.clone());
        let path = output.join(certificate_file_name(report.display_name()));
        write_certificate(&path, &style, report.display_name(), &report.display_scores)?;
        console.say(&format!("Certificate: {}", path.display()))?;
    }

    if html {
        let path = output.join(format!("result-{timestamp}.html"));
        write_html_report(&report, &path)?;
        console.say(&format!("HTML results: {}", path.display()))?;
    }

    Ok(())
}

enum Selection {
    Option(usize),
    Back,
}

/// Line-oriented front end for a [`Session`].
struct Console<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    fn new(input: R, out: W) -> Self {
        Self { input, out }
    }

    fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.out, "{line}")?;
        Ok(())
    }

    fn read_line(&mut self, prompt: &str) -> Result<String> {
        write!(self.out, "{prompt}")?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            anyhow::bail!("input ended before the test was finished");
        }
        Ok(line.trim().to_string())
    }

    /// Ask for one of `count` numbered options. Empty input keeps `default`.
    fn select(
        &mut self,
        prompt: &str,
        count: usize,
        default: usize,
        allow_back: bool,
    ) -> Result<Selection> {
        let hint = if allow_back { ", b = back" } else { "" };
        loop {
            let line = self.read_line(&format!(
                "{prompt} [1-{count}, Enter = {}{hint}]: ",
                default + 1
            ))?;
            if line.is_empty() {
                return Ok(Selection::Option(default));
            }
            if allow_back && line.eq_ignore_ascii_case("b") {
                return Ok(Selection::Back);
            }
            match line.parse::<usize>() {
                Ok(n) if (1..=count).contains(&n) => return Ok(Selection::Option(n - 1)),
                _ => self.say(&format!("Please enter a number between 1 and {count}."))?,
            }
        }
    }

    fn run(&mut self, bank: &QuestionBank, scale: bool) -> Result<AssessmentReport> {
        let mut session = Session::new(bank)?;

        self.introduction(bank)?;
        self.register(&mut session)?;
        self.questions(&mut session)?;

        let report = session.into_report(scale)?;
        self.results(&report)?;
        Ok(report)
    }

    fn introduction(&mut self, bank: &QuestionBank) -> Result<()> {
        self.say(&format!("== {} ==", bank.name))?;
        if !bank.description.is_empty() {
            self.say(&bank.description)?;
        }
        self.say(&format!(
            "There are {} questions. Answer each one by number, press Enter to keep the \
             suggested choice, or type 'b' to go back.",
            bank.len()
        ))?;
        Ok(())
    }

    fn register(&mut self, session: &mut Session<'_>) -> Result<()> {
        self.say("\n== Register ==")?;
        let name = self.read_line("Name: ")?;

        let age = loop {
            let line = self.read_line(&format!(
                "Age ({}-{}): ",
                AGE_RANGE.start(),
                AGE_RANGE.end()
            ))?;
            match line.parse::<u32>() {
                Ok(age) if AGE_RANGE.contains(&age) => break age,
                _ => self.say(&format!(
                    "Please enter a whole number between {} and {}.",
                    AGE_RANGE.start(),
                    AGE_RANGE.end()
                ))?,
            }
        };

        self.say("Gender:")?;
        for (i, gender) in Gender::ALL.iter().enumerate() {
            self.say(&format!("  {}) {gender}", i + 1))?;
        }
        let gender = match self.select("Gender", Gender::ALL.len(), 0, false)? {
            Selection::Option(i) => Gender::ALL[i],
            Selection::Back => Gender::default(),
        };

        let email = self.read_line("Email: ")?;

        session.register(Profile {
            name,
            age,
            gender,
            email,
        })?;
        tracing::debug!(session = %session.id(), "participant registered");
        Ok(())
    }

    fn questions(&mut self, session: &mut Session<'_>) -> Result<()> {
        loop {
            let question = session.current_question().clone();
            self.say(&format!(
                "\nQuestion {} of {} [{}]",
                session.position() + 1,
                session.total(),
                question.category
            ))?;
            self.say(&question.text)?;

            let answer = match self.ask(&question, session.preselected())? {
                Some(answer) => answer,
                None => {
                    if session.position() == 0 {
                        self.say("Already at the first question.")?;
                    } else {
                        session.back();
                    }
                    continue;
                }
            };

            session.answer(answer)?;
            if session.next() == Step::Submitted {
                return Ok(());
            }
        }
    }

    /// Prompt for one question; `None` means the participant went back.
    fn ask(&mut self, question: &Question, preselected: Answer) -> Result<Option<Answer>> {
        match &question.kind {
            QuestionKind::Likert => {
                for level in LikertLevel::ALL {
                    self.say(&format!("  {}) {}", level.value(), level.label()))?;
                }
                let default = match preselected {
                    Answer::Scale(n) => LikertLevel::from_value(n).unwrap_or_default(),
                    _ => LikertLevel::default(),
                };
                let index = (default.value() - 1) as usize;
                Ok(match self.select("Your answer", LikertLevel::ALL.len(), index, true)? {
                    Selection::Option(i) => Some(Answer::likert(LikertLevel::ALL[i])),
                    Selection::Back => None,
                })
            }
            QuestionKind::NumericChoice { options, .. } => {
                let current = match &preselected {
                    Answer::Choice(value) => Some(value.as_str()),
                    _ => None,
                };
                self.pick(&question.id, "Your answer", options, current)
                    .map(|picked| picked.map(Answer::Choice))
            }
            QuestionKind::NumericChoiceMulti {
                options_1,
                options_2,
                ..
            } => {
                let (current_1, current_2) = match &preselected {
                    Answer::Pair(a, b) => (Some(a.as_str()), Some(b.as_str())),
                    _ => (None, None),
                };
                // `b` on the second part returns to the first part
                loop {
                    let Some(first) =
                        self.pick(&question.id, "First value", options_1, current_1)?
                    else {
                        return Ok(None);
                    };
                    if let Some(second) =
                        self.pick(&question.id, "Second value", options_2, current_2)?
                    {
                        return Ok(Some(Answer::Pair(first, second)));
                    }
                }
            }
        }
    }

    fn pick(
        &mut self,
        question_id: &str,
        prompt: &str,
        options: &[String],
        current: Option<&str>,
    ) -> Result<Option<String>> {
        if options.is_empty() {
            anyhow::bail!("question '{question_id}' has no options");
        }
        for (i, option) in options.iter().enumerate() {
            self.say(&format!("  {}) {option}", i + 1))?;
        }
        let default = current
            .and_then(|value| options.iter().position(|o| o == value))
            .unwrap_or(0);
        Ok(match self.select(prompt, options.len(), default, true)? {
            Selection::Option(i) => Some(options[i].clone()),
            Selection::Back => None,
        })
    }

    fn results(&mut self, report: &AssessmentReport) -> Result<()> {
        use comfy_table::{Cell, Table};

        self.say("\n== Results ==")?;
        self.say(&format!(
            "Hi {}, here are your scores:",
            report.display_name()
        ))?;

        let mut table = Table::new();
        table.set_header(vec![
            "Category".to_string(),
            "Raw".to_string(),
            format!("Score (/ {NOMINAL_MAX})"),
        ]);
        for (category, display) in report.display_scores.iter() {
            let raw = report.scores.get(category).unwrap_or(0.0);
            table.add_row(vec![
                Cell::new(category),
                Cell::new(format!("{raw:.1}")),
                Cell::new(format!("{display:.2}")),
            ]);
        }
        self.say(&table.to_string())?;

        if let Some(summary) = report.summary() {
            self.say(&format!("\n{}", summary.message(report.display_name())))?;
            self.say("Suggested career paths:")?;
            for suggestion in &summary.suggestions {
                self.say(&format!("  - {suggestion}"))?;
            }
        }
        Ok(())
    }
}
