//! doclens CLI - document outline extraction and persona-driven ranking

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use doclens::provider::collect_document_files;
use doclens::{
    output, AnalysisPipeline, DocumentProvider, JsonFormat, JsonProvider, StructurePipeline,
};

#[derive(Parser)]
#[command(name = "doclens")]
#[command(version)]
#[command(about = "Extract document outlines and rank sections for a persona", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract title and heading outline for each document
    Structure {
        /// Input directory containing document-model JSON files
        #[arg(short, long, value_name = "DIR", default_value = "input")]
        input_dir: PathBuf,

        /// Output directory for per-document structure JSON
        #[arg(short, long, value_name = "DIR", default_value = "output")]
        output_dir: PathBuf,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Rank sections across a document batch for a persona and job
    Analyze {
        /// Input directory containing document-model JSON files
        #[arg(short, long, value_name = "DIR", default_value = "input")]
        input_dir: PathBuf,

        /// Output directory for the analysis report
        #[arg(short, long, value_name = "DIR", default_value = "output")]
        output_dir: PathBuf,

        /// Persona description (falls back to persona.json in the input dir)
        #[arg(short, long)]
        persona: Option<String>,

        /// Job-to-be-done description (falls back to job.json in the input dir)
        #[arg(short, long)]
        job: Option<String>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(if cli.debug {
        "debug"
    } else {
        "info"
    }))
    .init();

    let result = match cli.command {
        Commands::Structure {
            input_dir,
            output_dir,
            compact,
        } => run_structure(&input_dir, &output_dir, json_format(compact)),
        Commands::Analyze {
            input_dir,
            output_dir,
            persona,
            job,
            compact,
        } => run_analyze(&input_dir, &output_dir, persona, job, json_format(compact)),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "error:".red().bold(), e);
        process::exit(1);
    }
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn run_structure(input_dir: &Path, output_dir: &Path, format: JsonFormat) -> doclens::Result<()> {
    let files = collect_document_files(input_dir, JsonProvider::new().supported_extension())?;
    fs::create_dir_all(output_dir)?;

    println!(
        "{} {} document(s) in {}",
        "found".green().bold(),
        files.len(),
        input_dir.display()
    );

    let bar = progress_bar(files.len() as u64);
    let pipeline = StructurePipeline::new();
    let mut written = 0usize;

    for path in &files {
        bar.set_message(
            path.file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
        );
        let results = pipeline.run(std::slice::from_ref(path));
        for (name, structure) in &results {
            let stem = name.rsplit_once('.').map_or(name.as_str(), |(s, _)| s);
            let out_path = output_dir.join(format!("{stem}.json"));
            fs::write(&out_path, output::to_json(structure, format)?)?;
            written += 1;
        }
        bar.inc(1);
    }
    bar.finish_and_clear();

    println!(
        "{} wrote {}/{} structure file(s) to {}",
        "done:".green().bold(),
        written,
        files.len(),
        output_dir.display()
    );
    Ok(())
}

fn run_analyze(
    input_dir: &Path,
    output_dir: &Path,
    persona: Option<String>,
    job: Option<String>,
    format: JsonFormat,
) -> doclens::Result<()> {
    let files = collect_document_files(input_dir, JsonProvider::new().supported_extension())?;
    fs::create_dir_all(output_dir)?;

    let persona = resolve_input(persona, input_dir, "persona")?;
    let job = resolve_input(job, input_dir, "job")?;
    log::debug!("resolved persona={:?} job={:?}", persona, job);

    println!(
        "{} {} document(s) for persona {}",
        "analyzing".green().bold(),
        files.len(),
        persona.cyan()
    );

    let report = AnalysisPipeline::new().run(&files, &persona, &job)?;

    let out_path = output_dir.join("analysis.json");
    fs::write(&out_path, output::to_json(&report, format)?)?;

    println!(
        "{} {} ranked section(s), {} excerpt(s) -> {}",
        "done:".green().bold(),
        report.extracted_sections.len(),
        report.subsection_analysis.len(),
        out_path.display()
    );
    Ok(())
}

/// Use the flag value when given, otherwise read `<key>.json` from the
/// input directory (a JSON object with a `<key>` string field).
fn resolve_input(value: Option<String>, input_dir: &Path, key: &str) -> doclens::Result<String> {
    if let Some(value) = value {
        return Ok(value);
    }

    let path = input_dir.join(format!("{key}.json"));
    if !path.is_file() {
        return Err(doclens::Error::MissingInput(format!(
            "--{key} flag or {} file",
            path.display()
        )));
    }

    let data = fs::read_to_string(&path)?;
    let json: serde_json::Value = serde_json::from_str(&data)
        .map_err(|e| doclens::Error::MissingInput(format!("{}: {}", path.display(), e)))?;
    json.get(key)
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| {
            doclens::Error::MissingInput(format!("{} has no \"{key}\" field", path.display()))
        })
}

fn progress_bar(len: u64) -> ProgressBar {
    let bar = ProgressBar::new(len);
    bar.set_style(
        ProgressStyle::with_template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    bar
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_resolve_input_prefers_flag() {
        let dir = tempfile::tempdir().unwrap();
        let value = resolve_input(Some("Researcher".to_string()), dir.path(), "persona").unwrap();
        assert_eq!(value, "Researcher");
    }

    #[test]
    fn test_resolve_input_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = fs::File::create(dir.path().join("persona.json")).unwrap();
        file.write_all(br#"{"persona": "Data Analyst"}"#).unwrap();

        let value = resolve_input(None, dir.path(), "persona").unwrap();
        assert_eq!(value, "Data Analyst");
    }

    #[test]
    fn test_resolve_input_missing_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = resolve_input(None, dir.path(), "job").unwrap_err();
        assert!(matches!(err, doclens::Error::MissingInput(_)));
    }
}
