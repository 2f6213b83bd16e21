//! Batch runs: a JSON array of (definition, input, output) jobs, each simulated independently.

use anyhow::{Context, Result};
use ntm::{simulate, DefinitionLoader, DEFAULT_MAX_DEPTH};
use serde::Deserialize;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// One simulation to run. Relative paths are resolved against the jobs file's directory.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Job {
    pub definition: PathBuf,
    #[serde(default)]
    pub input: String,
    pub output: PathBuf,
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

/// Reads and parses a jobs file.
pub fn load_jobs(path: &Path) -> Result<Vec<Job>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let jobs: Vec<Job> = serde_json::from_str(&content)
        .with_context(|| format!("parsing jobs file {}", path.display()))?;

    let base = path.parent().unwrap_or_else(|| Path::new(""));
    Ok(jobs
        .into_iter()
        .map(|job| Job {
            definition: base.join(&job.definition),
            output: base.join(&job.output),
            ..job
        })
        .collect())
}

/// Runs every job in the file. A failing job is logged and does not stop the others.
/// Returns the number of jobs that failed.
pub fn run_jobs(path: &Path) -> Result<usize> {
    let jobs = load_jobs(path)?;
    let mut failed = 0;

    for job in &jobs {
        if let Err(e) = run_job(job) {
            tracing::error!(definition = %job.definition.display(), "Job failed: {e:#}");
            eprintln!("Error: {e:#}");
            failed += 1;
        }
    }

    tracing::info!(total = jobs.len(), failed, "Batch finished");
    Ok(failed)
}

fn run_job(job: &Job) -> Result<()> {
    let definition = DefinitionLoader::load_definition(&job.definition)?;
    let mut file = File::create(&job.output)
        .with_context(|| format!("creating {}", job.output.display()))?;
    simulate(definition, &job.input, job.max_depth, &mut file)?;
    Ok(())
}
