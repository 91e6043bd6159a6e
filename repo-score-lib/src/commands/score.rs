use super::Host;
use super::common::{Common, CommonArgs};
use crate::Result;
use crate::cache::ScoreCache;
use crate::facts::{Provider, ProviderResult, RepoSpec};
use crate::reports::{ReportableRepo, generate_console, generate_json};
use crate::scoring::{Weights, calculate_score};
use camino::Utf8PathBuf;
use chrono::{DateTime, Utc};
use clap::Parser;
use ohno::{IntoAppError, bail};
use std::fs;
use std::io::Write;

const LOG_TARGET: &str = "     score";

#[derive(Parser, Debug)]
pub struct ScoreArgs {
    /// Repositories to score (format: `owner/repo` or a github.com URL)
    #[arg(value_name = "REPO", required = true)]
    pub repos: Vec<String>,

    /// GitHub personal access token
    #[arg(long, value_name = "TOKEN", env = "GITHUB_TOKEN", hide_env_values = true)]
    pub github_token: Option<String>,

    /// Ignore cached scores and fetch everything fresh
    #[arg(long)]
    pub ignore_cached: bool,

    /// Output scores to a JSON file, or to standard output with `-`
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub json: Option<Utf8PathBuf>,

    /// Output scores to the console even when a JSON report is requested
    #[arg(long, help_heading = "Report Output")]
    pub console: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub async fn process_repos<H: Host>(host: &mut H, args: &ScoreArgs) -> Result<()> {
    let common = Common::new(&args.common)?;
    Weights::DEFAULT.validate()?;

    let now = Utc::now();
    let provider = Provider::new(args.github_token.as_deref(), &common.config.github_api_url, common.config.request_timeout)?;
    let cache = common.score_cache(now, args.ignore_cached);

    let mut scored = Vec::with_capacity(args.repos.len());
    let mut failures = 0_usize;

    for input in &args.repos {
        match analyze_repo(&provider, &cache, input, now).await {
            Ok(repo) => scored.push(repo),
            Err(e) => {
                failures += 1;
                let _ = writeln!(host.error(), "{e:#}");
            }
        }
    }

    report(host, args, common.use_colors, &scored)?;

    if failures > 0 {
        bail!("unable to score {failures} of {} repositories", args.repos.len());
    }

    Ok(())
}

/// Run the full request flow for one repository
pub async fn analyze_repo(provider: &Provider, cache: &ScoreCache, input: &str, now: DateTime<Utc>) -> Result<ReportableRepo> {
    let spec = RepoSpec::parse(input)?;

    if let Some(result) = cache.get(&spec) {
        log::info!(target: LOG_TARGET, "Using cached score for '{spec}'");
        return Ok(ReportableRepo::new(spec, None, result, true));
    }

    match provider.repo_exists(&spec).await {
        ProviderResult::Found(()) => {}
        ProviderResult::NotFound => bail!("repository '{spec}' not found"),
        ProviderResult::Error(e) => bail!("could not check whether repository '{spec}' exists: {e:#}"),
    }

    let data = match provider.fetch_repo_data(&spec).await {
        ProviderResult::Found(data) => data,
        ProviderResult::NotFound => bail!("repository '{spec}' not found"),
        ProviderResult::Error(e) => bail!("could not fetch data for repository '{spec}': {e:#}"),
    };

    let result = calculate_score(&data.metrics, now);
    log::info!(target: LOG_TARGET, "Scored '{spec}' at {:.1}", result.score);

    if let Err(e) = cache.put(&spec, &result).await {
        log::warn!(target: LOG_TARGET, "Could not cache score for '{spec}': {e:#}");
    }

    Ok(ReportableRepo::new(spec, data.description, result, false))
}

fn report<H: Host>(host: &mut H, args: &ScoreArgs, use_colors: bool, repos: &[ReportableRepo]) -> Result<()> {
    if let Some(path) = &args.json {
        let mut json_output = String::new();
        generate_json(repos, &mut json_output)?;

        if path.as_str() == "-" {
            host.output()
                .write_all(json_output.as_bytes())
                .into_app_err("writing JSON report")?;
        } else {
            fs::write(path, json_output).into_app_err_with(|| format!("writing JSON report to '{path}'"))?;
        }
    }

    if (args.console || args.json.is_none()) && !repos.is_empty() {
        let mut console_output = String::new();
        generate_console(repos, use_colors, &mut console_output)?;
        host.output()
            .write_all(console_output.as_bytes())
            .into_app_err("writing console report")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::host::TestHost;
    use crate::scoring::RepoMetrics;
    use chrono::TimeZone;
    use std::io;

    /// Host whose output stream is closed, like a broken pipe.
    #[derive(Debug)]
    struct ClosedOutputHost;

    #[derive(Debug)]
    struct ClosedWriter;

    impl Write for ClosedWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Host for ClosedOutputHost {
        fn output(&mut self) -> impl Write {
            ClosedWriter
        }

        fn error(&mut self) -> impl Write {
            io::sink()
        }
    }

    fn scored_repo() -> ReportableRepo {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let metrics = RepoMetrics {
            stars: 10,
            has_readme: true,
            ..RepoMetrics::default()
        };
        ReportableRepo::new(RepoSpec::parse("octo/widget").unwrap(), None, calculate_score(&metrics, now), false)
    }

    fn score_args(extra: &[&str]) -> ScoreArgs {
        let mut args = vec!["score", "octo/widget"];
        args.extend_from_slice(extra);
        ScoreArgs::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_console_report_written_to_output() {
        let mut host = TestHost::new();
        report(&mut host, &score_args(&[]), false, &[scored_repo()]).unwrap();
        assert!(host.output_text().starts_with("octo/widget scores "));
    }

    #[test]
    fn test_console_write_failure_is_reported() {
        let err = report(&mut ClosedOutputHost, &score_args(&[]), false, &[scored_repo()]).unwrap_err();
        assert!(format!("{err:#}").contains("writing console report"), "got: {err:#}");
    }

    #[test]
    fn test_json_write_failure_is_reported() {
        let err = report(&mut ClosedOutputHost, &score_args(&["--json", "-"]), false, &[scored_repo()]).unwrap_err();
        assert!(format!("{err:#}").contains("writing JSON report"), "got: {err:#}");
    }
}
