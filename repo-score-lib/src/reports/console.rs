use super::{ReportableRepo, Tier};
use crate::Result;
use crate::scoring::{MAX_SCORE, ScoreResult};
use core::fmt::Write;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

pub fn generate<W: Write>(repos: &[ReportableRepo], use_colors: bool, writer: &mut W) -> Result<()> {
    for (index, repo) in repos.iter().enumerate() {
        if index > 0 {
            writeln!(writer)?;
            writeln!(writer, "═══════════════════════════════════════")?;
            writeln!(writer)?;
        }

        let name = repo.spec.to_string();
        let score = format_score(repo.result.score, use_colors);
        let cached = if repo.cached { " (cached)" } else { "" };

        if use_colors {
            writeln!(writer, "{} scores {score}{cached}", name.bold())?;
        } else {
            writeln!(writer, "{name} scores {score}{cached}")?;
        }

        if let Some(description) = &repo.description {
            for line in wrap_text(description, get_terminal_width(), 2) {
                writeln!(writer, "  {}", line.trim_start())?;
            }
        }

        writeln!(writer)?;
        write_breakdown(&repo.result, use_colors, writer)?;

        let raw = &repo.result.raw_metrics;
        writeln!(writer)?;
        writeln!(
            writer,
            "  {} stars, {} forks, {} recent commits",
            raw.stars, raw.forks, raw.recent_commits
        )?;
    }

    Ok(())
}

fn write_breakdown<W: Write>(result: &ScoreResult, use_colors: bool, writer: &mut W) -> Result<()> {
    // Compute max metric name length for alignment
    let max_name_len = result.breakdown.iter().map(|m| m.metric.len()).max().unwrap_or(0);

    for metric in &result.breakdown {
        let score = format!("{:>4.1}/{MAX_SCORE:.0}", metric.score);
        let score = if use_colors { colorize(&score, metric.score) } else { score };

        writeln!(
            writer,
            "  {:<width$} : {score}  × {:>3.0}%  = {:.1}",
            metric.metric,
            metric.weight * 100.0,
            metric.weighted,
            width = max_name_len
        )?;
    }

    Ok(())
}

fn format_score(score: f64, use_colors: bool) -> String {
    let text = format!("{score:.1}/{MAX_SCORE:.0}");
    if use_colors { colorize(&text, score).bold().to_string() } else { text }
}

fn colorize(text: &str, score: f64) -> String {
    match Tier::of(score) {
        Tier::Good => text.green().to_string(),
        Tier::Fair => text.yellow().to_string(),
        Tier::Poor => text.red().to_string(),
    }
}

/// Get the terminal width, defaulting to 80 if not detectable
fn get_terminal_width() -> usize {
    terminal_size().map_or(80, |(Width(w), _)| w as usize)
}

/// Word-wrap text to fit within a given width, with indentation for continuation lines
fn wrap_text(text: &str, width: usize, indent: usize) -> Vec<String> {
    if width <= indent {
        return vec![text.to_string()];
    }

    let available = width - indent;
    let mut lines = Vec::new();
    let mut current_line = String::new();

    for word in text.split_whitespace() {
        let separator_len = usize::from(!current_line.is_empty());

        if !current_line.is_empty() && current_line.len() + separator_len + word.len() > available {
            lines.push(core::mem::take(&mut current_line));
        }

        if !current_line.is_empty() {
            current_line.push(' ');
        }
        current_line.push_str(word);
    }

    if !current_line.is_empty() || lines.is_empty() {
        lines.push(current_line);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::RepoSpec;
    use crate::scoring::{RepoMetrics, calculate_score};
    use chrono::{TimeZone, Utc};

    fn sample_repo(description: Option<&str>, cached: bool) -> ReportableRepo {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let metrics = RepoMetrics {
            stars: 1000,
            forks: 100,
            has_readme: true,
            has_license: true,
            recent_commits: 5,
            has_workflows: true,
            last_updated: Some(now),
        };

        ReportableRepo::new(
            RepoSpec::parse("octo/widget").unwrap(),
            description.map(String::from),
            calculate_score(&metrics, now),
            cached,
        )
    }

    #[test]
    fn test_generate_empty() {
        let mut output = String::new();
        generate(&[], false, &mut output).unwrap();
        assert!(output.is_empty());
    }

    #[test]
    fn test_generate_without_colors() {
        let mut output = String::new();
        generate(&[sample_repo(Some("Widgets for everyone"), false)], false, &mut output).unwrap();

        assert!(output.starts_with("octo/widget scores 8.4/10\n"));
        assert!(output.contains("  Widgets for everyone\n"));
        assert!(output.contains("Stars           :  7.5/10  ×  25%  = 1.9"));
        assert!(output.contains("Recent Activity :  7.5/10  ×  20%  = 1.5"));
        assert!(output.contains("Has Workflows   : 10.0/10  ×  15%  = 1.5"));
        assert!(output.contains("1000 stars, 100 forks, 5 recent commits"));
        assert!(!output.contains("(cached)"));
        assert!(!output.contains('\u{1b}'));
    }

    #[test]
    fn test_generate_cached_marker() {
        let mut output = String::new();
        generate(&[sample_repo(None, true)], false, &mut output).unwrap();
        assert!(output.starts_with("octo/widget scores 8.4/10 (cached)\n"));
    }

    #[test]
    fn test_generate_with_colors() {
        let mut output = String::new();
        generate(&[sample_repo(None, false)], true, &mut output).unwrap();
        assert!(output.contains('\u{1b}'));
    }

    #[test]
    fn test_generate_multiple_repos_separated() {
        let mut output = String::new();
        generate(&[sample_repo(None, false), sample_repo(None, true)], false, &mut output).unwrap();
        assert_eq!(output.matches("═══").count(), 1);
        assert_eq!(output.matches("octo/widget scores").count(), 2);
    }

    #[test]
    fn test_wrap_text_short() {
        assert_eq!(wrap_text("hello world", 80, 2), vec!["hello world"]);
    }

    #[test]
    fn test_wrap_text_long() {
        let lines = wrap_text("one two three four five", 12, 2);
        assert_eq!(lines, vec!["one two", "three four", "five"]);
    }

    #[test]
    fn test_wrap_text_narrow_terminal() {
        assert_eq!(wrap_text("unchanged text", 2, 2), vec!["unchanged text"]);
    }

    #[test]
    fn test_wrap_text_empty() {
        assert_eq!(wrap_text("", 80, 2), vec![String::new()]);
    }
}
