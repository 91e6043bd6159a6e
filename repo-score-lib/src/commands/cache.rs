use super::Host;
use super::common::{Common, CommonArgs};
use crate::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::io::Write;

#[derive(Parser, Debug)]
pub struct CacheArgs {
    #[command(subcommand)]
    pub command: CacheCommand,
}

#[derive(Subcommand, Debug)]
pub enum CacheCommand {
    /// Show how many scores are cached and how much space they take
    Stats(CommonArgs),

    /// Remove every cached score
    Clear(CommonArgs),
}

pub async fn manage_cache<H: Host>(host: &mut H, args: &CacheArgs) -> Result<()> {
    let (CacheCommand::Stats(common_args) | CacheCommand::Clear(common_args)) = &args.command;
    let common = Common::new(common_args)?;
    let cache = common.score_cache(Utc::now(), false);

    match &args.command {
        CacheCommand::Stats(_) => {
            let stats = cache.stats();
            let _ = writeln!(host.output(), "Cache directory: {}", cache.dir().display());
            let _ = writeln!(host.output(), "Cached repositories: {}", stats.count);
            let _ = writeln!(host.output(), "Cache size: {}", format_size(stats.size));
        }
        CacheCommand::Clear(_) => {
            cache.clear().await?;
            let _ = writeln!(host.output(), "Cleared score cache in {}", cache.dir().display());
        }
    }

    Ok(())
}

#[expect(clippy::cast_precision_loss, reason = "Sizes are shown with one decimal")]
fn format_size(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{bytes} bytes")
    } else {
        format!("{:.1} KiB", bytes as f64 / 1024.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0 bytes");
        assert_eq!(format_size(1023), "1023 bytes");
        assert_eq!(format_size(1024), "1.0 KiB");
        assert_eq!(format_size(1536), "1.5 KiB");
    }
}
