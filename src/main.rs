use clap::Parser;
use tracing::info;

use gh_org_commits::cli::Cli;
use gh_org_commits::config::load_env_file;
use gh_org_commits::export::{write_csv, write_jsonl};
use gh_org_commits::fetch::collect_rows;
use gh_org_commits::github::client::GitHubClient;
use gh_org_commits::github::targets::TARGET_REPOS;
use gh_org_commits::github::transport::ReqwestTransport;

/// Log to stderr so the data outputs stay clean; `RUST_LOG` overrides the
/// default `info` level.
fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(false)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    load_env_file();

    let transport = ReqwestTransport::new(&cli.http_settings())?;
    let client = GitHubClient::new(transport, cli.retry_policy());

    let rows = collect_rows(&client, TARGET_REPOS, &cli.commit_query())?;
    info!("collected {} commits by {}", rows.len(), cli.user);

    if let Some(path) = &cli.jsonl {
        let written = write_jsonl(&rows, path)?;
        info!("wrote {} rows to {}", written, path.display());
    }
    if let Some(path) = &cli.csv {
        let written = write_csv(&rows, path)?;
        info!("wrote {} rows to {}", written, path.display());
    }

    Ok(())
}
