//! `fetch` command: one dashboard load, rendered to stdout.

use std::path::Path;

use tenordash_dashboard::{Dashboard, ExportKind, RankingsFetcher};

use crate::render;

/// Loads `profile`, prints the dashboard and writes the requested exports.
///
/// # Errors
///
/// Returns an error if the load ends in the error state or an export file
/// cannot be written.
pub(crate) async fn run_fetch<F>(
    fetcher: &F,
    profile: &str,
    exports: &[ExportKind],
    out_dir: &Path,
) -> anyhow::Result<()>
where
    F: RankingsFetcher + ?Sized,
{
    let mut dashboard = Dashboard::new();
    if !dashboard.load(fetcher, profile).await && dashboard.error().is_none() {
        anyhow::bail!("please enter a Tenor profile URL or username");
    }

    print!("{}", render::render_dashboard(&dashboard));

    if let Some(message) = dashboard.error() {
        anyhow::bail!("{message}");
    }

    for kind in exports {
        match dashboard.export_csv(*kind) {
            Some(export) => {
                let path = out_dir.join(export.filename);
                std::fs::write(&path, export.content)?;
                println!("wrote {}", path.display());
            }
            None => println!("nothing to export for {}", kind.filename()),
        }
    }

    Ok(())
}
