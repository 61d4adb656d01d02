use anyhow::{Context, Result};
use h2h_core::{QuarterStandings, StandingsDocument};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, warn};

/// `{dir}/{prefix}{quarter}.json`, e.g. `./q1.json`.
pub fn document_path(dir: &Path, prefix: &str, quarter: usize) -> PathBuf {
    dir.join(format!("{prefix}{quarter}.json"))
}

/// Compact JSON, non-ASCII left as UTF-8.
pub fn render(quarter: &QuarterStandings) -> Result<String> {
    let doc = StandingsDocument::from(quarter.rows.clone());
    Ok(serde_json::to_string(&doc)?)
}

/// Sibling path a document is staged at before it replaces the real one.
fn staging_path(path: &Path) -> PathBuf {
    let mut staged = path.as_os_str().to_owned();
    staged.push(".tmp");
    PathBuf::from(staged)
}

/// Write one document per quarter. Call only once every quarter has been computed.
///
/// Every document is staged next to its target first; existing quarter files
/// are only replaced once all of them have been staged.
pub async fn save_season(dir: &Path, prefix: &str, quarters: &[QuarterStandings]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .await
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;

    // Render everything first so a serialization failure leaves no files behind
    let rendered = quarters
        .iter()
        .map(|q| -> Result<(PathBuf, String)> { Ok((document_path(dir, prefix, q.quarter), render(q)?)) })
        .collect::<Result<Vec<_>>>()?;

    let mut staged = Vec::with_capacity(rendered.len());
    for (path, json) in rendered {
        let tmp = staging_path(&path);
        if let Err(e) = fs::write(&tmp, json).await {
            discard(&staged).await;
            return Err(e).with_context(|| format!("failed to stage {}", tmp.display()));
        }
        staged.push((tmp, path));
    }

    let mut written = Vec::with_capacity(staged.len());
    for (tmp, path) in &staged {
        fs::rename(tmp, path)
            .await
            .with_context(|| format!("failed to replace {}", path.display()))?;
        info!("Saved {}", path.display());
        written.push(path.clone());
    }
    Ok(written)
}

async fn discard(staged: &[(PathBuf, PathBuf)]) {
    for (tmp, _) in staged {
        if let Err(e) = fs::remove_file(tmp).await {
            warn!("Could not remove staged file {}: {e}", tmp.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use h2h_core::{Entry, Fixture, RoundRange, SeasonPlan};

    fn season() -> Vec<QuarterStandings> {
        let plan = SeasonPlan::new(2, vec![RoundRange::new(0, 0), RoundRange::new(1, 1)]).unwrap();
        let entries = vec![
            Entry::new(1, "Åsa's XI", "Åsa"),
            Entry::new(2, "B", "Bob"),
            Entry::new(3, "C", "Cat"),
            Entry::new(4, "D", "Dan"),
        ];
        let rounds = vec![
            vec![Fixture::scored(1, 60, 2, 40), Fixture::scored(3, 50, 4, 50)],
            vec![Fixture::scored(1, 30, 3, 70), Fixture::scored(2, 45, 4, 44)],
        ];
        plan.standings(&entries, &rounds).unwrap()
    }

    #[test]
    fn paths_use_prefix_and_quarter_number() {
        assert_eq!(document_path(Path::new("out"), "q", 3), Path::new("out").join("q3.json"));
        assert_eq!(document_path(Path::new("."), "h2h-q", 1), Path::new(".").join("h2h-q1.json"));
    }

    #[test]
    fn rendered_document_is_positional() {
        let quarters = season();
        let json = render(&quarters[0]).unwrap();
        assert_eq!(
            json,
            r#"{"data":[[1,[1,"Åsa's XI","Åsa"],1,0,0,3,60],[2,[3,"C","Cat"],0,1,0,1,50],[3,[4,"D","Dan"],0,1,0,1,50],[4,[2,"B","Bob"],0,0,1,0,40]]}"#
        );
    }

    #[tokio::test]
    async fn save_season_writes_one_file_per_quarter() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("nested").join("out");
        let quarters = season();

        let written = save_season(&out, "q", &quarters).await.unwrap();
        assert_eq!(written, vec![out.join("q1.json"), out.join("q2.json")]);

        let text = std::fs::read_to_string(out.join("q2.json")).unwrap();
        let doc: StandingsDocument = serde_json::from_str(&text).unwrap();
        assert_eq!(doc.data, quarters[1].rows);
        assert_eq!(doc.data[0].entry.id, 3);
    }

    #[tokio::test]
    async fn rewriting_produces_identical_bytes() {
        let tmp = tempfile::tempdir().unwrap();
        let quarters = season();

        save_season(tmp.path(), "q", &quarters).await.unwrap();
        let first = std::fs::read(tmp.path().join("q1.json")).unwrap();
        save_season(tmp.path(), "q", &season()).await.unwrap();
        let second = std::fs::read(tmp.path().join("q1.json")).unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn failed_staging_keeps_previous_files() {
        let tmp = tempfile::tempdir().unwrap();
        let quarters = season();
        save_season(tmp.path(), "q", &quarters).await.unwrap();
        let before = std::fs::read(tmp.path().join("q1.json")).unwrap();

        // A directory squatting on q2's staging path makes its write fail
        std::fs::create_dir(tmp.path().join("q2.json.tmp")).unwrap();
        let mut changed = quarters.clone();
        changed[0].rows.reverse();
        assert!(save_season(tmp.path(), "q", &changed).await.is_err());

        assert_eq!(std::fs::read(tmp.path().join("q1.json")).unwrap(), before);
        assert!(!tmp.path().join("q1.json.tmp").exists());
    }

    #[test]
    fn staging_path_sits_beside_the_target() {
        assert_eq!(staging_path(Path::new("out/q1.json")), PathBuf::from("out/q1.json.tmp"));
    }
}
