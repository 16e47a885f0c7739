//! Export of a ranked screen: CSV or JSON.
//!
//! CSV columns: rank, ticker, price, rsi, stochastic, macd_diff,
//! bollinger_distance, obv, adx, ema_cross, score, signal.

use std::path::Path;

use alphascreen_core::screen::Ranking;
use anyhow::{bail, Context, Result};

pub const CSV_HEADER: [&str; 12] = [
    "rank",
    "ticker",
    "price",
    "rsi",
    "stochastic",
    "macd_diff",
    "bollinger_distance",
    "obv",
    "adx",
    "ema_cross",
    "score",
    "signal",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// Pick the format from a file extension (`.csv` or `.json`).
    pub fn from_path(path: &Path) -> Result<Self> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("csv") => Ok(ExportFormat::Csv),
            Some("json") => Ok(ExportFormat::Json),
            _ => bail!(
                "cannot infer export format from {} (use .csv or .json)",
                path.display()
            ),
        }
    }
}

/// Render the full ranked table as CSV.
pub fn export_csv(ranking: &Ranking) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(CSV_HEADER)?;

    for row in ranking.rows() {
        let s = &row.scored.snapshot;
        wtr.write_record([
            row.rank.to_string(),
            s.ticker.clone(),
            format!("{:.2}", s.price),
            format!("{:.2}", s.rsi),
            format!("{:.2}", s.stochastic),
            format!("{:.3}", s.macd_diff),
            format!("{:.2}", s.bollinger_distance),
            format!("{:.2}", s.obv),
            format!("{:.2}", s.adx),
            s.ema_cross.to_string(),
            row.scored.score.to_string(),
            row.scored.signal.to_string(),
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Render the full ranked table as pretty JSON.
pub fn export_json(ranking: &Ranking) -> Result<String> {
    serde_json::to_string_pretty(ranking).context("failed to serialize ranking to JSON")
}

/// Write the ranking to `path`, choosing the format from its extension.
/// Creates parent directories if needed.
pub fn write_export(path: &Path, ranking: &Ranking) -> Result<ExportFormat> {
    let format = ExportFormat::from_path(path)?;
    let content = match format {
        ExportFormat::Csv => export_csv(ranking)?,
        ExportFormat::Json => export_json(ranking)?,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alphascreen_core::screen::{BatchRanker, IndicatorSnapshot, ScoringEngine};

    fn ranking() -> Ranking {
        let engine = ScoringEngine::new();
        let snaps = vec![
            IndicatorSnapshot {
                ticker: "AAA".into(),
                price: 12.5,
                rsi: 25.0,
                stochastic: 15.0,
                macd_diff: 0.125,
                bollinger_distance: -1.0,
                obv: 1500.0,
                adx: 30.0,
                ema_cross: true,
            },
            IndicatorSnapshot {
                ticker: "BBB".into(),
                price: 40.0,
                rsi: 55.5,
                stochastic: 60.0,
                macd_diff: -0.2,
                bollinger_distance: 2.0,
                obv: -10.0,
                adx: 12.0,
                ema_cross: false,
            },
        ];
        BatchRanker::new()
            .rank(snaps.into_iter().map(|s| engine.evaluate(s)).collect())
            .unwrap()
    }

    #[test]
    fn csv_has_header_and_rows_in_rank_order() {
        let csv = export_csv(&ranking()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADER.join(","));
        assert_eq!(
            lines[1],
            "1,AAA,12.50,25.00,15.00,0.125,-1.00,1500.00,30.00,true,1.00,Strong buy"
        );
        assert!(lines[2].starts_with("2,BBB,40.00,"));
        assert!(lines[2].ends_with(",false,0.00,Strong sell"));
    }

    #[test]
    fn json_carries_rank_score_and_signal() {
        let json = export_json(&ranking()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["rank"], 1);
        assert_eq!(rows[0]["ticker"], "AAA");
        assert_eq!(rows[0]["score"], 1.0);
        assert_eq!(rows[0]["signal"], "Strong buy");
        assert_eq!(rows[1]["triggered"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(
            ExportFormat::from_path(Path::new("out/screen.CSV")).unwrap(),
            ExportFormat::Csv
        );
        assert_eq!(
            ExportFormat::from_path(Path::new("screen.json")).unwrap(),
            ExportFormat::Json
        );
        assert!(ExportFormat::from_path(Path::new("screen.xlsx")).is_err());
        assert!(ExportFormat::from_path(Path::new("screen")).is_err());
    }
}
