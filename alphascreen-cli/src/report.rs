//! Console rendering of screen results.

use alphascreen_core::screen::RankedRow;
use alphascreen_runner::{RejectedTicker, ScreenReport};

fn header() -> String {
    format!(
        "{:>4} {:<8} {:>10} {:>7} {:>7} {:>9} {:>9} {:>16} {:>7} {:>8} {:>6}  {:<11}",
        "Rank", "Ticker", "Price", "RSI", "Stoch", "MACD diff", "Boll dist", "OBV", "ADX",
        "EMA20>50", "Score", "Signal"
    )
}

fn format_row(row: &RankedRow) -> String {
    let s = &row.scored.snapshot;
    format!(
        "{:>4} {:<8} {:>10.2} {:>7.2} {:>7.2} {:>9.3} {:>9.2} {:>16.2} {:>7.2} {:>8} {:>6}  {:<11}",
        row.rank,
        s.ticker,
        s.price,
        s.rsi,
        s.stochastic,
        s.macd_diff,
        s.bollinger_distance,
        s.obv,
        s.adx,
        if s.ema_cross { "yes" } else { "no" },
        row.scored.score,
        row.scored.signal,
    )
}

fn print_table(title: &str, rows: &[&RankedRow]) {
    println!("{title}");
    if rows.is_empty() {
        println!("  (none)");
        return;
    }
    let header = header();
    println!("{header}");
    println!("{}", "-".repeat(header.len()));
    for row in rows {
        println!("{}", format_row(row));
    }
}

/// Full ranking, the strong-buy and strong-sell views, then the rejection tally.
pub fn print_report(report: &ScreenReport) {
    let all: Vec<&RankedRow> = report.ranking.rows().iter().collect();
    print_table(
        &format!("Ranking ({} of {} tickers)", all.len(), report.requested),
        &all,
    );
    println!();
    print_table(
        &format!("Top {} strong buy", report.top_n),
        &report.ranking.strong_buys(report.top_n),
    );
    println!();
    print_table(
        &format!("Top {} strong sell", report.top_n),
        &report.ranking.strong_sells(report.top_n),
    );

    if !report.rejected.is_empty() {
        println!();
        print_rejections(&report.rejected);
        let tally: Vec<String> = report
            .rejection_counts()
            .into_iter()
            .map(|(kind, n)| format!("{kind}={n}"))
            .collect();
        println!("  by reason: {}", tally.join(", "));
    }
}

pub fn print_rejections(rejected: &[RejectedTicker]) {
    println!("Skipped {} ticker(s):", rejected.len());
    for r in rejected {
        println!("  {:<8} {}", r.ticker, r.rejection);
    }
}
