use chrono::{DateTime, FixedOffset, Utc};

use crate::models::ScanResult;

/// Line emitted when no ticker passes the scorecard.
pub const NO_HITS_LINE: &str = "該当なし（条件をゆるめる/銘柄を増やすと当たりやすくなります）";

const JST_OFFSET_SECS: i32 = 9 * 3600;

/// Build the notification body.
///
/// A timestamped header (JST, the market the watchlist trades in), one line
/// per passing ticker in watchlist order, or the fixed no-hit line. The
/// body is delivered once per scan either way.
pub fn build(hits: &[&ScanResult], now: DateTime<Utc>) -> String {
    let jst = now.with_timezone(&FixedOffset::east_opt(JST_OFFSET_SECS).unwrap());

    let mut lines = vec![format!(
        "📉 **押し目スキャン結果** ({} JST)",
        jst.format("%Y/%m/%d %H:%M:%S")
    )];

    for result in hits {
        if let ScanResult::Evaluated {
            ticker,
            snapshot,
            judgment,
        } = result
        {
            lines.push(format!(
                "• **{}** 終値:{:.2}  25MA:{:.2}  RSI14:{}  MACD:{} vs Sig:{}  Score:{}/4",
                ticker,
                snapshot.close,
                snapshot.sma25,
                fmt_opt(snapshot.rsi14, 1),
                fmt_opt(snapshot.macd, 3),
                fmt_opt(snapshot.signal, 3),
                judgment.score,
            ));
        }
    }

    if hits.is_empty() {
        lines.push(NO_HITS_LINE.to_string());
    }

    lines.join("\n")
}

fn fmt_opt(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", decimals, v),
        None => "-".to_string(),
    }
}
