//! News analyst desk
//!
//! A self-contained mode: each analyst reads a news item through its own
//! fixed prompt and the desk folds the answers into one report.

use serde::{Deserialize, Serialize};

/// System prompt shared by every analyst request
pub const ANALYST_SYSTEM_PROMPT: &str = "You are an experienced financial analyst.";

/// Sampling temperature of analyst requests
pub const ANALYST_TEMPERATURE: f32 = 0.7;

/// Market specialists consulted for every news item, in report order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Analyst {
    Indices,
    Commodities,
    Forex,
    Stocks,
    Crypto,
}

impl Analyst {
    pub const ALL: [Analyst; 5] = [
        Analyst::Indices,
        Analyst::Commodities,
        Analyst::Forex,
        Analyst::Stocks,
        Analyst::Crypto,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Analyst::Indices => "📈 Indices Specialist",
            Analyst::Commodities => "🛢️ Commodities Specialist",
            Analyst::Forex => "💱 Forex Specialist",
            Analyst::Stocks => "🏢 Stocks Specialist",
            Analyst::Crypto => "🪙 Crypto Specialist",
        }
    }

    pub fn instructions(&self) -> &'static str {
        match self {
            Analyst::Indices => {
                "Analyze the news ONLY in terms of its impact on major stock indices (S&P 500, Dow Jones, Nasdaq, Russell, etc.).
If the news does not affect the indices, return an empty response.
Response format:
✅ Buy: (only index ETFs, e.g., SPY, QQQ, DIA, IWM)
❌ Sell: (only index ETFs)
🛡 Hedge: (only index hedging instruments - VIX, inverse ETFs)
Use only index instrument tickers."
            }
            Analyst::Commodities => {
                "Analyze the news ONLY in terms of its impact on commodities (gold, silver, oil, gas, metals, etc.).
If the news does not affect commodities, return an empty response.
Response format:
✅ Buy: (only commodities and their ETFs, e.g., GLD, SLV, USO, UNG)
❌ Sell: (only commodities and their ETFs)
🛡 Hedge: (only commodity hedging instruments)
Use only commodity instrument tickers."
            }
            Analyst::Forex => {
                "Analyze the news ONLY in terms of its impact on major currency pairs (EUR/USD, GBP/USD, USD/JPY, USD/CHF, etc.).
If the news does not affect currency pairs, return an empty response.
Response format:
✅ Buy: (only currency pairs)
❌ Sell: (only currency pairs)
🛡 Hedge: (only currency risk hedging instruments)
Use only currency pair symbols."
            }
            Analyst::Stocks => {
                "Analyze the news ONLY in terms of its impact on individual stocks and stock market sectors.
If the news does not affect specific stocks or sectors, return an empty response.
Response format:
✅ Buy: (only specific company stocks or sector ETFs, e.g., XLK, XLF)
❌ Sell: (only specific company stocks or sector ETFs)
🛡 Hedge: (only stock hedging instruments)
Use only stock and sector ETF tickers."
            }
            Analyst::Crypto => {
                "Analyze the news ONLY in terms of its impact on cryptocurrencies (Bitcoin, Ethereum, altcoins, etc.).
If the news does not affect cryptocurrencies, return an empty response.
Response format:
✅ Buy: (only cryptocurrencies and crypto ETFs, e.g., BTC, ETH, GBTC, ETHE)
❌ Sell: (only cryptocurrencies and crypto ETFs)
🛡 Hedge: (only cryptocurrency hedging instruments)
Use only cryptocurrency and related instrument tickers."
            }
        }
    }

    /// User turn sent to the backend for `news`
    pub fn prompt(&self, news: &str) -> String {
        format!("{}\n\nNews for analysis:\n{}", self.instructions(), news)
    }
}

/// First line after `marker` in every analysis that contains it
fn signal_lines<'a>(analyses: &'a [(Analyst, String)], marker: &str) -> Vec<&'a str> {
    analyses
        .iter()
        .filter_map(|(_, text)| {
            let (_, tail) = text.split_once(marker)?;
            let line = tail.lines().next().unwrap_or("").trim();
            (!line.is_empty()).then_some(line)
        })
        .collect()
}

/// Fold the Buy / Sell / Hedge lines of all analysts into a conclusion
pub fn conclusion(analyses: &[(Analyst, String)]) -> String {
    let mut parts = Vec::new();

    let strategy = signal_lines(analyses, "Buy:");
    if !strategy.is_empty() {
        parts.push(format!("Main strategy: {}.", strategy.join(", ")));
    }
    let risks = signal_lines(analyses, "Sell:");
    if !risks.is_empty() {
        parts.push(format!("Risks: {}.", risks.join(", ")));
    }
    let hedging = signal_lines(analyses, "Hedge:");
    if !hedging.is_empty() {
        parts.push(format!("Additional measures: {}.", hedging.join(", ")));
    }

    format!(
        "📌 Conclusion:\n{}\n\n🚀 Awaiting the next news!",
        parts.join("\n")
    )
}

/// Complete trading-signal report for one news item
pub fn report(analyses: &[(Analyst, String)]) -> String {
    let mut text = String::from("📊 Trading signals from our analysts\n\n");
    for (analyst, analysis) in analyses {
        text.push_str(&format!("{}\n{}\n\n", analyst.title(), analysis));
    }
    text.push_str(&conclusion(analyses));
    text
}
