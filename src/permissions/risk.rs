use crate::render::{Decorations, LineBuilder, Token};
use serde::Serialize;
use std::fmt;

pub const RISK_LOW: f64 = 0.25;
pub const RISK_MEDIUM: f64 = 0.5;
pub const RISK_HIGH: f64 = 0.8;

/// Coarse banding of a risk score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskBand {
    #[default]
    None,
    Low,
    Medium,
    High,
}

impl RiskBand {
    pub fn from_score(score: f64) -> Self {
        if score >= RISK_HIGH {
            RiskBand::High
        } else if score >= RISK_MEDIUM {
            RiskBand::Medium
        } else if score >= RISK_LOW {
            RiskBand::Low
        } else {
            RiskBand::None
        }
    }

    /// Three-column indicator: one slot per threshold, filled with the band's
    /// token once the threshold is reached and with the "none" token otherwise.
    pub fn render<D: Decorations + ?Sized>(self, tokens: &D) -> String {
        let none = tokens.token(Token::RiskNone);
        let mut line = LineBuilder::new();
        line.push_alt(self >= RiskBand::Low, tokens.token(Token::RiskLow), none)
            .push_alt(self >= RiskBand::Medium, tokens.token(Token::RiskMedium), none)
            .push_alt(self >= RiskBand::High, tokens.token(Token::RiskHigh), none);
        line.finish(false)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskBand::None => "none",
            RiskBand::Low => "low",
            RiskBand::Medium => "medium",
            RiskBand::High => "high",
        }
    }
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
