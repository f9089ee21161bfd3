use super::{Decorations, Token};
use console::style;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeTokens {
    pub none: String,
    pub sticky: String,
    pub setuid: String,
    pub setgid: String,
    pub link: String,
    pub no_link: String,
}

impl Default for ModeTokens {
    fn default() -> Self {
        Self {
            none: "-".to_string(),
            sticky: "s".to_string(),
            setuid: "u".to_string(),
            setgid: "g".to_string(),
            link: "L".to_string(),
            no_link: " ".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PermTokens {
    pub none: String,
    pub read: String,
    pub write: String,
    pub exec: String,
}

impl Default for PermTokens {
    fn default() -> Self {
        Self {
            none: "-".to_string(),
            read: "r".to_string(),
            write: "w".to_string(),
            exec: "x".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskTokens {
    pub none: String,
    pub low: String,
    pub medium: String,
    pub high: String,
}

impl Default for RiskTokens {
    fn default() -> Self {
        Self {
            none: " ".to_string(),
            low: "▫".to_string(),
            medium: "▪".to_string(),
            high: "▪".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KindTokens {
    pub file: String,
    pub dir: String,
    pub fifo: String,
    pub socket: String,
    pub block_device: String,
    pub char_device: String,
}

impl Default for KindTokens {
    fn default() -> Self {
        Self {
            file: "-".to_string(),
            dir: "d".to_string(),
            fifo: "p".to_string(),
            socket: "s".to_string(),
            block_device: "b".to_string(),
            char_device: "c".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorTokens {
    pub file: String,
    pub dir: String,
    pub fifo: String,
    pub socket: String,
    pub block_device: String,
    pub char_device: String,
    pub sticky: String,
    pub link: String,
    pub dangling: String,
    pub no_size: String,
}

impl Default for IndicatorTokens {
    fn default() -> Self {
        Self {
            file: " ".to_string(),
            dir: "▊".to_string(),
            fifo: "▍".to_string(),
            socket: "▍".to_string(),
            block_device: "▍".to_string(),
            char_device: "▍".to_string(),
            sticky: "*".to_string(),
            link: "┅⮞".to_string(),
            dangling: "DEAD".to_string(),
            no_size: "-".to_string(),
        }
    }
}

/// Table of decoration tokens, grouped by category.
///
/// `Default` is the plain palette. A palette file only needs to list the
/// tokens it overrides:
///
/// ```toml
/// [perm]
/// none = "."
///
/// [risk]
/// high = "!"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub mode: ModeTokens,
    pub perm: PermTokens,
    pub risk: RiskTokens,
    pub kind: KindTokens,
    pub indicator: IndicatorTokens,
}

fn paint(token: &str, color: u8) -> String {
    style(token).color256(color).force_styling(true).to_string()
}

const GRAY: u8 = 244;
const DARK_GRAY: u8 = 240;
const GREEN: u8 = 2;
const DARK_GREEN: u8 = 28;
const YELLOW: u8 = 3;
const DARK_YELLOW: u8 = 136;
const BRIGHT_YELLOW: u8 = 11;
const ORANGE: u8 = 208;
const RED: u8 = 1;
const DARK_RED: u8 = 88;
const PURPLE: u8 = 5;
const PINK: u8 = 213;
const LIME: u8 = 118;
const BLUE: u8 = 4;
const LIGHT_BLUE: u8 = 117;

impl Palette {
    /// Tokens without any styling.
    pub fn plain() -> Self {
        Self::default()
    }

    /// The plain tokens wrapped in 256-color ANSI sequences.
    pub fn colored() -> Self {
        let plain = Self::plain();
        Self {
            mode: ModeTokens {
                none: paint(&plain.mode.none, GRAY),
                sticky: paint(&plain.mode.sticky, BRIGHT_YELLOW),
                setuid: paint(&plain.mode.setuid, GREEN),
                setgid: paint(&plain.mode.setgid, ORANGE),
                link: paint(&plain.mode.link, PURPLE),
                no_link: paint(&plain.mode.no_link, PURPLE),
            },
            perm: PermTokens {
                none: paint(&plain.perm.none, GRAY),
                read: paint(&plain.perm.read, DARK_GREEN),
                write: paint(&plain.perm.write, DARK_YELLOW),
                exec: paint(&plain.perm.exec, DARK_RED),
            },
            risk: RiskTokens {
                none: paint(&plain.risk.none, GREEN),
                low: paint(&plain.risk.low, YELLOW),
                medium: paint(&plain.risk.medium, ORANGE),
                high: paint(&plain.risk.high, RED),
            },
            kind: KindTokens {
                file: paint(&plain.kind.file, DARK_GRAY),
                dir: paint(&plain.kind.dir, LIGHT_BLUE),
                fifo: paint(&plain.kind.fifo, PINK),
                socket: paint(&plain.kind.socket, LIME),
                block_device: paint(&plain.kind.block_device, BLUE),
                char_device: paint(&plain.kind.char_device, BRIGHT_YELLOW),
            },
            indicator: IndicatorTokens {
                file: paint(&plain.indicator.file, GRAY),
                dir: paint(&plain.indicator.dir, LIGHT_BLUE),
                fifo: paint(&plain.indicator.fifo, PINK),
                socket: paint(&plain.indicator.socket, LIME),
                block_device: paint(&plain.indicator.block_device, BLUE),
                char_device: paint(&plain.indicator.char_device, BRIGHT_YELLOW),
                sticky: paint(&plain.indicator.sticky, DARK_RED),
                link: paint(&plain.indicator.link, PURPLE),
                dangling: paint(&plain.indicator.dangling, RED),
                no_size: paint(&plain.indicator.no_size, GRAY),
            },
        }
    }

    /// Parses a palette from TOML. Missing tokens keep their plain value.
    pub fn from_toml_str(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }
}

impl Decorations for Palette {
    fn token(&self, token: Token) -> &str {
        match token {
            Token::ModeNone => &self.mode.none,
            Token::ModeSticky => &self.mode.sticky,
            Token::ModeSetuid => &self.mode.setuid,
            Token::ModeSetgid => &self.mode.setgid,
            Token::Link => &self.mode.link,
            Token::NoLink => &self.mode.no_link,

            Token::PermNone => &self.perm.none,
            Token::PermRead => &self.perm.read,
            Token::PermWrite => &self.perm.write,
            Token::PermExec => &self.perm.exec,

            Token::RiskNone => &self.risk.none,
            Token::RiskLow => &self.risk.low,
            Token::RiskMedium => &self.risk.medium,
            Token::RiskHigh => &self.risk.high,

            Token::KindFile => &self.kind.file,
            Token::KindDir => &self.kind.dir,
            Token::KindFifo => &self.kind.fifo,
            Token::KindSocket => &self.kind.socket,
            Token::KindBlockDevice => &self.kind.block_device,
            Token::KindCharDevice => &self.kind.char_device,

            Token::IndicatorFile => &self.indicator.file,
            Token::IndicatorDir => &self.indicator.dir,
            Token::IndicatorFifo => &self.indicator.fifo,
            Token::IndicatorSocket => &self.indicator.socket,
            Token::IndicatorBlockDevice => &self.indicator.block_device,
            Token::IndicatorCharDevice => &self.indicator.char_device,
            Token::IndicatorSticky => &self.indicator.sticky,
            Token::IndicatorLink => &self.indicator.link,
            Token::Dangling => &self.indicator.dangling,
            Token::NoSize => &self.indicator.no_size,
        }
    }
}
