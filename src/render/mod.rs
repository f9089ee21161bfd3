//! Rendering support
//!
//! Everything visual is expressed through [`Token`]s: semantic slots such as
//! "read bit present" or "high risk". A [`Decorations`] provider maps each
//! slot to an opaque string that may carry ANSI styling. The decoding core
//! never hardcodes escape sequences, so it renders identically under
//! [`Palette::plain`] in tests and [`Palette::colored`] on a terminal.
//!
//! # Example
//!
//! ```
//! use permscope::{Palette, Permissions};
//!
//! let perms = Permissions::from_mode(0o644);
//! assert_eq!(perms.owner().render(&Palette::plain()), "rw-");
//! ```

mod line;
mod palette;
mod renderer;

pub use line::{pad_left, pad_right, strip_ansi, visible_width, LineBuilder};
pub use palette::{IndicatorTokens, KindTokens, ModeTokens, Palette, PermTokens, RiskTokens};
pub use renderer::{ColumnWidths, Renderer};

/// Semantic slot a decoration string is looked up for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    ModeNone,
    ModeSticky,
    ModeSetuid,
    ModeSetgid,
    Link,
    NoLink,

    PermNone,
    PermRead,
    PermWrite,
    PermExec,

    RiskNone,
    RiskLow,
    RiskMedium,
    RiskHigh,

    KindFile,
    KindDir,
    KindFifo,
    KindSocket,
    KindBlockDevice,
    KindCharDevice,

    IndicatorFile,
    IndicatorDir,
    IndicatorFifo,
    IndicatorSocket,
    IndicatorBlockDevice,
    IndicatorCharDevice,
    IndicatorSticky,
    IndicatorLink,
    Dangling,
    NoSize,
}

/// Maps tokens to decoration strings.
pub trait Decorations {
    fn token(&self, token: Token) -> &str;
}

impl<D: Decorations + ?Sized> Decorations for &D {
    fn token(&self, token: Token) -> &str {
        (**self).token(token)
    }
}
