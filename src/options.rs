use crate::error::MdroffError;
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

/// Section names hidden in official-style mode.
pub const DEFAULT_SUPPRESSED_SECTIONS: &[&str] = &[
    "COPYRIGHT",
    "AUTHOR",
    "AUTHORS",
    "HOMEPAGE",
    "REPORTING BUGS",
];

/// The roff macro package to write for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    #[default]
    Man,
    Mdoc,
    Mm,
    Mom,
    Ms,
}

impl Dialect {
    pub const ALL: [Dialect; 5] = [
        Dialect::Man,
        Dialect::Mdoc,
        Dialect::Mm,
        Dialect::Mom,
        Dialect::Ms,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Dialect::Man => "man",
            Dialect::Mdoc => "mdoc",
            Dialect::Mm => "mm",
            Dialect::Mom => "mom",
            Dialect::Ms => "ms",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = MdroffError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Dialect::ALL
            .into_iter()
            .find(|dialect| dialect.name().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| {
                MdroffError::InvalidOption(format!(
                    "unknown dialect '{value}' (expected man, mdoc, mm, mom or ms)"
                ))
            })
    }
}

/// Which markers switch bold and italic.
///
/// `Standard`: `**`/`__` bold, `*`/`_` italic. `Alternate`: `*`/`**` bold, `_`/`__` italic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmphasisMarkers {
    #[default]
    Standard,
    Alternate,
}

impl FromStr for EmphasisMarkers {
    type Err = MdroffError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "standard" | "std" => Ok(EmphasisMarkers::Standard),
            "alternate" | "alt" => Ok(EmphasisMarkers::Alternate),
            other => Err(MdroffError::InvalidOption(format!(
                "unknown emphasis markers '{other}' (expected standard or alternate)"
            ))),
        }
    }
}

/// How lines of a SYNOPSIS section are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SynopsisStyle {
    /// Only lines carrying a `SYNTAX:` or `COMMAND:` keyword are special.
    #[default]
    Plain,
    /// man: every line is a highlighted command line.
    Highlight,
    /// man: every line starts a `.SY`/`.YS` block.
    Sy,
    /// mdoc: every line starts a `.Nm` block.
    Nm,
}

impl FromStr for SynopsisStyle {
    type Err = MdroffError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "plain" | "0" => Ok(SynopsisStyle::Plain),
            "highlight" | "1" => Ok(SynopsisStyle::Highlight),
            "sy" | "2" => Ok(SynopsisStyle::Sy),
            "nm" | "3" => Ok(SynopsisStyle::Nm),
            other => Err(MdroffError::InvalidOption(format!(
                "unknown synopsis style '{other}' (expected plain, highlight, sy or nm)"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    pub dialect: Dialect,
    /// Hide boilerplate sections and run the dictionary pass.
    pub official: bool,
    pub emphasis: EmphasisMarkers,
    pub synopsis_style: SynopsisStyle,
    pub suppressed_sections: Vec<String>,
    /// Replacement pairs for the dictionary pass; `None` uses the built-in table.
    pub dictionary: Option<Vec<(String, String)>>,
    /// Date stamped into the title block; today when unset.
    pub date: Option<NaiveDate>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            official: false,
            emphasis: EmphasisMarkers::default(),
            synopsis_style: SynopsisStyle::default(),
            suppressed_sections: DEFAULT_SUPPRESSED_SECTIONS
                .iter()
                .map(|name| name.to_string())
                .collect(),
            dictionary: None,
            date: None,
        }
    }
}

impl ConvertOptions {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            ..Self::default()
        }
    }

    pub fn is_suppressed(&self, section: &str) -> bool {
        self.official
            && self
                .suppressed_sections
                .iter()
                .any(|name| name == section)
    }
}
