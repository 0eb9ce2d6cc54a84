//! Misused-word corrections applied to the source text in official-style mode.

use crate::error::Result;
use log::debug;
use regex::{NoExpand, Regex, RegexBuilder};
use std::borrow::Cow;

/// Built-in `(wrong, correct)` pairs, following man-pages(7) usage.
pub const BUILTIN_DICTIONARY: &[(&str, &str)] = &[
    ("bitmask", "bit mask"),
    ("builtin", "built-in"),
    ("epoch", "Epoch"),
    ("file name", "filename"),
    ("file system", "filesystem"),
    ("host name", "hostname"),
    ("i-node", "inode"),
    ("i-nodes", "inodes"),
    ("lower case", "lowercase"),
    ("lower-case", "lowercase"),
    ("upper case", "uppercase"),
    ("upper-case", "uppercase"),
    ("path name", "pathname"),
    ("pseudo-terminal", "pseudoterminal"),
    ("real time", "real-time"),
    ("realtime", "real-time"),
    ("runtime", "run time"),
    ("super user", "superuser"),
    ("super-user", "superuser"),
    ("super block", "superblock"),
    ("super-block", "superblock"),
    ("time stamp", "timestamp"),
    ("time zone", "timezone"),
    ("userspace", "user space"),
    ("user name", "username"),
    ("x86_64", "x86-64"),
    ("zeroes", "zeros"),
    ("32bit", "32-bit"),
    ("Unices", "Unix systems"),
    ("Unixes", "Unix systems"),
    ("man page", "manual page"),
    ("man pages", "manual pages"),
    ("manpage", "manual page"),
    ("manpages", "manual pages"),
    ("minus infinity", "negative infinity"),
    ("non-root", "unprivileged user"),
    ("non-superuser", "unprivileged user"),
    ("nonprivileged", "unprivileged"),
];

/// Case-insensitive whole-word replacements, applied in table order.
#[derive(Debug, Clone)]
pub struct Dictionary {
    entries: Vec<(Regex, String)>,
}

impl Dictionary {
    pub fn new<I, S, T>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, T)>,
        S: AsRef<str>,
        T: Into<String>,
    {
        let entries = pairs
            .into_iter()
            .map(|(wrong, correct)| {
                let pattern = format!(r"\b{}\b", regex::escape(wrong.as_ref()));
                let regex = RegexBuilder::new(&pattern).case_insensitive(true).build()?;
                Ok((regex, correct.into()))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { entries })
    }

    pub fn builtin() -> Result<Self> {
        Self::new(BUILTIN_DICTIONARY.iter().copied())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        let mut out = Cow::Borrowed(text);
        for (regex, correct) in &self.entries {
            let replaced = match regex.replace_all(&out, NoExpand(correct)) {
                Cow::Borrowed(_) => continue,
                Cow::Owned(replaced) => replaced,
            };
            debug!("dictionary: replaced '{}' with '{correct}'", regex.as_str());
            out = Cow::Owned(replaced);
        }
        out
    }
}
