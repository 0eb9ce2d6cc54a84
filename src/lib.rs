#![forbid(unsafe_code)]
//! mdroff streams Markdown documents into roff for the man, mdoc, mm, mom and ms macro
//! packages.
//!
//! Conversion is a single forward pass: markup is recognized and written to the output
//! as it is read, without building a document tree.
//!
//! # Example
//!
//! ```no_run
//! let markdown = "# mytool 1\n\n## NAME\n\nmytool - an example tool\n";
//! let options = mdroff::ConvertOptions::new(mdroff::Dialect::Man);
//! let roff = mdroff::convert_to_string("mytool", markdown, &options)?;
//! # Ok::<(), mdroff::MdroffError>(())
//! ```

mod block;
pub mod config;
pub mod dialect;
pub mod dictionary;
mod emitter;
pub mod error;
pub mod event;
mod inline;
pub mod normalize;
pub mod options;
mod scanner;
mod state;
pub mod synopsis;
mod table;
mod title;

use std::borrow::Cow;
use std::io::{self, Write};

pub use config::{FileConfig, validate_config_str};
pub use dialect::{Macros, TitleInfo};
pub use dictionary::{BUILTIN_DICTIONARY, Dictionary};
pub use error::{MdroffError, Result};
pub use event::{Align, Event, Font, ListKind};
pub use normalize::squeeze;
pub use options::{
    ConvertOptions, DEFAULT_SUPPRESSED_SECTIONS, Dialect, EmphasisMarkers, SynopsisStyle,
};

/// Converts `source` and writes the roff document to `out`, which is handed back.
///
/// `docname` stands in for the title when the document has no title line. In official
/// mode the text first goes through the dictionary pass.
pub fn convert<W: Write>(
    docname: &str,
    source: &str,
    options: &ConvertOptions,
    out: W,
) -> Result<W> {
    let text = if options.official {
        let dictionary = match &options.dictionary {
            Some(pairs) => Dictionary::new(pairs.iter().map(|(w, c)| (w, c.as_str())))?,
            None => Dictionary::builtin()?,
        };
        dictionary.apply(source)
    } else {
        Cow::Borrowed(source)
    };
    scanner::Scanner::new(&text, options, out).run(docname)
}

pub fn convert_to_string(docname: &str, source: &str, options: &ConvertOptions) -> Result<String> {
    let bytes = convert(docname, source, options, Vec::new())?;
    String::from_utf8(bytes)
        .map_err(|err| MdroffError::Io(io::Error::new(io::ErrorKind::InvalidData, err)))
}
