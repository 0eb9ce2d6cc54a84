use crate::dialect::{Macros, push_text};
use crate::error::Result;
use crate::event::Event;
use log::debug;
use std::io::Write;

/// Owns the output sink. Every byte of the conversion goes through here.
///
/// Block quote depth is reconciled lazily: the scanner records the depth of the line it
/// reads, and the emitter opens or closes quote levels right before the next event it
/// renders. Nothing is written while output is suppressed.
pub struct Emitter<W: Write> {
    out: W,
    macros: &'static dyn Macros,
    scratch: String,
    quote_depth: usize,
    rendered_quote_depth: usize,
    suppressed: bool,
}

impl<W: Write> Emitter<W> {
    pub fn new(out: W, macros: &'static dyn Macros) -> Self {
        Self {
            out,
            macros,
            scratch: String::new(),
            quote_depth: 0,
            rendered_quote_depth: 0,
            suppressed: false,
        }
    }

    pub fn set_suppressed(&mut self, suppressed: bool) {
        if self.suppressed != suppressed {
            debug!("output {}", if suppressed { "suppressed" } else { "resumed" });
        }
        self.suppressed = suppressed;
    }

    pub fn set_quote_depth(&mut self, depth: usize) {
        self.quote_depth = depth;
    }

    /// Writes pre-rendered lines untouched.
    pub fn raw(&mut self, text: &str) -> Result<()> {
        if !self.suppressed {
            self.out.write_all(text.as_bytes())?;
        }
        Ok(())
    }

    /// Writes one line of running text.
    pub fn text(&mut self, line: &str) -> Result<()> {
        if self.suppressed {
            return Ok(());
        }
        self.scratch.clear();
        push_text(&mut self.scratch, line);
        self.out.write_all(self.scratch.as_bytes())?;
        Ok(())
    }

    pub fn emit(&mut self, event: &Event<'_>) -> Result<()> {
        if self.suppressed {
            return Ok(());
        }
        self.scratch.clear();
        self.reconcile_quotes();
        self.macros.render(event, &mut self.scratch);
        self.out.write_all(self.scratch.as_bytes())?;
        Ok(())
    }

    fn reconcile_quotes(&mut self) {
        while self.rendered_quote_depth < self.quote_depth {
            self.macros.render(&Event::QuoteOpen, &mut self.scratch);
            self.rendered_quote_depth += 1;
        }
        while self.rendered_quote_depth > self.quote_depth {
            self.macros.render(&Event::QuoteClose, &mut self.scratch);
            self.rendered_quote_depth -= 1;
        }
    }

    /// Closes any quote level still open, flushes and hands back the sink.
    pub fn finish(mut self) -> Result<W> {
        self.quote_depth = 0;
        self.suppressed = false;
        self.emit(&Event::Sync)?;
        self.out.flush()?;
        Ok(self.out)
    }
}
