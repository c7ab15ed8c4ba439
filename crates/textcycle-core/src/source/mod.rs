//! Text overlay sources.
//!
//! A source is a named piece of overlay text owned by the streaming application.
//! [`SourceHost`] is the seam between rotation logic and whatever actually
//! displays the text:
//!
//! - [`FileSourceHost`] keeps each source as `<name>.txt` in a directory, which
//!   OBS text sources can read with "Read from file" enabled.
//! - Tests plug in their own in-memory hosts.

mod file;

pub use file::*;

use std::sync::Arc;

use crate::error::Result;

/// Access to the host's text sources.
pub trait SourceHost {
    /// Names of the sources that currently exist, sorted.
    fn list_sources(&self) -> Result<Vec<String>>;

    /// Replace the text shown by `name`.
    ///
    /// Fails with [`crate::Error::SourceNotFound`] when no such source exists.
    fn set_text(&self, name: &str, text: &str) -> Result<()>;

    fn has_source(&self, name: &str) -> Result<bool> {
        Ok(self.list_sources()?.iter().any(|s| s == name))
    }
}

impl<H: SourceHost + ?Sized> SourceHost for &H {
    fn list_sources(&self) -> Result<Vec<String>> {
        (**self).list_sources()
    }

    fn set_text(&self, name: &str, text: &str) -> Result<()> {
        (**self).set_text(name, text)
    }
}

impl<H: SourceHost + ?Sized> SourceHost for Arc<H> {
    fn list_sources(&self) -> Result<Vec<String>> {
        (**self).list_sources()
    }

    fn set_text(&self, name: &str, text: &str) -> Result<()> {
        (**self).set_text(name, text)
    }
}
