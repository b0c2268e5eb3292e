pub use crate::meta::load_meta;
pub use crate::pack::pack_directory;
pub use crate::source::FileSource;
pub use crate::ticket::{generate_ticket, title_key_from_cetk};
pub use crate::xml::write_meta_xml;

pub mod meta;
pub mod pack;
pub mod source;
pub mod ticket;
pub mod xml;

use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] nspack_core::Error),
    #[error("failed to list directory {}", path.display())]
    Dir { path: PathBuf, source: io::Error },
    #[error("failed to read source file {}", path.display())]
    SourceFile { path: PathBuf, source: io::Error },
    #[error("failed to write output")]
    SinkWrite { source: io::Error },
    #[error(transparent)]
    Xml(#[from] quick_xml::SeError),
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{self}")?;

        let mut source = self.source();
        while let Some(err) = source {
            writeln!(f, "\tCaused by: {err}")?;
            source = err.source();
        }

        Ok(())
    }
}
