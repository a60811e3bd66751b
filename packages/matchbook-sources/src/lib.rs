//! Source normalization: delimited exports in, typed staging rows out.

pub mod adv;
pub mod form_d;
pub mod layout;
pub mod reader;
pub mod reg_cf;

mod error;

pub use error::{Error, Result};
pub use layout::{Column, Layout, SourceLayout};
pub use reader::{MAX_WARNING_SAMPLES, Row, RowWarning, SourceReader, SourceStats};
