// Error types for the form controller.
// A missing required field at submit time is NOT an error: it is reported
// through the focus mechanism in `form`. The variants here only cover
// callers asking for something that does not exist.

use crate::form::Tab;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FormError {
    #[error("{section} entry {index} does not exist (section has {len} entries)")]
    EntryOutOfRange { section: Tab, index: usize, len: usize },
}
