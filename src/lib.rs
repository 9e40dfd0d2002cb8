// Library root
// -----------
// This crate exposes the resume form as a library so the binary
// (`main.rs`) stays a thin wrapper and the form logic can be tested
// without a terminal.
//
// Module responsibilities:
// - `form`: Records, typed field enums and the `FormState` controller
//   (field updates, appends, tab selection, submit).
// - `sink`: Where submitted resumes go (log, JSON file, in-memory).
// - `config`: Environment-driven settings.
// - `error`: Error types returned by the controller.
// - `ui`: The terminal flow built on `dialoguer`, driving `form`.
pub mod config;
pub mod error;
pub mod form;
pub mod sink;
pub mod ui;
