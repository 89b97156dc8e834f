//! rpnsheet_engine - Postfix spreadsheet evaluation engine.

pub mod engine;
