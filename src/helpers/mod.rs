//! Helper functions shared by the content layer and the CLI

pub mod date;
