//! File personnalisée : entrées en arène et curseur de lecture

pub mod core;
pub mod entry;
