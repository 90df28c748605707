//! Output writers - emit IR as source code.

pub mod kotlin;

pub use kotlin::KotlinWriter;
