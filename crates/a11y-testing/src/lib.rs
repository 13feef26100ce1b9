//! Testing utilities for a11y suite pages.
//!
//! This crate provides:
//! - Scripted keyboard and pointer input replayed against a [`Page`](a11y_widgets::Page)
//! - Deterministic widget fixtures (modal, accordion, tabs, dropdown)
//! - A combined gallery page used by the integration tests

pub mod fixtures;
pub mod input;

pub use fixtures::{
    AccordionFixture, DropdownFixture, Fixtures, Gallery, ModalFixture, TabsFixture,
};
pub use input::{InputPatterns, InputSequence, Step};

use a11y_widgets::ElementId;

/// Error types for replaying input.
#[derive(Debug, thiserror::Error)]
pub enum TestError {
    #[error("No element with id \"{0}\"")]
    NoSuchId(String),

    #[error("Element {0} is not in the document")]
    Detached(ElementId),
}

/// Result type for testing operations.
pub type TestResult<T> = Result<T, TestError>;
