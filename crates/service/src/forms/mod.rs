//! Form edit state and the CSS classes derived from it.
//!
//! [`EditContext`] records which fields were touched and which carry
//! validation messages; a [`FieldCssClassProvider`] turns that into the class
//! string rendered on the input element.

pub mod css_class;
pub mod edit_context;

use thiserror::Error;

pub use css_class::{
    BootstrapFieldCssClassProvider, CustomCssClassProvider, DefaultFieldCssClassProvider,
    FieldCssClassProvider,
};
pub use edit_context::{EditContext, FieldIdentifier};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("{component} requires an EditContext; attach it from inside a form")]
    MissingEditContext { component: &'static str },
}
