//! UI components: form, article, logs.

pub mod article;
pub mod common;
pub mod component;
pub mod form;
pub mod logs;

pub use article::ArticleComponent;
pub use component::*;
pub use form::FormComponent;
pub use logs::LogsComponent;
