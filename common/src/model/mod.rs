pub mod column;
pub mod form;
pub mod template;
