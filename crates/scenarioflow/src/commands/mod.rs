pub mod compare;
pub mod test;
pub mod validate;
