pub mod fetch;
pub mod grade;
pub mod record;
