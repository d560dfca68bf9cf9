pub mod compose;
pub mod connectivity;
