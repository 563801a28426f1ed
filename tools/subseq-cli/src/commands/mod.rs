pub mod inspect;
pub mod organize;
