pub mod body;
pub mod encode;
pub mod inspect;
