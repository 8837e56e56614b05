//! Codecs for every supported value shape.

pub mod array;
pub mod boolean;
pub mod bytes;
pub mod data_enum;
pub mod map;
pub mod numbers;
pub mod option;
pub mod pubkey;
pub mod scalar_enum;
pub mod set;
pub mod structure;
pub mod text;
pub mod tuple;
pub mod unit;
