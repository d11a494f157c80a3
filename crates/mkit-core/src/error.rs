use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MkitError {
    #[error("index out of range: length {length}, index {index}")]
    IndexOutOfRange { length: usize, index: usize },
}

impl MkitError {
    pub fn index_out_of_range(length: usize, index: usize) -> Self {
        Self::IndexOutOfRange { length, index }
    }
}

pub type Result<T> = std::result::Result<T, MkitError>;
