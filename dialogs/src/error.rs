use storage::StorageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DialogError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Dialog {dialog} cannot resume with {result}")]
    UnexpectedResult {
        dialog: &'static str,
        result: String,
    },

    #[error("Dialog {0} is not waiting for a message")]
    UnexpectedMessage(&'static str),

    #[error("Dialog stack is empty")]
    EmptyStack,
}
