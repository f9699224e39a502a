//! Comment thread orchestration.

mod thread;

pub use thread::{
    COMMENT_FAILED_MESSAGE, CommentSubmitError, CommentSubmitResult, CommentThreadController,
    EMPTY_COMMENT_MESSAGE, UPLOAD_TIMEOUT_MESSAGE,
};
