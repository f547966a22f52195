mod request_ctx;
mod request_id;


pub use request_ctx::RequestCtx;
pub use request_id::RequestId;
