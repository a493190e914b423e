mod id;
mod minutes;

pub use id::SessionId;
pub use minutes::Minutes;
