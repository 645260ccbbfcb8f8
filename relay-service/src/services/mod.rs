pub mod dispatcher;
pub mod image;
pub mod prompts;
pub mod providers;

pub use dispatcher::Dispatcher;
