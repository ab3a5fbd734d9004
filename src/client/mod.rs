pub mod http;

pub use http::PollPilotClient;
