// Configuration loading

pub mod credentials;
pub mod session;
pub mod settings;

pub use credentials::{CredentialGate, LoginError, ThrottleState};
pub use session::Session;
pub use settings::Settings;
