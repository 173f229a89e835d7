//! OAuth 1.0a signed publishing to the Twitter/X v2 REST API.
//!
//! [`v1::signer`] holds the pure signing functions; [`v1::client::OAuthV1Client`]
//! turns one call into one signed HTTP round trip through an injected
//! [`transport::Transport`]. [`publisher`] decides when an article gets
//! announced.
//!
//! ```no_run
//! # #[cfg(feature = "reqwest")]
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use oauthpost::{Credentials, OAuthV1Client, ReqwestTransport};
//!
//! let credentials = Credentials::new("ck", "cs", "token", "token-secret");
//! let client = OAuthV1Client::new(credentials, ReqwestTransport::new()?);
//! let response = client.post("Hello from Rust")?;
//! println!("{}", response.body());
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "reqwest"))]
//! # fn main() {}
//! ```

pub mod config;
pub mod credentials;
pub mod error;
pub mod logging;
pub mod parameters;
pub mod publisher;
pub mod template;
pub mod transport;
pub mod types;
pub mod v1;

mod util;

pub use credentials::Credentials;
pub use error::{ApiError, ErrorKind};
pub use parameters::{OAuthParameterSet, ParamValue, Payload};
pub use transport::{HttpRequest, HttpResponse, Method, Transport};
pub use v1::client::{ApiResponse, OAuthV1Client};

#[cfg(feature = "reqwest")]
pub use transport::ReqwestTransport;
