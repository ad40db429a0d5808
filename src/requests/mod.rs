pub mod helper;
pub use self::helper::*;

pub mod options;
pub use self::options::*;

pub mod transport;
pub use self::transport::*;

mod envelope;
pub use self::envelope::Envelope;

mod fetch;
pub use self::fetch::FetchTransport;

pub mod error;
pub use self::error::*;
